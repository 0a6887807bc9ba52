//! Geofence - a circular boundary around the store coordinate

use crate::error::DomainError;

use super::coordinate::{haversine_meters, Coordinate};

/// A circular geofence around a fixed center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geofence {
    center: Coordinate,
    radius_meters: f64,
}

/// Outcome of a geofence check, carrying the computed distance so
/// rejections can explain themselves
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeofenceCheck {
    pub distance_meters: f64,
    pub within: bool,
}

impl Geofence {
    /// Create a geofence; the radius must be a positive finite number
    pub fn new(center: Coordinate, radius_meters: f64) -> Result<Self, DomainError> {
        if !radius_meters.is_finite() || radius_meters <= 0.0 {
            return Err(DomainError::InvalidCoordinate(format!(
                "geofence radius must be positive, got {radius_meters}"
            )));
        }
        Ok(Self {
            center,
            radius_meters,
        })
    }

    pub fn center(&self) -> Coordinate {
        self.center
    }

    pub fn radius_meters(&self) -> f64 {
        self.radius_meters
    }

    /// Check whether a point lies within the fence
    ///
    /// Pure, no I/O. Whether a *missing* point is acceptable is a policy
    /// decision made by the caller, not here.
    pub fn check(&self, point: Coordinate) -> GeofenceCheck {
        let distance_meters = haversine_meters(self.center, point);
        GeofenceCheck {
            distance_meters,
            within: distance_meters <= self.radius_meters,
        }
    }
}
