//! Geofence math - coordinates and great-circle distance

mod coordinate;
mod geofence;

pub use coordinate::{haversine_meters, Coordinate};
pub use geofence::{Geofence, GeofenceCheck};
