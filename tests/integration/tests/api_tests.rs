//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variable: DATABASE_URL
//!
//! Run with: cargo test -p integration-tests --test api_tests

use std::time::Duration;

use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, test_config, TestServer,
};
use reqwest::StatusCode;

/// Issue a short-lived token through the admin endpoint
async fn issue_token(server: &TestServer) -> String {
    let response = server
        .post_admin("/api/qr/generate", &GenerateTokenRequest::short_lived())
        .await
        .unwrap();
    let issued: TokenIssuedResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    issued.token
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// QR Token Tests
// ============================================================================

#[tokio::test]
async fn test_generate_token_requires_admin_key() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    // No key
    let response = server
        .post("/api/qr/generate", &GenerateTokenRequest::short_lived())
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error.code, "MISSING_ADMIN_KEY");

    // Wrong key
    let url = format!("{}/api/qr/generate", server.base_url());
    let response = server
        .client
        .post(&url)
        .header("x-admin-key", "not-the-key")
        .json(&GenerateTokenRequest::short_lived())
        .send()
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error.code, "INVALID_ADMIN_KEY");
}

#[tokio::test]
async fn test_generate_and_validate_token() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post_admin("/api/qr/generate", &GenerateTokenRequest::short_lived())
        .await
        .unwrap();
    let issued: TokenIssuedResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(issued.token.len(), 32);
    assert!(!issued.permanent);
    assert!(issued.expires_at.is_some());
    assert!(issued.valid_for.unwrap() <= 60);

    let response = server
        .post(
            "/api/qr/validate",
            &ValidateTokenRequest {
                token: issued.token.clone(),
            },
        )
        .await
        .unwrap();
    let answer: TokenValidationResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(answer.valid);
    assert_eq!(answer.permanent, Some(false));
    assert!(answer.remaining_time.unwrap() <= 60);
}

#[tokio::test]
async fn test_validate_unknown_token_answers_200() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post(
            "/api/qr/validate",
            &ValidateTokenRequest {
                token: "definitely-not-issued".to_string(),
            },
        )
        .await
        .unwrap();
    let answer: TokenValidationResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!answer.valid);
    assert!(answer.reason.is_some());
    assert!(answer.remaining_time.is_none());
}

#[tokio::test]
async fn test_permanent_token() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post_admin("/api/qr/generate", &GenerateTokenRequest::permanent())
        .await
        .unwrap();
    let issued: TokenIssuedResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert!(issued.permanent);
    assert!(issued.expires_at.is_none());
    assert!(issued.valid_for.is_none());

    let response = server
        .post(
            "/api/qr/validate",
            &ValidateTokenRequest {
                token: issued.token.clone(),
            },
        )
        .await
        .unwrap();
    let answer: TokenValidationResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(answer.valid);
    assert_eq!(answer.permanent, Some(true));
}

// ============================================================================
// Check-in Tests
// ============================================================================

#[tokio::test]
async fn test_first_checkin_credits_one_point() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = issue_token(&server).await;

    let request = CheckinRequest::unique_at_store(&token);
    let response = server.post("/api/loyalty/checkin", &request).await.unwrap();
    let checkin: CheckinResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(!checkin.earned_reward);
    assert_eq!(checkin.customer.total_visits, 1);
    assert_eq!(checkin.customer.current_points, 1);
    assert_eq!(checkin.customer.total_rewards, 0);
    assert_eq!(checkin.points_to_next_reward, 4);
}

#[tokio::test]
async fn test_token_single_use() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = issue_token(&server).await;

    // Token accepted once
    let request = CheckinRequest::unique_at_store(&token);
    let response = server.post("/api/loyalty/checkin", &request).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // Replay rejected
    let response = server.post("/api/loyalty/checkin", &request).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "TOKEN_ALREADY_USED");
}

#[tokio::test]
async fn test_fifth_checkin_earns_reward() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let token = issue_token(&server).await;
    let first = CheckinRequest::unique_at_store(&token);

    let response = server.post("/api/loyalty/checkin", &first).await.unwrap();
    let checkin: CheckinResponse = assert_json(response, StatusCode::OK).await.unwrap();
    let customer_id = checkin.customer.id;

    for visit in 2..=4 {
        let token = issue_token(&server).await;
        let response = server
            .post("/api/loyalty/checkin", &first.with_token(&token))
            .await
            .unwrap();
        let checkin: CheckinResponse = assert_json(response, StatusCode::OK).await.unwrap();
        assert!(!checkin.earned_reward);
        assert_eq!(checkin.customer.total_visits, visit);
    }

    let token = issue_token(&server).await;
    let response = server
        .post("/api/loyalty/checkin", &first.with_token(&token))
        .await
        .unwrap();
    let checkin: CheckinResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(checkin.earned_reward);
    assert_eq!(checkin.customer.total_visits, 5);
    assert_eq!(checkin.customer.current_points, 0);
    assert_eq!(checkin.customer.total_rewards, 1);
    assert!(checkin.message.contains("free coffee"));

    // The reward row is visible on the admin dashboard
    let response = server
        .get_admin("/api/admin/rewards?limit=200")
        .await
        .unwrap();
    let rewards: Vec<RewardResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let reward = rewards
        .iter()
        .find(|r| r.customer_id == customer_id)
        .expect("reward row missing");
    assert_eq!(reward.reward_type, "free_coffee");
    assert_eq!(reward.points_used, 5);
}

#[tokio::test]
async fn test_reward_notification_recorded() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let first_token = issue_token(&server).await;
    let request = CheckinRequest::unique_at_store(&first_token);
    server
        .post("/api/loyalty/checkin", &request)
        .await
        .unwrap();
    for _ in 0..4 {
        let token = issue_token(&server).await;
        server
            .post("/api/loyalty/checkin", &request.with_token(&token))
            .await
            .unwrap();
    }

    // Dispatch runs on a background task
    tokio::time::sleep(Duration::from_millis(300)).await;

    let response = server.get_admin("/api/admin/notifications").await.unwrap();
    let records: Vec<NotificationRecordResponse> =
        assert_json(response, StatusCode::OK).await.unwrap();

    // SMS and email are unconfigured, so the chain falls through to the
    // always-succeeding web log; every attempt is recorded.
    let attempts: Vec<_> = records
        .iter()
        .filter(|r| r.recipient == request.phone || r.message.contains(&request.name))
        .collect();
    assert!(attempts.iter().any(|r| r.channel == "sms" && !r.success));
    assert!(attempts.iter().any(|r| r.channel == "weblog" && r.success));
}

#[tokio::test]
async fn test_checkin_outside_geofence_rejected() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = issue_token(&server).await;

    let mut request = CheckinRequest::unique_at_store(&token);
    request.latitude = Some(STORE_LATITUDE + 0.05); // several kilometers away
    let response = server.post("/api/loyalty/checkin", &request).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "TOO_FAR_FROM_STORE");

    // Rejection happened before settlement: the token is still redeemable
    let mut fixed = request.with_token(&token);
    fixed.latitude = Some(STORE_LATITUDE);
    let response = server.post("/api/loyalty/checkin", &fixed).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_checkin_without_location_rejected() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = issue_token(&server).await;

    let mut request = CheckinRequest::unique_at_store(&token);
    request.latitude = None;
    request.longitude = None;
    let response = server.post("/api/loyalty/checkin", &request).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_checkin_with_unknown_token_rejected() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let request = CheckinRequest::unique_at_store("never-issued-token");
    let response = server.post("/api/loyalty/checkin", &request).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "TOKEN_NOT_FOUND");
}

#[tokio::test]
async fn test_cooldown_answers_429_and_spares_token() {
    if !check_test_env() {
        return;
    }

    let mut config = test_config().unwrap();
    config.loyalty.cooldown_seconds = 300;
    let server = TestServer::start_with_config(config)
        .await
        .expect("Failed to start server");

    let first = issue_token(&server).await;
    let request = CheckinRequest::unique_at_store(&first);
    let response = server.post("/api/loyalty/checkin", &request).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let second = issue_token(&server).await;
    let response = server
        .post("/api/loyalty/checkin", &request.with_token(&second))
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::TOO_MANY_REQUESTS)
        .await
        .unwrap();
    assert_eq!(body.error.code, "TOO_SOON");

    // The settlement rolled back, so the second token was not consumed
    let response = server
        .post(
            "/api/qr/validate",
            &ValidateTokenRequest {
                token: second.clone(),
            },
        )
        .await
        .unwrap();
    let answer: TokenValidationResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(answer.valid);
}

// ============================================================================
// Registration Tests
// ============================================================================

#[tokio::test]
async fn test_register_customer() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    let response = server
        .post("/api/loyalty/register", &request)
        .await
        .unwrap();
    let customer: CustomerResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(customer.phone, request.phone);
    assert_eq!(customer.total_visits, 0);
    assert_eq!(customer.current_points, 0);
    assert_eq!(customer.total_rewards, 0);
}

#[tokio::test]
async fn test_register_duplicate_phone_conflicts() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    server
        .post("/api/loyalty/register", &request)
        .await
        .unwrap();

    let response = server
        .post("/api/loyalty/register", &request)
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(body.error.code, "PHONE_ALREADY_REGISTERED");
}

// ============================================================================
// Admin Dashboard Tests
// ============================================================================

#[tokio::test]
async fn test_admin_reads_require_key() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    for path in [
        "/api/admin/customers",
        "/api/admin/visits",
        "/api/admin/rewards",
        "/api/admin/notifications",
    ] {
        let response = server.get(path).await.unwrap();
        assert_status(response, StatusCode::UNAUTHORIZED)
            .await
            .unwrap_or_else(|e| panic!("{path}: {e}"));
    }
}

#[tokio::test]
async fn test_admin_customer_visit_history() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let token = issue_token(&server).await;
    let request = CheckinRequest::unique_at_store(&token);
    let response = server.post("/api/loyalty/checkin", &request).await.unwrap();
    let checkin: CheckinResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let path = format!("/api/admin/customers/{}/visits", checkin.customer.id);
    let response = server.get_admin(&path).await.unwrap();
    let visits: Vec<VisitResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(visits.len(), 1);
    assert_eq!(visits[0].customer_id, checkin.customer.id);
    assert_eq!(visits[0].points_earned, 1);
}

#[tokio::test]
async fn test_admin_unknown_customer_visits_404() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .get_admin("/api/admin/customers/999999999/visits")
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_admin_customers_listing() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let request = RegisterRequest::unique();
    server
        .post("/api/loyalty/register", &request)
        .await
        .unwrap();

    let response = server
        .get_admin("/api/admin/customers?limit=200")
        .await
        .unwrap();
    let customers: Vec<CustomerResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(customers.iter().any(|c| c.phone == request.phone));
}
