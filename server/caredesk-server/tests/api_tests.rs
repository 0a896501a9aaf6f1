use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use caredesk_server::{create_app, CareDeskServer, ServerConfig};

/// Build a fresh app with seeded storage for each test
fn test_app() -> Router {
    let server = CareDeskServer::new(ServerConfig::default());
    create_app(server)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("GET")
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("POST")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn put_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("PUT")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn sample_patient() -> Value {
    json!({
        "first_name": "Alice",
        "last_name": "Mwangi",
        "date_of_birth": "1990-05-14",
        "gender": "female",
        "phone": "0712345678"
    })
}

#[tokio::test]
async fn test_health_check_reports_collections() {
    let app = test_app();
    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["status"], json!("healthy"));
    // Seeded formulary shows up in the collection counts
    assert!(body["data"]["collections"]["medications"].as_u64().unwrap() >= 6);
}

#[tokio::test]
async fn test_register_patient_returns_201_with_generated_code() {
    let app = test_app();
    let response = app
        .oneshot(post_json("/api/patients", sample_patient()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    let data = &body["data"];
    assert_eq!(data["first_name"], json!("Alice"));
    assert_eq!(data["patient_type"], json!("outpatient"));
    assert_eq!(data["is_active"], json!(true));

    let code = data["patient_id"].as_str().unwrap();
    assert!(code.starts_with("CMH-"), "unexpected code {}", code);
    assert!(code.ends_with("AM001"), "unexpected code {}", code);
    assert!(data["registration_date"].is_string());
}

#[tokio::test]
async fn test_register_patient_missing_fields_returns_400() {
    let app = test_app();
    let response = app
        .oneshot(post_json(
            "/api/patients",
            json!({
                "first_name": "",
                "last_name": "Mwangi",
                "date_of_birth": "1990-05-14",
                "gender": "female",
                "phone": "0712345678"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error_type"], json!("validation_error"));
    assert!(body["error_id"].is_string());
}

#[tokio::test]
async fn test_get_missing_patient_returns_404() {
    let app = test_app();
    let response = app.oneshot(get("/api/patients/999")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["error_type"], json!("not_found"));
}

#[tokio::test]
async fn test_update_missing_patient_returns_404_and_creates_nothing() {
    let app = test_app();
    let response = app
        .clone()
        .oneshot(put_json("/api/patients/7", json!({"phone": "0700000000"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(get("/api/patients")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_admit_then_list_inpatients() {
    let app = test_app();
    let response = app
        .clone()
        .oneshot(post_json("/api/patients", sample_patient()))
        .await
        .unwrap();
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(post_json(
            &format!("/api/patients/{}/admit", id),
            json!({"ward": "Ward A", "bed": "A-12"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["patient_type"], json!("inpatient"));
    assert_eq!(body["data"]["ward"], json!("Ward A"));

    let response = app
        .oneshot(get("/api/patients?type=inpatient"))
        .await
        .unwrap();
    let body = body_json(response).await;
    let inpatients = body["data"].as_array().unwrap();
    assert_eq!(inpatients.len(), 1);
    assert_eq!(inpatients[0]["id"].as_i64().unwrap(), id);
}

#[tokio::test]
async fn test_soft_delete_hides_patient_from_type_filters() {
    let app = test_app();
    let response = app
        .clone()
        .oneshot(post_json("/api/patients", sample_patient()))
        .await
        .unwrap();
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/patients/{}", id))
                .method("DELETE")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["is_active"], json!(false));

    // Gone from the active outpatient view, still fetchable by id
    let body = body_json(
        app.clone()
            .oneshot(get("/api/patients?type=outpatient"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);

    let response = app.oneshot(get(&format!("/api/patients/{}", id))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_with_seeded_admin() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/auth/login",
            json!({"username": "admin", "password": "admin123"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["username"], json!("admin"));
    // Passwords are never serialized back
    assert!(body["data"].get("password").is_none());

    let response = app
        .oneshot(post_json(
            "/api/auth/login",
            json!({"username": "admin", "password": "wrong"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_nonpositive_ids_resolve_to_404() {
    let app = test_app();
    for uri in ["/api/users/0", "/api/users/-1", "/api/patients/0"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "uri {}", uri);
    }
}

#[tokio::test]
async fn test_duplicate_username_returns_409() {
    let app = test_app();
    let user = json!({
        "username": "admin",
        "password": "secret1",
        "first_name": "Another",
        "last_name": "Admin",
        "role": "admin"
    });
    let response = app.oneshot(post_json("/api/users", user)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_appointment_lifecycle() {
    let app = test_app();
    let response = app
        .clone()
        .oneshot(post_json("/api/patients", sample_patient()))
        .await
        .unwrap();
    let patient_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/appointments",
            json!({
                "patient_id": patient_id,
                "appointment_date": "2026-09-01T09:00:00Z",
                "department": "Cardiology",
                "appointment_type": "consultation"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["status"], json!("scheduled"));
    assert!(body["data"]["appointment_id"]
        .as_str()
        .unwrap()
        .starts_with("APT-"));

    // Day-equality date filter
    let body = body_json(
        app.clone()
            .oneshot(get("/api/appointments?date=2026-09-01"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let body = body_json(
        app.clone()
            .oneshot(get("/api/appointments?date=2026-09-02"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);

    // Status transition via partial update
    let response = app
        .clone()
        .oneshot(put_json(
            &format!("/api/appointments/{}", id),
            json!({"status": "completed"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["status"], json!("completed"));

    // Unknown status rejected
    let response = app
        .oneshot(put_json(
            &format!("/api/appointments/{}", id),
            json!({"status": "postponed"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_date_filter_returns_400() {
    let app = test_app();
    let response = app
        .oneshot(get("/api/appointments?date=not-a-date"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_prescription_requires_known_medication() {
    let app = test_app();
    let response = app
        .clone()
        .oneshot(post_json("/api/patients", sample_patient()))
        .await
        .unwrap();
    let patient_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/prescriptions",
            json!({
                "patient_id": patient_id,
                "medication_id": 9999,
                "prescribed_by": "Dr. Otieno",
                "dosage": "500mg",
                "frequency": "tid",
                "duration": "7 days",
                "quantity": 21
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Seeded medication id 1 exists
    let response = app
        .oneshot(post_json(
            "/api/prescriptions",
            json!({
                "patient_id": patient_id,
                "medication_id": 1,
                "prescribed_by": "Dr. Otieno",
                "dosage": "500mg",
                "frequency": "tid",
                "duration": "7 days",
                "quantity": 21
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert!(body["data"]["prescription_id"]
        .as_str()
        .unwrap()
        .starts_with("RX-"));
    assert_eq!(body["data"]["status"], json!("active"));
}

#[tokio::test]
async fn test_billing_settlement_and_dashboard_revenue() {
    let app = test_app();
    let response = app
        .clone()
        .oneshot(post_json("/api/patients", sample_patient()))
        .await
        .unwrap();
    let patient_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/billing",
            json!({
                "patient_id": patient_id,
                "service_type": "consultation",
                "amount": 1500.0,
                "discount": 300.0
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let bill_id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["total_amount"], json!(1200.0));
    assert_eq!(body["data"]["payment_status"], json!("pending"));

    // Pending bills are excluded from revenue
    let body = body_json(app.clone().oneshot(get("/api/dashboard/stats")).await.unwrap()).await;
    assert_eq!(body["data"]["todays_revenue"], json!(0.0));

    let response = app
        .clone()
        .oneshot(put_json(
            &format!("/api/billing/{}", bill_id),
            json!({"payment_status": "paid", "payment_method": "cash"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(app.oneshot(get("/api/dashboard/stats")).await.unwrap()).await;
    assert_eq!(body["data"]["todays_revenue"], json!(1200.0));
    assert_eq!(body["data"]["total_patients"], json!(1));
}

#[tokio::test]
async fn test_medication_search_and_low_stock_filter() {
    let app = test_app();

    let body = body_json(
        app.clone()
            .oneshot(get("/api/medications?search=amox"))
            .await
            .unwrap(),
    )
    .await;
    let matches = body["data"].as_array().unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0]["name"], json!("Amoxicillin"));

    // Drain a seeded item below its reorder level, then it shows up
    let med_id = matches[0]["id"].as_i64().unwrap();
    let response = app
        .clone()
        .oneshot(put_json(
            &format!("/api/medications/{}", med_id),
            json!({"stock_quantity": 3}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(
        app.oneshot(get("/api/medications?low_stock=true"))
            .await
            .unwrap(),
    )
    .await;
    let low = body["data"].as_array().unwrap();
    assert_eq!(low.len(), 1);
    assert_eq!(low[0]["name"], json!("Amoxicillin"));
}

#[tokio::test]
async fn test_lab_test_order_and_result_entry() {
    let app = test_app();
    let response = app
        .clone()
        .oneshot(post_json("/api/patients", sample_patient()))
        .await
        .unwrap();
    let patient_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/lab-tests",
            json!({"patient_id": patient_id, "test_type": "CBC", "urgency": "urgent"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["status"], json!("ordered"));
    assert!(body["data"]["test_id"].as_str().unwrap().starts_with("LAB-"));

    let response = app
        .clone()
        .oneshot(put_json(
            &format!("/api/lab-tests/{}", id),
            json!({"status": "completed", "results": "within normal limits"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["results"], json!("within normal limits"));

    let body = body_json(
        app.oneshot(get(&format!("/api/lab-tests?patient_id={}", patient_id)))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}
