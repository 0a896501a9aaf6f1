use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::{
    handlers::{appointments, auth, billing, dashboard, health, lab_tests, patients, pharmacy},
    server::CareDeskServer,
};

/// Create health check routes
pub fn health_routes() -> Router<CareDeskServer> {
    Router::new().route("/health", get(health::health_check))
}

/// Create authentication and user management routes
pub fn auth_routes() -> Router<CareDeskServer> {
    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/users", get(auth::list_users))
        .route("/users", post(auth::create_user))
        .route("/users/:id", get(auth::get_user))
}

/// Create patient management routes
pub fn patient_routes() -> Router<CareDeskServer> {
    Router::new()
        .route("/patients", get(patients::list_patients))
        .route("/patients", post(patients::create_patient))
        .route("/patients/:id", get(patients::get_patient))
        .route("/patients/:id", put(patients::update_patient))
        .route("/patients/:id", delete(patients::delete_patient))
        .route("/patients/:id/admit", post(patients::admit_patient))
        .route("/patients/:id/discharge", post(patients::discharge_patient))
}

/// Create appointment routes
pub fn appointment_routes() -> Router<CareDeskServer> {
    Router::new()
        .route("/appointments", get(appointments::list_appointments))
        .route("/appointments", post(appointments::create_appointment))
        .route("/appointments/:id", get(appointments::get_appointment))
        .route("/appointments/:id", put(appointments::update_appointment))
}

/// Create lab test routes
pub fn lab_test_routes() -> Router<CareDeskServer> {
    Router::new()
        .route("/lab-tests", get(lab_tests::list_lab_tests))
        .route("/lab-tests", post(lab_tests::create_lab_test))
        .route("/lab-tests/:id", get(lab_tests::get_lab_test))
        .route("/lab-tests/:id", put(lab_tests::update_lab_test))
}

/// Create pharmacy routes (medications + prescriptions)
pub fn pharmacy_routes() -> Router<CareDeskServer> {
    Router::new()
        .route("/medications", get(pharmacy::list_medications))
        .route("/medications", post(pharmacy::create_medication))
        .route("/medications/:id", get(pharmacy::get_medication))
        .route("/medications/:id", put(pharmacy::update_medication))
        .route("/prescriptions", get(pharmacy::list_prescriptions))
        .route("/prescriptions", post(pharmacy::create_prescription))
        .route("/prescriptions/:id", get(pharmacy::get_prescription))
        .route("/prescriptions/:id", put(pharmacy::update_prescription))
}

/// Create billing routes
pub fn billing_routes() -> Router<CareDeskServer> {
    Router::new()
        .route("/billing", get(billing::list_bills))
        .route("/billing", post(billing::create_bill))
        .route("/billing/:id", get(billing::get_bill))
        .route("/billing/:id", put(billing::update_bill))
}

/// Create dashboard routes
pub fn dashboard_routes() -> Router<CareDeskServer> {
    Router::new().route("/dashboard/stats", get(dashboard::dashboard_stats))
}

/// Assemble all routes: `/health` at the root, everything else under `/api`
pub fn create_routes() -> Router<CareDeskServer> {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(patient_routes())
        .merge(appointment_routes())
        .merge(lab_test_routes())
        .merge(pharmacy_routes())
        .merge(billing_routes())
        .merge(dashboard_routes());

    Router::new()
        .merge(health_routes())
        .nest("/api", api_routes)
}
