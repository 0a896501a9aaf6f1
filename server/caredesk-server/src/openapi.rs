use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::server::CareDeskServer;

/// Main OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::handlers::health::health_check,

        // Authentication and user management
        crate::handlers::auth::login,
        crate::handlers::auth::create_user,
        crate::handlers::auth::list_users,
        crate::handlers::auth::get_user,

        // Patients
        crate::handlers::patients::create_patient,
        crate::handlers::patients::list_patients,
        crate::handlers::patients::get_patient,
        crate::handlers::patients::update_patient,
        crate::handlers::patients::admit_patient,
        crate::handlers::patients::discharge_patient,
        crate::handlers::patients::delete_patient,

        // Appointments
        crate::handlers::appointments::create_appointment,
        crate::handlers::appointments::list_appointments,
        crate::handlers::appointments::get_appointment,
        crate::handlers::appointments::update_appointment,

        // Lab tests
        crate::handlers::lab_tests::create_lab_test,
        crate::handlers::lab_tests::list_lab_tests,
        crate::handlers::lab_tests::get_lab_test,
        crate::handlers::lab_tests::update_lab_test,

        // Pharmacy
        crate::handlers::pharmacy::create_medication,
        crate::handlers::pharmacy::list_medications,
        crate::handlers::pharmacy::get_medication,
        crate::handlers::pharmacy::update_medication,
        crate::handlers::pharmacy::create_prescription,
        crate::handlers::pharmacy::list_prescriptions,
        crate::handlers::pharmacy::get_prescription,
        crate::handlers::pharmacy::update_prescription,

        // Billing
        crate::handlers::billing::create_bill,
        crate::handlers::billing::list_bills,
        crate::handlers::billing::get_bill,
        crate::handlers::billing::update_bill,

        // Dashboard
        crate::handlers::dashboard::dashboard_stats,
    ),
    components(
        schemas(
            crate::handlers::health::HealthResponse,
            crate::handlers::auth::LoginRequest,
            crate::handlers::patients::AdmitPatientRequest,
            crate::models::User,
            crate::models::NewUser,
            crate::models::Patient,
            crate::models::NewPatient,
            crate::models::UpdatePatient,
            crate::models::Appointment,
            crate::models::NewAppointment,
            crate::models::UpdateAppointment,
            crate::models::LabTest,
            crate::models::NewLabTest,
            crate::models::UpdateLabTest,
            crate::models::Medication,
            crate::models::NewMedication,
            crate::models::UpdateMedication,
            crate::models::Prescription,
            crate::models::NewPrescription,
            crate::models::UpdatePrescription,
            crate::models::Billing,
            crate::models::NewBilling,
            crate::models::UpdateBilling,
            crate::storage::DashboardStats,
        )
    ),
    tags(
        (name = "health", description = "System health endpoints"),
        (name = "auth", description = "Staff authentication"),
        (name = "users", description = "Staff user management"),
        (name = "patients", description = "Patient registration, admission, and records"),
        (name = "appointments", description = "Appointment scheduling"),
        (name = "lab-tests", description = "Lab test ordering and results"),
        (name = "pharmacy", description = "Medication inventory and prescriptions"),
        (name = "billing", description = "Billing and payment settlement"),
        (name = "dashboard", description = "Summary statistics"),
    ),
    info(
        title = "CareDesk HMS API",
        version = "0.1.0",
        description = "Hospital management REST API: patient registration, triage and consultations scheduling, lab tests, pharmacy inventory and prescriptions, billing, and dashboard reporting.",
        contact(
            name = "CareDesk Team",
            email = "team@caredesk.dev",
        ),
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
    ),
)]
pub struct ApiDoc;

/// Mount the swagger UI and the OpenAPI JSON document
pub fn swagger_routes() -> Router<CareDeskServer> {
    Router::new().merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
