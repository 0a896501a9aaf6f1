//! Pharmacy handlers: medication inventory and prescriptions

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::{api_success, ApiError, ApiResponse};
use crate::models::{
    Medication, NewMedication, NewPrescription, Prescription, UpdateMedication, UpdatePrescription,
};
use crate::server::CareDeskServer;
use crate::validation::RequestValidation;

/// List Medications Query Parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListMedicationsParams {
    /// Case-insensitive substring match over name, generic name, category
    pub search: Option<String>,
    /// When true, only items at or below their reorder level
    pub low_stock: Option<bool>,
}

/// List Prescriptions Query Parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListPrescriptionsParams {
    /// Filter by owning patient's internal id
    pub patient_id: Option<i64>,
}

// ============================================================================
// MEDICATIONS
// ============================================================================

/// Add a medication to the inventory
#[utoipa::path(
    post,
    path = "/api/medications",
    request_body = NewMedication,
    responses(
        (status = 201, description = "Medication created successfully", body = Medication),
        (status = 400, description = "Invalid request")
    ),
    tag = "pharmacy"
)]
pub async fn create_medication(
    State(server): State<CareDeskServer>,
    Json(request): Json<NewMedication>,
) -> Result<(StatusCode, Json<ApiResponse<Medication>>), ApiError> {
    request.validate()?;
    let medication = server.storage.create_medication(request);
    Ok((StatusCode::CREATED, Json(api_success(medication))))
}

/// List medications with optional search and low-stock filters
#[utoipa::path(
    get,
    path = "/api/medications",
    params(ListMedicationsParams),
    responses(
        (status = 200, description = "Medications retrieved successfully", body = Vec<Medication>)
    ),
    tag = "pharmacy"
)]
pub async fn list_medications(
    State(server): State<CareDeskServer>,
    Query(params): Query<ListMedicationsParams>,
) -> Result<Json<ApiResponse<Vec<Medication>>>, ApiError> {
    let medications = if let Some(ref query) = params.search {
        server.storage.search_medications(query)
    } else if params.low_stock.unwrap_or(false) {
        server.storage.low_stock_medications()
    } else {
        server.storage.all_medications()
    };
    Ok(Json(api_success(medications)))
}

/// Get a specific medication
#[utoipa::path(
    get,
    path = "/api/medications/{id}",
    params(
        ("id" = i64, Path, description = "Medication ID")
    ),
    responses(
        (status = 200, description = "Medication retrieved successfully", body = Medication),
        (status = 404, description = "Medication not found")
    ),
    tag = "pharmacy"
)]
pub async fn get_medication(
    State(server): State<CareDeskServer>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Medication>>, ApiError> {
    server
        .storage
        .get_medication(id)
        .map(|medication| Json(api_success(medication)))
        .ok_or_else(|| ApiError::not_found("medication"))
}

/// Update a medication (stock adjustments, price changes)
#[utoipa::path(
    put,
    path = "/api/medications/{id}",
    params(
        ("id" = i64, Path, description = "Medication ID")
    ),
    request_body = UpdateMedication,
    responses(
        (status = 200, description = "Medication updated successfully", body = Medication),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Medication not found")
    ),
    tag = "pharmacy"
)]
pub async fn update_medication(
    State(server): State<CareDeskServer>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateMedication>,
) -> Result<Json<ApiResponse<Medication>>, ApiError> {
    request.validate()?;
    server
        .storage
        .update_medication(id, request)
        .map(|medication| Json(api_success(medication)))
        .ok_or_else(|| ApiError::not_found("medication"))
}

// ============================================================================
// PRESCRIPTIONS
// ============================================================================

/// Issue a new prescription
///
/// The medication reference is checked so a prescription is never issued
/// against an id that does not exist in the inventory.
#[utoipa::path(
    post,
    path = "/api/prescriptions",
    request_body = NewPrescription,
    responses(
        (status = 201, description = "Prescription issued successfully", body = Prescription),
        (status = 400, description = "Invalid request or unknown medication")
    ),
    tag = "pharmacy"
)]
pub async fn create_prescription(
    State(server): State<CareDeskServer>,
    Json(request): Json<NewPrescription>,
) -> Result<(StatusCode, Json<ApiResponse<Prescription>>), ApiError> {
    request.validate()?;

    if server.storage.get_medication(request.medication_id).is_none() {
        return Err(ApiError::bad_request(format!(
            "Medication {} does not exist",
            request.medication_id
        )));
    }

    let prescription = server.storage.create_prescription(request);
    Ok((StatusCode::CREATED, Json(api_success(prescription))))
}

/// List prescriptions with optional patient filter
#[utoipa::path(
    get,
    path = "/api/prescriptions",
    params(ListPrescriptionsParams),
    responses(
        (status = 200, description = "Prescriptions retrieved successfully", body = Vec<Prescription>)
    ),
    tag = "pharmacy"
)]
pub async fn list_prescriptions(
    State(server): State<CareDeskServer>,
    Query(params): Query<ListPrescriptionsParams>,
) -> Result<Json<ApiResponse<Vec<Prescription>>>, ApiError> {
    let prescriptions = match params.patient_id {
        Some(patient_id) => server.storage.prescriptions_for_patient(patient_id),
        None => server.storage.all_prescriptions(),
    };
    Ok(Json(api_success(prescriptions)))
}

/// Get a specific prescription
#[utoipa::path(
    get,
    path = "/api/prescriptions/{id}",
    params(
        ("id" = i64, Path, description = "Prescription ID")
    ),
    responses(
        (status = 200, description = "Prescription retrieved successfully", body = Prescription),
        (status = 404, description = "Prescription not found")
    ),
    tag = "pharmacy"
)]
pub async fn get_prescription(
    State(server): State<CareDeskServer>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Prescription>>, ApiError> {
    server
        .storage
        .get_prescription(id)
        .map(|prescription| Json(api_success(prescription)))
        .ok_or_else(|| ApiError::not_found("prescription"))
}

/// Update a prescription (dosage changes, status transitions)
#[utoipa::path(
    put,
    path = "/api/prescriptions/{id}",
    params(
        ("id" = i64, Path, description = "Prescription ID")
    ),
    request_body = UpdatePrescription,
    responses(
        (status = 200, description = "Prescription updated successfully", body = Prescription),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Prescription not found")
    ),
    tag = "pharmacy"
)]
pub async fn update_prescription(
    State(server): State<CareDeskServer>,
    Path(id): Path<i64>,
    Json(request): Json<UpdatePrescription>,
) -> Result<Json<ApiResponse<Prescription>>, ApiError> {
    request.validate()?;
    server
        .storage
        .update_prescription(id, request)
        .map(|prescription| Json(api_success(prescription)))
        .ok_or_else(|| ApiError::not_found("prescription"))
}
