use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::error::{api_success, ApiError, ApiResponse};
use crate::models::{NewPatient, Patient, UpdatePatient};
use crate::server::CareDeskServer;
use crate::validation::RequestValidation;
use crate::validate_required;

/// List Patients Query Parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListPatientsParams {
    /// Case-insensitive substring match over name, patient code, and phone
    pub search: Option<String>,
    /// Filter by patient type (`outpatient` or `inpatient`); only active
    /// patients are returned when this filter is set
    #[serde(rename = "type")]
    pub patient_type: Option<String>,
}

/// Admission request
#[derive(Debug, Deserialize, ToSchema)]
pub struct AdmitPatientRequest {
    pub ward: String,
    pub bed: String,
}

impl RequestValidation for AdmitPatientRequest {
    fn validate(&self) -> Result<(), ApiError> {
        validate_required!(self.ward, "Ward is required");
        validate_required!(self.bed, "Bed is required");
        Ok(())
    }
}

/// Register a new patient
#[utoipa::path(
    post,
    path = "/api/patients",
    request_body = NewPatient,
    responses(
        (status = 201, description = "Patient registered successfully", body = Patient),
        (status = 400, description = "Invalid request")
    ),
    tag = "patients"
)]
pub async fn create_patient(
    State(server): State<CareDeskServer>,
    Json(request): Json<NewPatient>,
) -> Result<(StatusCode, Json<ApiResponse<Patient>>), ApiError> {
    request.validate()?;
    let patient = server.storage.create_patient(request);
    tracing::info!(patient_id = %patient.patient_id, "Registered new patient");
    Ok((StatusCode::CREATED, Json(api_success(patient))))
}

/// List patients with optional search and type filters
#[utoipa::path(
    get,
    path = "/api/patients",
    params(ListPatientsParams),
    responses(
        (status = 200, description = "Patients retrieved successfully", body = Vec<Patient>),
        (status = 400, description = "Invalid filter")
    ),
    tag = "patients"
)]
pub async fn list_patients(
    State(server): State<CareDeskServer>,
    Query(params): Query<ListPatientsParams>,
) -> Result<Json<ApiResponse<Vec<Patient>>>, ApiError> {
    let patients = match (params.search, params.patient_type) {
        (Some(query), _) => server.storage.search_patients(&query),
        (None, Some(patient_type)) => match patient_type.as_str() {
            "outpatient" => server.storage.outpatients(),
            "inpatient" => server.storage.inpatients(),
            other => {
                return Err(ApiError::validation(format!(
                    "Unknown patient type filter: {}",
                    other
                )))
            }
        },
        (None, None) => server.storage.all_patients(),
    };
    Ok(Json(api_success(patients)))
}

/// Get a specific patient
#[utoipa::path(
    get,
    path = "/api/patients/{id}",
    params(
        ("id" = i64, Path, description = "Patient ID")
    ),
    responses(
        (status = 200, description = "Patient retrieved successfully", body = Patient),
        (status = 404, description = "Patient not found")
    ),
    tag = "patients"
)]
pub async fn get_patient(
    State(server): State<CareDeskServer>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Patient>>, ApiError> {
    server
        .storage
        .get_patient(id)
        .map(|patient| Json(api_success(patient)))
        .ok_or_else(|| ApiError::not_found("patient"))
}

/// Update a patient's demographic or clinical details
#[utoipa::path(
    put,
    path = "/api/patients/{id}",
    params(
        ("id" = i64, Path, description = "Patient ID")
    ),
    request_body = UpdatePatient,
    responses(
        (status = 200, description = "Patient updated successfully", body = Patient),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Patient not found")
    ),
    tag = "patients"
)]
pub async fn update_patient(
    State(server): State<CareDeskServer>,
    Path(id): Path<i64>,
    Json(request): Json<UpdatePatient>,
) -> Result<Json<ApiResponse<Patient>>, ApiError> {
    request.validate()?;
    server
        .storage
        .update_patient(id, request)
        .map(|patient| Json(api_success(patient)))
        .ok_or_else(|| ApiError::not_found("patient"))
}

/// Admit a patient to a ward
///
/// Re-admitting an already admitted patient overwrites the previous
/// ward and bed assignment.
#[utoipa::path(
    post,
    path = "/api/patients/{id}/admit",
    params(
        ("id" = i64, Path, description = "Patient ID")
    ),
    request_body = AdmitPatientRequest,
    responses(
        (status = 200, description = "Patient admitted successfully", body = Patient),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Patient not found")
    ),
    tag = "patients"
)]
pub async fn admit_patient(
    State(server): State<CareDeskServer>,
    Path(id): Path<i64>,
    Json(request): Json<AdmitPatientRequest>,
) -> Result<Json<ApiResponse<Patient>>, ApiError> {
    request.validate()?;
    let admitted = server
        .storage
        .admit_patient(id, request.ward, request.bed)
        .ok_or_else(|| ApiError::not_found("patient"))?;
    tracing::info!(
        patient_id = %admitted.patient_id,
        ward = admitted.ward.as_deref().unwrap_or_default(),
        "Admitted patient"
    );
    Ok(Json(api_success(admitted)))
}

/// Discharge an admitted patient
#[utoipa::path(
    post,
    path = "/api/patients/{id}/discharge",
    params(
        ("id" = i64, Path, description = "Patient ID")
    ),
    responses(
        (status = 200, description = "Patient discharged successfully", body = Patient),
        (status = 404, description = "Patient not found")
    ),
    tag = "patients"
)]
pub async fn discharge_patient(
    State(server): State<CareDeskServer>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Patient>>, ApiError> {
    server
        .storage
        .discharge_patient(id)
        .map(|patient| Json(api_success(patient)))
        .ok_or_else(|| ApiError::not_found("patient"))
}

/// Soft-delete a patient
///
/// The record is retained with `is_active = false`; nothing is removed
/// from storage.
#[utoipa::path(
    delete,
    path = "/api/patients/{id}",
    params(
        ("id" = i64, Path, description = "Patient ID")
    ),
    responses(
        (status = 200, description = "Patient deactivated successfully", body = Patient),
        (status = 404, description = "Patient not found")
    ),
    tag = "patients"
)]
pub async fn delete_patient(
    State(server): State<CareDeskServer>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Patient>>, ApiError> {
    server
        .storage
        .deactivate_patient(id)
        .map(|patient| Json(api_success(patient)))
        .ok_or_else(|| ApiError::not_found("patient"))
}
