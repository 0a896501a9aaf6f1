use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::{api_success, ApiError, ApiResponse};
use crate::models::{Appointment, NewAppointment, UpdateAppointment};
use crate::server::CareDeskServer;
use crate::validation::RequestValidation;

/// List Appointments Query Parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListAppointmentsParams {
    /// Calendar day to filter on (`YYYY-MM-DD`); matches the stored
    /// appointment date by day equality, not a timestamp range
    pub date: Option<String>,
    /// Filter by owning patient's internal id
    pub patient_id: Option<i64>,
}

/// Book a new appointment
#[utoipa::path(
    post,
    path = "/api/appointments",
    request_body = NewAppointment,
    responses(
        (status = 201, description = "Appointment booked successfully", body = Appointment),
        (status = 400, description = "Invalid request")
    ),
    tag = "appointments"
)]
pub async fn create_appointment(
    State(server): State<CareDeskServer>,
    Json(request): Json<NewAppointment>,
) -> Result<(StatusCode, Json<ApiResponse<Appointment>>), ApiError> {
    request.validate()?;
    let appointment = server.storage.create_appointment(request);
    Ok((StatusCode::CREATED, Json(api_success(appointment))))
}

/// List appointments with optional date and patient filters
#[utoipa::path(
    get,
    path = "/api/appointments",
    params(ListAppointmentsParams),
    responses(
        (status = 200, description = "Appointments retrieved successfully", body = Vec<Appointment>),
        (status = 400, description = "Invalid date filter")
    ),
    tag = "appointments"
)]
pub async fn list_appointments(
    State(server): State<CareDeskServer>,
    Query(params): Query<ListAppointmentsParams>,
) -> Result<Json<ApiResponse<Vec<Appointment>>>, ApiError> {
    let appointments = if let Some(ref date) = params.date {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
            ApiError::validation("Date filter must be in YYYY-MM-DD format")
        })?;
        server.storage.appointments_by_date(date)
    } else if let Some(patient_id) = params.patient_id {
        server.storage.appointments_for_patient(patient_id)
    } else {
        server.storage.all_appointments()
    };
    Ok(Json(api_success(appointments)))
}

/// Get a specific appointment
#[utoipa::path(
    get,
    path = "/api/appointments/{id}",
    params(
        ("id" = i64, Path, description = "Appointment ID")
    ),
    responses(
        (status = 200, description = "Appointment retrieved successfully", body = Appointment),
        (status = 404, description = "Appointment not found")
    ),
    tag = "appointments"
)]
pub async fn get_appointment(
    State(server): State<CareDeskServer>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Appointment>>, ApiError> {
    server
        .storage
        .get_appointment(id)
        .map(|appointment| Json(api_success(appointment)))
        .ok_or_else(|| ApiError::not_found("appointment"))
}

/// Update an appointment (reschedule, status transitions)
#[utoipa::path(
    put,
    path = "/api/appointments/{id}",
    params(
        ("id" = i64, Path, description = "Appointment ID")
    ),
    request_body = UpdateAppointment,
    responses(
        (status = 200, description = "Appointment updated successfully", body = Appointment),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Appointment not found")
    ),
    tag = "appointments"
)]
pub async fn update_appointment(
    State(server): State<CareDeskServer>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateAppointment>,
) -> Result<Json<ApiResponse<Appointment>>, ApiError> {
    request.validate()?;
    server
        .storage
        .update_appointment(id, request)
        .map(|appointment| Json(api_success(appointment)))
        .ok_or_else(|| ApiError::not_found("appointment"))
}
