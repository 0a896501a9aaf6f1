use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::{api_success, ApiError, ApiResponse};
use crate::models::{Billing, NewBilling, UpdateBilling, PAYMENT_STATUSES};
use crate::server::CareDeskServer;
use crate::validation::RequestValidation;
use crate::validate_one_of;

/// List Bills Query Parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListBillsParams {
    /// Filter by owning patient's internal id
    pub patient_id: Option<i64>,
    /// Filter by payment status (`pending` or `paid`)
    pub payment_status: Option<String>,
}

/// Create a new bill
#[utoipa::path(
    post,
    path = "/api/billing",
    request_body = NewBilling,
    responses(
        (status = 201, description = "Bill created successfully", body = Billing),
        (status = 400, description = "Invalid request")
    ),
    tag = "billing"
)]
pub async fn create_bill(
    State(server): State<CareDeskServer>,
    Json(request): Json<NewBilling>,
) -> Result<(StatusCode, Json<ApiResponse<Billing>>), ApiError> {
    request.validate()?;
    let bill = server.storage.create_bill(request);
    Ok((StatusCode::CREATED, Json(api_success(bill))))
}

/// List bills with optional patient and payment status filters
#[utoipa::path(
    get,
    path = "/api/billing",
    params(ListBillsParams),
    responses(
        (status = 200, description = "Bills retrieved successfully", body = Vec<Billing>),
        (status = 400, description = "Invalid payment status filter")
    ),
    tag = "billing"
)]
pub async fn list_bills(
    State(server): State<CareDeskServer>,
    Query(params): Query<ListBillsParams>,
) -> Result<Json<ApiResponse<Vec<Billing>>>, ApiError> {
    let bills = if let Some(patient_id) = params.patient_id {
        server.storage.bills_for_patient(patient_id)
    } else if let Some(ref payment_status) = params.payment_status {
        validate_one_of!(payment_status, PAYMENT_STATUSES, "Payment status filter");
        server.storage.bills_by_payment_status(payment_status)
    } else {
        server.storage.all_bills()
    };
    Ok(Json(api_success(bills)))
}

/// Get a specific bill
#[utoipa::path(
    get,
    path = "/api/billing/{id}",
    params(
        ("id" = i64, Path, description = "Bill ID")
    ),
    responses(
        (status = 200, description = "Bill retrieved successfully", body = Billing),
        (status = 404, description = "Bill not found")
    ),
    tag = "billing"
)]
pub async fn get_bill(
    State(server): State<CareDeskServer>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Billing>>, ApiError> {
    server
        .storage
        .get_bill(id)
        .map(|bill| Json(api_success(bill)))
        .ok_or_else(|| ApiError::not_found("bill"))
}

/// Update a bill (payment settlement)
#[utoipa::path(
    put,
    path = "/api/billing/{id}",
    params(
        ("id" = i64, Path, description = "Bill ID")
    ),
    request_body = UpdateBilling,
    responses(
        (status = 200, description = "Bill updated successfully", body = Billing),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Bill not found")
    ),
    tag = "billing"
)]
pub async fn update_bill(
    State(server): State<CareDeskServer>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateBilling>,
) -> Result<Json<ApiResponse<Billing>>, ApiError> {
    request.validate()?;
    server
        .storage
        .update_bill(id, request)
        .map(|bill| Json(api_success(bill)))
        .ok_or_else(|| ApiError::not_found("bill"))
}
