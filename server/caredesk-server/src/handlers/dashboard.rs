use axum::{extract::State, Json};

use crate::error::{api_success, ApiError, ApiResponse};
use crate::server::CareDeskServer;
use crate::storage::DashboardStats;

/// Dashboard summary statistics
///
/// Counts and sums are computed by scanning the live collections.
/// `bed_occupancy_percent` is a fixed placeholder, not a computed census.
#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    responses(
        (status = 200, description = "Dashboard statistics retrieved successfully", body = DashboardStats)
    ),
    tag = "dashboard"
)]
pub async fn dashboard_stats(
    State(server): State<CareDeskServer>,
) -> Result<Json<ApiResponse<DashboardStats>>, ApiError> {
    Ok(Json(api_success(server.storage.dashboard_stats())))
}
