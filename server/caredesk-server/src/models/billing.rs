use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::validation::RequestValidation;
use crate::{validate_field, validate_one_of, validate_required};

/// Allowed payment status values
pub const PAYMENT_STATUSES: &[&str] = &["pending", "paid"];

/// Billing record
///
/// `total_amount` is computed at creation as `amount - discount` and is
/// the figure the dashboard revenue aggregate sums.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct Billing {
    pub id: i64,
    pub bill_id: String,
    /// Weak reference to the owning patient's internal id
    pub patient_id: i64,
    pub service_type: String,
    pub description: Option<String>,
    pub amount: f64,
    pub discount: f64,
    pub total_amount: f64,
    pub payment_status: String,
    pub payment_method: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Bill creation request; new bills always start as `pending`
#[derive(Debug, Deserialize, ToSchema, Clone)]
pub struct NewBilling {
    pub patient_id: i64,
    pub service_type: String,
    pub description: Option<String>,
    pub amount: f64,
    #[serde(default)]
    pub discount: f64,
}

impl RequestValidation for NewBilling {
    fn validate(&self) -> Result<(), ApiError> {
        validate_field!(self.patient_id, self.patient_id > 0, "Patient ID is required");
        validate_required!(self.service_type, "Service type is required");
        validate_field!(self.amount, self.amount >= 0.0, "Amount must not be negative");
        validate_field!(
            self.discount,
            self.discount >= 0.0 && self.discount <= self.amount,
            "Discount must be between 0 and the bill amount"
        );
        Ok(())
    }
}

/// Partial billing update (payment settlement)
#[derive(Debug, Deserialize, ToSchema, Clone, Default)]
pub struct UpdateBilling {
    pub payment_status: Option<String>,
    pub payment_method: Option<String>,
}

impl RequestValidation for UpdateBilling {
    fn validate(&self) -> Result<(), ApiError> {
        if let Some(ref payment_status) = self.payment_status {
            validate_one_of!(payment_status, PAYMENT_STATUSES, "Payment status");
        }
        Ok(())
    }
}
