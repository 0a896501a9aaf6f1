use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::validation::RequestValidation;
use crate::{validate_field, validate_one_of, validate_required};

/// Allowed prescription status values
pub const PRESCRIPTION_STATUSES: &[&str] = &["active", "completed", "cancelled"];

/// Prescription record
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct Prescription {
    pub id: i64,
    pub prescription_id: String,
    /// Weak reference to the owning patient's internal id
    pub patient_id: i64,
    /// Weak reference to the prescribed medication's internal id
    pub medication_id: i64,
    pub prescribed_by: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
    pub quantity: i32,
    pub status: String,
    pub date_issued: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Prescription issue request; new prescriptions always start as `active`
#[derive(Debug, Deserialize, ToSchema, Clone)]
pub struct NewPrescription {
    pub patient_id: i64,
    pub medication_id: i64,
    pub prescribed_by: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
    pub quantity: i32,
}

impl RequestValidation for NewPrescription {
    fn validate(&self) -> Result<(), ApiError> {
        validate_field!(self.patient_id, self.patient_id > 0, "Patient ID is required");
        validate_field!(self.medication_id, self.medication_id > 0, "Medication ID is required");
        validate_required!(self.prescribed_by, "Prescriber is required");
        validate_required!(self.dosage, "Dosage is required");
        validate_required!(self.frequency, "Frequency is required");
        validate_required!(self.duration, "Duration is required");
        validate_field!(self.quantity, self.quantity > 0, "Quantity must be positive");
        Ok(())
    }
}

/// Partial prescription update
#[derive(Debug, Deserialize, ToSchema, Clone, Default)]
pub struct UpdatePrescription {
    pub dosage: Option<String>,
    pub frequency: Option<String>,
    pub duration: Option<String>,
    pub quantity: Option<i32>,
    pub status: Option<String>,
}

impl RequestValidation for UpdatePrescription {
    fn validate(&self) -> Result<(), ApiError> {
        if let Some(ref status) = self.status {
            validate_one_of!(status, PRESCRIPTION_STATUSES, "Status");
        }
        if let Some(quantity) = self.quantity {
            validate_field!(quantity, quantity > 0, "Quantity must be positive");
        }
        Ok(())
    }
}
