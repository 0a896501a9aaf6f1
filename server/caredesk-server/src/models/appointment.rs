use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::validation::RequestValidation;
use crate::{validate_field, validate_one_of, validate_required};

/// Allowed appointment status values
pub const APPOINTMENT_STATUSES: &[&str] = &["scheduled", "completed", "cancelled", "no-show"];

/// Appointment record
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct Appointment {
    pub id: i64,
    pub appointment_id: String,
    /// Weak reference to the owning patient's internal id
    pub patient_id: i64,
    pub appointment_date: DateTime<Utc>,
    pub department: String,
    pub appointment_type: String,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Appointment booking request; new appointments always start as `scheduled`
#[derive(Debug, Deserialize, ToSchema, Clone)]
pub struct NewAppointment {
    pub patient_id: i64,
    pub appointment_date: DateTime<Utc>,
    pub department: String,
    pub appointment_type: String,
    pub notes: Option<String>,
}

impl RequestValidation for NewAppointment {
    fn validate(&self) -> Result<(), ApiError> {
        validate_field!(self.patient_id, self.patient_id > 0, "Patient ID is required");
        validate_required!(self.department, "Department is required");
        validate_required!(self.appointment_type, "Appointment type is required");
        Ok(())
    }
}

/// Partial appointment update
#[derive(Debug, Deserialize, ToSchema, Clone, Default)]
pub struct UpdateAppointment {
    pub appointment_date: Option<DateTime<Utc>>,
    pub department: Option<String>,
    pub appointment_type: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

impl RequestValidation for UpdateAppointment {
    fn validate(&self) -> Result<(), ApiError> {
        if let Some(ref status) = self.status {
            validate_one_of!(status, APPOINTMENT_STATUSES, "Status");
        }
        Ok(())
    }
}
