use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::validation::RequestValidation;
use crate::{validate_field, validate_length, validate_one_of, validate_required};

/// Allowed patient type values
pub const PATIENT_TYPES: &[&str] = &["outpatient", "inpatient"];

/// Patient record
///
/// `patient_id` is the generated business code (`CMH-…`) and never changes
/// after registration. Patients are soft-deleted via `is_active`.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct Patient {
    pub id: i64,
    pub patient_id: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub emergency_contact_relationship: Option<String>,
    pub blood_type: Option<String>,
    pub allergies: Option<String>,
    pub medical_history: Option<String>,
    pub patient_type: String,
    pub ward: Option<String>,
    pub bed: Option<String>,
    pub admission_date: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub registration_date: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Patient registration request
#[derive(Debug, Deserialize, ToSchema, Clone)]
pub struct NewPatient {
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub emergency_contact_relationship: Option<String>,
    pub blood_type: Option<String>,
    pub allergies: Option<String>,
    pub medical_history: Option<String>,
    #[serde(default = "default_patient_type")]
    pub patient_type: String,
}

fn default_patient_type() -> String {
    "outpatient".to_string()
}

impl RequestValidation for NewPatient {
    fn validate(&self) -> Result<(), ApiError> {
        validate_required!(self.first_name, "First name is required");
        validate_required!(self.last_name, "Last name is required");
        validate_required!(self.gender, "Gender is required");
        validate_required!(self.phone, "Phone number is required");

        validate_length!(self.first_name, 1, 100, "First name must be between 1 and 100 characters");
        validate_length!(self.last_name, 1, 100, "Last name must be between 1 and 100 characters");

        validate_one_of!(self.patient_type, PATIENT_TYPES, "Patient type");

        if let Some(ref email) = self.email {
            crate::validate_email!(email, "Invalid email format");
        }

        validate_field!(
            self.date_of_birth,
            self.date_of_birth <= Utc::now().date_naive(),
            "Date of birth cannot be in the future"
        );

        Ok(())
    }
}

/// Partial patient update; the business identifier is never touched
#[derive(Debug, Deserialize, ToSchema, Clone, Default)]
pub struct UpdatePatient {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub emergency_contact_relationship: Option<String>,
    pub blood_type: Option<String>,
    pub allergies: Option<String>,
    pub medical_history: Option<String>,
    pub is_active: Option<bool>,
}

impl RequestValidation for UpdatePatient {
    fn validate(&self) -> Result<(), ApiError> {
        if let Some(ref first_name) = self.first_name {
            validate_length!(first_name, 1, 100, "First name must be between 1 and 100 characters");
        }
        if let Some(ref last_name) = self.last_name {
            validate_length!(last_name, 1, 100, "Last name must be between 1 and 100 characters");
        }
        if let Some(ref email) = self.email {
            crate::validate_email!(email, "Invalid email format");
        }
        Ok(())
    }
}
