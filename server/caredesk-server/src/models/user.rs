use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::validation::RequestValidation;
use crate::{validate_field, validate_length, validate_one_of, validate_required};

/// Allowed user roles
pub const USER_ROLES: &[&str] = &["admin", "doctor", "nurse", "receptionist", "pharmacist"];

/// Staff user account
///
/// Passwords are stored as opaque strings and never serialized back to
/// clients; see the `skip_serializing` attribute. Users are never deleted.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// User creation request (admin operation)
#[derive(Debug, Deserialize, ToSchema, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
}

impl RequestValidation for NewUser {
    fn validate(&self) -> Result<(), ApiError> {
        validate_required!(self.username, "Username is required");
        validate_required!(self.password, "Password is required");
        validate_required!(self.first_name, "First name is required");
        validate_required!(self.last_name, "Last name is required");

        validate_length!(self.username, 3, 50, "Username must be between 3 and 50 characters");
        validate_field!(
            self.password,
            self.password.len() >= 6,
            "Password must be at least 6 characters"
        );

        validate_one_of!(self.role, USER_ROLES, "Role");

        Ok(())
    }
}
