//! Request validation utilities for consistent validation across handlers
//!
//! This module provides a `RequestValidation` trait and helper macros to
//! centralize validation logic and ensure consistent error messages.

use crate::error::ApiError;

/// Trait for validating request payloads
///
/// Implement this trait for all create/update request types to ensure
/// consistent validation across the API. Returns `Ok(())` if validation
/// passes, or `Err(ApiError)` with a validation error message otherwise.
pub trait RequestValidation {
    /// Validates the request and returns an error if validation fails
    fn validate(&self) -> Result<(), ApiError>;
}

/// Macro for validating fields with custom predicates
///
/// # Usage
///
/// ```ignore
/// validate_field!(self.email, !self.email.trim().is_empty(), "Email is required");
/// validate_field!(self.quantity, self.quantity > 0, "Quantity must be positive");
/// ```
#[macro_export]
macro_rules! validate_field {
    ($field:expr, $predicate:expr, $message:expr) => {
        if !$predicate {
            return Err($crate::error::ApiError::validation($message));
        }
    };
}

/// Macro for validating required fields (non-empty strings)
///
/// # Usage
///
/// ```ignore
/// validate_required!(self.first_name, "First name is required");
/// ```
#[macro_export]
macro_rules! validate_required {
    ($field:expr, $message:expr) => {
        $crate::validate_field!($field, !$field.trim().is_empty(), $message);
    };
}

/// Macro for validating string length
///
/// # Usage
///
/// ```ignore
/// validate_length!(self.name, 2, 100, "Name must be between 2 and 100 characters");
/// ```
#[macro_export]
macro_rules! validate_length {
    ($field:expr, $min:expr, $max:expr, $message:expr) => {
        let len = $field.len();
        $crate::validate_field!($field, len >= $min && len <= $max, $message);
    };
}

/// Macro for validating email format (basic check)
///
/// # Usage
///
/// ```ignore
/// validate_email!(self.email, "Invalid email format");
/// ```
#[macro_export]
macro_rules! validate_email {
    ($field:expr, $message:expr) => {
        $crate::validate_field!($field, $field.contains('@') && $field.contains('.'), $message);
    };
}

/// Macro for validating that a string field is one of an allowed set of values
///
/// # Usage
///
/// ```ignore
/// validate_one_of!(self.status, APPOINTMENT_STATUSES, "status");
/// ```
#[macro_export]
macro_rules! validate_one_of {
    ($field:expr, $allowed:expr, $name:expr) => {
        if !$allowed.contains(&$field.as_str()) {
            return Err($crate::error::ApiError::validation(format!(
                "{} must be one of: {}",
                $name,
                $allowed.join(", ")
            )));
        }
    };
}
