use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::validation::RequestValidation;
use crate::{validate_field, validate_length, validate_required};

/// Pharmacy inventory item
///
/// An item is a reorder candidate when `stock_quantity <= reorder_level`.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct Medication {
    pub id: i64,
    pub medication_id: String,
    pub name: String,
    pub generic_name: String,
    pub category: String,
    pub strength: String,
    pub stock_quantity: i32,
    pub reorder_level: i32,
    pub unit_price: f64,
    pub expiry_date: NaiveDate,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Medication creation request
#[derive(Debug, Deserialize, ToSchema, Clone)]
pub struct NewMedication {
    pub name: String,
    pub generic_name: String,
    pub category: String,
    pub strength: String,
    pub stock_quantity: i32,
    pub reorder_level: i32,
    pub unit_price: f64,
    pub expiry_date: NaiveDate,
}

impl RequestValidation for NewMedication {
    fn validate(&self) -> Result<(), ApiError> {
        validate_required!(self.name, "Medication name is required");
        validate_required!(self.generic_name, "Generic name is required");
        validate_required!(self.category, "Category is required");
        validate_required!(self.strength, "Strength is required");

        validate_length!(self.name, 1, 200, "Name must be between 1 and 200 characters");

        validate_field!(self.stock_quantity, self.stock_quantity >= 0, "Stock quantity must not be negative");
        validate_field!(self.reorder_level, self.reorder_level >= 0, "Reorder level must not be negative");
        validate_field!(self.unit_price, self.unit_price >= 0.0, "Unit price must not be negative");

        Ok(())
    }
}

/// Partial medication update
#[derive(Debug, Deserialize, ToSchema, Clone, Default)]
pub struct UpdateMedication {
    pub name: Option<String>,
    pub generic_name: Option<String>,
    pub category: Option<String>,
    pub strength: Option<String>,
    pub stock_quantity: Option<i32>,
    pub reorder_level: Option<i32>,
    pub unit_price: Option<f64>,
    pub expiry_date: Option<NaiveDate>,
    pub is_active: Option<bool>,
}

impl RequestValidation for UpdateMedication {
    fn validate(&self) -> Result<(), ApiError> {
        if let Some(stock_quantity) = self.stock_quantity {
            validate_field!(stock_quantity, stock_quantity >= 0, "Stock quantity must not be negative");
        }
        if let Some(reorder_level) = self.reorder_level {
            validate_field!(reorder_level, reorder_level >= 0, "Reorder level must not be negative");
        }
        if let Some(unit_price) = self.unit_price {
            validate_field!(unit_price, unit_price >= 0.0, "Unit price must not be negative");
        }
        if let Some(ref name) = self.name {
            validate_length!(name, 1, 200, "Name must be between 1 and 200 characters");
        }
        Ok(())
    }
}
