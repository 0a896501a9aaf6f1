//! API request handlers, one module per domain

pub mod appointments;
pub mod auth;
pub mod billing;
pub mod dashboard;
pub mod health;
pub mod patients;
pub mod pharmacy;
