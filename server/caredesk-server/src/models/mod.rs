//! Domain entity records and storage input types
//!
//! Every entity carries an internal sequential `id`, a generated
//! human-readable business identifier, and server-stamped timestamps.
//! `New*` types are what handlers pass to storage after validation;
//! `Update*` types are all-optional partial updates.

pub mod appointment;
pub mod billing;
pub mod medication;
pub mod patient;
pub mod prescription;
pub mod user;

pub use appointment::{Appointment, NewAppointment, UpdateAppointment, APPOINTMENT_STATUSES};
pub use billing::{Billing, NewBilling, UpdateBilling, PAYMENT_STATUSES};
pub use lab_test::{LabTest, NewLabTest, UpdateLabTest, LAB_TEST_STATUSES, LAB_URGENCY_LEVELS};
pub use medication::{Medication, NewMedication, UpdateMedication};
pub use patient::{NewPatient, Patient, UpdatePatient, PATIENT_TYPES};
pub use prescription::{NewPrescription, Prescription, UpdatePrescription, PRESCRIPTION_STATUSES};
pub use user::{NewUser, User, USER_ROLES};
