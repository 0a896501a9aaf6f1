//! Business identifier formats
//!
//! Every entity gets a human-readable code alongside its internal numeric
//! id. Patient codes embed the registration year/month, the patient's
//! initials, and a per-month sequence number; all other codes use a plain
//! ever-incrementing counter seeded at 1. The per-month sequence is
//! derived from a scan of the live patient map (not a counter), so the
//! caller must compute it and insert the new record under the same write
//! lock.

use chrono::{DateTime, Datelike, Utc};

/// Patient code: `CMH-{year}{month:02}{initials}{seq:03}`
///
/// Initials are the first letters of the first and last name, uppercased;
/// middle names do not contribute. An empty name part contributes nothing.
pub fn patient_code(first_name: &str, last_name: &str, now: DateTime<Utc>, seq: u32) -> String {
    let mut initials = String::new();
    if let Some(c) = first_name.trim().chars().next() {
        initials.extend(c.to_uppercase());
    }
    if let Some(c) = last_name.trim().chars().next() {
        initials.extend(c.to_uppercase());
    }
    format!("CMH-{}{:02}{}{:03}", now.year(), now.month(), initials, seq)
}

/// Appointment code: `APT-{year}-{counter:04}`
pub fn appointment_code(now: DateTime<Utc>, counter: u32) -> String {
    format!("APT-{}-{:04}", now.year(), counter)
}

/// Lab test code: `LAB-{year}-{counter:04}`
pub fn lab_test_code(now: DateTime<Utc>, counter: u32) -> String {
    format!("LAB-{}-{:04}", now.year(), counter)
}

/// Medication code: `MED-{counter:04}` (no year component)
pub fn medication_code(counter: u32) -> String {
    format!("MED-{:04}", counter)
}

/// Prescription code: `RX-{year}-{counter:04}`
pub fn prescription_code(now: DateTime<Utc>, counter: u32) -> String {
    format!("RX-{}-{:04}", now.year(), counter)
}

/// Bill code: `BILL-{year}-{counter:04}`
pub fn bill_code(now: DateTime<Utc>, counter: u32) -> String {
    format!("BILL-{}-{:04}", now.year(), counter)
}
