//! Startup seed data
//!
//! All state is volatile, so a process restart is a clean re-seed. The
//! seed gives the system a working admin login and a small formulary so
//! the pharmacy and dashboard endpoints return something meaningful on a
//! fresh boot. Everything goes through the ordinary storage interface,
//! so seeded records carry well-formed generated identifiers.

use chrono::NaiveDate;
use tracing::info;

use super::HospitalStorage;
use crate::models::{NewMedication, NewUser};

pub fn seed(storage: &HospitalStorage) {
    storage.create_user(NewUser {
        username: "admin".to_string(),
        password: "admin123".to_string(),
        first_name: "System".to_string(),
        last_name: "Administrator".to_string(),
        role: "admin".to_string(),
    });

    let formulary = [
        ("Paracetamol", "acetaminophen", "analgesic", "500mg", 500, 100, 0.10),
        ("Amoxicillin", "amoxicillin", "antibiotic", "500mg", 200, 50, 0.85),
        ("Ibuprofen", "ibuprofen", "nsaid", "400mg", 300, 75, 0.15),
        ("Lisinopril", "lisinopril", "antihypertensive", "10mg", 150, 40, 0.45),
        ("Metformin", "metformin", "antidiabetic", "850mg", 250, 60, 0.30),
        ("Omeprazole", "omeprazole", "ppi", "20mg", 180, 40, 0.55),
    ];

    for (name, generic, category, strength, stock, reorder, price) in formulary {
        storage.create_medication(NewMedication {
            name: name.to_string(),
            generic_name: generic.to_string(),
            category: category.to_string(),
            strength: strength.to_string(),
            stock_quantity: stock,
            reorder_level: reorder,
            unit_price: price,
            expiry_date: NaiveDate::from_ymd_opt(2027, 12, 31).expect("valid date"),
        });
    }

    info!(
        medications = formulary.len(),
        "Seeded in-memory storage with default admin user and formulary"
    );
}
