//! In-memory repository for all hospital entity state
//!
//! `HospitalStorage` is the single owner and the only mutator of entity
//! state. Each entity type lives in its own map guarded by a `RwLock`;
//! create/update operations hold the write lock for the whole
//! read-modify-write, so sequential id assignment and the per-month
//! patient code scan cannot race. All state is volatile; a process
//! restart is a clean re-seed.
//!
//! Every operation either returns data or an explicit `None` for an
//! absent id. Absence is translated to 404 at the API boundary; it is
//! not an error here.

pub mod ids;
pub mod seed;

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{
    Appointment, Billing, LabTest, Medication, NewAppointment, NewBilling, NewLabTest,
    NewMedication, NewPatient, NewPrescription, NewUser, Patient, Prescription, UpdateAppointment,
    UpdateBilling, UpdateLabTest, UpdateMedication, UpdatePatient, UpdatePrescription, User,
};

/// Bed occupancy placeholder for the dashboard aggregate.
///
/// The reference system reports a fixed figure here instead of computing
/// a census; the data model carries no bed inventory to compute one from.
pub const BED_OCCUPANCY_PLACEHOLDER: u32 = 75;

/// One entity partition: rows keyed by internal id, plus the id and
/// business-code counters for this entity type. Both counters seed at 1.
struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
    code_counter: u32,
}

impl<T> Table<T> {
    fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
            code_counter: 1,
        }
    }

    /// Take the next internal id and business-code counter value.
    fn next(&mut self) -> (i64, u32) {
        let id = self.next_id;
        self.next_id += 1;
        let counter = self.code_counter;
        self.code_counter += 1;
        (id, counter)
    }
}

impl<T: Clone> Table<T> {
    fn get(&self, id: i64) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    fn all(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }
}

/// Dashboard summary statistics, computed by scanning the live maps
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardStats {
    pub total_patients: usize,
    pub admitted_patients: usize,
    /// Scheduled appointments dated today or later
    pub upcoming_appointments: usize,
    pub pending_lab_tests: usize,
    pub todays_revenue: f64,
    pub low_stock_medications: usize,
    /// Fixed placeholder, not a computed census
    pub bed_occupancy_percent: u32,
}

/// The in-memory store, constructed once at startup and shared via `Arc`
pub struct HospitalStorage {
    users: RwLock<Table<User>>,
    patients: RwLock<Table<Patient>>,
    appointments: RwLock<Table<Appointment>>,
    lab_tests: RwLock<Table<LabTest>>,
    medications: RwLock<Table<Medication>>,
    prescriptions: RwLock<Table<Prescription>>,
    bills: RwLock<Table<Billing>>,
}

impl HospitalStorage {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(Table::new()),
            patients: RwLock::new(Table::new()),
            appointments: RwLock::new(Table::new()),
            lab_tests: RwLock::new(Table::new()),
            medications: RwLock::new(Table::new()),
            prescriptions: RwLock::new(Table::new()),
            bills: RwLock::new(Table::new()),
        }
    }

    // ------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------

    pub fn create_user(&self, new: NewUser) -> User {
        let mut table = self.users.write();
        let (id, _) = table.next();
        let user = User {
            id,
            username: new.username,
            password: new.password,
            first_name: new.first_name,
            last_name: new.last_name,
            role: new.role,
            is_active: true,
            created_at: Utc::now(),
        };
        table.rows.insert(id, user.clone());
        user
    }

    pub fn get_user(&self, id: i64) -> Option<User> {
        self.users.read().get(id)
    }

    pub fn user_by_username(&self, username: &str) -> Option<User> {
        self.users
            .read()
            .rows
            .values()
            .find(|u| u.username == username)
            .cloned()
    }

    pub fn all_users(&self) -> Vec<User> {
        self.users.read().all()
    }

    // ------------------------------------------------------------------
    // Patients
    // ------------------------------------------------------------------

    pub fn create_patient(&self, new: NewPatient) -> Patient {
        let now = Utc::now();
        let mut table = self.patients.write();

        // Per-month sequence: scan of records registered this calendar
        // month, under the same write lock as the insert.
        let seq = 1 + table
            .rows
            .values()
            .filter(|p| {
                p.registration_date.year() == now.year()
                    && p.registration_date.month() == now.month()
            })
            .count() as u32;
        let patient_id = ids::patient_code(&new.first_name, &new.last_name, now, seq);

        let (id, _) = table.next();
        let patient = Patient {
            id,
            patient_id,
            first_name: new.first_name,
            middle_name: new.middle_name,
            last_name: new.last_name,
            date_of_birth: new.date_of_birth,
            gender: new.gender,
            phone: new.phone,
            email: new.email,
            address: new.address,
            emergency_contact_name: new.emergency_contact_name,
            emergency_contact_phone: new.emergency_contact_phone,
            emergency_contact_relationship: new.emergency_contact_relationship,
            blood_type: new.blood_type,
            allergies: new.allergies,
            medical_history: new.medical_history,
            patient_type: new.patient_type,
            ward: None,
            bed: None,
            admission_date: None,
            is_active: true,
            registration_date: now,
            updated_at: now,
        };
        table.rows.insert(id, patient.clone());
        patient
    }

    pub fn get_patient(&self, id: i64) -> Option<Patient> {
        self.patients.read().get(id)
    }

    pub fn update_patient(&self, id: i64, update: UpdatePatient) -> Option<Patient> {
        let mut table = self.patients.write();
        let patient = table.rows.get_mut(&id)?;

        if let Some(v) = update.first_name {
            patient.first_name = v;
        }
        if let Some(v) = update.middle_name {
            patient.middle_name = Some(v);
        }
        if let Some(v) = update.last_name {
            patient.last_name = v;
        }
        if let Some(v) = update.date_of_birth {
            patient.date_of_birth = v;
        }
        if let Some(v) = update.gender {
            patient.gender = v;
        }
        if let Some(v) = update.phone {
            patient.phone = v;
        }
        if let Some(v) = update.email {
            patient.email = Some(v);
        }
        if let Some(v) = update.address {
            patient.address = Some(v);
        }
        if let Some(v) = update.emergency_contact_name {
            patient.emergency_contact_name = Some(v);
        }
        if let Some(v) = update.emergency_contact_phone {
            patient.emergency_contact_phone = Some(v);
        }
        if let Some(v) = update.emergency_contact_relationship {
            patient.emergency_contact_relationship = Some(v);
        }
        if let Some(v) = update.blood_type {
            patient.blood_type = Some(v);
        }
        if let Some(v) = update.allergies {
            patient.allergies = Some(v);
        }
        if let Some(v) = update.medical_history {
            patient.medical_history = Some(v);
        }
        if let Some(v) = update.is_active {
            patient.is_active = v;
        }
        patient.updated_at = Utc::now();
        Some(patient.clone())
    }

    /// Soft delete: the record stays in the map with `is_active = false`
    pub fn deactivate_patient(&self, id: i64) -> Option<Patient> {
        self.update_patient(
            id,
            UpdatePatient {
                is_active: Some(false),
                ..UpdatePatient::default()
            },
        )
    }

    pub fn all_patients(&self) -> Vec<Patient> {
        self.patients.read().all()
    }

    /// Case-insensitive substring match over name, business code, and phone
    pub fn search_patients(&self, query: &str) -> Vec<Patient> {
        let needle = query.to_lowercase();
        self.patients
            .read()
            .rows
            .values()
            .filter(|p| {
                p.first_name.to_lowercase().contains(&needle)
                    || p.last_name.to_lowercase().contains(&needle)
                    || p.patient_id.to_lowercase().contains(&needle)
                    || p.phone.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    pub fn outpatients(&self) -> Vec<Patient> {
        self.patients_of_type("outpatient")
    }

    pub fn inpatients(&self) -> Vec<Patient> {
        self.patients_of_type("inpatient")
    }

    fn patients_of_type(&self, patient_type: &str) -> Vec<Patient> {
        self.patients
            .read()
            .rows
            .values()
            .filter(|p| p.is_active && p.patient_type == patient_type)
            .cloned()
            .collect()
    }

    /// Admit (or move) a patient: sets `inpatient` and stamps
    /// ward/bed/admission date. A second admission overwrites the
    /// previous ward and bed.
    pub fn admit_patient(&self, id: i64, ward: String, bed: String) -> Option<Patient> {
        let mut table = self.patients.write();
        let patient = table.rows.get_mut(&id)?;
        patient.patient_type = "inpatient".to_string();
        patient.ward = Some(ward);
        patient.bed = Some(bed);
        patient.admission_date = Some(Utc::now());
        patient.updated_at = Utc::now();
        Some(patient.clone())
    }

    /// Discharge: back to `outpatient`, ward/bed/admission date cleared
    pub fn discharge_patient(&self, id: i64) -> Option<Patient> {
        let mut table = self.patients.write();
        let patient = table.rows.get_mut(&id)?;
        patient.patient_type = "outpatient".to_string();
        patient.ward = None;
        patient.bed = None;
        patient.admission_date = None;
        patient.updated_at = Utc::now();
        Some(patient.clone())
    }

    // ------------------------------------------------------------------
    // Appointments
    // ------------------------------------------------------------------

    pub fn create_appointment(&self, new: NewAppointment) -> Appointment {
        let now = Utc::now();
        let mut table = self.appointments.write();
        let (id, counter) = table.next();
        let appointment = Appointment {
            id,
            appointment_id: ids::appointment_code(now, counter),
            patient_id: new.patient_id,
            appointment_date: new.appointment_date,
            department: new.department,
            appointment_type: new.appointment_type,
            status: "scheduled".to_string(),
            notes: new.notes,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(id, appointment.clone());
        appointment
    }

    pub fn get_appointment(&self, id: i64) -> Option<Appointment> {
        self.appointments.read().get(id)
    }

    pub fn update_appointment(&self, id: i64, update: UpdateAppointment) -> Option<Appointment> {
        let mut table = self.appointments.write();
        let appointment = table.rows.get_mut(&id)?;
        if let Some(v) = update.appointment_date {
            appointment.appointment_date = v;
        }
        if let Some(v) = update.department {
            appointment.department = v;
        }
        if let Some(v) = update.appointment_type {
            appointment.appointment_type = v;
        }
        if let Some(v) = update.status {
            appointment.status = v;
        }
        if let Some(v) = update.notes {
            appointment.notes = Some(v);
        }
        appointment.updated_at = Utc::now();
        Some(appointment.clone())
    }

    pub fn all_appointments(&self) -> Vec<Appointment> {
        self.appointments.read().all()
    }

    /// Calendar-day equality against the stored date, not a range check
    pub fn appointments_by_date(&self, date: NaiveDate) -> Vec<Appointment> {
        self.appointments
            .read()
            .rows
            .values()
            .filter(|a| a.appointment_date.date_naive() == date)
            .cloned()
            .collect()
    }

    pub fn appointments_for_patient(&self, patient_id: i64) -> Vec<Appointment> {
        self.appointments
            .read()
            .rows
            .values()
            .filter(|a| a.patient_id == patient_id)
            .cloned()
            .collect()
    }

    // ------------------------------------------------------------------
    // Lab tests
    // ------------------------------------------------------------------

    pub fn create_lab_test(&self, new: NewLabTest) -> LabTest {
        let now = Utc::now();
        let mut table = self.lab_tests.write();
        let (id, counter) = table.next();
        let lab_test = LabTest {
            id,
            test_id: ids::lab_test_code(now, counter),
            patient_id: new.patient_id,
            test_type: new.test_type,
            status: "ordered".to_string(),
            urgency: new.urgency,
            results: None,
            order_date: now,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(id, lab_test.clone());
        lab_test
    }

    pub fn get_lab_test(&self, id: i64) -> Option<LabTest> {
        self.lab_tests.read().get(id)
    }

    pub fn update_lab_test(&self, id: i64, update: UpdateLabTest) -> Option<LabTest> {
        let mut table = self.lab_tests.write();
        let lab_test = table.rows.get_mut(&id)?;
        if let Some(v) = update.status {
            lab_test.status = v;
        }
        if let Some(v) = update.urgency {
            lab_test.urgency = v;
        }
        if let Some(v) = update.results {
            lab_test.results = Some(v);
        }
        lab_test.updated_at = Utc::now();
        Some(lab_test.clone())
    }

    pub fn all_lab_tests(&self) -> Vec<LabTest> {
        self.lab_tests.read().all()
    }

    pub fn lab_tests_for_patient(&self, patient_id: i64) -> Vec<LabTest> {
        self.lab_tests
            .read()
            .rows
            .values()
            .filter(|t| t.patient_id == patient_id)
            .cloned()
            .collect()
    }

    pub fn lab_tests_by_status(&self, status: &str) -> Vec<LabTest> {
        self.lab_tests
            .read()
            .rows
            .values()
            .filter(|t| t.status == status)
            .cloned()
            .collect()
    }

    // ------------------------------------------------------------------
    // Medications
    // ------------------------------------------------------------------

    pub fn create_medication(&self, new: NewMedication) -> Medication {
        let now = Utc::now();
        let mut table = self.medications.write();
        let (id, counter) = table.next();
        let medication = Medication {
            id,
            medication_id: ids::medication_code(counter),
            name: new.name,
            generic_name: new.generic_name,
            category: new.category,
            strength: new.strength,
            stock_quantity: new.stock_quantity,
            reorder_level: new.reorder_level,
            unit_price: new.unit_price,
            expiry_date: new.expiry_date,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(id, medication.clone());
        medication
    }

    pub fn get_medication(&self, id: i64) -> Option<Medication> {
        self.medications.read().get(id)
    }

    pub fn update_medication(&self, id: i64, update: UpdateMedication) -> Option<Medication> {
        let mut table = self.medications.write();
        let medication = table.rows.get_mut(&id)?;
        if let Some(v) = update.name {
            medication.name = v;
        }
        if let Some(v) = update.generic_name {
            medication.generic_name = v;
        }
        if let Some(v) = update.category {
            medication.category = v;
        }
        if let Some(v) = update.strength {
            medication.strength = v;
        }
        if let Some(v) = update.stock_quantity {
            medication.stock_quantity = v;
        }
        if let Some(v) = update.reorder_level {
            medication.reorder_level = v;
        }
        if let Some(v) = update.unit_price {
            medication.unit_price = v;
        }
        if let Some(v) = update.expiry_date {
            medication.expiry_date = v;
        }
        if let Some(v) = update.is_active {
            medication.is_active = v;
        }
        medication.updated_at = Utc::now();
        Some(medication.clone())
    }

    pub fn all_medications(&self) -> Vec<Medication> {
        self.medications.read().all()
    }

    /// Case-insensitive substring match over name, generic name, category
    pub fn search_medications(&self, query: &str) -> Vec<Medication> {
        let needle = query.to_lowercase();
        self.medications
            .read()
            .rows
            .values()
            .filter(|m| {
                m.name.to_lowercase().contains(&needle)
                    || m.generic_name.to_lowercase().contains(&needle)
                    || m.category.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    pub fn low_stock_medications(&self) -> Vec<Medication> {
        self.medications
            .read()
            .rows
            .values()
            .filter(|m| m.is_active && m.stock_quantity <= m.reorder_level)
            .cloned()
            .collect()
    }

    // ------------------------------------------------------------------
    // Prescriptions
    // ------------------------------------------------------------------

    pub fn create_prescription(&self, new: NewPrescription) -> Prescription {
        let now = Utc::now();
        let mut table = self.prescriptions.write();
        let (id, counter) = table.next();
        let prescription = Prescription {
            id,
            prescription_id: ids::prescription_code(now, counter),
            patient_id: new.patient_id,
            medication_id: new.medication_id,
            prescribed_by: new.prescribed_by,
            dosage: new.dosage,
            frequency: new.frequency,
            duration: new.duration,
            quantity: new.quantity,
            status: "active".to_string(),
            date_issued: now,
            created_at: now,
        };
        table.rows.insert(id, prescription.clone());
        prescription
    }

    pub fn get_prescription(&self, id: i64) -> Option<Prescription> {
        self.prescriptions.read().get(id)
    }

    pub fn update_prescription(&self, id: i64, update: UpdatePrescription) -> Option<Prescription> {
        let mut table = self.prescriptions.write();
        let prescription = table.rows.get_mut(&id)?;
        if let Some(v) = update.dosage {
            prescription.dosage = v;
        }
        if let Some(v) = update.frequency {
            prescription.frequency = v;
        }
        if let Some(v) = update.duration {
            prescription.duration = v;
        }
        if let Some(v) = update.quantity {
            prescription.quantity = v;
        }
        if let Some(v) = update.status {
            prescription.status = v;
        }
        Some(prescription.clone())
    }

    pub fn all_prescriptions(&self) -> Vec<Prescription> {
        self.prescriptions.read().all()
    }

    pub fn prescriptions_for_patient(&self, patient_id: i64) -> Vec<Prescription> {
        self.prescriptions
            .read()
            .rows
            .values()
            .filter(|p| p.patient_id == patient_id)
            .cloned()
            .collect()
    }

    // ------------------------------------------------------------------
    // Billing
    // ------------------------------------------------------------------

    pub fn create_bill(&self, new: NewBilling) -> Billing {
        let now = Utc::now();
        let mut table = self.bills.write();
        let (id, counter) = table.next();
        let bill = Billing {
            id,
            bill_id: ids::bill_code(now, counter),
            patient_id: new.patient_id,
            service_type: new.service_type,
            description: new.description,
            amount: new.amount,
            discount: new.discount,
            total_amount: new.amount - new.discount,
            payment_status: "pending".to_string(),
            payment_method: None,
            created_at: now,
        };
        table.rows.insert(id, bill.clone());
        bill
    }

    pub fn get_bill(&self, id: i64) -> Option<Billing> {
        self.bills.read().get(id)
    }

    pub fn update_bill(&self, id: i64, update: UpdateBilling) -> Option<Billing> {
        let mut table = self.bills.write();
        let bill = table.rows.get_mut(&id)?;
        if let Some(v) = update.payment_status {
            bill.payment_status = v;
        }
        if let Some(v) = update.payment_method {
            bill.payment_method = Some(v);
        }
        Some(bill.clone())
    }

    pub fn all_bills(&self) -> Vec<Billing> {
        self.bills.read().all()
    }

    pub fn bills_for_patient(&self, patient_id: i64) -> Vec<Billing> {
        self.bills
            .read()
            .rows
            .values()
            .filter(|b| b.patient_id == patient_id)
            .cloned()
            .collect()
    }

    pub fn bills_by_payment_status(&self, payment_status: &str) -> Vec<Billing> {
        self.bills
            .read()
            .rows
            .values()
            .filter(|b| b.payment_status == payment_status)
            .cloned()
            .collect()
    }

    // ------------------------------------------------------------------
    // Dashboard
    // ------------------------------------------------------------------

    pub fn dashboard_stats(&self) -> DashboardStats {
        let today = Utc::now().date_naive();

        let (total_patients, admitted_patients) = {
            let patients = self.patients.read();
            let total = patients.rows.values().filter(|p| p.is_active).count();
            let admitted = patients
                .rows
                .values()
                .filter(|p| p.is_active && p.patient_type == "inpatient")
                .count();
            (total, admitted)
        };

        let upcoming_appointments = self
            .appointments
            .read()
            .rows
            .values()
            .filter(|a| a.status == "scheduled" && a.appointment_date.date_naive() >= today)
            .count();

        let pending_lab_tests = self
            .lab_tests
            .read()
            .rows
            .values()
            .filter(|t| matches!(t.status.as_str(), "ordered" | "collected" | "processing"))
            .count();

        let todays_revenue = self
            .bills
            .read()
            .rows
            .values()
            .filter(|b| b.payment_status == "paid" && b.created_at.date_naive() == today)
            .map(|b| b.total_amount)
            .sum();

        let low_stock_medications = self.low_stock_medications().len();

        DashboardStats {
            total_patients,
            admitted_patients,
            upcoming_appointments,
            pending_lab_tests,
            todays_revenue,
            low_stock_medications,
            bed_occupancy_percent: BED_OCCUPANCY_PLACEHOLDER,
        }
    }

    /// Record counts per collection, for the health endpoint
    pub fn record_counts(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("users", self.users.read().rows.len()),
            ("patients", self.patients.read().rows.len()),
            ("appointments", self.appointments.read().rows.len()),
            ("lab_tests", self.lab_tests.read().rows.len()),
            ("medications", self.medications.read().rows.len()),
            ("prescriptions", self.prescriptions.read().rows.len()),
            ("bills", self.bills.read().rows.len()),
        ]
    }
}

impl Default for HospitalStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn new_patient(first: &str, last: &str) -> NewPatient {
        NewPatient {
            first_name: first.to_string(),
            middle_name: None,
            last_name: last.to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 14).unwrap(),
            gender: "female".to_string(),
            phone: "0712345678".to_string(),
            email: None,
            address: None,
            emergency_contact_name: None,
            emergency_contact_phone: None,
            emergency_contact_relationship: None,
            blood_type: None,
            allergies: None,
            medical_history: None,
            patient_type: "outpatient".to_string(),
        }
    }

    fn new_bill(patient_id: i64, amount: f64) -> NewBilling {
        NewBilling {
            patient_id,
            service_type: "consultation".to_string(),
            description: None,
            amount,
            discount: 0.0,
        }
    }

    #[test]
    fn test_patient_ids_sequence_within_month() {
        let storage = HospitalStorage::new();
        let now = Utc::now();
        let prefix = format!("CMH-{}{:02}", now.year(), now.month());

        let first = storage.create_patient(new_patient("Alice", "Mwangi"));
        let second = storage.create_patient(new_patient("Brian", "Odhiambo"));
        let third = storage.create_patient(new_patient("Carol", "Njeri"));

        assert_eq!(first.patient_id, format!("{}AM001", prefix));
        assert_eq!(second.patient_id, format!("{}BO002", prefix));
        assert_eq!(third.patient_id, format!("{}CN003", prefix));
    }

    #[test]
    fn test_create_then_get_round_trip() {
        let storage = HospitalStorage::new();
        let created = storage.create_patient(new_patient("Alice", "Mwangi"));
        let fetched = storage.get_patient(created.id).unwrap();

        assert_eq!(fetched.first_name, "Alice");
        assert_eq!(fetched.last_name, "Mwangi");
        assert_eq!(fetched.patient_id, created.patient_id);
        assert!(!fetched.patient_id.is_empty());
        assert!(fetched.is_active);
        assert_eq!(fetched.registration_date, created.registration_date);
    }

    #[test]
    fn test_update_nonexistent_does_not_create() {
        let storage = HospitalStorage::new();
        let result = storage.update_patient(
            42,
            UpdatePatient {
                phone: Some("0700000000".to_string()),
                ..UpdatePatient::default()
            },
        );
        assert!(result.is_none());
        assert!(storage.all_patients().is_empty());
    }

    #[test]
    fn test_update_preserves_business_identifier() {
        let storage = HospitalStorage::new();
        let created = storage.create_patient(new_patient("Alice", "Mwangi"));
        let updated = storage
            .update_patient(
                created.id,
                UpdatePatient {
                    last_name: Some("Kamau".to_string()),
                    ..UpdatePatient::default()
                },
            )
            .unwrap();
        assert_eq!(updated.patient_id, created.patient_id);
        assert_eq!(updated.last_name, "Kamau");
    }

    #[test]
    fn test_admit_overwrites_previous_ward() {
        let storage = HospitalStorage::new();
        let patient = storage.create_patient(new_patient("Alice", "Mwangi"));

        let admitted = storage
            .admit_patient(patient.id, "Ward A".to_string(), "A-12".to_string())
            .unwrap();
        assert_eq!(admitted.patient_type, "inpatient");
        assert_eq!(admitted.ward.as_deref(), Some("Ward A"));
        assert!(admitted.admission_date.is_some());

        let moved = storage
            .admit_patient(patient.id, "Ward B".to_string(), "B-03".to_string())
            .unwrap();
        assert_eq!(moved.ward.as_deref(), Some("Ward B"));
        assert_eq!(moved.bed.as_deref(), Some("B-03"));
    }

    #[test]
    fn test_discharge_clears_ward_and_bed() {
        let storage = HospitalStorage::new();
        let patient = storage.create_patient(new_patient("Alice", "Mwangi"));
        storage
            .admit_patient(patient.id, "Ward A".to_string(), "A-12".to_string())
            .unwrap();

        let discharged = storage.discharge_patient(patient.id).unwrap();
        assert_eq!(discharged.patient_type, "outpatient");
        assert!(discharged.ward.is_none());
        assert!(discharged.bed.is_none());
        assert!(discharged.admission_date.is_none());
    }

    #[test]
    fn test_outpatients_and_inpatients_partition_active_patients() {
        let storage = HospitalStorage::new();
        let a = storage.create_patient(new_patient("Alice", "Mwangi"));
        let b = storage.create_patient(new_patient("Brian", "Odhiambo"));
        let c = storage.create_patient(new_patient("Carol", "Njeri"));
        storage
            .admit_patient(b.id, "Ward A".to_string(), "A-01".to_string())
            .unwrap();
        storage.deactivate_patient(c.id).unwrap();

        let outpatients = storage.outpatients();
        let inpatients = storage.inpatients();
        let active: Vec<_> = storage
            .all_patients()
            .into_iter()
            .filter(|p| p.is_active)
            .collect();

        assert_eq!(outpatients.len() + inpatients.len(), active.len());
        assert!(outpatients.iter().any(|p| p.id == a.id));
        assert!(inpatients.iter().any(|p| p.id == b.id));
        assert!(!outpatients.iter().any(|p| p.id == c.id));
    }

    #[test]
    fn test_search_patients_case_insensitive() {
        let storage = HospitalStorage::new();
        storage.create_patient(new_patient("Alice", "Mwangi"));
        storage.create_patient(new_patient("Brian", "Odhiambo"));

        assert_eq!(storage.search_patients("mwangi").len(), 1);
        assert_eq!(storage.search_patients("MWANGI").len(), 1);
        assert_eq!(storage.search_patients("0712").len(), 2);
        assert!(storage.search_patients("zz").is_empty());
    }

    #[test]
    fn test_counter_codes_increment_globally() {
        let storage = HospitalStorage::new();
        let patient = storage.create_patient(new_patient("Alice", "Mwangi"));
        let year = Utc::now().year();

        let first = storage.create_appointment(NewAppointment {
            patient_id: patient.id,
            appointment_date: Utc::now(),
            department: "Cardiology".to_string(),
            appointment_type: "consultation".to_string(),
            notes: None,
        });
        let second = storage.create_appointment(NewAppointment {
            patient_id: patient.id,
            appointment_date: Utc::now(),
            department: "Cardiology".to_string(),
            appointment_type: "follow-up".to_string(),
            notes: None,
        });

        assert_eq!(first.appointment_id, format!("APT-{}-0001", year));
        assert_eq!(second.appointment_id, format!("APT-{}-0002", year));
        assert_eq!(first.status, "scheduled");
    }

    #[test]
    fn test_appointments_by_date_calendar_day_equality() {
        let storage = HospitalStorage::new();
        let patient = storage.create_patient(new_patient("Alice", "Mwangi"));
        let now = Utc::now();

        storage.create_appointment(NewAppointment {
            patient_id: patient.id,
            appointment_date: now,
            department: "Cardiology".to_string(),
            appointment_type: "consultation".to_string(),
            notes: None,
        });
        storage.create_appointment(NewAppointment {
            patient_id: patient.id,
            appointment_date: now + Duration::days(1),
            department: "Cardiology".to_string(),
            appointment_type: "consultation".to_string(),
            notes: None,
        });

        assert_eq!(storage.appointments_by_date(now.date_naive()).len(), 1);
        assert_eq!(
            storage
                .appointments_by_date((now + Duration::days(1)).date_naive())
                .len(),
            1
        );
        assert!(storage
            .appointments_by_date((now - Duration::days(1)).date_naive())
            .is_empty());
    }

    #[test]
    fn test_low_stock_medications() {
        let storage = HospitalStorage::new();
        storage.create_medication(NewMedication {
            name: "Amoxicillin".to_string(),
            generic_name: "amoxicillin".to_string(),
            category: "antibiotic".to_string(),
            strength: "500mg".to_string(),
            stock_quantity: 5,
            reorder_level: 20,
            unit_price: 1.5,
            expiry_date: NaiveDate::from_ymd_opt(2027, 1, 1).unwrap(),
        });
        storage.create_medication(NewMedication {
            name: "Paracetamol".to_string(),
            generic_name: "acetaminophen".to_string(),
            category: "analgesic".to_string(),
            strength: "500mg".to_string(),
            stock_quantity: 500,
            reorder_level: 50,
            unit_price: 0.2,
            expiry_date: NaiveDate::from_ymd_opt(2027, 1, 1).unwrap(),
        });

        let low = storage.low_stock_medications();
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].name, "Amoxicillin");
    }

    #[test]
    fn test_dashboard_revenue_counts_only_todays_paid_bills() {
        let storage = HospitalStorage::new();
        let patient = storage.create_patient(new_patient("Alice", "Mwangi"));

        let paid_today = storage.create_bill(new_bill(patient.id, 1200.0));
        storage
            .update_bill(
                paid_today.id,
                UpdateBilling {
                    payment_status: Some("paid".to_string()),
                    payment_method: Some("cash".to_string()),
                },
            )
            .unwrap();

        // Still pending: excluded
        storage.create_bill(new_bill(patient.id, 300.0));

        // Paid yesterday: excluded
        let stale = storage.create_bill(new_bill(patient.id, 900.0));
        storage
            .update_bill(
                stale.id,
                UpdateBilling {
                    payment_status: Some("paid".to_string()),
                    payment_method: None,
                },
            )
            .unwrap();
        storage
            .bills
            .write()
            .rows
            .get_mut(&stale.id)
            .unwrap()
            .created_at = Utc::now() - Duration::days(1);

        let stats = storage.dashboard_stats();
        assert_eq!(stats.todays_revenue, 1200.0);
        assert_eq!(stats.bed_occupancy_percent, BED_OCCUPANCY_PLACEHOLDER);
    }

    #[test]
    fn test_dashboard_counts_scheduled_appointments_today_or_later() {
        let storage = HospitalStorage::new();
        let patient = storage.create_patient(new_patient("Alice", "Mwangi"));
        let now = Utc::now();

        let appointment = |date| NewAppointment {
            patient_id: patient.id,
            appointment_date: date,
            department: "Cardiology".to_string(),
            appointment_type: "consultation".to_string(),
            notes: None,
        };

        // Today, future-dated, and past: only the first two count
        storage.create_appointment(appointment(now));
        storage.create_appointment(appointment(now + Duration::days(3)));
        storage.create_appointment(appointment(now - Duration::days(1)));

        // Cancelled future appointment: excluded
        let cancelled = storage.create_appointment(appointment(now + Duration::days(5)));
        storage
            .update_appointment(
                cancelled.id,
                UpdateAppointment {
                    status: Some("cancelled".to_string()),
                    ..UpdateAppointment::default()
                },
            )
            .unwrap();

        let stats = storage.dashboard_stats();
        assert_eq!(stats.upcoming_appointments, 2);
    }

    #[test]
    fn test_dashboard_pending_lab_tests() {
        let storage = HospitalStorage::new();
        let patient = storage.create_patient(new_patient("Alice", "Mwangi"));

        let ordered = storage.create_lab_test(NewLabTest {
            patient_id: patient.id,
            test_type: "CBC".to_string(),
            urgency: "routine".to_string(),
        });
        let processing = storage.create_lab_test(NewLabTest {
            patient_id: patient.id,
            test_type: "LFT".to_string(),
            urgency: "urgent".to_string(),
        });
        let done = storage.create_lab_test(NewLabTest {
            patient_id: patient.id,
            test_type: "UEC".to_string(),
            urgency: "routine".to_string(),
        });
        storage
            .update_lab_test(
                processing.id,
                UpdateLabTest {
                    status: Some("processing".to_string()),
                    ..UpdateLabTest::default()
                },
            )
            .unwrap();
        storage
            .update_lab_test(
                done.id,
                UpdateLabTest {
                    status: Some("completed".to_string()),
                    results: Some("within normal limits".to_string()),
                    ..UpdateLabTest::default()
                },
            )
            .unwrap();

        assert_eq!(ordered.status, "ordered");
        let stats = storage.dashboard_stats();
        assert_eq!(stats.pending_lab_tests, 2);
    }

    #[test]
    fn test_bill_total_amount_applies_discount() {
        let storage = HospitalStorage::new();
        let patient = storage.create_patient(new_patient("Alice", "Mwangi"));
        let bill = storage.create_bill(NewBilling {
            patient_id: patient.id,
            service_type: "surgery".to_string(),
            description: Some("appendectomy".to_string()),
            amount: 50000.0,
            discount: 5000.0,
        });
        assert_eq!(bill.total_amount, 45000.0);
        assert_eq!(bill.payment_status, "pending");
        let year = Utc::now().year();
        assert_eq!(bill.bill_id, format!("BILL-{}-0001", year));
    }

    #[test]
    fn test_user_lookup_by_username() {
        let storage = HospitalStorage::new();
        storage.create_user(NewUser {
            username: "admin".to_string(),
            password: "changeme".to_string(),
            first_name: "System".to_string(),
            last_name: "Admin".to_string(),
            role: "admin".to_string(),
        });

        assert!(storage.user_by_username("admin").is_some());
        assert!(storage.user_by_username("nobody").is_none());
    }
}
