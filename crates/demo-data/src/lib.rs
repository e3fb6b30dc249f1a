//! Deterministic hospital demo records for dashboards running without a
//! backend.
//!
//! This crate provides the record shapes exchanged with the hospital REST
//! API together with pure generators that synthesise plausible instances of
//! them. It is independent of the client crate so the generators can be used
//! in fixtures, demos and tests alike.
//!
//! # Overview
//!
//! - [`records`] holds the serde types shared by live responses and
//!   generated data.
//! - [`DemoData`] produces records from a seed and a reference date. The same
//!   inputs always yield identical output, generators never fail and perform
//!   no I/O.
//!
//! # Example
//!
//! ```
//! use demo_data::DemoData;
//!
//! let data = DemoData::default();
//! let stats = data.admin_stats();
//!
//! assert_eq!(stats, data.admin_stats());
//! assert!(stats.doctors_available <= stats.total_doctors);
//! ```

mod generator;
pub mod records;
mod vocabulary;

pub use generator::{
    ACTIVITY_COUNT, BILL_COUNT, DEFAULT_SEED, DIRECTORY_SIZE, DOCTOR_APPOINTMENT_COUNT,
    DOCTOR_PATIENT_COUNT, DemoData, LAB_RESULT_COUNT, MEDICAL_RECORD_COUNT, NOTIFICATION_COUNT,
    PATIENT_APPOINTMENT_COUNT, PRESCRIPTION_COUNT, VITALS_HISTORY_LEN,
};
