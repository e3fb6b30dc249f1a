//! Record shapes exchanged with the hospital backend.
//!
//! The same types decode live JSON responses and carry generated demo data,
//! so a dashboard cannot tell the two apart except through the provenance
//! flag the client attaches. Field names serialise in camelCase to match the
//! REST payloads.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Role attached to an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Hospital administrator.
    Admin,
    /// Treating doctor.
    Doctor,
    /// Registered patient.
    Patient,
}

impl Role {
    /// Lowercase wire name for the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Doctor => "doctor",
            Self::Patient => "patient",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a role name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleParseError {
    value: String,
}

impl RoleParseError {
    /// The rejected input.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for RoleParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role '{}'; expected admin|doctor|patient", self.value)
    }
}

impl std::error::Error for RoleParseError {}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        [Self::Admin, Self::Doctor, Self::Patient]
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| RoleParseError {
                value: trimmed.to_owned(),
            })
    }
}

/// Authenticated user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Backend identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Login email address.
    pub email: String,
    /// Role that selects the dashboard.
    pub role: Role,
}

/// Login response: tokens plus the authenticated profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    /// Short-lived bearer token.
    pub token: String,
    /// Token used to obtain a new bearer token.
    pub refresh_token: String,
    /// Authenticated profile.
    pub user: UserRecord,
}

/// Token refresh response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    /// New bearer token.
    pub token: String,
    /// New refresh token.
    pub refresh_token: String,
}

/// Generic acknowledgement returned by mutating endpoints without a body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Acknowledgement {
    /// Whether the backend accepted the operation.
    pub success: bool,
    /// Human-readable outcome.
    #[serde(default)]
    pub message: String,
}

/// Headline figures for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    /// Registered patients.
    pub total_patients: u32,
    /// Employed doctors.
    pub total_doctors: u32,
    /// Appointments scheduled for today.
    pub appointments_today: u32,
    /// Doctors currently on shift.
    pub doctors_available: u32,
    /// Appointments awaiting confirmation.
    pub pending_appointments: u32,
    /// Occupied beds as a percentage of capacity.
    pub bed_occupancy_percent: u8,
    /// Revenue for the current month in minor currency units.
    pub revenue_this_month: u64,
}

/// Headline figures for a doctor's dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorStats {
    /// Appointments booked today.
    pub todays_appointments: u32,
    /// Patients under the doctor's care.
    pub total_patients: u32,
    /// Lab reports awaiting review.
    pub pending_reports: u32,
    /// Appointments completed today.
    pub completed_today: u32,
}

/// Headline figures for a patient's dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientStats {
    /// Future appointments.
    pub upcoming_appointments: u32,
    /// Prescriptions currently being taken.
    pub active_prescriptions: u32,
    /// Lab results not yet reported.
    pub pending_lab_results: u32,
    /// Unpaid balance in minor currency units.
    pub outstanding_balance: u64,
}

/// Lifecycle of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentStatus {
    /// Booked but not yet confirmed.
    Scheduled,
    /// Confirmed by the clinic.
    Confirmed,
    /// Consultation under way.
    InProgress,
    /// Consultation finished.
    Completed,
    /// Cancelled by either party.
    Cancelled,
}

/// One appointment between a patient and a doctor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    /// Backend identifier.
    pub id: String,
    /// Patient identifier.
    pub patient_id: String,
    /// Patient display name.
    pub patient_name: String,
    /// Doctor identifier.
    pub doctor_id: String,
    /// Doctor display name.
    pub doctor_name: String,
    /// Department hosting the appointment.
    pub department: String,
    /// Calendar date.
    pub date: NaiveDate,
    /// Start time as `HH:MM`.
    pub time: String,
    /// Current status.
    pub status: AppointmentStatus,
    /// Reason for the visit.
    pub reason: String,
}

/// Booking request submitted by a patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRequest {
    /// Patient identifier.
    pub patient_id: String,
    /// Doctor identifier.
    pub doctor_id: String,
    /// Requested date.
    pub date: NaiveDate,
    /// Requested start time as `HH:MM`.
    pub time: String,
    /// Reason for the visit.
    pub reason: String,
}

/// Status change submitted by a doctor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentStatusUpdate {
    /// New status.
    pub status: AppointmentStatus,
}

/// Patient demographics and headline condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Backend identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Age in years.
    pub age: u8,
    /// Recorded gender.
    pub gender: String,
    /// ABO/Rh blood group.
    pub blood_group: String,
    /// Contact phone number.
    pub phone: String,
    /// Contact email address.
    pub email: String,
    /// Most recent visit, if any.
    pub last_visit: Option<NaiveDate>,
    /// Primary condition under treatment.
    pub condition: String,
}

/// Doctor directory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    /// Backend identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Clinical specialisation.
    pub specialization: String,
    /// Department name.
    pub department: String,
    /// Contact email address.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Years in practice.
    pub experience_years: u8,
    /// Whether the doctor is currently on shift.
    pub available: bool,
}

/// Payload for creating or replacing a doctor record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDoctor {
    /// Display name.
    pub name: String,
    /// Clinical specialisation.
    pub specialization: String,
    /// Department name.
    pub department: String,
    /// Contact email address.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Years in practice.
    pub experience_years: u8,
}

/// Hospital department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    /// Backend identifier.
    pub id: String,
    /// Department name.
    pub name: String,
    /// Head of department.
    pub head_of_department: String,
    /// Doctors assigned to the department.
    pub doctor_count: u32,
}

/// One set of vital signs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vitals {
    /// Patient identifier.
    pub patient_id: String,
    /// When the reading was taken.
    pub recorded_at: NaiveDateTime,
    /// Beats per minute.
    pub heart_rate: u16,
    /// Systolic blood pressure in mmHg.
    pub systolic: u16,
    /// Diastolic blood pressure in mmHg.
    pub diastolic: u16,
    /// Body temperature in degrees Celsius.
    pub temperature_celsius: f32,
    /// Peripheral oxygen saturation percentage.
    pub oxygen_saturation: u8,
    /// Breaths per minute.
    pub respiratory_rate: u8,
}

/// Lifecycle of a prescription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrescriptionStatus {
    /// Currently being taken.
    Active,
    /// Course finished.
    Completed,
    /// Stopped early by the prescriber.
    Discontinued,
}

/// Medication prescribed to a patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    /// Backend identifier.
    pub id: String,
    /// Patient identifier.
    pub patient_id: String,
    /// Prescribing doctor identifier.
    pub doctor_id: String,
    /// Prescribing doctor display name.
    pub doctor_name: String,
    /// Medication name.
    pub medication: String,
    /// Dose per administration.
    pub dosage: String,
    /// Administration schedule.
    pub frequency: String,
    /// Length of the course in days.
    pub duration_days: u16,
    /// Issue date.
    pub issued_on: NaiveDate,
    /// Current status.
    pub status: PrescriptionStatus,
    /// Free-text instructions.
    pub notes: Option<String>,
}

/// Prescription submitted by a doctor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPrescription {
    /// Patient identifier.
    pub patient_id: String,
    /// Prescribing doctor identifier.
    pub doctor_id: String,
    /// Medication name.
    pub medication: String,
    /// Dose per administration.
    pub dosage: String,
    /// Administration schedule.
    pub frequency: String,
    /// Length of the course in days.
    pub duration_days: u16,
    /// Free-text instructions.
    pub notes: Option<String>,
}

/// Interpretation of a lab result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabResultStatus {
    /// Within the reference range.
    Normal,
    /// Outside the reference range.
    Abnormal,
    /// Sample collected, result not yet reported.
    Pending,
}

/// One laboratory test result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabResult {
    /// Backend identifier.
    pub id: String,
    /// Patient identifier.
    pub patient_id: String,
    /// Test name.
    pub test_name: String,
    /// Reported value with units.
    pub value: String,
    /// Reference range with units.
    pub reference_range: String,
    /// Interpretation.
    pub status: LabResultStatus,
    /// Sample collection date.
    pub collected_on: NaiveDate,
}

/// Visit summary in a patient's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecord {
    /// Backend identifier.
    pub id: String,
    /// Patient identifier.
    pub patient_id: String,
    /// Attending doctor display name.
    pub doctor_name: String,
    /// Recorded diagnosis.
    pub diagnosis: String,
    /// Treatment given.
    pub treatment: String,
    /// Visit date.
    pub visit_date: NaiveDate,
}

/// Payment state of a bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    /// Settled in full.
    Paid,
    /// Issued and not yet due.
    Pending,
    /// Past its due date.
    Overdue,
}

/// One bill issued to a patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    /// Backend identifier.
    pub id: String,
    /// Patient identifier.
    pub patient_id: String,
    /// Billed service.
    pub description: String,
    /// Amount in minor currency units.
    pub amount: u64,
    /// Issue date.
    pub issued_on: NaiveDate,
    /// Payment state.
    pub status: BillStatus,
}

/// Hospital-wide billing totals for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingSummary {
    /// Total billed this month in minor currency units.
    pub total_billed: u64,
    /// Total collected this month in minor currency units.
    pub total_collected: u64,
    /// Bills past their due date.
    pub overdue_bills: u32,
}

/// In-app notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Backend identifier.
    pub id: String,
    /// Short headline.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Whether the user has seen it.
    pub read: bool,
    /// Creation timestamp.
    pub created_at: NaiveDateTime,
}

/// Audit-trail entry shown on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    /// Backend identifier.
    pub id: String,
    /// Who performed the action.
    pub actor: String,
    /// What was done.
    pub action: String,
    /// When it happened.
    pub occurred_at: NaiveDateTime,
}

/// One weekly consultation slot in a doctor's schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSlot {
    /// Weekday name.
    pub day: String,
    /// Start time as `HH:MM`.
    pub start: String,
    /// End time as `HH:MM`.
    pub end: String,
    /// Whether the slot is open for booking.
    pub available: bool,
}
