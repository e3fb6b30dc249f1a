//! Deterministic fallback record generation.
//!
//! Each generator seeds its own ChaCha8 stream from the configured seed, a
//! per-record-kind salt and the caller's key (a doctor or patient id, say).
//! Output therefore depends only on those inputs and never on which
//! generators ran before, which keeps every generator pure.

mod admin;
mod clinical;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use fake::Fake;
use fake::faker::name::raw::{FirstName, LastName};
use fake::locales::EN;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

use crate::vocabulary::QUARTER_HOURS;

/// Seed used when no explicit seed is configured.
pub const DEFAULT_SEED: u64 = 2024;

/// Appointments generated for one doctor.
pub const DOCTOR_APPOINTMENT_COUNT: usize = 5;

/// Appointments generated for one patient.
pub const PATIENT_APPOINTMENT_COUNT: usize = 4;

/// Patients generated for one doctor's caseload.
pub const DOCTOR_PATIENT_COUNT: usize = 8;

/// Daily readings in a generated vitals history.
pub const VITALS_HISTORY_LEN: usize = 7;

/// Prescriptions generated for one patient.
pub const PRESCRIPTION_COUNT: usize = 4;

/// Lab results generated for one patient.
pub const LAB_RESULT_COUNT: usize = 6;

/// Visit summaries generated for one patient.
pub const MEDICAL_RECORD_COUNT: usize = 3;

/// Bills generated for one patient.
pub const BILL_COUNT: usize = 4;

/// Entries in generated admin directories (doctors, patients, appointments).
pub const DIRECTORY_SIZE: usize = 10;

/// Notifications generated for the signed-in user.
pub const NOTIFICATION_COUNT: usize = 5;

/// Entries in the generated admin activity feed.
pub const ACTIVITY_COUNT: usize = 6;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Salts that keep the random streams of different record kinds apart.
#[derive(Debug, Clone, Copy)]
enum RecordKind {
    AdminStats = 1,
    DoctorStats,
    PatientStats,
    Appointments,
    Patients,
    Doctors,
    Departments,
    Vitals,
    Prescriptions,
    LabResults,
    MedicalRecords,
    Bills,
    Billing,
    Notifications,
    Activity,
    Schedule,
    Session,
    Person,
    Echo,
}

/// Deterministic source of plausible hospital records.
///
/// Generators never fail and perform no I/O. Dates are laid out around the
/// configured reference date, so pinning both the seed and the date pins the
/// whole output.
///
/// # Example
///
/// ```
/// use demo_data::{DOCTOR_APPOINTMENT_COUNT, DemoData};
///
/// let data = DemoData::default();
/// let appointments = data.doctor_appointments("doc1");
///
/// assert_eq!(appointments.len(), DOCTOR_APPOINTMENT_COUNT);
/// assert_eq!(appointments, data.doctor_appointments("doc1"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoData {
    seed: u64,
    reference_date: NaiveDate,
}

impl Default for DemoData {
    fn default() -> Self {
        let reference_date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap_or(NaiveDate::MIN);
        Self::new(DEFAULT_SEED, reference_date)
    }
}

impl DemoData {
    /// Build a generator pinned to `seed` and `reference_date`.
    #[must_use]
    pub const fn new(seed: u64, reference_date: NaiveDate) -> Self {
        Self {
            seed,
            reference_date,
        }
    }

    /// Seed mixed into every generator.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Date treated as "today" by the generators.
    #[must_use]
    pub const fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    /// Stable display name for a doctor id, prefixed with `Dr.`.
    #[must_use]
    pub fn doctor_name(&self, doctor_id: &str) -> String {
        let mut rng = self.rng(RecordKind::Person, doctor_id);
        format!("Dr. {}", person_name(&mut rng))
    }

    /// Stable display name for a patient id.
    #[must_use]
    pub fn patient_name(&self, patient_id: &str) -> String {
        let mut rng = self.rng(RecordKind::Person, patient_id);
        person_name(&mut rng)
    }

    fn rng(&self, kind: RecordKind, key: &str) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(mix_seed(self.seed, kind as u64, key))
    }

    fn days_from_reference(&self, offset: i64) -> NaiveDate {
        TimeDelta::try_days(offset)
            .and_then(|delta| self.reference_date.checked_add_signed(delta))
            .unwrap_or(self.reference_date)
    }
}

/// Fold the seed, salt and key into one 64-bit seed using FNV-1a.
fn mix_seed(seed: u64, salt: u64, key: &str) -> u64 {
    let mut hash = FNV_OFFSET ^ seed.rotate_left(17) ^ salt.wrapping_mul(FNV_PRIME);
    for byte in key.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

fn record_id(rng: &mut ChaCha8Rng) -> String {
    Uuid::from_u128(rng.random()).to_string()
}

fn person_name(rng: &mut ChaCha8Rng) -> String {
    let first: String = FirstName(EN).fake_with_rng(rng);
    let last: String = LastName(EN).fake_with_rng(rng);
    format!("{first} {last}")
}

#[expect(
    clippy::indexing_slicing,
    reason = "N is non-zero and the index is drawn below N"
)]
fn pick<T: Copy, const N: usize>(rng: &mut ChaCha8Rng, options: &[T; N]) -> T {
    const { assert!(N > 0, "vocabulary must not be empty") };
    options[rng.random_range(0..N)]
}

fn clock_time(rng: &mut ChaCha8Rng) -> (u32, u32) {
    (rng.random_range(8..17), pick(rng, QUARTER_HOURS))
}

fn format_time(hour: u32, minute: u32) -> String {
    format!("{hour:02}:{minute:02}")
}

fn at(date: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
    date.and_time(NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN))
}

fn phone_number(rng: &mut ChaCha8Rng) -> String {
    format!(
        "+1-555-{:03}-{:04}",
        rng.random_range(100..1000),
        rng.random_range(0..10_000)
    )
}

fn email_for(name: &str) -> String {
    let local = name
        .split_whitespace()
        .map(|part| {
            part.chars()
                .filter(char::is_ascii_alphanumeric)
                .collect::<String>()
                .to_ascii_lowercase()
        })
        .filter(|part| !part.is_empty() && part != "dr")
        .collect::<Vec<_>>()
        .join(".");
    format!("{local}@example.org")
}

#[expect(
    clippy::float_arithmetic,
    reason = "tenths are scaled once for display values"
)]
fn tenths_to_f32(tenths: u16) -> f32 {
    f32::from(tenths) / 10.0
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn mix_seed_separates_kinds_and_keys() {
        let base = mix_seed(DEFAULT_SEED, RecordKind::Appointments as u64, "doc1");
        assert_ne!(
            base,
            mix_seed(DEFAULT_SEED, RecordKind::Patients as u64, "doc1")
        );
        assert_ne!(
            base,
            mix_seed(DEFAULT_SEED, RecordKind::Appointments as u64, "doc2")
        );
        assert_eq!(
            base,
            mix_seed(DEFAULT_SEED, RecordKind::Appointments as u64, "doc1")
        );
    }

    #[rstest]
    #[case("Dr. Ada Lovelace", "ada.lovelace@example.org")]
    #[case("Grace  O'Hara", "grace.ohara@example.org")]
    fn email_is_derived_from_name(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(email_for(name), expected);
    }

    #[test]
    fn names_are_stable_per_id() {
        let data = DemoData::default();
        assert_eq!(data.doctor_name("doc1"), data.doctor_name("doc1"));
        assert!(data.doctor_name("doc1").starts_with("Dr. "));
        assert_eq!(data.patient_name("p1"), data.patient_name("p1"));
    }

    #[test]
    fn reference_offsets_move_in_days() {
        let data = DemoData::default();
        let tomorrow = data.days_from_reference(1);
        assert_eq!(
            tomorrow.signed_duration_since(data.reference_date()),
            TimeDelta::days(1)
        );
    }

    #[test]
    fn clock_times_fall_within_clinic_hours() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..50 {
            let (hour, minute) = clock_time(&mut rng);
            assert!((8..17).contains(&hour));
            assert!(QUARTER_HOURS.contains(&minute));
        }
    }

    #[test]
    fn pick_reaches_every_entry() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut seen = [false; 4];
        for _ in 0..200 {
            let minute = pick(&mut rng, QUARTER_HOURS);
            let slot = QUARTER_HOURS.iter().position(|candidate| *candidate == minute);
            if let Some(flag) = slot.and_then(|index| seen.get_mut(index)) {
                *flag = true;
            }
        }
        assert_eq!(seen, [true; 4]);
    }

    #[rstest]
    #[case(1)]
    #[case(99)]
    fn single_entry_vocabulary_always_yields_it(#[case] seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        assert_eq!(pick(&mut rng, &["only"]), "only");
    }

    #[test]
    fn tenths_scale_down() {
        assert_eq!(tenths_to_f32(365).to_string(), "36.5");
    }
}
