//! Generators for administrative and account records.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use super::{
    DemoData, RecordKind, at, clock_time, email_for, person_name, phone_number, pick, record_id,
};
use crate::records::{
    Acknowledgement, ActivityEntry, AdminStats, AuthSession, BillingSummary, Department, Doctor,
    NewDoctor, Notification, Patient, Role, TokenPair, UserRecord,
};
use crate::vocabulary::{
    ADMIN_ACTIONS, BLOOD_GROUPS, CONDITIONS, DEPARTMENTS, GENDERS, NOTIFICATIONS,
    SPECIALIZATIONS,
};

/// Probability that a generated doctor is currently on shift.
const DOCTOR_AVAILABILITY: f64 = 0.7;

/// Probability that a generated patient has a recorded visit.
const VISITED_PROBABILITY: f64 = 0.9;

impl DemoData {
    /// Headline figures for the admin dashboard.
    ///
    /// # Example
    ///
    /// ```
    /// use demo_data::DemoData;
    ///
    /// let stats = DemoData::default().admin_stats();
    /// assert!(stats.doctors_available <= stats.total_doctors);
    /// ```
    #[must_use]
    pub fn admin_stats(&self) -> AdminStats {
        let mut rng = self.rng(RecordKind::AdminStats, "");
        let total_doctors = rng.random_range(40..120);
        AdminStats {
            total_patients: rng.random_range(800..2_500),
            total_doctors,
            appointments_today: rng.random_range(20..90),
            doctors_available: rng.random_range(10..=total_doctors),
            pending_appointments: rng.random_range(0..25),
            bed_occupancy_percent: rng.random_range(45..=95),
            revenue_this_month: rng.random_range(2_000_000..9_000_000),
        }
    }

    /// Hospital-wide billing totals for the current month.
    #[must_use]
    pub fn billing_summary(&self) -> BillingSummary {
        let mut rng = self.rng(RecordKind::Billing, "");
        let total_billed: u64 = rng.random_range(1_500_000..6_000_000);
        let outstanding = rng.random_range(0..=total_billed);
        BillingSummary {
            total_billed,
            total_collected: total_billed.saturating_sub(outstanding),
            overdue_bills: rng.random_range(0..40),
        }
    }

    /// Doctor directory of `count` entries.
    #[must_use]
    pub fn doctors(&self, count: usize) -> Vec<Doctor> {
        let mut rng = self.rng(RecordKind::Doctors, "directory");
        (0..count).map(|_| doctor(&mut rng)).collect()
    }

    /// Doctor record echoing a create or update payload.
    ///
    /// When `id` is `None` a stable id is derived from the payload name.
    #[must_use]
    pub fn doctor_from(&self, payload: &NewDoctor, id: Option<&str>) -> Doctor {
        let mut rng = self.rng(RecordKind::Echo, &payload.name);
        let generated = record_id(&mut rng);
        Doctor {
            id: id.map_or(generated, str::to_owned),
            name: payload.name.clone(),
            specialization: payload.specialization.clone(),
            department: payload.department.clone(),
            email: payload.email.clone(),
            phone: payload.phone.clone(),
            experience_years: payload.experience_years,
            available: true,
        }
    }

    /// Every hospital department with a head and headcount.
    #[must_use]
    pub fn departments(&self) -> Vec<Department> {
        let mut rng = self.rng(RecordKind::Departments, "");
        DEPARTMENTS
            .iter()
            .map(|name| Department {
                id: record_id(&mut rng),
                name: (*name).to_owned(),
                head_of_department: format!("Dr. {}", person_name(&mut rng)),
                doctor_count: rng.random_range(3..20),
            })
            .collect()
    }

    /// Patient directory of `count` entries.
    #[must_use]
    pub fn patients(&self, count: usize) -> Vec<Patient> {
        let mut rng = self.rng(RecordKind::Patients, "directory");
        (0..count).map(|_| self.patient(&mut rng)).collect()
    }

    /// Patients under one doctor's care.
    #[must_use]
    pub fn doctor_patients(&self, doctor_id: &str) -> Vec<Patient> {
        let mut rng = self.rng(RecordKind::Patients, doctor_id);
        (0..super::DOCTOR_PATIENT_COUNT)
            .map(|_| self.patient(&mut rng))
            .collect()
    }

    /// Most recent `count` notifications, newest first.
    #[must_use]
    pub fn notifications(&self, count: usize) -> Vec<Notification> {
        let mut rng = self.rng(RecordKind::Notifications, "");
        (0..count)
            .map(|index| {
                let (title, message) = pick(&mut rng, NOTIFICATIONS);
                let (hour, minute) = clock_time(&mut rng);
                Notification {
                    id: record_id(&mut rng),
                    title: title.to_owned(),
                    message: message.to_owned(),
                    read: index > 1 && rng.random_bool(0.6),
                    created_at: at(
                        self.days_from_reference(-i64::try_from(index).unwrap_or(0)),
                        hour,
                        minute,
                    ),
                }
            })
            .collect()
    }

    /// Admin activity feed of `count` entries, newest first.
    #[must_use]
    pub fn recent_activity(&self, count: usize) -> Vec<ActivityEntry> {
        let mut rng = self.rng(RecordKind::Activity, "");
        (0..count)
            .map(|index| {
                let (hour, minute) = clock_time(&mut rng);
                ActivityEntry {
                    id: record_id(&mut rng),
                    actor: person_name(&mut rng),
                    action: pick(&mut rng, ADMIN_ACTIONS).to_owned(),
                    occurred_at: at(
                        self.days_from_reference(-i64::try_from(index).unwrap_or(0)),
                        hour,
                        minute,
                    ),
                }
            })
            .collect()
    }

    /// Demo login for `email`; the role selects the dashboard.
    #[must_use]
    pub fn auth_session(&self, email: &str, role: Role) -> AuthSession {
        let mut rng = self.rng(RecordKind::Session, email);
        let user = UserRecord {
            id: record_id(&mut rng),
            name: person_name(&mut rng),
            email: email.to_owned(),
            role,
        };
        AuthSession {
            token: format!("demo-access-{}", record_id(&mut rng)),
            refresh_token: format!("demo-refresh-{}", record_id(&mut rng)),
            user,
        }
    }

    /// Fresh demo tokens derived from the refresh token being exchanged.
    #[must_use]
    pub fn token_pair(&self, refresh_token: &str) -> TokenPair {
        let mut rng = self.rng(RecordKind::Session, refresh_token);
        TokenPair {
            token: format!("demo-access-{}", record_id(&mut rng)),
            refresh_token: format!("demo-refresh-{}", record_id(&mut rng)),
        }
    }

    /// Demo profile for a signed-in user of `role`.
    #[must_use]
    pub fn profile(&self, role: Role) -> UserRecord {
        let mut rng = self.rng(RecordKind::Session, role.as_str());
        let name = match role {
            Role::Doctor => format!("Dr. {}", person_name(&mut rng)),
            Role::Admin | Role::Patient => person_name(&mut rng),
        };
        UserRecord {
            id: record_id(&mut rng),
            email: email_for(&name),
            name,
            role,
        }
    }

    /// Successful acknowledgement carrying `message`.
    #[must_use]
    pub fn acknowledgement(&self, message: &str) -> Acknowledgement {
        Acknowledgement {
            success: true,
            message: message.to_owned(),
        }
    }

    fn patient(&self, rng: &mut ChaCha8Rng) -> Patient {
        let name = person_name(rng);
        let last_visit = rng
            .random_bool(VISITED_PROBABILITY)
            .then(|| self.days_from_reference(-rng.random_range(1..=180)));
        Patient {
            id: record_id(rng),
            email: email_for(&name),
            name,
            age: rng.random_range(1..=95),
            gender: pick(rng, GENDERS).to_owned(),
            blood_group: pick(rng, BLOOD_GROUPS).to_owned(),
            phone: phone_number(rng),
            last_visit,
            condition: pick(rng, CONDITIONS).to_owned(),
        }
    }
}

fn doctor(rng: &mut ChaCha8Rng) -> Doctor {
    let name = format!("Dr. {}", person_name(rng));
    let index = rng.random_range(0..DEPARTMENTS.len());
    Doctor {
        id: record_id(rng),
        email: email_for(&name),
        name,
        specialization: SPECIALIZATIONS
            .get(index)
            .copied()
            .unwrap_or_default()
            .to_owned(),
        department: DEPARTMENTS.get(index).copied().unwrap_or_default().to_owned(),
        phone: phone_number(rng),
        experience_years: rng.random_range(2..=35),
        available: rng.random_bool(DOCTOR_AVAILABILITY),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn admin_stats_are_internally_consistent() {
        let stats = DemoData::default().admin_stats();
        assert!(stats.doctors_available <= stats.total_doctors);
        assert!(stats.bed_occupancy_percent <= 100);
    }

    #[test]
    fn billing_never_collects_more_than_billed() {
        let summary = DemoData::default().billing_summary();
        assert!(summary.total_collected <= summary.total_billed);
    }

    #[rstest]
    #[case(0)]
    #[case(3)]
    #[case(crate::DIRECTORY_SIZE)]
    fn directories_honour_requested_size(#[case] count: usize) {
        let data = DemoData::default();
        assert_eq!(data.doctors(count).len(), count);
        assert_eq!(data.patients(count).len(), count);
        assert_eq!(data.notifications(count).len(), count);
    }

    #[test]
    fn doctor_departments_match_specializations() {
        for entry in DemoData::default().doctors(20) {
            let department = DEPARTMENTS
                .iter()
                .position(|name| *name == entry.department)
                .expect("known department");
            assert_eq!(
                SPECIALIZATIONS.get(department).copied(),
                Some(entry.specialization.as_str())
            );
        }
    }

    #[test]
    fn doctor_echo_keeps_payload_and_explicit_id() {
        let payload = NewDoctor {
            name: "Dr. Ada Lovelace".to_owned(),
            specialization: "Cardiologist".to_owned(),
            department: "Cardiology".to_owned(),
            email: "ada@example.org".to_owned(),
            phone: "+1-555-000-0000".to_owned(),
            experience_years: 12,
        };
        let data = DemoData::default();
        let echoed = data.doctor_from(&payload, Some("doc-9"));
        assert_eq!(echoed.id, "doc-9");
        assert_eq!(echoed.name, payload.name);
        assert_eq!(
            data.doctor_from(&payload, None).id,
            data.doctor_from(&payload, None).id
        );
    }

    #[test]
    fn auth_session_keeps_email_and_role() {
        let session = DemoData::default().auth_session("nurse@example.org", Role::Patient);
        assert_eq!(session.user.email, "nurse@example.org");
        assert_eq!(session.user.role, Role::Patient);
        assert!(session.token.starts_with("demo-access-"));
        assert_ne!(session.token, session.refresh_token);
    }

    #[test]
    fn doctor_profiles_carry_title() {
        let profile = DemoData::default().profile(Role::Doctor);
        assert!(profile.name.starts_with("Dr. "));
        assert!(profile.email.ends_with("@example.org"));
    }

    #[test]
    fn departments_cover_vocabulary() {
        let departments = DemoData::default().departments();
        assert_eq!(departments.len(), DEPARTMENTS.len());
    }
}
