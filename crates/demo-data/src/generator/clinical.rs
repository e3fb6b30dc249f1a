//! Generators for clinical records: appointments, vitals, prescriptions and
//! patient history.

use chrono::NaiveDate;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use super::{
    BILL_COUNT, DIRECTORY_SIZE, DOCTOR_APPOINTMENT_COUNT, DemoData, LAB_RESULT_COUNT,
    MEDICAL_RECORD_COUNT, PATIENT_APPOINTMENT_COUNT, PRESCRIPTION_COUNT, RecordKind,
    VITALS_HISTORY_LEN, at, clock_time, format_time, person_name, pick, record_id, tenths_to_f32,
};
use crate::records::{
    Appointment, AppointmentRequest, AppointmentStatus, Bill, BillStatus, DoctorStats, LabResult,
    LabResultStatus, MedicalRecord, NewPrescription, PatientStats, Prescription,
    PrescriptionStatus, ScheduleSlot, Vitals,
};
use crate::vocabulary::{
    BILLED_SERVICES, CONDITIONS, DEPARTMENTS, FREQUENCIES, LAB_TESTS, MEDICATIONS, TREATMENTS,
    VISIT_REASONS, WEEKDAYS,
};

/// Probability that a generated lab result is still awaiting a report.
const LAB_PENDING_PROBABILITY: f64 = 0.15;

/// Participants of a generated appointment.
struct Parties {
    patient_id: String,
    patient_name: String,
    doctor_id: String,
    doctor_name: String,
}

impl DemoData {
    /// Headline figures for one doctor's dashboard.
    #[must_use]
    pub fn doctor_stats(&self, doctor_id: &str) -> DoctorStats {
        let mut rng = self.rng(RecordKind::DoctorStats, doctor_id);
        let todays_appointments = rng.random_range(4..16);
        DoctorStats {
            todays_appointments,
            total_patients: rng.random_range(40..300),
            pending_reports: rng.random_range(0..12),
            completed_today: rng.random_range(0..=todays_appointments),
        }
    }

    /// Headline figures for one patient's dashboard.
    #[must_use]
    pub fn patient_stats(&self, patient_id: &str) -> PatientStats {
        let mut rng = self.rng(RecordKind::PatientStats, patient_id);
        PatientStats {
            upcoming_appointments: rng.random_range(0..4),
            active_prescriptions: rng.random_range(0..5),
            pending_lab_results: rng.random_range(0..3),
            outstanding_balance: rng.random_range(0..250_000),
        }
    }

    /// Hospital-wide appointment list for the admin dashboard.
    #[must_use]
    pub fn appointments(&self) -> Vec<Appointment> {
        let mut rng = self.rng(RecordKind::Appointments, "all");
        (0..DIRECTORY_SIZE)
            .map(|_| {
                let parties = Parties {
                    patient_id: record_id(&mut rng),
                    patient_name: person_name(&mut rng),
                    doctor_id: record_id(&mut rng),
                    doctor_name: format!("Dr. {}", person_name(&mut rng)),
                };
                self.appointment(&mut rng, parties)
            })
            .collect()
    }

    /// Appointments booked with one doctor.
    ///
    /// Always returns [`DOCTOR_APPOINTMENT_COUNT`] entries.
    #[must_use]
    pub fn doctor_appointments(&self, doctor_id: &str) -> Vec<Appointment> {
        let mut rng = self.rng(RecordKind::Appointments, doctor_id);
        let doctor_name = self.doctor_name(doctor_id);
        (0..DOCTOR_APPOINTMENT_COUNT)
            .map(|_| {
                let patient_id = record_id(&mut rng);
                let parties = Parties {
                    patient_name: self.patient_name(&patient_id),
                    patient_id,
                    doctor_id: doctor_id.to_owned(),
                    doctor_name: doctor_name.clone(),
                };
                self.appointment(&mut rng, parties)
            })
            .collect()
    }

    /// Appointments booked by one patient.
    ///
    /// Always returns [`PATIENT_APPOINTMENT_COUNT`] entries.
    #[must_use]
    pub fn patient_appointments(&self, patient_id: &str) -> Vec<Appointment> {
        let mut rng = self.rng(RecordKind::Appointments, patient_id);
        let patient_name = self.patient_name(patient_id);
        (0..PATIENT_APPOINTMENT_COUNT)
            .map(|_| {
                let doctor_id = record_id(&mut rng);
                let parties = Parties {
                    patient_id: patient_id.to_owned(),
                    patient_name: patient_name.clone(),
                    doctor_name: self.doctor_name(&doctor_id),
                    doctor_id,
                };
                self.appointment(&mut rng, parties)
            })
            .collect()
    }

    /// Appointment echoing a booking request, in the `scheduled` state.
    #[must_use]
    pub fn booked_appointment(&self, request: &AppointmentRequest) -> Appointment {
        let key = format!("{}:{}:{}", request.patient_id, request.doctor_id, request.date);
        let mut rng = self.rng(RecordKind::Echo, &key);
        Appointment {
            id: record_id(&mut rng),
            patient_id: request.patient_id.clone(),
            patient_name: self.patient_name(&request.patient_id),
            doctor_id: request.doctor_id.clone(),
            doctor_name: self.doctor_name(&request.doctor_id),
            department: pick(&mut rng, DEPARTMENTS).to_owned(),
            date: request.date,
            time: request.time.clone(),
            status: AppointmentStatus::Scheduled,
            reason: request.reason.clone(),
        }
    }

    /// Appointment `appointment_id` after moving to `status`.
    #[must_use]
    pub fn appointment_with_status(
        &self,
        appointment_id: &str,
        status: AppointmentStatus,
    ) -> Appointment {
        let mut rng = self.rng(RecordKind::Echo, appointment_id);
        let patient_id = record_id(&mut rng);
        let doctor_id = record_id(&mut rng);
        let parties = Parties {
            patient_name: self.patient_name(&patient_id),
            patient_id,
            doctor_name: self.doctor_name(&doctor_id),
            doctor_id,
        };
        Appointment {
            id: appointment_id.to_owned(),
            status,
            ..self.appointment(&mut rng, parties)
        }
    }

    /// Daily vital signs for the past week, oldest first.
    #[must_use]
    pub fn vitals_history(&self, patient_id: &str) -> Vec<Vitals> {
        let mut rng = self.rng(RecordKind::Vitals, patient_id);
        (0..VITALS_HISTORY_LEN)
            .rev()
            .map(|days_ago| {
                let offset = -i64::try_from(days_ago).unwrap_or(0);
                Vitals {
                    patient_id: patient_id.to_owned(),
                    recorded_at: at(self.days_from_reference(offset), 9, 0),
                    heart_rate: rng.random_range(58..=102),
                    systolic: rng.random_range(105..=145),
                    diastolic: rng.random_range(65..=95),
                    temperature_celsius: tenths_to_f32(rng.random_range(361..=379)),
                    oxygen_saturation: rng.random_range(94..=100),
                    respiratory_rate: rng.random_range(12..=20),
                }
            })
            .collect()
    }

    /// Prescriptions issued to one patient.
    #[must_use]
    pub fn prescriptions(&self, patient_id: &str) -> Vec<Prescription> {
        let mut rng = self.rng(RecordKind::Prescriptions, patient_id);
        (0..PRESCRIPTION_COUNT)
            .map(|_| {
                let (medication, dosage) = pick(&mut rng, MEDICATIONS);
                let doctor_id = record_id(&mut rng);
                let issued_on = self.days_from_reference(-rng.random_range(0..90));
                let duration_days = rng.random_range(5..=60);
                let status = prescription_status(self.reference_date, issued_on, duration_days);
                Prescription {
                    id: record_id(&mut rng),
                    patient_id: patient_id.to_owned(),
                    doctor_name: self.doctor_name(&doctor_id),
                    doctor_id,
                    medication: medication.to_owned(),
                    dosage: dosage.to_owned(),
                    frequency: pick(&mut rng, FREQUENCIES).to_owned(),
                    duration_days,
                    issued_on,
                    status,
                    notes: rng
                        .random_bool(0.5)
                        .then(|| "Take with food".to_owned()),
                }
            })
            .collect()
    }

    /// Prescription echoing a newly submitted one, issued today.
    #[must_use]
    pub fn prescription_from(&self, payload: &NewPrescription) -> Prescription {
        let key = format!("{}:{}", payload.patient_id, payload.medication);
        let mut rng = self.rng(RecordKind::Echo, &key);
        Prescription {
            id: record_id(&mut rng),
            patient_id: payload.patient_id.clone(),
            doctor_id: payload.doctor_id.clone(),
            doctor_name: self.doctor_name(&payload.doctor_id),
            medication: payload.medication.clone(),
            dosage: payload.dosage.clone(),
            frequency: payload.frequency.clone(),
            duration_days: payload.duration_days,
            issued_on: self.reference_date,
            status: PrescriptionStatus::Active,
            notes: payload.notes.clone(),
        }
    }

    /// Lab results for one patient, newest first.
    #[must_use]
    pub fn lab_results(&self, patient_id: &str) -> Vec<LabResult> {
        let mut rng = self.rng(RecordKind::LabResults, patient_id);
        (0..LAB_RESULT_COUNT)
            .map(|index| {
                let (test_name, unit, low, high) = pick(&mut rng, LAB_TESTS);
                let offset = -i64::try_from(index).unwrap_or(0).saturating_mul(5);
                let (value, status) = if rng.random_bool(LAB_PENDING_PROBABILITY) {
                    ("pending".to_owned(), LabResultStatus::Pending)
                } else {
                    let spread_low = low.saturating_sub(low.div_euclid(4));
                    let spread_high = high.saturating_add(high.div_euclid(4));
                    let reading = rng.random_range(spread_low..=spread_high);
                    let status = if (low..=high).contains(&reading) {
                        LabResultStatus::Normal
                    } else {
                        LabResultStatus::Abnormal
                    };
                    (format!("{} {unit}", format_tenths(reading)), status)
                };
                LabResult {
                    id: record_id(&mut rng),
                    patient_id: patient_id.to_owned(),
                    test_name: test_name.to_owned(),
                    value,
                    reference_range: format!(
                        "{}-{} {unit}",
                        format_tenths(low),
                        format_tenths(high)
                    ),
                    status,
                    collected_on: self.days_from_reference(offset),
                }
            })
            .collect()
    }

    /// Past visit summaries for one patient, newest first.
    #[must_use]
    pub fn medical_records(&self, patient_id: &str) -> Vec<MedicalRecord> {
        let mut rng = self.rng(RecordKind::MedicalRecords, patient_id);
        (0..MEDICAL_RECORD_COUNT)
            .map(|index| {
                let offset = -i64::try_from(index).unwrap_or(0).saturating_add(1) * 30;
                MedicalRecord {
                    id: record_id(&mut rng),
                    patient_id: patient_id.to_owned(),
                    doctor_name: format!("Dr. {}", person_name(&mut rng)),
                    diagnosis: pick(&mut rng, CONDITIONS).to_owned(),
                    treatment: pick(&mut rng, TREATMENTS).to_owned(),
                    visit_date: self.days_from_reference(offset),
                }
            })
            .collect()
    }

    /// Bills issued to one patient.
    #[must_use]
    pub fn bills(&self, patient_id: &str) -> Vec<Bill> {
        let mut rng = self.rng(RecordKind::Bills, patient_id);
        (0..BILL_COUNT)
            .map(|_| {
                let age_days = rng.random_range(0..75);
                let status = match age_days {
                    0..30 => BillStatus::Pending,
                    _ if rng.random_bool(0.7) => BillStatus::Paid,
                    _ => BillStatus::Overdue,
                };
                Bill {
                    id: record_id(&mut rng),
                    patient_id: patient_id.to_owned(),
                    description: pick(&mut rng, BILLED_SERVICES).to_owned(),
                    amount: rng.random_range(2_500..120_000),
                    issued_on: self.days_from_reference(-age_days),
                    status,
                }
            })
            .collect()
    }

    /// Weekly consultation slots for one doctor.
    #[must_use]
    pub fn doctor_schedule(&self, doctor_id: &str) -> Vec<ScheduleSlot> {
        let mut rng = self.rng(RecordKind::Schedule, doctor_id);
        WEEKDAYS
            .iter()
            .map(|day| {
                let start = rng.random_range(8..=10);
                let end = rng.random_range(13..=18);
                ScheduleSlot {
                    day: (*day).to_owned(),
                    start: format_time(start, 0),
                    end: format_time(end, 0),
                    available: rng.random_bool(0.8),
                }
            })
            .collect()
    }

    fn appointment(&self, rng: &mut ChaCha8Rng, parties: Parties) -> Appointment {
        let offset = rng.random_range(-14..=14);
        let (hour, minute) = clock_time(rng);
        let status = appointment_status(rng, offset);
        Appointment {
            id: record_id(rng),
            patient_id: parties.patient_id,
            patient_name: parties.patient_name,
            doctor_id: parties.doctor_id,
            doctor_name: parties.doctor_name,
            department: pick(rng, DEPARTMENTS).to_owned(),
            date: self.days_from_reference(offset),
            time: format_time(hour, minute),
            status,
            reason: pick(rng, VISIT_REASONS).to_owned(),
        }
    }
}

/// Status consistent with an appointment `offset` days from the reference date.
fn appointment_status(rng: &mut ChaCha8Rng, offset: i64) -> AppointmentStatus {
    if offset < 0 {
        if rng.random_bool(0.85) {
            AppointmentStatus::Completed
        } else {
            AppointmentStatus::Cancelled
        }
    } else if offset == 0 {
        pick(
            rng,
            &[
                AppointmentStatus::Confirmed,
                AppointmentStatus::InProgress,
                AppointmentStatus::Completed,
            ],
        )
    } else if rng.random_bool(0.5) {
        AppointmentStatus::Confirmed
    } else {
        AppointmentStatus::Scheduled
    }
}

fn prescription_status(
    today: NaiveDate,
    issued_on: NaiveDate,
    duration_days: u16,
) -> PrescriptionStatus {
    let elapsed = today.signed_duration_since(issued_on).num_days();
    if elapsed > i64::from(duration_days) {
        PrescriptionStatus::Completed
    } else {
        PrescriptionStatus::Active
    }
}

fn format_tenths(value: u32) -> String {
    format!("{}.{}", value.div_euclid(10), value.rem_euclid(10))
}
