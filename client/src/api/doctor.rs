//! Doctor dashboard operations.

use std::sync::Arc;

use demo_data::records::{
    Appointment, AppointmentStatus, AppointmentStatusUpdate, DoctorStats, NewPrescription, Patient,
    Prescription, ScheduleSlot, Vitals,
};

use super::{ClientCore, get, with_body};
use crate::domain::ports::HttpMethod;
use crate::domain::{ClientError, FetchResult};

/// Operations behind the doctor dashboard.
#[derive(Clone)]
pub struct DoctorApi {
    core: Arc<ClientCore>,
}

impl DoctorApi {
    pub(super) fn new(core: Arc<ClientCore>) -> Self {
        Self { core }
    }

    /// Headline figures for one doctor.
    ///
    /// # Errors
    ///
    /// Propagates transport failures in real mode.
    pub async fn get_dashboard_stats(
        &self,
        doctor_id: &str,
    ) -> Result<FetchResult<DoctorStats>, ClientError> {
        let demo = self.core.demo;
        self.core
            .dispatch(
                get("doctor.get_dashboard_stats", format!("/doctors/{doctor_id}/stats")),
                || demo.doctor_stats(doctor_id),
            )
            .await
    }

    /// Appointments booked with the doctor.
    ///
    /// # Errors
    ///
    /// Propagates transport failures in real mode.
    pub async fn get_my_appointments(
        &self,
        doctor_id: &str,
    ) -> Result<FetchResult<Vec<Appointment>>, ClientError> {
        let demo = self.core.demo;
        self.core
            .dispatch(
                get(
                    "doctor.get_my_appointments",
                    format!("/doctors/{doctor_id}/appointments"),
                ),
                || demo.doctor_appointments(doctor_id),
            )
            .await
    }

    /// Patients under the doctor's care.
    ///
    /// # Errors
    ///
    /// Propagates transport failures in real mode.
    pub async fn get_my_patients(
        &self,
        doctor_id: &str,
    ) -> Result<FetchResult<Vec<Patient>>, ClientError> {
        let demo = self.core.demo;
        self.core
            .dispatch(
                get("doctor.get_my_patients", format!("/doctors/{doctor_id}/patients")),
                || demo.doctor_patients(doctor_id),
            )
            .await
    }

    /// Recent vital signs of one patient, oldest first.
    ///
    /// # Errors
    ///
    /// Propagates transport failures in real mode.
    pub async fn get_patient_vitals(
        &self,
        patient_id: &str,
    ) -> Result<FetchResult<Vec<Vitals>>, ClientError> {
        let demo = self.core.demo;
        self.core
            .dispatch(
                get("doctor.get_patient_vitals", format!("/patients/{patient_id}/vitals")),
                || demo.vitals_history(patient_id),
            )
            .await
    }

    /// Weekly consultation slots.
    ///
    /// # Errors
    ///
    /// Propagates transport failures in real mode.
    pub async fn get_schedule(
        &self,
        doctor_id: &str,
    ) -> Result<FetchResult<Vec<ScheduleSlot>>, ClientError> {
        let demo = self.core.demo;
        self.core
            .dispatch(
                get("doctor.get_schedule", format!("/doctors/{doctor_id}/schedule")),
                || demo.doctor_schedule(doctor_id),
            )
            .await
    }

    /// Move an appointment to `status`.
    ///
    /// # Errors
    ///
    /// Propagates transport failures in real mode.
    pub async fn update_appointment_status(
        &self,
        appointment_id: &str,
        status: AppointmentStatus,
    ) -> Result<FetchResult<Appointment>, ClientError> {
        let demo = self.core.demo;
        let request = with_body(
            "doctor.update_appointment_status",
            HttpMethod::Patch,
            format!("/appointments/{appointment_id}/status"),
            &AppointmentStatusUpdate { status },
        )?;
        self.core
            .dispatch(request, || demo.appointment_with_status(appointment_id, status))
            .await
    }

    /// Issue a prescription. Demo data echoes it as active from today.
    ///
    /// # Errors
    ///
    /// Propagates transport failures in real mode, and fails with
    /// [`ClientError::Encode`] if the payload cannot be serialised.
    pub async fn create_prescription(
        &self,
        prescription: &NewPrescription,
    ) -> Result<FetchResult<Prescription>, ClientError> {
        let demo = self.core.demo;
        let request = with_body(
            "doctor.create_prescription",
            HttpMethod::Post,
            "/prescriptions",
            prescription,
        )?;
        self.core
            .dispatch(request, || demo.prescription_from(prescription))
            .await
    }
}
