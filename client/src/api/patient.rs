//! Patient dashboard operations.

use std::sync::Arc;

use demo_data::records::{
    Appointment, AppointmentRequest, AppointmentStatus, Bill, LabResult, MedicalRecord,
    PatientStats, Prescription, Vitals,
};

use super::{ClientCore, get, with_body, without_body};
use crate::domain::ports::HttpMethod;
use crate::domain::{ClientError, FetchResult};

/// Operations behind the patient dashboard.
#[derive(Clone)]
pub struct PatientApi {
    core: Arc<ClientCore>,
}

impl PatientApi {
    pub(super) fn new(core: Arc<ClientCore>) -> Self {
        Self { core }
    }

    /// Headline figures for one patient.
    ///
    /// # Errors
    ///
    /// Propagates transport failures in real mode.
    pub async fn get_dashboard_stats(
        &self,
        patient_id: &str,
    ) -> Result<FetchResult<PatientStats>, ClientError> {
        let demo = self.core.demo;
        self.core
            .dispatch(
                get("patient.get_dashboard_stats", format!("/patients/{patient_id}/stats")),
                || demo.patient_stats(patient_id),
            )
            .await
    }

    /// Appointments booked by the patient.
    ///
    /// # Errors
    ///
    /// Propagates transport failures in real mode.
    pub async fn get_my_appointments(
        &self,
        patient_id: &str,
    ) -> Result<FetchResult<Vec<Appointment>>, ClientError> {
        let demo = self.core.demo;
        self.core
            .dispatch(
                get(
                    "patient.get_my_appointments",
                    format!("/patients/{patient_id}/appointments"),
                ),
                || demo.patient_appointments(patient_id),
            )
            .await
    }

    /// Book an appointment. Demo data echoes it as scheduled.
    ///
    /// # Errors
    ///
    /// Propagates transport failures in real mode, and fails with
    /// [`ClientError::Encode`] if the payload cannot be serialised.
    pub async fn book_appointment(
        &self,
        request: &AppointmentRequest,
    ) -> Result<FetchResult<Appointment>, ClientError> {
        let demo = self.core.demo;
        let api_request = with_body(
            "patient.book_appointment",
            HttpMethod::Post,
            "/appointments",
            request,
        )?;
        self.core
            .dispatch(api_request, || demo.booked_appointment(request))
            .await
    }

    /// Cancel an appointment.
    ///
    /// # Errors
    ///
    /// Propagates transport failures in real mode.
    pub async fn cancel_appointment(
        &self,
        appointment_id: &str,
    ) -> Result<FetchResult<Appointment>, ClientError> {
        let demo = self.core.demo;
        let request = without_body(
            "patient.cancel_appointment",
            HttpMethod::Patch,
            format!("/appointments/{appointment_id}/cancel"),
        );
        self.core
            .dispatch(request, || {
                demo.appointment_with_status(appointment_id, AppointmentStatus::Cancelled)
            })
            .await
    }

    /// Prescriptions issued to the patient.
    ///
    /// # Errors
    ///
    /// Propagates transport failures in real mode.
    pub async fn get_prescriptions(
        &self,
        patient_id: &str,
    ) -> Result<FetchResult<Vec<Prescription>>, ClientError> {
        let demo = self.core.demo;
        self.core
            .dispatch(
                get(
                    "patient.get_prescriptions",
                    format!("/patients/{patient_id}/prescriptions"),
                ),
                || demo.prescriptions(patient_id),
            )
            .await
    }

    /// Recent vital signs, oldest first.
    ///
    /// # Errors
    ///
    /// Propagates transport failures in real mode.
    pub async fn get_vitals(
        &self,
        patient_id: &str,
    ) -> Result<FetchResult<Vec<Vitals>>, ClientError> {
        let demo = self.core.demo;
        self.core
            .dispatch(
                get("patient.get_vitals", format!("/patients/{patient_id}/vitals")),
                || demo.vitals_history(patient_id),
            )
            .await
    }

    /// Lab results, newest first.
    ///
    /// # Errors
    ///
    /// Propagates transport failures in real mode.
    pub async fn get_lab_results(
        &self,
        patient_id: &str,
    ) -> Result<FetchResult<Vec<LabResult>>, ClientError> {
        let demo = self.core.demo;
        self.core
            .dispatch(
                get(
                    "patient.get_lab_results",
                    format!("/patients/{patient_id}/lab-results"),
                ),
                || demo.lab_results(patient_id),
            )
            .await
    }

    /// Past visit summaries, newest first.
    ///
    /// # Errors
    ///
    /// Propagates transport failures in real mode.
    pub async fn get_medical_records(
        &self,
        patient_id: &str,
    ) -> Result<FetchResult<Vec<MedicalRecord>>, ClientError> {
        let demo = self.core.demo;
        self.core
            .dispatch(
                get(
                    "patient.get_medical_records",
                    format!("/patients/{patient_id}/medical-records"),
                ),
                || demo.medical_records(patient_id),
            )
            .await
    }

    /// Bills issued to the patient.
    ///
    /// # Errors
    ///
    /// Propagates transport failures in real mode.
    pub async fn get_bills(&self, patient_id: &str) -> Result<FetchResult<Vec<Bill>>, ClientError> {
        let demo = self.core.demo;
        self.core
            .dispatch(
                get("patient.get_bills", format!("/patients/{patient_id}/bills")),
                || demo.bills(patient_id),
            )
            .await
    }
}
