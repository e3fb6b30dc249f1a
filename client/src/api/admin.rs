//! Admin dashboard operations.

use std::sync::Arc;

use demo_data::records::{
    Acknowledgement, ActivityEntry, AdminStats, Appointment, BillingSummary, Doctor, NewDoctor,
    Patient,
};
use demo_data::{ACTIVITY_COUNT, DIRECTORY_SIZE};

use super::{ClientCore, get, with_body, without_body};
use crate::domain::ports::HttpMethod;
use crate::domain::{ClientError, FetchResult};

/// Operations behind the admin dashboard.
#[derive(Clone)]
pub struct AdminApi {
    core: Arc<ClientCore>,
}

impl AdminApi {
    pub(super) fn new(core: Arc<ClientCore>) -> Self {
        Self { core }
    }

    /// Hospital-wide headline figures.
    ///
    /// # Errors
    ///
    /// Propagates transport failures in real mode.
    pub async fn get_dashboard_stats(&self) -> Result<FetchResult<AdminStats>, ClientError> {
        let demo = self.core.demo;
        self.core
            .dispatch(get("admin.get_dashboard_stats", "/admin/stats"), || {
                demo.admin_stats()
            })
            .await
    }

    /// Recent admin activity, newest first.
    ///
    /// # Errors
    ///
    /// Propagates transport failures in real mode.
    pub async fn get_recent_activity(
        &self,
    ) -> Result<FetchResult<Vec<ActivityEntry>>, ClientError> {
        let demo = self.core.demo;
        self.core
            .dispatch(get("admin.get_recent_activity", "/admin/activity"), || {
                demo.recent_activity(ACTIVITY_COUNT)
            })
            .await
    }

    /// Doctor directory.
    ///
    /// # Errors
    ///
    /// Propagates transport failures in real mode.
    pub async fn get_doctors(&self) -> Result<FetchResult<Vec<Doctor>>, ClientError> {
        let demo = self.core.demo;
        self.core
            .dispatch(get("admin.get_doctors", "/admin/doctors"), || {
                demo.doctors(DIRECTORY_SIZE)
            })
            .await
    }

    /// Patient directory.
    ///
    /// # Errors
    ///
    /// Propagates transport failures in real mode.
    pub async fn get_patients(&self) -> Result<FetchResult<Vec<Patient>>, ClientError> {
        let demo = self.core.demo;
        self.core
            .dispatch(get("admin.get_patients", "/admin/patients"), || {
                demo.patients(DIRECTORY_SIZE)
            })
            .await
    }

    /// Every appointment in the hospital.
    ///
    /// # Errors
    ///
    /// Propagates transport failures in real mode.
    pub async fn get_appointments(&self) -> Result<FetchResult<Vec<Appointment>>, ClientError> {
        let demo = self.core.demo;
        self.core
            .dispatch(get("admin.get_appointments", "/admin/appointments"), || {
                demo.appointments()
            })
            .await
    }

    /// Register a doctor. Demo data echoes the payload with a generated id.
    ///
    /// # Errors
    ///
    /// Propagates transport failures in real mode, and fails with
    /// [`ClientError::Encode`] if the payload cannot be serialised.
    pub async fn create_doctor(
        &self,
        doctor: &NewDoctor,
    ) -> Result<FetchResult<Doctor>, ClientError> {
        let demo = self.core.demo;
        let request = with_body(
            "admin.create_doctor",
            HttpMethod::Post,
            "/admin/doctors",
            doctor,
        )?;
        self.core
            .dispatch(request, || demo.doctor_from(doctor, None))
            .await
    }

    /// Replace a doctor's details.
    ///
    /// # Errors
    ///
    /// Propagates transport failures in real mode, and fails with
    /// [`ClientError::Encode`] if the payload cannot be serialised.
    pub async fn update_doctor(
        &self,
        doctor_id: &str,
        doctor: &NewDoctor,
    ) -> Result<FetchResult<Doctor>, ClientError> {
        let demo = self.core.demo;
        let request = with_body(
            "admin.update_doctor",
            HttpMethod::Put,
            format!("/admin/doctors/{doctor_id}"),
            doctor,
        )?;
        self.core
            .dispatch(request, || demo.doctor_from(doctor, Some(doctor_id)))
            .await
    }

    /// Remove a doctor.
    ///
    /// # Errors
    ///
    /// Propagates transport failures in real mode.
    pub async fn delete_doctor(
        &self,
        doctor_id: &str,
    ) -> Result<FetchResult<Acknowledgement>, ClientError> {
        let request = without_body(
            "admin.delete_doctor",
            HttpMethod::Delete,
            format!("/admin/doctors/{doctor_id}"),
        );
        self.core.acknowledge(request, "Doctor removed").await
    }

    /// Billing totals for the current month.
    ///
    /// # Errors
    ///
    /// Propagates transport failures in real mode.
    pub async fn get_billing_summary(&self) -> Result<FetchResult<BillingSummary>, ClientError> {
        let demo = self.core.demo;
        self.core
            .dispatch(
                get("admin.get_billing_summary", "/admin/billing/summary"),
                || demo.billing_summary(),
            )
            .await
    }
}
