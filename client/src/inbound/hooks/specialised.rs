//! Hooks pre-bound to one domain API operation each.
//!
//! Operations scoped to a doctor or patient take the id as their
//! dependency; the rest take `()` and fetch once per render cycle.

use std::future::Future;

use demo_data::records::{
    ActivityEntry, AdminStats, Appointment, Bill, BillingSummary, Department, Doctor, DoctorStats,
    LabResult, MedicalRecord, Notification, Patient, PatientStats, Prescription, ScheduleSlot,
    UserRecord, Vitals,
};

use super::DataHook;
use crate::api::ApiClient;
use crate::domain::{ClientError, FetchResult};

fn bind<A, D, T, F, Fut>(api: A, call: F) -> DataHook<T, D>
where
    A: Clone + Send + Sync + 'static,
    D: Clone + PartialEq + Send + Sync + 'static,
    T: Send + Sync + 'static,
    F: Fn(A, D) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<FetchResult<T>, ClientError>> + Send + 'static,
{
    DataHook::from_api(move |deps: &D| call(api.clone(), deps.clone()))
}

/// Hospital-wide headline figures.
pub fn use_admin_stats(client: &ApiClient) -> DataHook<AdminStats, ()> {
    bind(client.admin(), |admin, ()| async move {
        admin.get_dashboard_stats().await
    })
}

/// Admin activity feed.
pub fn use_recent_activity(client: &ApiClient) -> DataHook<Vec<ActivityEntry>, ()> {
    bind(client.admin(), |admin, ()| async move {
        admin.get_recent_activity().await
    })
}

/// Doctor directory.
pub fn use_doctors(client: &ApiClient) -> DataHook<Vec<Doctor>, ()> {
    bind(client.admin(), |admin, ()| async move { admin.get_doctors().await })
}

/// Patient directory.
pub fn use_patients(client: &ApiClient) -> DataHook<Vec<Patient>, ()> {
    bind(client.admin(), |admin, ()| async move { admin.get_patients().await })
}

/// Every appointment in the hospital.
pub fn use_appointments(client: &ApiClient) -> DataHook<Vec<Appointment>, ()> {
    bind(client.admin(), |admin, ()| async move {
        admin.get_appointments().await
    })
}

/// Monthly billing totals.
pub fn use_billing_summary(client: &ApiClient) -> DataHook<BillingSummary, ()> {
    bind(client.admin(), |admin, ()| async move {
        admin.get_billing_summary().await
    })
}

/// Headline figures for the doctor given as dependency.
pub fn use_doctor_stats(client: &ApiClient) -> DataHook<DoctorStats, String> {
    bind(client.doctor(), |doctor, doctor_id: String| async move {
        doctor.get_dashboard_stats(&doctor_id).await
    })
}

/// Appointments of the doctor given as dependency.
pub fn use_doctor_appointments(client: &ApiClient) -> DataHook<Vec<Appointment>, String> {
    bind(client.doctor(), |doctor, doctor_id: String| async move {
        doctor.get_my_appointments(&doctor_id).await
    })
}

/// Caseload of the doctor given as dependency.
pub fn use_doctor_patients(client: &ApiClient) -> DataHook<Vec<Patient>, String> {
    bind(client.doctor(), |doctor, doctor_id: String| async move {
        doctor.get_my_patients(&doctor_id).await
    })
}

/// Consultation slots of the doctor given as dependency.
pub fn use_doctor_schedule(client: &ApiClient) -> DataHook<Vec<ScheduleSlot>, String> {
    bind(client.doctor(), |doctor, doctor_id: String| async move {
        doctor.get_schedule(&doctor_id).await
    })
}

/// Vitals of a patient, as seen from the doctor dashboard.
pub fn use_patient_vitals(client: &ApiClient) -> DataHook<Vec<Vitals>, String> {
    bind(client.doctor(), |doctor, patient_id: String| async move {
        doctor.get_patient_vitals(&patient_id).await
    })
}

/// Headline figures for the patient given as dependency.
pub fn use_patient_stats(client: &ApiClient) -> DataHook<PatientStats, String> {
    bind(client.patient(), |patient, patient_id: String| async move {
        patient.get_dashboard_stats(&patient_id).await
    })
}

/// Appointments of the patient given as dependency.
pub fn use_patient_appointments(client: &ApiClient) -> DataHook<Vec<Appointment>, String> {
    bind(client.patient(), |patient, patient_id: String| async move {
        patient.get_my_appointments(&patient_id).await
    })
}

pub fn use_prescriptions(client: &ApiClient) -> DataHook<Vec<Prescription>, String> {
    bind(client.patient(), |patient, patient_id: String| async move {
        patient.get_prescriptions(&patient_id).await
    })
}

pub fn use_lab_results(client: &ApiClient) -> DataHook<Vec<LabResult>, String> {
    bind(client.patient(), |patient, patient_id: String| async move {
        patient.get_lab_results(&patient_id).await
    })
}

pub fn use_medical_records(client: &ApiClient) -> DataHook<Vec<MedicalRecord>, String> {
    bind(client.patient(), |patient, patient_id: String| async move {
        patient.get_medical_records(&patient_id).await
    })
}

pub fn use_bills(client: &ApiClient) -> DataHook<Vec<Bill>, String> {
    bind(client.patient(), |patient, patient_id: String| async move {
        patient.get_bills(&patient_id).await
    })
}

/// Hospital departments.
pub fn use_departments(client: &ApiClient) -> DataHook<Vec<Department>, ()> {
    bind(client.common(), |common, ()| async move {
        common.get_departments().await
    })
}

/// Notifications of the signed-in user.
pub fn use_notifications(client: &ApiClient) -> DataHook<Vec<Notification>, ()> {
    bind(client.common(), |common, ()| async move {
        common.get_notifications().await
    })
}

/// Profile of the signed-in user.
pub fn use_profile(client: &ApiClient) -> DataHook<UserRecord, ()> {
    bind(client.common(), |common, ()| async move { common.get_profile().await })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rstest::rstest;

    use super::*;
    use crate::api::ClientPorts;
    use crate::config::ClientConfig;
    use crate::domain::DataMode;
    use crate::domain::ports::{HttpExchangeError, MockHttpExchange};

    fn offline_client(mode: DataMode) -> ApiClient {
        let mut exchange = MockHttpExchange::new();
        exchange
            .expect_send()
            .returning(|_| Err(HttpExchangeError::transport("connection refused")));
        let config = ClientConfig::default().with_mode(mode);
        ApiClient::new(&config, ClientPorts::new(Arc::new(exchange)))
    }

    #[tokio::test]
    async fn doctor_appointments_follow_the_doctor_id() {
        let client = offline_client(DataMode::Fake);
        let hook = use_doctor_appointments(&client);

        hook.render("doc1".to_owned());
        let first = hook.settled().await;
        assert!(first.data.as_ref().is_some_and(|list| list.iter().all(|a| a.doctor_id == "doc1")));

        hook.render("doc2".to_owned());
        let second = hook.settled().await;
        assert!(second.data.is_some_and(|list| list.iter().all(|a| a.doctor_id == "doc2")));
    }

    #[rstest]
    #[case(DataMode::Hybrid, false)]
    #[case(DataMode::Real, true)]
    #[tokio::test]
    async fn outage_reaches_state_only_in_real_mode(
        #[case] mode: DataMode,
        #[case] expect_error: bool,
    ) {
        let hook = use_admin_stats(&offline_client(mode));
        hook.render(());

        let state = hook.settled().await;
        assert_eq!(state.error.is_some(), expect_error);
        assert_eq!(state.data.is_none(), expect_error);
        assert!(!state.is_real_data);
    }
}
