//! Probe the hospital API through every dashboard and report provenance.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io;

use clap::Parser;
use hospital_client::bootstrap::connect;
use hospital_client::config::ClientConfig;
use hospital_client::domain::DataMode;
use hospital_client::{ApiClient, ClientError, FetchResult};
use mockable::{DefaultEnv, Env};
use serde_json::{Value, json};
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// `dashboard-probe` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "dashboard-probe",
    about = "Fetch one view per dashboard and report whether each came from the backend",
    version
)]
struct CliArgs {
    /// Data mode overriding `DATA_MODE`.
    #[arg(long, value_name = "fake|real|hybrid")]
    mode: Option<DataMode>,
    /// Doctor whose dashboard is probed.
    #[arg(long = "doctor-id", value_name = "id", default_value = "doc1")]
    doctor_id: String,
    /// Patient whose dashboard is probed.
    #[arg(long = "patient-id", value_name = "id", default_value = "p1")]
    patient_id: String,
}

fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let config = resolve_config(&DefaultEnv::new(), args.mode)?;

    let connected = connect(&config)
        .map_err(|error| io::Error::other(format!("build client: {error}")))?;
    let client = connected.client;

    let report = json!({
        "mode": client.mode().as_str(),
        "baseUrl": config.base_url.as_str(),
        "views": {
            "admin.stats": summarise(client.admin().get_dashboard_stats().await),
            "doctor.appointments": summarise(
                client.doctor().get_my_appointments(&args.doctor_id).await
            ),
            "patient.bills": summarise(client.patient().get_bills(&args.patient_id).await),
            "common.departments": summarise(client.common().get_departments().await),
        },
    });
    print_report(&client, &report)
}

/// Environment configuration with the `--mode` override applied.
fn resolve_config<E: Env>(env: &E, mode: Option<DataMode>) -> io::Result<ClientConfig> {
    let config = ClientConfig::from_env(env)
        .map_err(|error| io::Error::other(format!("read configuration: {error}")))?;
    Ok(match mode {
        Some(mode) => config.with_mode(mode),
        None => config,
    })
}

fn summarise<T>(outcome: Result<FetchResult<T>, ClientError>) -> Value
where
    T: serde::Serialize,
{
    match outcome {
        Ok(result) => json!({
            "isRealData": result.is_real_data,
            "data": result.data,
        }),
        Err(error) => json!({ "error": error.to_string() }),
    }
}

fn print_report(client: &ApiClient, report: &Value) -> io::Result<()> {
    let rendered = serde_json::to_string_pretty(report).map_err(io::Error::other)?;
    println!("{rendered}");
    let failed = report
        .get("views")
        .and_then(Value::as_object)
        .map_or(0, |views| {
            views.values().filter(|view| view.get("error").is_some()).count()
        });
    if failed > 0 {
        return Err(io::Error::other(format!(
            "{failed} view(s) failed in {} mode",
            client.mode()
        )));
    }
    Ok(())
}
