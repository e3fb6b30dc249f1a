//! Behaviour tests for the client guardrails.
//!
//! Each scenario lays sources out under a temporary `client/src` and runs the
//! same entry point the CLI uses.

use std::fs;
use std::sync::Mutex;

use camino::Utf8PathBuf;
use client_guardrails::{Finding, GuardrailError, SourceFile};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;

#[derive(Debug, Default)]
struct GuardrailWorld {
    sources: Vec<SourceFile>,
    findings: Option<Vec<Finding>>,
}

#[fixture]
fn world() -> Mutex<GuardrailWorld> {
    Mutex::new(GuardrailWorld::default())
}

fn add_source(world: &Mutex<GuardrailWorld>, path: &str, contents: &str) {
    let mut world = world.lock().expect("world lock");
    world.sources.retain(|source| source.path.as_str() != path);
    world.sources.push(SourceFile::new(path, contents));
}

#[given("a correctly layered client")]
fn a_correctly_layered_client(world: &Mutex<GuardrailWorld>) {
    add_source(
        world,
        "lib.rs",
        "pub mod api; pub mod domain; pub mod inbound; pub mod outbound;",
    );
    add_source(
        world,
        "domain/mod.rs",
        "pub struct Dispatcher; impl Dispatcher { pub async fn dispatch<T>(&self, f: impl FnOnce() -> T) -> T { f() } }",
    );
    add_source(
        world,
        "api/patient.rs",
        "use super::ClientCore; impl PatientApi { pub async fn bills(&self) -> Bills { self.core.dispatch(get(\"patient.bills\", \"/patient/bills\"), || self.core.demo.bills()).await } }",
    );
    add_source(
        world,
        "inbound/hooks/mod.rs",
        "use crate::api::ApiClient; use tokio::sync::watch; pub fn hook(client: &ApiClient) {}",
    );
    add_source(
        world,
        "outbound/reqwest_exchange.rs",
        "use reqwest::Client; use crate::domain::ports::HttpExchange; pub struct ReqwestExchange(Client);",
    );
}

#[given("a data hook that imports the reqwest adapter")]
fn a_data_hook_that_imports_the_reqwest_adapter(world: &Mutex<GuardrailWorld>) {
    add_source(
        world,
        "inbound/hooks/mod.rs",
        "use crate::outbound::ReqwestExchange; pub fn hook() { let _ = ReqwestExchange::default(); }",
    );
}

#[given("a domain module that calls reqwest directly")]
fn a_domain_module_that_calls_reqwest_directly(world: &Mutex<GuardrailWorld>) {
    add_source(
        world,
        "domain/transport.rs",
        "pub async fn send() { let _ = reqwest::get(\"http://localhost\").await; }",
    );
}

#[given("an API operation that checks whether the client is in fake mode")]
fn an_api_operation_that_checks_for_fake_mode(world: &Mutex<GuardrailWorld>) {
    add_source(
        world,
        "api/patient.rs",
        "impl PatientApi { pub async fn bills(&self) -> Bills { if self.core.dispatcher.is_fake() { return self.core.demo.bills(); } todo!() } }",
    );
}

#[given("an API operation that sends through the transport")]
fn an_api_operation_that_sends_through_the_transport(world: &Mutex<GuardrailWorld>) {
    add_source(
        world,
        "api/patient.rs",
        "impl PatientApi { pub async fn bills(&self) -> Bills { self.core.transport.request_json(\"/patient/bills\").await } }",
    );
}

#[given("test-only code that crosses layers and branches on the mode")]
fn test_only_code_that_crosses_layers(world: &Mutex<GuardrailWorld>) {
    add_source(
        world,
        "api/mod.rs",
        "mod patient;\n#[cfg(test)]\nmod mode_matrix;\n#[cfg(test)]\nmod tests { use crate::outbound::ReqwestExchange; }",
    );
    add_source(
        world,
        "api/mode_matrix.rs",
        "use crate::outbound::ReqwestExchange; fn check(mode: DataMode) { match mode { DataMode::Real => {} _ => {} } }",
    );
}

#[given("an adapter that reaches the API through super paths")]
fn an_adapter_that_reaches_the_api_through_super_paths(world: &Mutex<GuardrailWorld>) {
    add_source(
        world,
        "outbound/login_redirect.rs",
        "use super::super::api::ApiClient; pub struct Redirect(ApiClient);",
    );
}

#[when("the guardrails run")]
fn the_guardrails_run(world: &Mutex<GuardrailWorld>) {
    let sources = world.lock().expect("world lock").sources.clone();

    let temp_dir = TempDir::new().expect("tempdir");
    let client_dir =
        Utf8PathBuf::from_path_buf(temp_dir.path().join("client")).expect("UTF-8 tempdir");
    for source in &sources {
        let path = client_dir.join("src").join(&source.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent directories");
        }
        fs::write(&path, &source.contents).expect("write source file");
    }

    let findings = match client_guardrails::check_client(&client_dir) {
        Ok(()) => Vec::new(),
        Err(GuardrailError::Findings(findings)) => findings,
        Err(other) => panic!("expected findings or success, got: {other}"),
    };
    world.lock().expect("world lock").findings = Some(findings);
}

fn findings(world: &Mutex<GuardrailWorld>) -> Vec<Finding> {
    world
        .lock()
        .expect("world lock")
        .findings
        .clone()
        .expect("guardrails must have run")
}

#[then("the guardrails pass")]
fn the_guardrails_pass(world: &Mutex<GuardrailWorld>) {
    let findings = findings(world);
    assert!(findings.is_empty(), "expected a pass, got: {findings:?}");
}

#[then("the guardrails report \"{code}\" in \"{file}\"")]
fn the_guardrails_report(world: &Mutex<GuardrailWorld>, code: String, file: String) {
    let findings = findings(world);
    assert!(
        findings
            .iter()
            .any(|finding| finding.rule.code() == code && finding.file.as_str() == file),
        "expected a {code} finding in {file}, got: {findings:?}"
    );
}

#[scenario(
    path = "tests/features/guardrails.feature",
    name = "A correctly layered client passes"
)]
fn a_correctly_layered_client_passes(world: Mutex<GuardrailWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/guardrails.feature",
    name = "A data hook reaching an adapter fails"
)]
fn a_data_hook_reaching_an_adapter_fails(world: Mutex<GuardrailWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/guardrails.feature",
    name = "Domain code using an HTTP crate fails"
)]
fn domain_code_using_an_http_crate_fails(world: Mutex<GuardrailWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/guardrails.feature",
    name = "An API operation branching on the mode fails"
)]
fn an_api_operation_branching_on_the_mode_fails(world: Mutex<GuardrailWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/guardrails.feature",
    name = "An API operation calling the transport fails"
)]
fn an_api_operation_calling_the_transport_fails(world: Mutex<GuardrailWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/guardrails.feature",
    name = "Test code is exempt"
)]
fn test_code_is_exempt(world: Mutex<GuardrailWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/guardrails.feature",
    name = "Relative paths are resolved before checking"
)]
fn relative_paths_are_resolved_before_checking(world: Mutex<GuardrailWorld>) {
    let _ = world;
}
