//! Reactive data hooks binding API calls to observable state.
//!
//! A [`DataHook`] owns one fetch function and the latest [`HookState`].
//! Presentation code calls [`DataHook::render`] with its current
//! dependencies; a change of dependencies starts a fetch cycle on the Tokio
//! runtime and state changes are published through a watch channel.
//!
//! Every cycle is stamped with a generation number. Only the cycle holding
//! the newest generation may settle, so a slow earlier request can never
//! overwrite the outcome of a later one.

mod specialised;
mod state;

use std::fmt::Display;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use tokio::sync::watch;
use tracing::debug;

pub use specialised::{
    use_admin_stats, use_appointments, use_billing_summary, use_bills, use_departments,
    use_doctor_appointments, use_doctor_patients, use_doctor_schedule, use_doctor_stats,
    use_doctors, use_lab_results, use_medical_records, use_notifications, use_patient_appointments,
    use_patient_stats, use_patient_vitals, use_patients, use_prescriptions, use_profile,
    use_recent_activity,
};
pub use state::HookState;

use crate::domain::{ClientError, FetchResult, fetch_with_fallback};

/// Boxed future produced by one fetch cycle.
pub type HookFuture<T> = BoxFuture<'static, Result<FetchResult<T>, ClientError>>;

type FetchFn<T, D> = Arc<dyn Fn(&D) -> HookFuture<T> + Send + Sync>;

struct Shared<T> {
    generation: Mutex<u64>,
    state: watch::Sender<HookState<T>>,
}

impl<T> Shared<T> {
    fn settle(&self, generation: u64, outcome: Result<FetchResult<T>, ClientError>) {
        let current = self
            .generation
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if *current != generation {
            debug!(generation, current = *current, "discarding stale hook result");
            return;
        }
        self.state.send_modify(move |state| {
            match outcome {
                Ok(result) => {
                    state.data = Some(result.data);
                    state.is_real_data = result.is_real_data;
                    state.error = None;
                }
                Err(err) => state.error = Some(err.to_string()),
            }
            state.loading = false;
        });
    }
}

/// State holder for one fetch function and its dependencies.
///
/// Fetch cycles are spawned with [`tokio::spawn`], so [`DataHook::render`]
/// and [`DataHook::refetch`] must run inside a Tokio runtime.
pub struct DataHook<T, D> {
    fetch: FetchFn<T, D>,
    shared: Arc<Shared<T>>,
    deps: Mutex<Option<D>>,
}

impl<T, D> DataHook<T, D>
where
    T: Send + Sync + 'static,
    D: Clone + PartialEq + Send + Sync + 'static,
{
    /// Bind a domain API function.
    ///
    /// The function already applies the client's mode policy, so real-mode
    /// failures land in [`HookState::error`] while hybrid failures arrive as
    /// demo data.
    pub fn from_api<F, Fut>(call: F) -> Self
    where
        F: Fn(&D) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<FetchResult<T>, ClientError>> + Send + 'static,
    {
        Self::with_fetch(Arc::new(move |deps: &D| -> HookFuture<T> { call(deps).boxed() }))
    }

    fn with_fetch(fetch: FetchFn<T, D>) -> Self {
        let (state, _) = watch::channel(HookState::default());
        Self {
            fetch,
            shared: Arc::new(Shared {
                generation: Mutex::new(0),
                state,
            }),
            deps: Mutex::new(None),
        }
    }

    /// Report the caller's current dependencies.
    ///
    /// The first render and every render whose `deps` differ from the
    /// previous ones reset the state and start a fetch cycle. Returns whether
    /// a cycle started.
    pub fn render(&self, deps: D) -> bool {
        {
            let mut current = self.deps.lock().unwrap_or_else(PoisonError::into_inner);
            if current.as_ref() == Some(&deps) {
                return false;
            }
            *current = Some(deps.clone());
        }
        self.start(&deps, true);
        true
    }

    /// Run another cycle with the current dependencies, keeping the data
    /// shown so far. Returns `false` before the first render.
    pub fn refetch(&self) -> bool {
        let deps = self
            .deps
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        let Some(deps) = deps else {
            return false;
        };
        self.start(&deps, false);
        true
    }

    /// Current state.
    pub fn state(&self) -> HookState<T>
    where
        T: Clone,
    {
        self.shared.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<HookState<T>> {
        self.shared.state.subscribe()
    }

    /// Wait until no cycle is in flight and return that state.
    pub async fn settled(&self) -> HookState<T>
    where
        T: Clone,
    {
        let mut receiver = self.subscribe();
        let settled = match receiver.wait_for(|state| !state.loading).await {
            Ok(state) => Some(state.clone()),
            Err(_) => None,
        };
        settled.unwrap_or_else(|| self.state())
    }

    fn start(&self, deps: &D, reset: bool) {
        let generation = {
            let mut generation = self
                .shared
                .generation
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            *generation = generation.wrapping_add(1);
            self.shared.state.send_modify(|state| {
                if reset {
                    state.data = None;
                    state.is_real_data = false;
                }
                state.loading = true;
                state.error = None;
            });
            *generation
        };
        let cycle = (self.fetch)(deps);
        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move {
            let outcome = cycle.await;
            shared.settle(generation, outcome);
        });
    }
}

/// Resilient hook around a raw call.
///
/// Each cycle runs [`fetch_with_fallback`], so a failing `call` yields the
/// output of `fallback` flagged as demo data and the state never carries an
/// error.
pub fn use_api<T, D, E, F, Fut, G>(call: F, fallback: G) -> DataHook<T, D>
where
    T: Send + Sync + 'static,
    D: Clone + PartialEq + Send + Sync + 'static,
    E: Display + Send + 'static,
    F: Fn(&D) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    G: Fn(&D) -> T + Send + Sync + 'static,
{
    let fallback = Arc::new(fallback);
    DataHook::with_fetch(Arc::new(move |deps: &D| -> HookFuture<T> {
        let live = call(deps);
        let fallback = Arc::clone(&fallback);
        let deps = deps.clone();
        async move { Ok(fetch_with_fallback(|| live, move || fallback(&deps)).await) }.boxed()
    }))
}

#[cfg(test)]
mod tests {
    //! Cycle, generation and failure handling.
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use tokio::sync::oneshot;

    use super::*;

    type Outcome = Result<FetchResult<u32>, ClientError>;
    type Gates = Arc<Mutex<Vec<oneshot::Sender<Outcome>>>>;

    /// Hook whose cycles wait until the test releases them.
    fn gated() -> (DataHook<u32, u32>, Gates) {
        let gates: Gates = Arc::new(Mutex::new(Vec::new()));
        let pending = Arc::clone(&gates);
        let hook = DataHook::from_api(move |_: &u32| {
            let (sender, receiver) = oneshot::channel();
            pending.lock().expect("gates").push(sender);
            async move {
                receiver
                    .await
                    .unwrap_or_else(|_| Err(ClientError::transport("gate dropped")))
            }
        });
        (hook, gates)
    }

    fn release(gates: &Gates, index: usize, outcome: Outcome) {
        let sender = gates.lock().expect("gates").remove(index);
        assert!(sender.send(outcome).is_ok(), "cycle still waiting");
    }

    #[tokio::test]
    async fn renders_fetch_once_per_distinct_deps() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let hook = DataHook::from_api(move |deps: &u32| {
            counter.fetch_add(1, Ordering::SeqCst);
            let value = *deps * 10;
            async move { Ok(FetchResult::live(value)) }
        });

        assert!(hook.render(1));
        assert!(!hook.render(1));
        assert_eq!(hook.settled().await.data, Some(10));
        assert!(!hook.render(1));
        assert!(hook.render(2));
        assert_eq!(hook.settled().await.data, Some(20));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn stale_cycle_never_overwrites_newer_state() {
        let (hook, gates) = gated();
        assert!(hook.render(1));
        assert!(hook.refetch());

        release(&gates, 1, Ok(FetchResult::live(2)));
        let settled = hook.settled().await;
        assert_eq!(settled.data, Some(2));

        release(&gates, 0, Ok(FetchResult::live(1)));
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(hook.state().data, Some(2));
        assert!(hook.state().is_real_data);
    }

    #[tokio::test]
    async fn failure_keeps_data_and_reports_error() {
        let (hook, gates) = gated();
        hook.render(1);
        release(&gates, 0, Ok(FetchResult::fallback(7)));
        assert_eq!(hook.settled().await.data, Some(7));

        assert!(hook.refetch());
        let refetching = hook.state();
        assert!(refetching.loading);
        assert_eq!(refetching.data, Some(7));
        assert!(refetching.error.is_none());

        release(&gates, 0, Err(ClientError::request_failed(503, "status 503")));
        let failed = hook.settled().await;
        assert_eq!(failed.data, Some(7));
        assert!(!failed.loading);
        assert!(failed.error.is_some_and(|message| message.contains("503")));
    }

    #[tokio::test]
    async fn deps_change_clears_previous_data() {
        let (hook, gates) = gated();
        hook.render(1);
        release(&gates, 0, Ok(FetchResult::live(1)));
        hook.settled().await;

        hook.render(2);
        assert_eq!(hook.state(), HookState::default());
    }

    #[test]
    fn refetch_before_first_render_is_ignored() {
        let hook = DataHook::from_api(|_: &()| async { Ok(FetchResult::live(1_u32)) });
        assert!(!hook.refetch());
        assert_eq!(hook.state(), HookState::default());
    }

    #[tokio::test]
    async fn use_api_serves_fallback_without_error() {
        let hook = use_api(
            |_: &String| async { Err::<Vec<u32>, _>("connection refused") },
            |deps: &String| vec![u32::try_from(deps.len()).unwrap_or(0)],
        );
        hook.render("doc1".to_owned());

        let state = hook.settled().await;
        assert_eq!(state.data, Some(vec![4]));
        assert!(!state.is_real_data);
        assert!(state.error.is_none());
    }
}
