//! Observable state of one data hook.

use serde::Serialize;

/// Snapshot handed to presentation code.
///
/// A fresh hook is loading with nothing to show. A state that is loading
/// never carries an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HookState<T> {
    /// Last successfully fetched value.
    pub data: Option<T>,
    /// Whether a fetch cycle is in flight.
    pub loading: bool,
    /// Message of the last failed cycle.
    pub error: Option<String>,
    /// Whether `data` came from the backend rather than demo data.
    pub is_real_data: bool,
}

impl<T> Default for HookState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
            is_real_data: false,
        }
    }
}

impl<T> HookState<T> {
    /// Whether presentation code should flag the data as demo content.
    pub fn shows_demo_banner(&self) -> bool {
        self.data.is_some() && !self.is_real_data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_is_loading_without_error() {
        let state = HookState::<u32>::default();
        assert!(state.loading);
        assert!(state.data.is_none());
        assert!(state.error.is_none());
        assert!(!state.is_real_data);
    }

    #[test]
    fn serialises_for_presentation() {
        let state = HookState {
            data: Some(3),
            loading: false,
            error: None,
            is_real_data: false,
        };
        let json = serde_json::to_value(&state).expect("serialise");
        assert_eq!(
            json,
            serde_json::json!({"data": 3, "loading": false, "error": null, "isRealData": false})
        );
        assert!(state.shows_demo_banner());
    }
}
