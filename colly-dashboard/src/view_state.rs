//! Persistence of table display preferences in browser localStorage.
//!
//! Storage access only exists on wasm; host builds (and the test suite)
//! get a no-op store so everything above this module stays testable.

use crate::grid::GridViewState;

pub fn parse_view_state(raw: &str) -> Option<GridViewState> {
    match serde_json::from_str(raw) {
        Ok(state) => Some(state),
        Err(err) => {
            leptos::logging::error!("failed to parse saved table state: {err}");
            None
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub fn load_view_state(key: &str) -> Option<GridViewState> {
    let storage = web_sys::window()?.local_storage().ok()??;
    let raw = storage.get_item(key).ok()??;
    parse_view_state(&raw)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_view_state(_key: &str) -> Option<GridViewState> {
    None
}

#[cfg(target_arch = "wasm32")]
pub fn save_view_state(key: &str, state: &GridViewState) {
    let raw = match serde_json::to_string(state) {
        Ok(raw) => raw,
        Err(err) => {
            leptos::logging::error!("failed to serialize table state: {err}");
            return;
        }
    };
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if let Err(err) = storage.set_item(key, &raw) {
                leptos::logging::error!("failed to save table state: {err:?}");
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save_view_state(_key: &str, _state: &GridViewState) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{set_filter, toggle_sort};

    #[test]
    fn saved_state_round_trips_through_json() {
        let mut state = GridViewState::default();
        toggle_sort(&mut state, "cluster");
        set_filter(&mut state, "team", "platform");
        state.hidden_columns.push("description".to_string());
        state.column_widths.insert("name".to_string(), 240);
        state.page = 1;

        let raw = serde_json::to_string(&state).unwrap();
        assert_eq!(parse_view_state(&raw), Some(state));
    }

    #[test]
    fn malformed_state_is_ignored() {
        assert_eq!(parse_view_state("not json"), None);
        assert_eq!(parse_view_state(r#"{"page": "three"}"#), None);
        // unknown fields from older layouts are tolerated
        assert!(parse_view_state(r#"{"page": 1, "rowSelection": [4]}"#).is_some());
    }
}
