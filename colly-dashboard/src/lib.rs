pub mod app;
pub mod cluster;
pub mod datepicker;
pub mod environment;
pub mod grid;
pub mod modal;
pub mod nav;
pub mod view_state;

pub const LOGOUT_URL: &str = "/q/oidc/logout";

/// Fixed per-browser localStorage slot for the environments table
/// display preferences.
pub const ENV_TABLE_STATE_KEY: &str = "env-table-state";

/// Delay before a freshly restored table starts persisting changes, so
/// the restore itself is never written back.
pub const RESTORE_SETTLE_MS: u64 = 100;
