use std::sync::Arc;

use crate::dashboard::Dashboard;

/// The corpus is loaded once and never mutated, so handlers share it without locking.
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<Dashboard>,
}
