pub mod club;
pub mod journees;
pub mod players;
pub mod statistics;

use serde::Deserialize;

use crate::api::ApiError;
use crate::dashboard::JourneeFilter;

/// `?filter=` shared by the views that cover one or all journées.
#[derive(Debug, Default, Deserialize)]
pub struct FilterParams {
    pub filter: Option<String>,
}

impl FilterParams {
    pub fn journee_filter(&self) -> Result<JourneeFilter, ApiError> {
        Ok(self.filter.as_deref().unwrap_or_default().parse()?)
    }
}
