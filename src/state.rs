//! Application state shared across handlers.

use crate::unipa::UnipaClient;
use std::sync::Arc;

/// Shared, cheaply cloneable handler state.
///
/// The catalog client is the only shared resource; each request runs its own
/// independent two-step exchange against the upstream.
#[derive(Clone)]
pub struct AppState {
    pub unipa: Arc<UnipaClient>,
}

impl AppState {
    pub fn new(unipa: Arc<UnipaClient>) -> Self {
        Self { unipa }
    }
}
