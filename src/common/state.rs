// Application state shared across all modules

use std::sync::Arc;

use crate::relay::SessionRelay;
use crate::upstream::UpstreamClient;

/// Application state containing the session relay and the upstream
/// finance API client
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<SessionRelay>,
    pub upstream: Arc<UpstreamClient>,
}
