use std::sync::Arc;

use crate::linkmeta::MetadataFetcher;
use crate::store::TaskStore;

/// Shared application state passed to all handlers.
/// The metadata fetcher owns the HTTP client (built once at startup) so
/// every request reuses its connection pool.
#[derive(Clone)]
pub struct AppState {
    pub tasks: TaskStore,
    pub fetcher: Arc<MetadataFetcher>,
}
