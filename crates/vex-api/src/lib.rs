//! vex-api — HTTP surface of the vex extraction server.
//!
//! A single handler serves every path and method. The query carries the
//! bounding box:
//!
//! | Parameter | Alias | Meaning |
//! |---|---|---|
//! | `north` | `n` | northern latitude |
//! | `south` | `s` | southern latitude |
//! | `east` | `e` | eastern longitude |
//! | `west` | `w` | western longitude |
//!
//! A valid box answers `200 application/octet-stream` with the engine's
//! stdout as the body; anything else answers `400 text/plain`.

pub mod handlers;

use std::sync::Arc;

use axum::Router;
use vex_core::VexConfig;
use vex_extract::Extractor;

/// Shared state for the handler. Read-only after startup.
#[derive(Clone)]
pub struct ApiState {
    pub extractor: Arc<Extractor>,
}

impl ApiState {
    pub fn new(extractor: Extractor) -> Self {
        Self {
            extractor: Arc::new(extractor),
        }
    }
}

/// Build the router from the startup configuration.
pub fn build_router(config: &VexConfig) -> Router {
    router(ApiState::new(Extractor::from_config(config)))
}

/// Build the router around an existing state.
pub fn router(state: ApiState) -> Router {
    Router::new().fallback(handlers::extract).with_state(state)
}
