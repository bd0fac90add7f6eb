// Application state module
// Everything the request handlers need, built once at startup

use crate::assets::StaticAssets;
use crate::relay::Relay;

use super::types::Config;

/// Application state, shared across connections via `Arc`
///
/// The asset buffers are read-only after startup and need no
/// synchronization; the relay guards its pin internally.
pub struct AppState {
    pub config: Config,
    pub assets: StaticAssets,
    pub relay: Relay,
}

impl AppState {
    pub const fn new(config: Config, assets: StaticAssets, relay: Relay) -> Self {
        Self {
            config,
            assets,
            relay,
        }
    }
}
