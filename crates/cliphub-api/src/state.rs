//! Application state shared across handlers.
//!
//! Handlers see only the two domain services; the store and gateway are
//! injected into those at construction time (no ambient/global state).

use crate::services::{EngagementService, VideoLifecycleService};
use cliphub_core::Config;

pub struct AppState {
    pub config: Config,
    pub lifecycle: VideoLifecycleService,
    pub engagement: EngagementService,
}
