//! Lente marketplace client core
//!
//! Availability slot management and community comment threads on top of the
//! marketplace REST backend.

pub mod api;
pub mod auth;
pub mod availability;
pub mod comments;
pub mod config;
pub mod errors;
pub mod models;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub use api::{ApiClient, AvailabilityApi, CommentApi};
pub use auth::Viewer;
pub use availability::AvailabilityManager;
pub use comments::{CommentThread, Composer};
pub use config::Config;
pub use errors::AppError;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Calling this more
/// than once is harmless.
pub fn init_tracing(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(api_url = %config.api_url, "Tracing initialized");
        if config.api_key.is_none() {
            tracing::warn!("No API key configured (LENTE_API_KEY). Requests are sent unauthenticated");
        }
    }
}
