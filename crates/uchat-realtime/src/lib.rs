//! Realtime data enrichment
//!
//! Classifies chat messages into realtime categories, fetches fresh data
//! for each from web search and weather providers, and exposes the same
//! lookups as REST endpoints.

#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod cache;
pub mod category;
mod classifier;
mod error;
pub mod provider;
mod query;
mod router;
mod service;
mod snippet;

use std::sync::Arc;

pub use category::{CATEGORIES, Category};
pub use classifier::IntentClassifier;
pub use error::{RealtimeError, Result};
pub use provider::{OrganicResult, SearchProvider, SearchResults, WeatherProvider, WeatherReport};
pub use query::{extract_location, strip_filler};
pub use router::endpoint_router;
pub use service::{RealtimeService, RealtimeServiceBuilder, WeatherLookup};
pub use snippet::Snippet;

/// Build the realtime service from configuration
///
/// # Errors
///
/// Returns an error if a configured provider cannot be created
pub fn build_service(config: &uchat_config::Config) -> anyhow::Result<Arc<RealtimeService>> {
    let service = RealtimeServiceBuilder::new(config)
        .with_configured_providers(config)
        .map_err(|e| anyhow::anyhow!("failed to initialize realtime providers: {e}"))?
        .build();

    Ok(Arc::new(service))
}
