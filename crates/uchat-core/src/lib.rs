#![allow(clippy::must_use_candidate)]

mod client;
mod error;

pub use client::{ClientContext, ClientInfo};
pub use error::{ErrorBody, ErrorDetails, HttpError};

/// Instant used for every persisted or rendered timestamp
pub type Timestamp = jiff::Timestamp;
