//! Adapters layer: Concrete implementations of ports and outer surfaces.
//!
//! - `model`: logistic regression artifact loaded from JSON
//! - `http`: axum REST surface consumed by external clients

pub mod http;
pub mod model;
