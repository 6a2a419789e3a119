//! Stripekit Common - Shared types and utilities
//!
//! This crate provides the coding group geometry type, the codec
//! configuration map, and the common error type used across Stripekit
//! components.

pub mod config;
pub mod error;
pub mod types;

pub use config::{CodecConfig, RS_RAWCODER_FACTORY_KEY, XOR_RAWCODER_FACTORY_KEY};
pub use error::{Error, Result};
pub use types::CoderOptions;
