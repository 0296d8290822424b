//! # TuneLead Common Library
//!
//! Shared code for the TuneLead services including:
//! - Database models and queries (leads, track requests)
//! - Error types
//! - Environment configuration
//! - Musical style tags and display symbols

pub mod config;
pub mod db;
pub mod error;
pub mod style;

pub use error::{Error, Result};
pub use style::StyleTag;
