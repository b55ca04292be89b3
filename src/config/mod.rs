//! Configuration module for page extraction
//!
//! This module provides the `ExtractionConfig` struct and its builder for
//! tuning the locator, the noise lexicons and the action timings.

pub mod builder;
pub mod types;

pub use builder::ExtractionConfigBuilder;
pub use types::{DEFAULT_LOCATOR_SELECTORS, ExtractionConfig, LocatorConfig, NoiseLexicon};
