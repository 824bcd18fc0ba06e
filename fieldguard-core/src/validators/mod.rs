//! Submission Validators
//!
//! ## Overview
//!
//! Validators are the first gate a submission passes. They decide whether a
//! reading is well-formed enough to be admitted, without touching storage or
//! the clock: the ingestion instant is always handed in through
//! [`ValidationContext`](crate::traits::ValidationContext).
//!
//! ## Validation Layers
//!
//! ### 1. Numeric Sanity
//! NaN and infinities are rejected outright. No range check is applied:
//! what counts as plausible depends on the sensor kind, which the pipeline
//! does not know.
//!
//! ### 2. Freshness
//! A reading may not come from the future and may not be older than the
//! freshness window (24 hours by default). Devices that were offline longer
//! must not backfill rollups that were already published.
//!
//! ### 3. Source Identity
//! Source identifiers must be canonical hyphenated UUIDs, so storage keys
//! stay uniform.
//!
//! ## Usage Example
//!
//! ```rust
//! use chrono::{Duration, Utc};
//! use fieldguard_core::{Reading, ValidationContext, Validator};
//! use fieldguard_core::validators::IngestionValidator;
//!
//! let validator = IngestionValidator::default();
//! let ctx = ValidationContext::at(Utc::now());
//!
//! let reading = Reading::new(
//!     "123e4567-e89b-12d3-a456-426614174000",
//!     27.4,
//!     ctx.now - Duration::minutes(5),
//! );
//! validator.validate(&reading, &ctx)?;
//! # Ok::<(), fieldguard_core::IngestionError>(())
//! ```

mod ingestion;
pub mod utils;

pub use ingestion::{validate_ingestion, IngestionValidator, ValidationVerdict};
