//! brandlift-common — Shared types, errors, and tabular plumbing used across
//! all Brandlift crates.

pub mod error;
pub mod columns;
pub mod frame;
pub mod records;
pub mod campaign_config;

// Re-export commonly used types
pub use error::{BrandliftError, Result};
pub use frame::{Column, Frame, SortOrder};
pub use records::{DemographicProfile, TrendPoint, TrendSeries};
pub use campaign_config::CampaignConfig;
