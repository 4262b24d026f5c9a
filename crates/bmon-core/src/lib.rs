//! Core types for brand-mention monitoring.
//!
//! Holds the mention normalizer, the storage key namespace used to address the
//! external key/queue store, the API response envelope, brand records, and
//! application configuration. Nothing in this crate performs I/O except the
//! config and brand-file loaders.

pub mod app_config;
pub mod brands;
pub mod clock;
pub mod config;
pub mod envelope;
pub mod error;
pub mod keys;
pub mod mention;
pub mod normalize;

pub use app_config::{AppConfig, Environment};
pub use brands::{load_brands, BrandConfig, BrandRecord, BrandsFile};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{load_app_config, load_app_config_from_env};
pub use envelope::{ApiEnvelope, Availability, WAITING};
pub use error::{ConfigError, KeyError};
pub use keys::{StorageKey, TimeBucket};
pub use mention::{MentionMetadata, NormalizedMention, RawMention, RawTimestamp};
pub use normalize::{normalize_mention, normalize_mention_with_clock};
