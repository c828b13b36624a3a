pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::cli::{JsonlMetadataSink, LocalPublisher};
pub use crate::config::object_store::{ObjectStorePublisher, RestMetadataSink};
pub use crate::config::toml_config::AppConfig;
pub use crate::core::{
    composer::DocumentComposer,
    publish::{PublishFlow, PublishOutcome},
    resolver::{HttpMediaFetcher, MediaResolver, ResolvedProfile},
};
pub use crate::domain::defaults::{ProfileDefaults, ProfileDraft};
pub use crate::domain::model::{Highlight, MediaRef, PersonalizationProfile, TimeCapsule};
pub use crate::utils::error::{PageError, Result};
