pub mod assets;
pub mod composer;
pub mod publish;
pub mod resolver;

pub use crate::domain::model::{MediaRef, PersonalizationProfile};
pub use crate::domain::ports::{MediaFetcher, MetadataSink, Publisher};
pub use crate::utils::error::Result;
