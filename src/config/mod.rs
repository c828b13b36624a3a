pub mod cli;
pub mod object_store;
pub mod toml_config;

use crate::domain::defaults::ProfileDraft;
use crate::utils::error::Result;
use std::path::Path;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "surprise-page")]
#[command(about = "Compose a personalized surprise page and publish it")]
pub struct CliConfig {
    /// Profile file (JSON or TOML)
    #[arg(long)]
    pub profile: String,

    /// Settings file (TOML)
    #[arg(long)]
    pub config: Option<String>,

    /// Overrides publisher.output_path for local publishing
    #[arg(long)]
    pub output_path: Option<String>,

    #[arg(long, help = "Keep image URLs instead of embedding them")]
    pub no_embed: bool,

    #[arg(long, help = "Print the page to stdout instead of publishing")]
    pub dry_run: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// 讀取 profile 草稿；副檔名為 .toml 時以 TOML 解析，其餘以 JSON 解析
pub fn load_profile_draft<P: AsRef<Path>>(path: P) -> Result<ProfileDraft> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;

    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    if is_toml {
        Ok(toml::from_str(&content)?)
    } else {
        Ok(serde_json::from_str(&content)?)
    }
}
