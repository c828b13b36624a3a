use crate::config::cli::{JsonlMetadataSink, LocalPublisher};
use crate::config::object_store::{
    ObjectStorePublisher, RestMetadataSink, DEFAULT_AUTHOR_COLUMN, DEFAULT_RECIPIENT_COLUMN,
};
use crate::core::resolver::HttpMediaFetcher;
use crate::core::{MetadataSink, Publisher};
use crate::domain::defaults::ProfileDefaults;
use crate::utils::error::{PageError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_range, validate_required_field,
    validate_url, Validate,
};
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_OUTPUT_PATH: &str = "./output";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub resolver: ResolverConfig,
    pub publisher: PublisherConfig,
    pub metadata: MetadataConfig,
    pub defaults: ProfileDefaults,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub enabled: bool,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout_seconds: 10,
            user_agent: concat!("surprise-page/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PublisherConfig {
    /// "local" 或 "object_store"
    pub kind: String,
    pub output_path: Option<String>,
    pub endpoint: Option<String>,
    pub bucket: Option<String>,
    pub api_key: Option<String>,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            kind: "local".to_string(),
            output_path: None,
            endpoint: None,
            bucket: None,
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataConfig {
    /// "none"、"jsonl" 或 "rest"
    pub kind: String,
    pub path: Option<String>,
    pub endpoint: Option<String>,
    pub table: String,
    pub api_key: Option<String>,
    /// 收件人、作者在資料表中的欄位名稱
    pub recipient_column: String,
    pub author_column: String,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            kind: "none".to_string(),
            path: None,
            endpoint: None,
            table: "pages".to_string(),
            api_key: None,
            recipient_column: DEFAULT_RECIPIENT_COLUMN.to_string(),
            author_column: DEFAULT_AUTHOR_COLUMN.to_string(),
        }
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${API_KEY})，找不到的變數保留原文
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PageError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.resolver.timeout_seconds)
    }

    pub fn output_path(&self) -> &str {
        self.publisher
            .output_path
            .as_deref()
            .unwrap_or(DEFAULT_OUTPUT_PATH)
    }

    fn http_client(&self) -> Result<Client> {
        Ok(Client::builder()
            .timeout(self.timeout())
            .user_agent(self.resolver.user_agent.as_str())
            .build()?)
    }

    pub fn build_fetcher(&self) -> Result<HttpMediaFetcher> {
        Ok(HttpMediaFetcher::with_client(self.http_client()?))
    }

    pub fn build_publisher(&self) -> Result<Box<dyn Publisher>> {
        match self.publisher.kind.as_str() {
            "local" => Ok(Box::new(LocalPublisher::new(self.output_path()))),
            "object_store" => {
                let endpoint = validate_required_field("publisher.endpoint", &self.publisher.endpoint)?;
                let bucket = validate_required_field("publisher.bucket", &self.publisher.bucket)?;
                Ok(Box::new(ObjectStorePublisher::new(
                    self.http_client()?,
                    endpoint,
                    bucket,
                    self.publisher.api_key.clone(),
                )))
            }
            other => Err(unsupported_kind("publisher.kind", other, &["local", "object_store"])),
        }
    }

    pub fn build_metadata_sink(&self) -> Result<Option<Box<dyn MetadataSink>>> {
        match self.metadata.kind.as_str() {
            "none" => Ok(None),
            "jsonl" => {
                let path = validate_required_field("metadata.path", &self.metadata.path)?;
                Ok(Some(Box::new(JsonlMetadataSink::new(path))))
            }
            "rest" => {
                let endpoint = validate_required_field("metadata.endpoint", &self.metadata.endpoint)?;
                let sink = RestMetadataSink::new(
                    self.http_client()?,
                    endpoint,
                    &self.metadata.table,
                    self.metadata.api_key.clone(),
                )
                .with_columns(&self.metadata.recipient_column, &self.metadata.author_column);
                Ok(Some(Box::new(sink)))
            }
            other => Err(unsupported_kind("metadata.kind", other, &["none", "jsonl", "rest"])),
        }
    }
}

fn unsupported_kind(field: &str, value: &str, valid: &[&str]) -> PageError {
    PageError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: format!("Unsupported kind. Valid kinds: {}", valid.join(", ")),
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_range("resolver.timeout_seconds", self.resolver.timeout_seconds, 1, 300)?;
        validate_non_empty_string("resolver.user_agent", &self.resolver.user_agent)?;

        match self.publisher.kind.as_str() {
            "local" => validate_path("publisher.output_path", self.output_path())?,
            "object_store" => {
                let endpoint = validate_required_field("publisher.endpoint", &self.publisher.endpoint)?;
                validate_url("publisher.endpoint", endpoint)?;
                let bucket = validate_required_field("publisher.bucket", &self.publisher.bucket)?;
                validate_non_empty_string("publisher.bucket", bucket)?;
            }
            other => {
                return Err(unsupported_kind("publisher.kind", other, &["local", "object_store"]))
            }
        }

        match self.metadata.kind.as_str() {
            "none" => {}
            "jsonl" => {
                let path = validate_required_field("metadata.path", &self.metadata.path)?;
                validate_path("metadata.path", path)?;
            }
            "rest" => {
                let endpoint = validate_required_field("metadata.endpoint", &self.metadata.endpoint)?;
                validate_url("metadata.endpoint", endpoint)?;
                validate_non_empty_string("metadata.table", &self.metadata.table)?;
                validate_non_empty_string("metadata.recipient_column", &self.metadata.recipient_column)?;
                validate_non_empty_string("metadata.author_column", &self.metadata.author_column)?;
            }
            other => return Err(unsupported_kind("metadata.kind", other, &["none", "jsonl", "rest"])),
        }

        tracing::debug!("✅ Configuration validation passed");
        Ok(())
    }
}
