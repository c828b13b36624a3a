use crate::core::{MetadataSink, Publisher};
use crate::domain::model::{PageMetadata, PublishReceipt};
use crate::utils::error::{PageError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use url::Url;

/// 把頁面寫進本機目錄
#[derive(Debug, Clone)]
pub struct LocalPublisher {
    base_path: PathBuf,
}

impl LocalPublisher {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

#[async_trait]
impl Publisher for LocalPublisher {
    async fn publish(&self, document: &str, suggested_name: &str) -> Result<PublishReceipt> {
        // 只取檔名部分，避免寫出目錄之外
        let file_name = Path::new(suggested_name)
            .file_name()
            .and_then(|name| name.to_str())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| PageError::PublishError {
                message: format!("Invalid page name: {}", suggested_name),
            })?;

        tokio::fs::create_dir_all(&self.base_path).await?;
        let full_path = self.base_path.join(file_name);
        tokio::fs::write(&full_path, document.as_bytes()).await?;

        let absolute = tokio::fs::canonicalize(&full_path).await?;
        let locator = Url::from_file_path(&absolute)
            .map(|url| url.to_string())
            .unwrap_or_else(|_| absolute.display().to_string());

        tracing::debug!("Wrote {} bytes to {}", document.len(), absolute.display());
        Ok(PublishReceipt {
            name: file_name.to_string(),
            locator,
        })
    }
}

/// 每次發佈在檔案尾端追加一行 JSON
#[derive(Debug, Clone)]
pub struct JsonlMetadataSink {
    path: PathBuf,
}

impl JsonlMetadataSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl MetadataSink for JsonlMetadataSink {
    async fn save(&self, metadata: &PageMetadata) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut line = serde_json::to_string(metadata)?;
        line.push('\n');

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_local_publisher_writes_file() {
        let temp_dir = TempDir::new().unwrap();
        let publisher = LocalPublisher::new(temp_dir.path().join("pages"));

        let receipt = publisher
            .publish("<html></html>", "surprise-1.html")
            .await
            .unwrap();

        assert_eq!(receipt.name, "surprise-1.html");
        assert!(receipt.locator.starts_with("file://"));
        assert!(receipt.locator.ends_with("surprise-1.html"));
        let written = std::fs::read_to_string(temp_dir.path().join("pages/surprise-1.html")).unwrap();
        assert_eq!(written, "<html></html>");
    }

    #[tokio::test]
    async fn test_local_publisher_stays_inside_directory() {
        let temp_dir = TempDir::new().unwrap();
        let publisher = LocalPublisher::new(temp_dir.path().join("pages"));

        let receipt = publisher.publish("x", "../escape.html").await.unwrap();

        assert_eq!(receipt.name, "escape.html");
        assert!(temp_dir.path().join("pages/escape.html").exists());
        assert!(!temp_dir.path().join("escape.html").exists());
    }

    #[tokio::test]
    async fn test_jsonl_sink_appends_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("meta/pages.jsonl");
        let sink = JsonlMetadataSink::new(&path);

        for name in ["Alex", "Jo"] {
            let metadata = PageMetadata {
                recipient_name: name.to_string(),
                author_name: "Sam".to_string(),
                locator: format!("file:///tmp/{}.html", name),
                created_at: Utc::now(),
            };
            sink.save(&metadata).await.unwrap();
        }

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        let second: PageMetadata = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second.recipient_name, "Jo");
    }
}
