use crate::core::{MetadataSink, Publisher};
use crate::domain::model::{PageMetadata, PublishReceipt};
use crate::utils::error::{PageError, Result};
use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};
use serde_json::{json, Map, Value};

const PAGE_CACHE_CONTROL: &str = "max-age=3600";

fn with_api_key(request: RequestBuilder, api_key: Option<&str>) -> RequestBuilder {
    match api_key {
        Some(key) => request.bearer_auth(key).header("apikey", key),
        None => request,
    }
}

/// 上傳到物件儲存服務 (storage REST API) 並回傳公開網址
#[derive(Debug, Clone)]
pub struct ObjectStorePublisher {
    client: Client,
    endpoint: String,
    bucket: String,
    api_key: Option<String>,
}

impl ObjectStorePublisher {
    pub fn new(client: Client, endpoint: &str, bucket: &str, api_key: Option<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            bucket: bucket.to_string(),
            api_key,
        }
    }

    pub fn public_url(&self, name: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.endpoint, self.bucket, name
        )
    }
}

#[async_trait]
impl Publisher for ObjectStorePublisher {
    async fn publish(&self, document: &str, suggested_name: &str) -> Result<PublishReceipt> {
        let upload_url = format!(
            "{}/storage/v1/object/{}/{}",
            self.endpoint, self.bucket, suggested_name
        );
        tracing::debug!("Uploading page to: {}", upload_url);

        let request = self
            .client
            .post(&upload_url)
            .header(CONTENT_TYPE, "text/html")
            .header(CACHE_CONTROL, PAGE_CACHE_CONTROL)
            .header("x-upsert", "false")
            .body(document.to_string());
        let response = with_api_key(request, self.api_key.as_deref()).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PageError::PublishError {
                message: format!("upload returned HTTP {}: {}", status, body.trim()),
            });
        }

        Ok(PublishReceipt {
            name: suggested_name.to_string(),
            locator: self.public_url(suggested_name),
        })
    }
}

pub const DEFAULT_RECIPIENT_COLUMN: &str = "recipient_name";
pub const DEFAULT_AUTHOR_COLUMN: &str = "author_name";

/// 透過 REST 介面把中繼資料寫進資料表。
///
/// 收件人與作者的欄位名稱可以調整，例如既有的 `surprises` 表使用 `crush_name` / `your_name`。
#[derive(Debug, Clone)]
pub struct RestMetadataSink {
    client: Client,
    endpoint: String,
    table: String,
    api_key: Option<String>,
    recipient_column: String,
    author_column: String,
}

impl RestMetadataSink {
    pub fn new(client: Client, endpoint: &str, table: &str, api_key: Option<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            table: table.to_string(),
            api_key,
            recipient_column: DEFAULT_RECIPIENT_COLUMN.to_string(),
            author_column: DEFAULT_AUTHOR_COLUMN.to_string(),
        }
    }

    pub fn with_columns(mut self, recipient_column: &str, author_column: &str) -> Self {
        self.recipient_column = recipient_column.to_string();
        self.author_column = author_column.to_string();
        self
    }

    fn row(&self, metadata: &PageMetadata) -> Value {
        let mut row = Map::new();
        row.insert(
            self.recipient_column.clone(),
            Value::String(metadata.recipient_name.clone()),
        );
        row.insert(
            self.author_column.clone(),
            Value::String(metadata.author_name.clone()),
        );
        row.insert("page_url".to_string(), Value::String(metadata.locator.clone()));
        row.insert("created_at".to_string(), json!(metadata.created_at));
        row.insert("theme".to_string(), Value::String("default".to_string()));
        Value::Object(row)
    }
}

#[async_trait]
impl MetadataSink for RestMetadataSink {
    async fn save(&self, metadata: &PageMetadata) -> Result<()> {
        let url = format!("{}/rest/v1/{}", self.endpoint, self.table);
        let request = self
            .client
            .post(&url)
            .header("Prefer", "return=minimal")
            .json(&[self.row(metadata)]);
        let response = with_api_key(request, self.api_key.as_deref()).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PageError::MetadataError {
                message: format!("insert returned HTTP {}: {}", status, body.trim()),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_upload_returns_public_url() {
        let server = MockServer::start();
        let upload_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/storage/v1/object/surprises/surprise-1.html")
                .header("content-type", "text/html")
                .header("x-upsert", "false")
                .header("authorization", "Bearer secret-key")
                .header("apikey", "secret-key")
                .body("<html></html>");
            then.status(200)
                .json_body(serde_json::json!({"Key": "surprises/surprise-1.html"}));
        });

        let publisher = ObjectStorePublisher::new(
            Client::new(),
            &format!("{}/", server.base_url()),
            "surprises",
            Some("secret-key".to_string()),
        );
        let receipt = publisher
            .publish("<html></html>", "surprise-1.html")
            .await
            .unwrap();

        upload_mock.assert();
        assert_eq!(
            receipt.locator,
            format!(
                "{}/storage/v1/object/public/surprises/surprise-1.html",
                server.base_url()
            )
        );
    }

    #[tokio::test]
    async fn test_upload_failure_carries_message() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path_contains("/storage/v1/object/");
            then.status(400).body("Bucket not found");
        });

        let publisher = ObjectStorePublisher::new(Client::new(), &server.base_url(), "missing", None);
        let err = publisher.publish("<html></html>", "a.html").await.unwrap_err();

        match err {
            PageError::PublishError { message } => assert!(message.contains("Bucket not found")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_metadata_row_is_posted() {
        let server = MockServer::start();
        let insert_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/rest/v1/pages")
                .body_contains("\"recipient_name\":\"Alex\"")
                .body_contains("\"page_url\":\"https://pages.example/a.html\"");
            then.status(201);
        });

        let sink = RestMetadataSink::new(Client::new(), &server.base_url(), "pages", None);
        let metadata = PageMetadata {
            recipient_name: "Alex".to_string(),
            author_name: "Anonymous".to_string(),
            locator: "https://pages.example/a.html".to_string(),
            created_at: Utc::now(),
        };

        sink.save(&metadata).await.unwrap();
        insert_mock.assert();
    }

    #[tokio::test]
    async fn test_metadata_columns_can_be_renamed() {
        let server = MockServer::start();
        let insert_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/rest/v1/surprises")
                .body_contains("\"crush_name\":\"Alex\"")
                .body_contains("\"your_name\":\"Sam\"");
            then.status(201);
        });

        let sink = RestMetadataSink::new(Client::new(), &server.base_url(), "surprises", None)
            .with_columns("crush_name", "your_name");
        let metadata = PageMetadata {
            recipient_name: "Alex".to_string(),
            author_name: "Sam".to_string(),
            locator: "https://pages.example/a.html".to_string(),
            created_at: Utc::now(),
        };

        sink.save(&metadata).await.unwrap();
        insert_mock.assert();

        let row = sink.row(&metadata);
        assert!(row.get("recipient_name").is_none());
        assert_eq!(row["page_url"], "https://pages.example/a.html");
    }

    #[tokio::test]
    async fn test_metadata_failure_is_reported() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/rest/v1/pages");
            then.status(500).body("db down");
        });

        let sink = RestMetadataSink::new(Client::new(), &server.base_url(), "pages", None);
        let metadata = PageMetadata {
            recipient_name: "Alex".to_string(),
            author_name: "Sam".to_string(),
            locator: "x".to_string(),
            created_at: Utc::now(),
        };

        assert!(matches!(
            sink.save(&metadata).await,
            Err(PageError::MetadataError { .. })
        ));
    }
}
