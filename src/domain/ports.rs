use crate::domain::model::{PageMetadata, PublishReceipt};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 下載到的媒體內容
#[derive(Debug, Clone)]
pub struct FetchedMedia {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

#[async_trait]
pub trait MediaFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedMedia>;
}

/// 儲存產生的頁面並回傳可存取的位置
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, document: &str, suggested_name: &str) -> Result<PublishReceipt>;
}

/// 盡力而為的中繼資料紀錄
#[async_trait]
pub trait MetadataSink: Send + Sync {
    async fn save(&self, metadata: &PageMetadata) -> Result<()>;
}
