use crate::core::composer::DocumentComposer;
use crate::core::resolver::{MediaResolver, ResolutionReport};
use crate::domain::model::{PageMetadata, PersonalizationProfile, PublishReceipt};
use crate::domain::ports::{MediaFetcher, MetadataSink, Publisher};
use crate::utils::error::Result;
use chrono::Utc;

const ANONYMOUS_AUTHOR: &str = "Anonymous";

#[derive(Debug, Clone)]
pub struct PublishOutcome {
    pub receipt: PublishReceipt,
    pub report: ResolutionReport,
    pub metadata_saved: bool,
}

/// 解析媒體 → 組成頁面 → 發佈 → 記錄中繼資料
pub struct PublishFlow<F: MediaFetcher> {
    resolver: Option<MediaResolver<F>>,
    composer: DocumentComposer,
    publisher: Box<dyn Publisher>,
    metadata: Option<Box<dyn MetadataSink>>,
}

impl<F: MediaFetcher> PublishFlow<F> {
    pub fn new(resolver: MediaResolver<F>, publisher: Box<dyn Publisher>) -> Self {
        Self {
            resolver: Some(resolver),
            composer: DocumentComposer::new(),
            publisher,
            metadata: None,
        }
    }

    /// 不內嵌圖片，直接使用外部位址
    pub fn without_resolver(publisher: Box<dyn Publisher>) -> Self {
        Self {
            resolver: None,
            composer: DocumentComposer::new(),
            publisher,
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, sink: Box<dyn MetadataSink>) -> Self {
        self.metadata = Some(sink);
        self
    }

    pub fn with_composer(mut self, composer: DocumentComposer) -> Self {
        self.composer = composer;
        self
    }

    /// 解析並組成頁面，不發佈
    pub async fn render(&self, profile: PersonalizationProfile) -> (String, ResolutionReport) {
        let (profile, report) = match &self.resolver {
            Some(resolver) => {
                let resolved = resolver.resolve(profile).await;
                let report = resolved.report.clone();
                (resolved.into_inner(), report)
            }
            None => (profile, ResolutionReport::default()),
        };

        let document = self.composer.compose(&profile);
        tracing::debug!("Composed document of {} bytes", document.len());
        (document, report)
    }

    pub async fn run(&self, profile: PersonalizationProfile) -> Result<PublishOutcome> {
        tracing::info!("🖼️ Resolving media for {}", profile.recipient_name);
        let recipient_name = profile.recipient_name.clone();
        let author_name = profile.author_name.clone();

        let (document, report) = self.render(profile).await;
        if report.failed() > 0 {
            tracing::warn!(
                "⚠️ {} media item(s) could not be embedded and will load from their original URL",
                report.failed()
            );
        }

        let suggested_name = suggested_name();
        tracing::info!("📤 Publishing {}", suggested_name);
        let receipt = self.publisher.publish(&document, &suggested_name).await?;
        tracing::info!("✅ Published at {}", receipt.locator);

        let metadata_saved = match &self.metadata {
            Some(sink) => {
                let metadata = PageMetadata {
                    recipient_name,
                    author_name: if author_name.trim().is_empty() {
                        ANONYMOUS_AUTHOR.to_string()
                    } else {
                        author_name
                    },
                    locator: receipt.locator.clone(),
                    created_at: Utc::now(),
                };
                match sink.save(&metadata).await {
                    Ok(()) => true,
                    Err(e) => {
                        // 中繼資料失敗不影響發佈結果
                        tracing::warn!("⚠️ Failed to save metadata: {}", e);
                        false
                    }
                }
            }
            None => false,
        };

        Ok(PublishOutcome {
            receipt,
            report,
            metadata_saved,
        })
    }
}

/// 每次發佈唯一的檔名，例如 `surprise-1760745600000.html`
pub fn suggested_name() -> String {
    format!("surprise-{}.html", Utc::now().timestamp_millis())
}
