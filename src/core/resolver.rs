use crate::domain::model::{is_embedded_source, PersonalizationProfile, EMBEDDED_PREFIX};
use crate::domain::ports::{FetchedMedia, MediaFetcher};
use crate::utils::error::{PageError, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use futures::future::join_all;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::ops::Deref;
use std::time::Duration;
use url::Url;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// 單一媒體槽位的解析結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaOutcome {
    AlreadyEmbedded,
    Embedded,
    /// 下載或編碼失敗，保留原本的外部位址
    Failed,
    /// 空白或非 http(s) 的來源，不嘗試下載
    Skipped,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionReport {
    /// 依槽位順序：主圖在前，其後為相簿
    pub outcomes: Vec<MediaOutcome>,
}

impl ResolutionReport {
    pub fn count(&self, outcome: &MediaOutcome) -> usize {
        self.outcomes.iter().filter(|o| *o == outcome).count()
    }

    pub fn embedded(&self) -> usize {
        self.count(&MediaOutcome::Embedded)
    }

    pub fn failed(&self) -> usize {
        self.count(&MediaOutcome::Failed)
    }
}

/// 解析完成的 profile，可直接交給 composer
#[derive(Debug, Clone)]
pub struct ResolvedProfile {
    profile: PersonalizationProfile,
    pub report: ResolutionReport,
}

impl ResolvedProfile {
    pub fn into_inner(self) -> PersonalizationProfile {
        self.profile
    }
}

impl Deref for ResolvedProfile {
    type Target = PersonalizationProfile;

    fn deref(&self) -> &Self::Target {
        &self.profile
    }
}

pub struct MediaResolver<F: MediaFetcher> {
    fetcher: F,
}

impl<F: MediaFetcher> MediaResolver<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// 把所有外部圖片轉成內嵌格式。永遠不會失敗：失敗的槽位保留原來源
    pub async fn resolve(&self, mut profile: PersonalizationProfile) -> ResolvedProfile {
        let sources: Vec<String> = profile.media().map(|m| m.source.clone()).collect();
        tracing::debug!("Resolving {} media slots", sources.len());

        let tasks = sources
            .into_iter()
            .enumerate()
            .map(|(slot, source)| self.resolve_one(slot, source));
        let results = join_all(tasks).await;

        let mut report = ResolutionReport::default();
        for (media, (source, outcome)) in profile.media_mut().zip(results) {
            media.source = source;
            report.outcomes.push(outcome);
        }

        tracing::debug!(
            "Media resolution finished: {} embedded, {} failed",
            report.embedded(),
            report.failed()
        );

        ResolvedProfile { profile, report }
    }

    async fn resolve_one(&self, slot: usize, source: String) -> (String, MediaOutcome) {
        if is_embedded_source(&source) {
            return (source, MediaOutcome::AlreadyEmbedded);
        }

        if !is_fetchable(&source) {
            tracing::debug!("Slot {}: source is not an http(s) URL, leaving as is", slot);
            return (source, MediaOutcome::Skipped);
        }

        match self.fetcher.fetch(&source).await {
            Ok(media) => {
                tracing::debug!(
                    "Slot {}: embedded {} bytes of {}",
                    slot,
                    media.bytes.len(),
                    media.content_type
                );
                (to_data_url(&media), MediaOutcome::Embedded)
            }
            Err(e) => {
                tracing::warn!("⚠️ Slot {}: keeping external source, {}", slot, e);
                (source, MediaOutcome::Failed)
            }
        }
    }
}

fn is_fetchable(source: &str) -> bool {
    Url::parse(source)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// 轉成 `data:<mime>;base64,<payload>`
pub fn to_data_url(media: &FetchedMedia) -> String {
    format!(
        "{}{};base64,{}",
        EMBEDDED_PREFIX,
        media.content_type,
        BASE64.encode(&media.bytes)
    )
}

pub struct HttpMediaFetcher {
    client: Client,
}

impl HttpMediaFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MediaFetcher for HttpMediaFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedMedia> {
        tracing::debug!("Fetching media from: {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PageError::MediaFetchError {
                url: url.to_string(),
                reason: format!("HTTP status {}", status),
            });
        }

        // 只保留 MIME 本體，去掉 charset 等參數
        let header_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        let bytes = response.bytes().await?.to_vec();
        let content_type = header_type.unwrap_or_else(|| guess_content_type(url));

        Ok(FetchedMedia {
            bytes,
            content_type,
        })
    }
}

fn guess_content_type(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|parsed| mime_guess::from_path(parsed.path()).first())
        .map(|mime| mime.essence_str().to_string())
        .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::MediaRef;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockFetcher {
        responses: HashMap<String, Vec<u8>>,
        calls: AtomicUsize,
    }

    impl MockFetcher {
        fn new(responses: &[(&str, &str)]) -> Self {
            Self {
                responses: responses
                    .iter()
                    .map(|(url, body)| (url.to_string(), body.as_bytes().to_vec()))
                    .collect(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl MediaFetcher for MockFetcher {
        async fn fetch(&self, url: &str) -> Result<FetchedMedia> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .get(url)
                .map(|bytes| FetchedMedia {
                    bytes: bytes.clone(),
                    content_type: "image/png".to_string(),
                })
                .ok_or_else(|| PageError::MediaFetchError {
                    url: url.to_string(),
                    reason: "unreachable".to_string(),
                })
        }
    }

    fn profile_with(main: &str, gallery: &[&str]) -> PersonalizationProfile {
        PersonalizationProfile {
            recipient_name: "Alex".to_string(),
            author_name: String::new(),
            hero_message: String::new(),
            main_media: MediaRef::new(main),
            gallery_media: gallery.iter().map(|s| MediaRef::new(*s)).collect(),
            highlight_list: vec![],
            future_plans: vec![],
            descriptor_words: String::new(),
            time_capsule: None,
            closing_secret: None,
        }
    }

    #[tokio::test]
    async fn test_external_sources_become_embedded() {
        let fetcher = MockFetcher::new(&[("https://img/x.png", "png")]);
        let resolver = MediaResolver::new(fetcher);

        let resolved = resolver.resolve(profile_with("https://img/x.png", &[])).await;

        assert_eq!(resolved.main_media.source, "data:image/png;base64,cG5n");
        assert_eq!(resolved.report.outcomes, vec![MediaOutcome::Embedded]);
    }

    #[tokio::test]
    async fn test_partial_failure_is_isolated() {
        let fetcher = MockFetcher::new(&[
            ("https://img/main.png", "m"),
            ("https://img/ok.png", "ok"),
        ]);
        let resolver = MediaResolver::new(fetcher);
        let profile = profile_with(
            "https://img/main.png",
            &["https://img/ok.png", "https://img/missing.png"],
        );

        let resolved = resolver.resolve(profile).await;

        assert!(resolved.main_media.is_embedded());
        assert!(resolved.gallery_media[0].is_embedded());
        assert_eq!(resolved.gallery_media[1].source, "https://img/missing.png");
        assert_eq!(resolved.report.embedded(), 2);
        assert_eq!(resolved.report.failed(), 1);
    }

    #[tokio::test]
    async fn test_resolution_is_idempotent() {
        let fetcher = MockFetcher::new(&[("https://img/a.png", "a"), ("https://img/b.png", "b")]);
        let resolver = MediaResolver::new(fetcher);
        let profile = profile_with("https://img/a.png", &["https://img/b.png"]);

        let once = resolver.resolve(profile).await.into_inner();
        let calls_after_first = resolver.fetcher.calls.load(Ordering::SeqCst);
        let twice = resolver.resolve(once.clone()).await;

        assert_eq!(once, *twice);
        assert_eq!(resolver.fetcher.calls.load(Ordering::SeqCst), calls_after_first);
        assert_eq!(twice.report.count(&MediaOutcome::AlreadyEmbedded), 2);
    }

    #[tokio::test]
    async fn test_non_url_sources_are_not_fetched() {
        let fetcher = MockFetcher::new(&[]);
        let resolver = MediaResolver::new(fetcher);

        let resolved = resolver
            .resolve(profile_with("", &["photos/local.jpg", "ftp://host/x.png"]))
            .await;

        assert_eq!(resolver.fetcher.calls.load(Ordering::SeqCst), 0);
        assert_eq!(resolved.gallery_media[0].source, "photos/local.jpg");
        assert_eq!(resolved.report.count(&MediaOutcome::Skipped), 3);
    }

    #[test]
    fn test_guess_content_type_from_path() {
        assert_eq!(guess_content_type("https://img/x.jpg?size=2"), "image/jpeg");
        assert_eq!(guess_content_type("https://img/photo"), FALLBACK_CONTENT_TYPE);
    }
}
