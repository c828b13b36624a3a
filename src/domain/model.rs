use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// 已內嵌媒體的保留前綴 (RFC 2397 data URL)
pub const EMBEDDED_PREFIX: &str = "data:";

pub fn is_embedded_source(source: &str) -> bool {
    source
        .get(..EMBEDDED_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(EMBEDDED_PREFIX))
}

/// 一張圖片的來源與可選說明
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRef {
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl MediaRef {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            caption: None,
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// 來源是否已經是內嵌格式
    pub fn is_embedded(&self) -> bool {
        is_embedded_source(&self.source)
    }

    /// 非空的說明文字
    pub fn caption_text(&self) -> Option<&str> {
        self.caption.as_deref().filter(|c| !c.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeCapsule {
    #[serde(default, deserialize_with = "blank_date_as_none")]
    pub unlock_date: Option<NaiveDate>,
    #[serde(default)]
    pub message: String,
}

/// 表單未填日期時送出空字串，視為沒有日期
fn blank_date_as_none<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// 一份頁面的全部使用者內容，交給核心後不再變動
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalizationProfile {
    pub recipient_name: String,
    pub author_name: String,
    pub hero_message: String,
    pub main_media: MediaRef,
    pub gallery_media: Vec<MediaRef>,
    pub highlight_list: Vec<Highlight>,
    pub future_plans: Vec<String>,
    pub descriptor_words: String,
    pub time_capsule: Option<TimeCapsule>,
    pub closing_secret: Option<String>,
}

impl PersonalizationProfile {
    /// 依序列出所有媒體槽位：主圖在前，其後為相簿
    pub fn media(&self) -> impl Iterator<Item = &MediaRef> {
        std::iter::once(&self.main_media).chain(self.gallery_media.iter())
    }

    pub fn media_mut(&mut self) -> impl Iterator<Item = &mut MediaRef> {
        std::iter::once(&mut self.main_media).chain(self.gallery_media.iter_mut())
    }
}

/// 發佈成功後的回執
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishReceipt {
    pub name: String,
    pub locator: String,
}

/// 發佈後記錄的頁面資訊
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    pub recipient_name: String,
    pub author_name: String,
    pub locator: String,
    pub created_at: DateTime<Utc>,
}
