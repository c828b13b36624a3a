use crate::domain::model::{Highlight, MediaRef, PersonalizationProfile, TimeCapsule};
use crate::utils::error::{PageError, Result};
use serde::{Deserialize, Serialize};

/// 表單收集到的原始資料，每個欄位都可能缺少
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileDraft {
    pub recipient_name: Option<String>,
    pub author_name: Option<String>,
    pub hero_message: Option<String>,
    pub main_media: Option<MediaRef>,
    pub gallery_media: Option<Vec<MediaRef>>,
    pub highlight_list: Option<Vec<Highlight>>,
    pub future_plans: Option<Vec<String>>,
    pub descriptor_words: Option<String>,
    pub time_capsule: Option<TimeCapsule>,
    pub closing_secret: Option<String>,
}

/// 缺少欄位時套用的預設內容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileDefaults {
    pub main_media_source: String,
    pub main_media_caption: String,
    pub hero_message: String,
    pub descriptor_words: String,
    pub closing_secret: String,
}

impl Default for ProfileDefaults {
    fn default() -> Self {
        Self {
            main_media_source: "https://placehold.co/1200x800/e0e0e0/333333?text=Main+Photo"
                .to_string(),
            main_media_caption: "A special moment together".to_string(),
            hero_message: "A special message just for you...".to_string(),
            descriptor_words: "Kind, Loving, Amazing".to_string(),
            closing_secret: "P.S. You mean the world to me.".to_string(),
        }
    }
}

impl ProfileDefaults {
    /// 只補上真正缺少的欄位；收件人名稱缺少或空白時回傳錯誤
    pub fn apply(&self, draft: ProfileDraft) -> Result<PersonalizationProfile> {
        let recipient_name = draft
            .recipient_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| PageError::MissingConfigError {
                field: "recipientName".to_string(),
            })?;

        let main_media = draft.main_media.unwrap_or_else(|| {
            MediaRef::new(self.main_media_source.clone())
                .with_caption(self.main_media_caption.clone())
        });

        // 空白的相簿槽位不發佈
        let gallery_media = draft
            .gallery_media
            .unwrap_or_default()
            .into_iter()
            .filter(|media| !media.source.trim().is_empty())
            .collect();

        Ok(PersonalizationProfile {
            recipient_name,
            author_name: draft.author_name.unwrap_or_default(),
            hero_message: draft
                .hero_message
                .unwrap_or_else(|| self.hero_message.clone()),
            main_media,
            gallery_media,
            highlight_list: draft.highlight_list.unwrap_or_default(),
            future_plans: draft.future_plans.unwrap_or_default(),
            descriptor_words: draft
                .descriptor_words
                .unwrap_or_else(|| self.descriptor_words.clone()),
            time_capsule: draft.time_capsule,
            closing_secret: Some(
                draft
                    .closing_secret
                    .unwrap_or_else(|| self.closing_secret.clone()),
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft_for(name: &str) -> ProfileDraft {
        ProfileDraft {
            recipient_name: Some(name.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_recipient_is_rejected() {
        let defaults = ProfileDefaults::default();
        let err = defaults.apply(ProfileDraft::default()).unwrap_err();
        assert!(matches!(err, PageError::MissingConfigError { field } if field == "recipientName"));

        assert!(defaults.apply(draft_for("   ")).is_err());
    }

    #[test]
    fn test_absent_fields_take_defaults() {
        let defaults = ProfileDefaults::default();
        let profile = defaults.apply(draft_for("Alex")).unwrap();

        assert_eq!(profile.recipient_name, "Alex");
        assert_eq!(profile.author_name, "");
        assert_eq!(profile.main_media.source, defaults.main_media_source);
        assert_eq!(
            profile.main_media.caption.as_deref(),
            Some("A special moment together")
        );
        assert_eq!(profile.descriptor_words, "Kind, Loving, Amazing");
        assert_eq!(
            profile.closing_secret.as_deref(),
            Some("P.S. You mean the world to me.")
        );
        assert!(profile.gallery_media.is_empty());
        assert!(profile.time_capsule.is_none());
    }

    #[test]
    fn test_present_fields_are_kept_even_when_empty() {
        let draft = ProfileDraft {
            recipient_name: Some("Alex".to_string()),
            descriptor_words: Some(String::new()),
            closing_secret: Some(String::new()),
            ..Default::default()
        };

        let profile = ProfileDefaults::default().apply(draft).unwrap();
        assert_eq!(profile.descriptor_words, "");
        assert_eq!(profile.closing_secret.as_deref(), Some(""));
    }

    #[test]
    fn test_blank_gallery_slots_are_dropped() {
        let draft = ProfileDraft {
            recipient_name: Some("Alex".to_string()),
            gallery_media: Some(vec![
                MediaRef::new("https://img/a.jpg"),
                MediaRef::new("  ").with_caption("empty slot"),
                MediaRef::new("https://img/b.jpg"),
            ]),
            ..Default::default()
        };

        let profile = ProfileDefaults::default().apply(draft).unwrap();
        let sources: Vec<_> = profile.gallery_media.iter().map(|m| m.source.as_str()).collect();
        assert_eq!(sources, vec!["https://img/a.jpg", "https://img/b.jpg"]);
    }

    #[test]
    fn test_draft_from_json() {
        let draft: ProfileDraft = serde_json::from_str(
            r#"{"recipientName": "Alex", "futurePlans": ["Travel"]}"#,
        )
        .unwrap();
        assert_eq!(draft.future_plans, Some(vec!["Travel".to_string()]));
        assert!(draft.main_media.is_none());
    }
}
