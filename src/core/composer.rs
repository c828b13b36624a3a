use crate::core::assets::{FONT_IMPORT, SCRIPT, STYLESHEET};
use crate::domain::model::PersonalizationProfile;
use chrono::{Datelike, Utc};
use std::borrow::Cow;
use std::fmt::Write;

const HEADER_NAME_FALLBACK: &str = "someone who cares";
const CLOSING_NAME_FALLBACK: &str = "someone special";
const GALLERY_ALT_FALLBACK: &str = "Special moment";
const UNLOCK_DATE_FORMAT: &str = "%B %-d, %Y";

type SectionBuilder = fn(&Page<'_>) -> Option<String>;

/// 組頁時各區塊共用的輸入
pub struct Page<'a> {
    pub profile: &'a PersonalizationProfile,
    pub year: i32,
}

/// 頁面中的一個區塊；`build` 回傳 `None` 表示此區塊不出現
pub struct Section {
    pub name: &'static str,
    build: SectionBuilder,
}

/// 固定順序的區塊列表
pub const SECTIONS: &[Section] = &[
    Section { name: "hero", build: hero_section },
    Section { name: "main-media", build: main_media_section },
    Section { name: "gallery", build: gallery_section },
    Section { name: "highlights", build: highlights_section },
    Section { name: "descriptors", build: descriptor_section },
    Section { name: "future-plans", build: future_plans_section },
    Section { name: "time-capsule", build: time_capsule_section },
    Section { name: "closing", build: closing_section },
];

impl Section {
    pub fn render(&self, page: &Page<'_>) -> Option<String> {
        (self.build)(page)
    }
}

/// 把 profile 組成完整的 HTML 文件。
///
/// 相同的 profile 與年份一定產生相同的輸出；年份只出現在頁尾的 `<p class="year">`。
/// 未固定年份時，每次 `compose` 取當下的年份。
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentComposer {
    year: Option<i32>,
}

impl DocumentComposer {
    pub fn new() -> Self {
        Self { year: None }
    }

    pub fn with_year(year: i32) -> Self {
        Self { year: Some(year) }
    }

    pub fn year(&self) -> i32 {
        self.year.unwrap_or_else(|| Utc::now().year())
    }

    pub fn compose(&self, profile: &PersonalizationProfile) -> String {
        let page = Page {
            profile,
            year: self.year(),
        };
        let mut document = String::with_capacity(STYLESHEET.len() + 4096);

        document.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        document.push_str("<meta charset=\"UTF-8\">\n");
        document.push_str(
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        let _ = writeln!(
            document,
            "<title>A Special Surprise for {}</title>",
            escape(&profile.recipient_name)
        );
        let _ = writeln!(
            document,
            "<link href=\"{}\" rel=\"stylesheet\">",
            escape(FONT_IMPORT)
        );
        let _ = writeln!(document, "<style>{}</style>", STYLESHEET);
        document.push_str("</head>\n<body>\n");

        for section in SECTIONS {
            if let Some(html) = section.render(&page) {
                document.push_str(&html);
            }
        }

        let _ = writeln!(document, "<script>{}</script>", SCRIPT);
        document.push_str("</body>\n</html>\n");

        document
    }

    /// 列出此 profile 會產生哪些區塊
    pub fn section_names(&self, profile: &PersonalizationProfile) -> Vec<&'static str> {
        let page = Page {
            profile,
            year: self.year(),
        };
        SECTIONS
            .iter()
            .filter(|section| section.render(&page).is_some())
            .map(|section| section.name)
            .collect()
    }
}

/// 所有使用者文字插入頁面前都要經過這裡
fn escape(text: &str) -> Cow<'_, str> {
    html_escape::encode_quoted_attribute(text)
}

fn name_or<'a>(name: &'a str, fallback: &'a str) -> &'a str {
    if name.trim().is_empty() {
        fallback
    } else {
        name
    }
}

/// 以逗號切開描述詞並去除空白；保留順序與重複的詞
pub fn descriptor_tokens(words: &str) -> Vec<&str> {
    words
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect()
}

fn hero_section(page: &Page<'_>) -> Option<String> {
    let profile = page.profile;
    let mut html = String::new();
    html.push_str("<section class=\"hero\" data-section=\"hero\">\n<div class=\"hero-content\">\n");
    let _ = writeln!(html, "<h1>For {}</h1>", escape(&profile.recipient_name));
    let _ = writeln!(
        html,
        "<p class=\"from\">A special message from {}</p>",
        escape(name_or(&profile.author_name, HEADER_NAME_FALLBACK))
    );
    let _ = writeln!(
        html,
        "<div class=\"hero-message\">&quot;{}&quot;</div>",
        escape(&profile.hero_message)
    );
    html.push_str("</div>\n</section>\n");
    Some(html)
}

fn main_media_section(page: &Page<'_>) -> Option<String> {
    let profile = page.profile;
    let media = &profile.main_media;
    let mut html = String::new();
    html.push_str("<section class=\"main-media\" data-section=\"main-media\">\n<figure>\n");
    let _ = writeln!(
        html,
        "<img src=\"{}\" alt=\"Special moment with {}\">",
        escape(&media.source),
        escape(&profile.recipient_name)
    );
    if let Some(caption) = media.caption_text() {
        let _ = writeln!(html, "<figcaption>{}</figcaption>", escape(caption));
    }
    html.push_str("</figure>\n</section>\n");
    Some(html)
}

fn gallery_section(page: &Page<'_>) -> Option<String> {
    let profile = page.profile;
    if profile.gallery_media.is_empty() {
        return None;
    }

    let mut html = String::new();
    html.push_str("<section class=\"gallery fade-in\" data-section=\"gallery\">\n");
    html.push_str("<h2>Our Special Moments</h2>\n<div class=\"gallery-grid\">\n");
    for media in &profile.gallery_media {
        let caption = media.caption_text();
        html.push_str("<div class=\"gallery-item\">\n");
        let _ = writeln!(
            html,
            "<img src=\"{}\" alt=\"{}\">",
            escape(&media.source),
            escape(caption.unwrap_or(GALLERY_ALT_FALLBACK))
        );
        if let Some(caption) = caption {
            let _ = writeln!(html, "<p class=\"caption\">{}</p>", escape(caption));
        }
        html.push_str("</div>\n");
    }
    html.push_str("</div>\n</section>\n");
    Some(html)
}

fn highlights_section(page: &Page<'_>) -> Option<String> {
    let profile = page.profile;
    if profile.highlight_list.is_empty() {
        return None;
    }

    let mut html = String::new();
    html.push_str("<section class=\"highlights fade-in\" data-section=\"highlights\">\n");
    html.push_str("<h2>Reasons You're Amazing</h2>\n<div class=\"highlight-grid\">\n");
    for highlight in &profile.highlight_list {
        html.push_str("<div class=\"highlight-card\">\n");
        let _ = writeln!(html, "<h3>{}</h3>", escape(&highlight.title));
        let _ = writeln!(html, "<p>{}</p>", escape(&highlight.description));
        html.push_str("</div>\n");
    }
    html.push_str("</div>\n</section>\n");
    Some(html)
}

fn descriptor_section(page: &Page<'_>) -> Option<String> {
    let profile = page.profile;
    let tokens = descriptor_tokens(&profile.descriptor_words);
    if tokens.is_empty() {
        return None;
    }

    let mut html = String::new();
    html.push_str("<section class=\"descriptors fade-in\" data-section=\"descriptors\">\n");
    html.push_str("<h2>Words That Describe You</h2>\n<div class=\"descriptor-cloud\">\n");
    for token in tokens {
        let _ = writeln!(html, "<span class=\"descriptor-tag\">{}</span>", escape(token));
    }
    html.push_str("</div>\n</section>\n");
    Some(html)
}

fn future_plans_section(page: &Page<'_>) -> Option<String> {
    let profile = page.profile;
    if profile.future_plans.is_empty() {
        return None;
    }

    let mut html = String::new();
    html.push_str("<section class=\"plans fade-in\" data-section=\"future-plans\">\n");
    html.push_str("<h2>Our Future Together</h2>\n<ol class=\"future-plans\">\n");
    for plan in &profile.future_plans {
        let _ = writeln!(html, "<li>{}</li>", escape(plan));
    }
    html.push_str("</ol>\n</section>\n");
    Some(html)
}

fn time_capsule_section(page: &Page<'_>) -> Option<String> {
    let profile = page.profile;
    let capsule = profile
        .time_capsule
        .as_ref()
        .filter(|capsule| !capsule.message.is_empty())?;

    let mut html = String::new();
    html.push_str("<section class=\"time-capsule\" data-section=\"time-capsule\">\n");
    html.push_str("<div class=\"capsule\">\n<h3>A Message for the Future</h3>\n");
    let _ = writeln!(html, "<p class=\"capsule-message\">{}</p>", escape(&capsule.message));
    if let Some(date) = capsule.unlock_date {
        let formatted = date.format(UNLOCK_DATE_FORMAT).to_string();
        let _ = writeln!(
            html,
            "<p class=\"unlock-date\">To be revealed on: {}</p>",
            escape(&formatted)
        );
    }
    html.push_str("</div>\n</section>\n");
    Some(html)
}

fn closing_section(page: &Page<'_>) -> Option<String> {
    let profile = page.profile;
    let mut html = String::new();
    html.push_str("<footer class=\"closing\" data-section=\"closing\">\n");
    let _ = writeln!(
        html,
        "<p class=\"attribution\">Made with love by {}</p>",
        escape(name_or(&profile.author_name, CLOSING_NAME_FALLBACK))
    );
    if let Some(secret) = profile.closing_secret.as_deref().filter(|s| !s.is_empty()) {
        let _ = writeln!(html, "<div class=\"closing-secret\">{}</div>", escape(secret));
    }
    let _ = writeln!(html, "<p class=\"year\">{}</p>", page.year);
    html.push_str("</footer>\n");
    Some(html)
}
