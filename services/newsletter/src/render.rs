//! Newsletter payload rendering.
//!
//! Builds the structured content stored on a delivery. The HTML layout
//! mirrors the preview the user sees in the configuration UI, so the
//! sent email matches the preview exactly.

use std::fmt::Write as _;

use crate::domain::types::{ContentItem, RenderedContent, RenderedItem};

const BODY_EXCERPT_LEN: usize = 150;

/// Build the rendered payload for a delivery from per-topic item groups.
///
/// The first topic names the newsletter in the subject line; callers
/// must pass at least one non-empty group (population defers instead of
/// rendering an empty email).
pub fn render_newsletter(groups: &[(String, Vec<ContentItem>)]) -> RenderedContent {
    let primary_topic = groups
        .first()
        .map(|(topic, _)| topic.as_str())
        .unwrap_or("Newsletter");

    let subject = format!("Your {primary_topic} Newsletter");
    let introduction = format!("Here are the latest articles about {primary_topic} for you.");

    let items: Vec<RenderedItem> = groups
        .iter()
        .flat_map(|(_, items)| items.iter().map(rendered_item))
        .collect();

    let html = render_html(&subject, groups);

    RenderedContent {
        subject,
        introduction,
        items,
        html,
    }
}

fn rendered_item(item: &ContentItem) -> RenderedItem {
    RenderedItem {
        title: item.title.clone(),
        url: item.url.clone(),
        summary: item_summary(item),
        source: item.source.clone(),
        published_date: item.published_date,
    }
}

/// Prefer the collector's summary; fall back to a body excerpt.
fn item_summary(item: &ContentItem) -> String {
    if let Some(summary) = &item.summary {
        if !summary.is_empty() {
            return summary.clone();
        }
    }
    if item.body.is_empty() {
        return "No summary available".to_owned();
    }
    let mut excerpt: String = item.body.chars().take(BODY_EXCERPT_LEN).collect();
    if item.body.chars().count() > BODY_EXCERPT_LEN {
        excerpt.push_str("...");
    }
    excerpt
}

/// Minimal HTML entity escaping for collector-supplied text. Item
/// fields arrive from an external scraper and must never be able to
/// inject markup into the email.
fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn render_html(title: &str, groups: &[(String, Vec<ContentItem>)]) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
<div style="background-color: #6366f1; padding: 20px; text-align: center; color: white;">
<h1>{title}</h1>
<p>Curated content just for you</p>
</div>"#,
        title = escape_html(title),
    );
    for (topic, items) in groups {
        let _ = write!(
            html,
            r#"
<div style="padding: 20px; background-color: #f0f4f8; margin-top: 20px;">
<h2 style="color: #333;">{topic}</h2>"#,
            topic = escape_html(topic),
        );
        for item in items {
            let _ = write!(
                html,
                r#"
<div style="margin-top: 20px;">
<h3 style="margin-bottom: 5px;"><a href="{url}" style="text-decoration: none; color: #1a56db;">{item_title}</a></h3>
<p style="color: #4a5568; font-size: 14px; margin-top: 5px;">{summary}</p>
<p style="font-size: 12px; color: #718096; margin-top: 5px;">Source: {source} | {date}</p>
</div>"#,
                url = escape_html(&item.url),
                item_title = escape_html(&item.title),
                summary = escape_html(&item_summary(item)),
                source = escape_html(item.source.as_deref().unwrap_or("Unknown")),
                date = item.published_date.format("%b %-d, %Y"),
            );
        }
        html.push_str("\n</div>");
    }
    html.push_str(
        r#"
<div style="padding: 20px; text-align: center; font-size: 12px; color: #718096;">
<p>You're receiving this email because you subscribed to our newsletter service.</p>
<p>To unsubscribe or change your preferences, visit your account settings.</p>
</div>
</div>"#,
    );
    html
}
