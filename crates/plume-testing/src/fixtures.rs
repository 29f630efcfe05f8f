//! Fixture builders for domain records.

use chrono::{DateTime, TimeZone as _, Utc};
use uuid::Uuid;

use plume_domain::{Frequency, Occurrence, advance};
use plume_newsletter::domain::types::{
    ContentItem, NewsletterSection, RenderedContent, RenderedItem, ScheduledDelivery, Subscriber,
};

/// A fixed reference instant so tests are deterministic.
pub fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 9, 1, 9, 0, 0).unwrap()
}

pub fn subscriber(email: &str) -> Subscriber {
    Subscriber {
        id: Uuid::new_v4(),
        email: email.to_owned(),
        created_at: reference_time(),
    }
}

/// A section owned by `owner_id` whose current anchor is `anchor`.
pub fn section(
    owner_id: Uuid,
    topic: &str,
    frequency: Frequency,
    anchor: DateTime<Utc>,
) -> NewsletterSection {
    NewsletterSection {
        id: Uuid::new_v4(),
        owner_id,
        topic: topic.to_owned(),
        instructions: format!("Latest developments in {topic}"),
        frequency,
        other_guidelines: String::new(),
        anchor_send_time: anchor,
        next_anchor_time: advance(anchor, frequency),
        created_at: reference_time(),
        updated_at: reference_time(),
    }
}

/// The pending delivery the materializer would create for `section`.
pub fn pending_delivery(section: &NewsletterSection) -> ScheduledDelivery {
    ScheduledDelivery::pending(
        section.owner_id,
        section.id,
        Occurrence::from_anchor(section.anchor_send_time, section.frequency),
        reference_time(),
    )
}

pub fn content_item(topic: &str, title: &str) -> ContentItem {
    ContentItem {
        id: Uuid::new_v4(),
        topic: topic.to_owned(),
        title: title.to_owned(),
        url: format!("https://example.com/{}", title.replace(' ', "-").to_lowercase()),
        source: Some("Example Wire".to_owned()),
        published_date: reference_time(),
        body: format!("Full text of {title}."),
        summary: Some(format!("Summary of {title}.")),
        created_at: reference_time(),
    }
}

pub fn rendered_content(topic: &str) -> RenderedContent {
    RenderedContent {
        subject: format!("Your {topic} Newsletter"),
        introduction: format!("Here are the latest articles about {topic} for you."),
        items: vec![RenderedItem {
            title: "Example article".to_owned(),
            url: "https://example.com/example-article".to_owned(),
            summary: "An example summary.".to_owned(),
            source: Some("Example Wire".to_owned()),
            published_date: reference_time(),
        }],
        html: "<p>example</p>".to_owned(),
    }
}
