use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use plume_domain::{DeliveryStatus, Frequency, Occurrence};

/// A newsletter recipient.
#[derive(Debug, Clone)]
pub struct Subscriber {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// A user-defined recurring topic subscription, owned by the
/// configuration UI. The engine reads it to materialize deliveries and
/// advances its anchors after each successful send.
///
/// Invariant: `next_anchor_time` = advance(`anchor_send_time`, `frequency`).
#[derive(Debug, Clone)]
pub struct NewsletterSection {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub topic: String,
    pub instructions: String,
    pub frequency: Frequency,
    pub other_guidelines: String,
    pub anchor_send_time: DateTime<Utc>,
    pub next_anchor_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One rendered article inside a delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedItem {
    pub title: String,
    pub url: String,
    pub summary: String,
    pub source: Option<String>,
    #[serde(serialize_with = "plume_core::serde::to_rfc3339_ms")]
    pub published_date: DateTime<Utc>,
}

/// The populated payload of a delivery: what the user previewed is
/// exactly what gets sent, so once set it is never overwritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedContent {
    pub subject: String,
    pub introduction: String,
    pub items: Vec<RenderedItem>,
    pub html: String,
}

/// One materialized newsletter send.
///
/// `section_id` is the uniqueness anchor: at most one pending delivery
/// exists per (owner_id, section_id, send_date), enforced by a partial
/// unique index. `section_refs` is the full set of sections the
/// delivery aggregates; engine-created deliveries hold exactly one.
#[derive(Debug, Clone)]
pub struct ScheduledDelivery {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub section_id: Uuid,
    pub section_refs: Vec<Uuid>,
    pub status: DeliveryStatus,
    pub send_date: DateTime<Utc>,
    pub next_date: DateTime<Utc>,
    pub rendered_content: Option<RenderedContent>,
    pub error_detail: Option<String>,
    pub created_at: DateTime<Utc>,
    pub sent_at: Option<DateTime<Utc>>,
}

impl ScheduledDelivery {
    /// A fresh pending delivery for one section at the given occurrence.
    pub fn pending(
        owner_id: Uuid,
        section_id: Uuid,
        occurrence: Occurrence,
        now: DateTime<Utc>,
    ) -> Self {
        Self::pending_with_refs(owner_id, section_id, vec![section_id], occurrence, now)
    }

    /// A fresh pending delivery carrying an explicit set of section refs
    /// (spawn-next preserves the refs of the delivery it follows).
    pub fn pending_with_refs(
        owner_id: Uuid,
        section_id: Uuid,
        section_refs: Vec<Uuid>,
        occurrence: Occurrence,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            section_id,
            section_refs,
            status: DeliveryStatus::Pending,
            send_date: occurrence.send_date,
            next_date: occurrence.next_date,
            rendered_content: None,
            error_detail: None,
            created_at: now,
            sent_at: None,
        }
    }

    /// Dispatch-eligible: pending, due, and populated.
    pub fn is_dispatchable(&self, now: DateTime<Utc>) -> bool {
        self.status == DeliveryStatus::Pending
            && self.send_date <= now
            && self.rendered_content.is_some()
    }
}

/// A collected article/snippet. Owned by the content collector; the
/// engine reads it during population.
#[derive(Debug, Clone)]
pub struct ContentItem {
    pub id: Uuid,
    pub topic: String,
    pub title: String,
    pub url: String,
    pub source: Option<String>,
    pub published_date: DateTime<Utc>,
    pub body: String,
    pub summary: Option<String>,
    pub created_at: DateTime<Utc>,
}
