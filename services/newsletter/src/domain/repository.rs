#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::types::{ContentItem, NewsletterSection, RenderedContent, ScheduledDelivery};
use crate::error::NewsletterError;

/// Repository for newsletter sections (user configuration; read-mostly).
pub trait SectionRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<NewsletterSection>, NewsletterError>;

    async fn find(&self, id: Uuid) -> Result<Option<NewsletterSection>, NewsletterError>;

    async fn list_by_ids(&self, ids: &[Uuid]) -> Result<Vec<NewsletterSection>, NewsletterError>;

    /// Advance a section's anchor pair after a successful send so future
    /// materialization stays in sync with the spawned delivery.
    async fn update_anchors(
        &self,
        section_id: Uuid,
        anchor_send_time: DateTime<Utc>,
        next_anchor_time: DateTime<Utc>,
    ) -> Result<(), NewsletterError>;
}

/// Repository for scheduled deliveries.
pub trait DeliveryRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ScheduledDelivery>, NewsletterError>;

    /// Atomically insert a pending delivery. Returns `false` when a
    /// pending delivery for (owner_id, section_id, send_date) already
    /// exists — the insert races through the database's uniqueness
    /// guard, never a read-then-write.
    async fn insert_pending(&self, delivery: &ScheduledDelivery) -> Result<bool, NewsletterError>;

    /// Pending deliveries that have no rendered content yet.
    async fn list_unrendered(&self) -> Result<Vec<ScheduledDelivery>, NewsletterError>;

    /// Pending deliveries whose send_date has passed.
    async fn list_due(&self, now: DateTime<Utc>) -> Result<Vec<ScheduledDelivery>, NewsletterError>;

    /// Store rendered content, only if the delivery is still pending and
    /// unrendered. Returns `false` when nothing was written — previously
    /// rendered content is never overwritten.
    async fn set_rendered_content(
        &self,
        id: Uuid,
        content: &RenderedContent,
    ) -> Result<bool, NewsletterError>;

    /// Compare-and-swap pending → sent. Returns `false` when the
    /// delivery was no longer pending (a concurrent dispatcher won).
    async fn mark_sent(&self, id: Uuid, sent_at: DateTime<Utc>)
    -> Result<bool, NewsletterError>;

    /// Compare-and-swap pending → failed with an error detail. Returns
    /// `false` when the delivery was no longer pending.
    async fn mark_failed(&self, id: Uuid, detail: &str) -> Result<bool, NewsletterError>;
}

/// Read/write access to collected content items.
pub trait ContentItemRepository: Send + Sync {
    /// The `limit` most recently published items for a topic.
    async fn query_recent(
        &self,
        topic: &str,
        limit: u32,
    ) -> Result<Vec<ContentItem>, NewsletterError>;

    /// Insert or update an item; `url` is the conflict target.
    async fn upsert(&self, item: &ContentItem) -> Result<(), NewsletterError>;
}

/// Lookup of recipient addresses.
pub trait SubscriberRepository: Send + Sync {
    async fn find_email(&self, owner_id: Uuid) -> Result<Option<String>, NewsletterError>;
}

/// Outcome of a mail transport call that did not succeed.
#[derive(Debug, thiserror::Error)]
pub enum MailSendError {
    /// The call timed out: the outcome is unknown, so the caller must
    /// leave the delivery in its current state rather than guess.
    #[error("mail transport timed out")]
    Timeout,
    /// The transport definitively refused or failed the send.
    #[error("mail transport rejected the send: {0}")]
    Rejected(String),
}

/// Port to the transactional-email provider.
pub trait MailTransport: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), MailSendError>;
}

/// Port to the content collector service. Pre-fetch failures degrade to
/// warnings; they never fail a scheduling batch.
pub trait ContentCollector: Send + Sync {
    async fn collect(&self, topic: &str) -> Result<Vec<Uuid>, NewsletterError>;
}
