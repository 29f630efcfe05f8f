//! In-memory implementations of the service's ports.
//!
//! `MemoryDeliveryRepository` enforces the same pending-uniqueness and
//! pending-only transition rules as the Postgres implementation, so
//! concurrency-shaped tests exercise the real state machine.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use plume_domain::DeliveryStatus;
use plume_newsletter::domain::repository::{
    ContentCollector, ContentItemRepository, DeliveryRepository, MailSendError, MailTransport,
    SectionRepository, SubscriberRepository,
};
use plume_newsletter::domain::types::{
    ContentItem, NewsletterSection, RenderedContent, ScheduledDelivery, Subscriber,
};
use plume_newsletter::error::NewsletterError;

// ── Sections ─────────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MemorySectionRepository {
    sections: Arc<Mutex<Vec<NewsletterSection>>>,
}

impl MemorySectionRepository {
    pub fn with(sections: Vec<NewsletterSection>) -> Self {
        Self {
            sections: Arc::new(Mutex::new(sections)),
        }
    }

    pub fn insert(&self, section: NewsletterSection) {
        self.sections.lock().unwrap().push(section);
    }

    pub fn get(&self, id: Uuid) -> Option<NewsletterSection> {
        self.sections.lock().unwrap().iter().find(|s| s.id == id).cloned()
    }
}

impl SectionRepository for MemorySectionRepository {
    async fn list_all(&self) -> Result<Vec<NewsletterSection>, NewsletterError> {
        Ok(self.sections.lock().unwrap().clone())
    }

    async fn find(&self, id: Uuid) -> Result<Option<NewsletterSection>, NewsletterError> {
        Ok(self.get(id))
    }

    async fn list_by_ids(&self, ids: &[Uuid]) -> Result<Vec<NewsletterSection>, NewsletterError> {
        Ok(self
            .sections
            .lock()
            .unwrap()
            .iter()
            .filter(|s| ids.contains(&s.id))
            .cloned()
            .collect())
    }

    async fn update_anchors(
        &self,
        section_id: Uuid,
        anchor_send_time: DateTime<Utc>,
        next_anchor_time: DateTime<Utc>,
    ) -> Result<(), NewsletterError> {
        let mut sections = self.sections.lock().unwrap();
        if let Some(section) = sections.iter_mut().find(|s| s.id == section_id) {
            section.anchor_send_time = anchor_send_time;
            section.next_anchor_time = next_anchor_time;
            section.updated_at = Utc::now();
        }
        Ok(())
    }
}

// ── Deliveries ───────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MemoryDeliveryRepository {
    deliveries: Arc<Mutex<Vec<ScheduledDelivery>>>,
}

impl MemoryDeliveryRepository {
    pub fn with(deliveries: Vec<ScheduledDelivery>) -> Self {
        Self {
            deliveries: Arc::new(Mutex::new(deliveries)),
        }
    }

    pub fn insert_raw(&self, delivery: ScheduledDelivery) {
        self.deliveries.lock().unwrap().push(delivery);
    }

    pub fn get(&self, id: Uuid) -> Option<ScheduledDelivery> {
        self.deliveries.lock().unwrap().iter().find(|d| d.id == id).cloned()
    }

    pub fn all(&self) -> Vec<ScheduledDelivery> {
        self.deliveries.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.deliveries.lock().unwrap().len()
    }
}

impl DeliveryRepository for MemoryDeliveryRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ScheduledDelivery>, NewsletterError> {
        Ok(self.get(id))
    }

    async fn insert_pending(&self, delivery: &ScheduledDelivery) -> Result<bool, NewsletterError> {
        let mut deliveries = self.deliveries.lock().unwrap();
        let duplicate = deliveries.iter().any(|d| {
            d.status == DeliveryStatus::Pending
                && d.owner_id == delivery.owner_id
                && d.section_id == delivery.section_id
                && d.send_date == delivery.send_date
        });
        if duplicate {
            return Ok(false);
        }
        deliveries.push(delivery.clone());
        Ok(true)
    }

    async fn list_unrendered(&self) -> Result<Vec<ScheduledDelivery>, NewsletterError> {
        let mut unrendered: Vec<_> = self
            .deliveries
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.status == DeliveryStatus::Pending && d.rendered_content.is_none())
            .cloned()
            .collect();
        unrendered.sort_by_key(|d| d.send_date);
        Ok(unrendered)
    }

    async fn list_due(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<ScheduledDelivery>, NewsletterError> {
        let mut due: Vec<_> = self
            .deliveries
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.status == DeliveryStatus::Pending && d.send_date <= now)
            .cloned()
            .collect();
        due.sort_by_key(|d| d.send_date);
        Ok(due)
    }

    async fn set_rendered_content(
        &self,
        id: Uuid,
        content: &RenderedContent,
    ) -> Result<bool, NewsletterError> {
        let mut deliveries = self.deliveries.lock().unwrap();
        let Some(delivery) = deliveries.iter_mut().find(|d| {
            d.id == id && d.status == DeliveryStatus::Pending && d.rendered_content.is_none()
        }) else {
            return Ok(false);
        };
        delivery.rendered_content = Some(content.clone());
        Ok(true)
    }

    async fn mark_sent(&self, id: Uuid, sent_at: DateTime<Utc>) -> Result<bool, NewsletterError> {
        let mut deliveries = self.deliveries.lock().unwrap();
        let Some(delivery) = deliveries
            .iter_mut()
            .find(|d| d.id == id && d.status == DeliveryStatus::Pending)
        else {
            return Ok(false);
        };
        delivery.status = DeliveryStatus::Sent;
        delivery.sent_at = Some(sent_at);
        Ok(true)
    }

    async fn mark_failed(&self, id: Uuid, detail: &str) -> Result<bool, NewsletterError> {
        let mut deliveries = self.deliveries.lock().unwrap();
        let Some(delivery) = deliveries
            .iter_mut()
            .find(|d| d.id == id && d.status == DeliveryStatus::Pending)
        else {
            return Ok(false);
        };
        delivery.status = DeliveryStatus::Failed;
        delivery.error_detail = Some(detail.to_owned());
        Ok(true)
    }
}

// ── Content items ────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MemoryContentItemRepository {
    items: Arc<Mutex<Vec<ContentItem>>>,
}

impl MemoryContentItemRepository {
    pub fn with(items: Vec<ContentItem>) -> Self {
        Self {
            items: Arc::new(Mutex::new(items)),
        }
    }

    pub fn all(&self) -> Vec<ContentItem> {
        self.items.lock().unwrap().clone()
    }
}

impl ContentItemRepository for MemoryContentItemRepository {
    async fn query_recent(
        &self,
        topic: &str,
        limit: u32,
    ) -> Result<Vec<ContentItem>, NewsletterError> {
        let mut matching: Vec<_> = self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.topic == topic)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.published_date.cmp(&a.published_date));
        matching.truncate(limit as usize);
        Ok(matching)
    }

    async fn upsert(&self, item: &ContentItem) -> Result<(), NewsletterError> {
        let mut items = self.items.lock().unwrap();
        if let Some(existing) = items.iter_mut().find(|i| i.url == item.url) {
            let id = existing.id;
            let created_at = existing.created_at;
            *existing = item.clone();
            existing.id = id;
            existing.created_at = created_at;
        } else {
            items.push(item.clone());
        }
        Ok(())
    }
}

// ── Subscribers ──────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MemorySubscriberRepository {
    subscribers: Arc<Mutex<Vec<Subscriber>>>,
}

impl MemorySubscriberRepository {
    pub fn with(subscribers: Vec<Subscriber>) -> Self {
        Self {
            subscribers: Arc::new(Mutex::new(subscribers)),
        }
    }
}

impl SubscriberRepository for MemorySubscriberRepository {
    async fn find_email(&self, owner_id: Uuid) -> Result<Option<String>, NewsletterError> {
        Ok(self
            .subscribers
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == owner_id)
            .map(|s| s.email.clone()))
    }
}

// ── Mail transport ───────────────────────────────────────────────────────────

/// One scripted response for [`MockMailTransport`].
#[derive(Clone, Debug)]
pub enum ScriptedSend {
    Succeed,
    Timeout,
    Reject(String),
}

/// Mail transport that plays back a script and records every accepted
/// send as `(to, subject)`. An exhausted script succeeds.
#[derive(Clone, Default)]
pub struct MockMailTransport {
    script: Arc<Mutex<Vec<ScriptedSend>>>,
    sent: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockMailTransport {
    pub fn succeeding() -> Self {
        Self::default()
    }

    pub fn scripted(script: Vec<ScriptedSend>) -> Self {
        Self {
            script: Arc::new(Mutex::new(script)),
            sent: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

impl MailTransport for MockMailTransport {
    async fn send(&self, to: &str, subject: &str, _html: &str) -> Result<(), MailSendError> {
        let next = {
            let mut script = self.script.lock().unwrap();
            if script.is_empty() {
                ScriptedSend::Succeed
            } else {
                script.remove(0)
            }
        };
        match next {
            ScriptedSend::Succeed => {
                self.sent
                    .lock()
                    .unwrap()
                    .push((to.to_owned(), subject.to_owned()));
                Ok(())
            }
            ScriptedSend::Timeout => Err(MailSendError::Timeout),
            ScriptedSend::Reject(reason) => Err(MailSendError::Rejected(reason)),
        }
    }
}

// ── Content collector ────────────────────────────────────────────────────────

/// Collector that records requested topics and returns no item ids.
#[derive(Clone, Default)]
pub struct MockCollector {
    topics: Arc<Mutex<Vec<String>>>,
}

impl MockCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requested_topics(&self) -> Vec<String> {
        self.topics.lock().unwrap().clone()
    }
}

impl ContentCollector for MockCollector {
    async fn collect(&self, topic: &str) -> Result<Vec<Uuid>, NewsletterError> {
        self.topics.lock().unwrap().push(topic.to_owned());
        Ok(vec![])
    }
}
