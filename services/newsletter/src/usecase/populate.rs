use uuid::Uuid;

use crate::domain::repository::{ContentItemRepository, DeliveryRepository, SectionRepository};
use crate::domain::types::ScheduledDelivery;
use crate::error::NewsletterError;
use crate::render::render_newsletter;

/// Result of populating one delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopulateOutcome {
    /// Content was rendered and stored.
    Rendered,
    /// No content is available for any referenced topic yet; the
    /// delivery stays unrendered and will be retried.
    Deferred,
    /// The delivery already carried content; nothing was written.
    AlreadyRendered,
}

/// Counts from one population pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PopulateReport {
    pub rendered: u32,
    pub deferred: u32,
    pub already_rendered: u32,
}

/// Attach rendered content to pending deliveries that have none.
pub struct PopulateUseCase<S, D, C> {
    pub sections: S,
    pub deliveries: D,
    pub content: C,
    pub items_per_topic: u32,
}

impl<S, D, C> PopulateUseCase<S, D, C>
where
    S: SectionRepository,
    D: DeliveryRepository,
    C: ContentItemRepository,
{
    pub async fn execute_all(&self) -> Result<PopulateReport, NewsletterError> {
        let mut report = PopulateReport::default();
        for delivery in self.deliveries.list_unrendered().await? {
            match self.populate_one(&delivery).await? {
                PopulateOutcome::Rendered => report.rendered += 1,
                PopulateOutcome::Deferred => report.deferred += 1,
                PopulateOutcome::AlreadyRendered => report.already_rendered += 1,
            }
        }
        Ok(report)
    }

    pub async fn populate_by_id(&self, id: Uuid) -> Result<PopulateOutcome, NewsletterError> {
        let delivery = self
            .deliveries
            .find_by_id(id)
            .await?
            .ok_or(NewsletterError::DeliveryNotFound)?;
        self.populate_one(&delivery).await
    }

    pub async fn populate_one(
        &self,
        delivery: &ScheduledDelivery,
    ) -> Result<PopulateOutcome, NewsletterError> {
        if delivery.rendered_content.is_some() {
            return Ok(PopulateOutcome::AlreadyRendered);
        }

        let sections = self.sections.list_by_ids(&delivery.section_refs).await?;

        let mut groups: Vec<(String, Vec<_>)> = Vec::with_capacity(sections.len());
        for section in &sections {
            let items = self
                .content
                .query_recent(&section.topic, self.items_per_topic)
                .await?;
            if !items.is_empty() {
                groups.push((section.topic.clone(), items));
            }
        }

        if groups.is_empty() {
            tracing::debug!(delivery_id = %delivery.id, "no content collected yet, deferring");
            return Ok(PopulateOutcome::Deferred);
        }

        let content = render_newsletter(&groups);
        let written = self
            .deliveries
            .set_rendered_content(delivery.id, &content)
            .await?;

        // A concurrent populator may have rendered first; the guard in
        // the repository keeps the earlier content.
        Ok(if written {
            PopulateOutcome::Rendered
        } else {
            PopulateOutcome::AlreadyRendered
        })
    }
}
