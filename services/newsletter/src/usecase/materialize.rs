use chrono::{DateTime, Utc};

use plume_domain::Occurrence;

use crate::domain::repository::{ContentCollector, DeliveryRepository, SectionRepository};
use crate::domain::types::ScheduledDelivery;
use crate::error::NewsletterError;

/// Counts from one materialization pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MaterializeReport {
    pub created: u32,
    pub already_scheduled: u32,
    pub skipped: u32,
}

/// Ensure every section with a future anchor has exactly one pending
/// delivery for that anchor. Safe to run repeatedly and concurrently:
/// the insert goes through the database's pending-uniqueness guard
/// rather than a read-then-write.
pub struct MaterializeUseCase<S, D, C> {
    pub sections: S,
    pub deliveries: D,
    pub collector: C,
}

impl<S, D, C> MaterializeUseCase<S, D, C>
where
    S: SectionRepository,
    D: DeliveryRepository,
    C: ContentCollector,
{
    pub async fn execute(&self, now: DateTime<Utc>) -> Result<MaterializeReport, NewsletterError> {
        let sections = self.sections.list_all().await?;
        let mut report = MaterializeReport::default();

        for section in sections {
            // Only future occurrences materialize; past anchors are the
            // dispatcher's leftovers, not new schedules.
            if section.anchor_send_time <= now {
                continue;
            }
            if section.topic.trim().is_empty() {
                tracing::warn!(section_id = %section.id, "section has no topic, skipping");
                report.skipped += 1;
                continue;
            }

            let occurrence = Occurrence::from_anchor(section.anchor_send_time, section.frequency);
            let delivery =
                ScheduledDelivery::pending(section.owner_id, section.id, occurrence, now);

            if self.deliveries.insert_pending(&delivery).await? {
                report.created += 1;
                // Pre-fetch so the delivery has material by the time
                // population runs. Collector trouble is never fatal to
                // the batch.
                if let Err(e) = self.collector.collect(&section.topic).await {
                    tracing::warn!(topic = %section.topic, error = %e, "content pre-fetch failed");
                }
            } else {
                report.already_scheduled += 1;
            }
        }

        Ok(report)
    }
}
