use anyhow::anyhow;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use plume_domain::{DeliveryStatus, Occurrence};

use crate::domain::repository::{
    DeliveryRepository, MailSendError, MailTransport, SectionRepository, SubscriberRepository,
};
use crate::domain::types::ScheduledDelivery;
use crate::error::NewsletterError;

/// Outcome of a successful dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchReceipt {
    pub delivery_id: Uuid,
    /// The freshly spawned follow-up delivery, or `None` when another
    /// dispatcher finished first or the next slot already existed.
    pub next_delivery_id: Option<Uuid>,
}

/// Send one due delivery and spawn its successor.
///
/// Ordering matters: the mail goes out first, then pending → sent is
/// claimed with a compare-and-swap, and only the winner of that swap
/// spawns the next occurrence. Losing the swap ends the call without a
/// spawn so the schedule never forks.
pub struct DispatchUseCase<D, S, U, M> {
    pub deliveries: D,
    pub sections: S,
    pub subscribers: U,
    pub mail: M,
}

impl<D, S, U, M> DispatchUseCase<D, S, U, M>
where
    D: DeliveryRepository,
    S: SectionRepository,
    U: SubscriberRepository,
    M: MailTransport,
{
    pub async fn execute(
        &self,
        delivery_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<DispatchReceipt, NewsletterError> {
        let delivery = self
            .deliveries
            .find_by_id(delivery_id)
            .await?
            .ok_or(NewsletterError::DeliveryNotFound)?;

        if delivery.status != DeliveryStatus::Pending {
            return Err(NewsletterError::DeliveryNotPending);
        }
        if delivery.send_date > now {
            return Err(NewsletterError::DeliveryNotDue);
        }

        let Some(content) = &delivery.rendered_content else {
            // Due with nothing to send. Fail hard rather than ship an
            // empty email; population had its chance before the due time.
            self.deliveries
                .mark_failed(delivery.id, "due delivery has no rendered content")
                .await?;
            return Err(NewsletterError::ContentMissing);
        };

        let Some(recipient) = self.subscribers.find_email(delivery.owner_id).await? else {
            self.deliveries
                .mark_failed(delivery.id, "no subscriber email for owner")
                .await?;
            return Err(NewsletterError::SubscriberNotFound);
        };

        match self.mail.send(&recipient, &content.subject, &content.html).await {
            Ok(()) => {}
            Err(MailSendError::Timeout) => {
                // Outcome unknown. The delivery stays pending; a retry
                // either resends or finds it already claimed.
                tracing::warn!(delivery_id = %delivery.id, "mail send timed out, leaving pending");
                return Err(NewsletterError::MailTimeout);
            }
            Err(MailSendError::Rejected(reason)) => {
                self.deliveries.mark_failed(delivery.id, &reason).await?;
                return Err(NewsletterError::MailRejected(reason));
            }
        }

        if !self.deliveries.mark_sent(delivery.id, now).await? {
            // A concurrent dispatcher claimed this delivery between our
            // read and the swap. It owns the spawn.
            tracing::info!(delivery_id = %delivery.id, "lost sent claim to a concurrent dispatch");
            return Ok(DispatchReceipt {
                delivery_id,
                next_delivery_id: None,
            });
        }

        let next_delivery_id = match self.spawn_next(&delivery, now).await {
            Ok(next) => next,
            Err(e) => {
                // The send itself succeeded; surface the break loudly so
                // an operator can re-materialize the schedule.
                tracing::error!(
                    delivery_id = %delivery.id,
                    section_id = %delivery.section_id,
                    error = %e,
                    "schedule continuity broken: follow-up delivery was not created",
                );
                return Err(e);
            }
        };

        Ok(DispatchReceipt {
            delivery_id,
            next_delivery_id,
        })
    }

    /// Create the next pending delivery from the sent one and advance
    /// the referenced sections' anchors to match.
    async fn spawn_next(
        &self,
        sent: &ScheduledDelivery,
        now: DateTime<Utc>,
    ) -> Result<Option<Uuid>, NewsletterError> {
        let section = self
            .sections
            .find(sent.section_id)
            .await?
            .ok_or_else(|| {
                NewsletterError::Internal(anyhow!("owning section {} vanished", sent.section_id))
            })?;

        let occurrence = Occurrence::from_anchor(sent.next_date, section.frequency);
        let next = ScheduledDelivery::pending_with_refs(
            sent.owner_id,
            sent.section_id,
            sent.section_refs.clone(),
            occurrence,
            now,
        );

        let created = self.deliveries.insert_pending(&next).await?;
        if !created {
            tracing::info!(
                section_id = %sent.section_id,
                send_date = %occurrence.send_date,
                "follow-up delivery already existed",
            );
        }

        for section_id in &sent.section_refs {
            self.sections
                .update_anchors(*section_id, occurrence.send_date, occurrence.next_date)
                .await?;
        }

        Ok(created.then_some(next.id))
    }
}
