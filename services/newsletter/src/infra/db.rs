use anyhow::{Context as _, anyhow};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
    sea_query::{Expr, OnConflict},
};
use uuid::Uuid;

use plume_domain::{DeliveryStatus, Frequency};
use plume_newsletter_schema::{content_items, newsletter_sections, scheduled_deliveries, subscribers};

use crate::domain::repository::{
    ContentItemRepository, DeliveryRepository, SectionRepository, SubscriberRepository,
};
use crate::domain::types::{ContentItem, NewsletterSection, RenderedContent, ScheduledDelivery};
use crate::error::NewsletterError;

// ── Section repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSectionRepository {
    pub db: DatabaseConnection,
}

impl SectionRepository for DbSectionRepository {
    async fn list_all(&self) -> Result<Vec<NewsletterSection>, NewsletterError> {
        let models = newsletter_sections::Entity::find()
            .order_by_asc(newsletter_sections::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list newsletter sections")?;
        Ok(models.into_iter().map(section_from_model).collect())
    }

    async fn find(&self, id: Uuid) -> Result<Option<NewsletterSection>, NewsletterError> {
        let model = newsletter_sections::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find newsletter section")?;
        Ok(model.map(section_from_model))
    }

    async fn list_by_ids(&self, ids: &[Uuid]) -> Result<Vec<NewsletterSection>, NewsletterError> {
        let models = newsletter_sections::Entity::find()
            .filter(newsletter_sections::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .context("list newsletter sections by ids")?;
        Ok(models.into_iter().map(section_from_model).collect())
    }

    async fn update_anchors(
        &self,
        section_id: Uuid,
        anchor_send_time: DateTime<Utc>,
        next_anchor_time: DateTime<Utc>,
    ) -> Result<(), NewsletterError> {
        newsletter_sections::Entity::update_many()
            .filter(newsletter_sections::Column::Id.eq(section_id))
            .col_expr(
                newsletter_sections::Column::AnchorSendTime,
                Expr::value(anchor_send_time),
            )
            .col_expr(
                newsletter_sections::Column::NextAnchorTime,
                Expr::value(next_anchor_time),
            )
            .col_expr(newsletter_sections::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(&self.db)
            .await
            .context("update section anchors")?;
        Ok(())
    }
}

fn section_from_model(model: newsletter_sections::Model) -> NewsletterSection {
    // Legacy rows carry free-form frequency strings; they read as weekly.
    let frequency = match Frequency::from_kebab(&model.frequency) {
        Some(frequency) => frequency,
        None => {
            tracing::warn!(
                section_id = %model.id,
                raw = %model.frequency,
                "unrecognized frequency, falling back to weekly",
            );
            Frequency::Weekly
        }
    };
    NewsletterSection {
        id: model.id,
        owner_id: model.owner_id,
        topic: model.topic,
        instructions: model.instructions,
        frequency,
        other_guidelines: model.other_guidelines,
        anchor_send_time: model.anchor_send_time,
        next_anchor_time: model.next_anchor_time,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Delivery repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbDeliveryRepository {
    pub db: DatabaseConnection,
}

impl DeliveryRepository for DbDeliveryRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ScheduledDelivery>, NewsletterError> {
        let model = scheduled_deliveries::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find scheduled delivery")?;
        model.map(delivery_from_model).transpose()
    }

    async fn insert_pending(&self, delivery: &ScheduledDelivery) -> Result<bool, NewsletterError> {
        let section_refs =
            serde_json::to_value(&delivery.section_refs).context("encode section refs")?;
        let rendered_content = delivery
            .rendered_content
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .context("encode rendered content")?;

        let row = scheduled_deliveries::ActiveModel {
            id: Set(delivery.id),
            owner_id: Set(delivery.owner_id),
            section_id: Set(delivery.section_id),
            section_refs: Set(section_refs),
            status: Set(delivery.status.as_kebab().to_owned()),
            send_date: Set(delivery.send_date),
            next_date: Set(delivery.next_date),
            rendered_content: Set(rendered_content),
            error_detail: Set(delivery.error_detail.clone()),
            created_at: Set(delivery.created_at),
            sent_at: Set(delivery.sent_at),
        };

        // The partial unique index on (owner_id, section_id, send_date)
        // WHERE status = 'pending' arbitrates concurrent inserts; DO
        // NOTHING turns the losing insert into rows_affected = 0.
        let rows = scheduled_deliveries::Entity::insert(row)
            .on_conflict(OnConflict::new().do_nothing().to_owned())
            .exec_without_returning(&self.db)
            .await
            .context("insert pending delivery")?;
        Ok(rows > 0)
    }

    async fn list_unrendered(&self) -> Result<Vec<ScheduledDelivery>, NewsletterError> {
        let models = scheduled_deliveries::Entity::find()
            .filter(scheduled_deliveries::Column::Status.eq(DeliveryStatus::Pending.as_kebab()))
            .filter(scheduled_deliveries::Column::RenderedContent.is_null())
            .order_by_asc(scheduled_deliveries::Column::SendDate)
            .all(&self.db)
            .await
            .context("list unrendered deliveries")?;
        models.into_iter().map(delivery_from_model).collect()
    }

    async fn list_due(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<ScheduledDelivery>, NewsletterError> {
        let models = scheduled_deliveries::Entity::find()
            .filter(scheduled_deliveries::Column::Status.eq(DeliveryStatus::Pending.as_kebab()))
            .filter(scheduled_deliveries::Column::SendDate.lte(now))
            .order_by_asc(scheduled_deliveries::Column::SendDate)
            .all(&self.db)
            .await
            .context("list due deliveries")?;
        models.into_iter().map(delivery_from_model).collect()
    }

    async fn set_rendered_content(
        &self,
        id: Uuid,
        content: &RenderedContent,
    ) -> Result<bool, NewsletterError> {
        let json = serde_json::to_value(content).context("encode rendered content")?;
        // Guarded write: only fills an empty slot on a pending delivery,
        // so a concurrent populator can never replace earlier content.
        let result = scheduled_deliveries::Entity::update_many()
            .filter(scheduled_deliveries::Column::Id.eq(id))
            .filter(scheduled_deliveries::Column::Status.eq(DeliveryStatus::Pending.as_kebab()))
            .filter(scheduled_deliveries::Column::RenderedContent.is_null())
            .col_expr(scheduled_deliveries::Column::RenderedContent, Expr::value(json))
            .exec(&self.db)
            .await
            .context("set rendered content")?;
        Ok(result.rows_affected > 0)
    }

    async fn mark_sent(
        &self,
        id: Uuid,
        sent_at: DateTime<Utc>,
    ) -> Result<bool, NewsletterError> {
        let result = scheduled_deliveries::Entity::update_many()
            .filter(scheduled_deliveries::Column::Id.eq(id))
            .filter(scheduled_deliveries::Column::Status.eq(DeliveryStatus::Pending.as_kebab()))
            .col_expr(
                scheduled_deliveries::Column::Status,
                Expr::value(DeliveryStatus::Sent.as_kebab()),
            )
            .col_expr(scheduled_deliveries::Column::SentAt, Expr::value(sent_at))
            .exec(&self.db)
            .await
            .context("mark delivery sent")?;
        Ok(result.rows_affected > 0)
    }

    async fn mark_failed(&self, id: Uuid, detail: &str) -> Result<bool, NewsletterError> {
        let result = scheduled_deliveries::Entity::update_many()
            .filter(scheduled_deliveries::Column::Id.eq(id))
            .filter(scheduled_deliveries::Column::Status.eq(DeliveryStatus::Pending.as_kebab()))
            .col_expr(
                scheduled_deliveries::Column::Status,
                Expr::value(DeliveryStatus::Failed.as_kebab()),
            )
            .col_expr(scheduled_deliveries::Column::ErrorDetail, Expr::value(detail))
            .exec(&self.db)
            .await
            .context("mark delivery failed")?;
        Ok(result.rows_affected > 0)
    }
}

fn delivery_from_model(
    model: scheduled_deliveries::Model,
) -> Result<ScheduledDelivery, NewsletterError> {
    let status = DeliveryStatus::from_kebab(&model.status)
        .ok_or_else(|| anyhow!("delivery {} has unknown status {:?}", model.id, model.status))?;
    let section_refs: Vec<Uuid> =
        serde_json::from_value(model.section_refs).context("decode section refs")?;
    let rendered_content = model
        .rendered_content
        .map(serde_json::from_value)
        .transpose()
        .context("decode rendered content")?;
    Ok(ScheduledDelivery {
        id: model.id,
        owner_id: model.owner_id,
        section_id: model.section_id,
        section_refs,
        status,
        send_date: model.send_date,
        next_date: model.next_date,
        rendered_content,
        error_detail: model.error_detail,
        created_at: model.created_at,
        sent_at: model.sent_at,
    })
}

// ── Content item repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbContentItemRepository {
    pub db: DatabaseConnection,
}

impl ContentItemRepository for DbContentItemRepository {
    async fn query_recent(
        &self,
        topic: &str,
        limit: u32,
    ) -> Result<Vec<ContentItem>, NewsletterError> {
        let models = content_items::Entity::find()
            .filter(content_items::Column::Topic.eq(topic))
            .order_by_desc(content_items::Column::PublishedDate)
            .limit(limit as u64)
            .all(&self.db)
            .await
            .context("query recent content items")?;
        Ok(models.into_iter().map(content_item_from_model).collect())
    }

    async fn upsert(&self, item: &ContentItem) -> Result<(), NewsletterError> {
        let row = content_items::ActiveModel {
            id: Set(item.id),
            topic: Set(item.topic.clone()),
            title: Set(item.title.clone()),
            url: Set(item.url.clone()),
            source: Set(item.source.clone()),
            published_date: Set(item.published_date),
            body: Set(item.body.clone()),
            summary: Set(item.summary.clone()),
            created_at: Set(item.created_at),
        };
        content_items::Entity::insert(row)
            .on_conflict(
                OnConflict::column(content_items::Column::Url)
                    .update_columns([
                        content_items::Column::Topic,
                        content_items::Column::Title,
                        content_items::Column::Source,
                        content_items::Column::PublishedDate,
                        content_items::Column::Body,
                        content_items::Column::Summary,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .context("upsert content item")?;
        Ok(())
    }
}

fn content_item_from_model(model: content_items::Model) -> ContentItem {
    ContentItem {
        id: model.id,
        topic: model.topic,
        title: model.title,
        url: model.url,
        source: model.source,
        published_date: model.published_date,
        body: model.body,
        summary: model.summary,
        created_at: model.created_at,
    }
}

// ── Subscriber repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSubscriberRepository {
    pub db: DatabaseConnection,
}

impl SubscriberRepository for DbSubscriberRepository {
    async fn find_email(&self, owner_id: Uuid) -> Result<Option<String>, NewsletterError> {
        let model = subscribers::Entity::find_by_id(owner_id)
            .one(&self.db)
            .await
            .context("find subscriber")?;
        Ok(model.map(|m| m.email))
    }
}
