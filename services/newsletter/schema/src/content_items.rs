use sea_orm::entity::prelude::*;

/// A collected article/snippet. `url` is the natural dedup key; the
/// collector upserts on conflict. `summary` is backfilled
/// asynchronously and may stay null.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "content_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub topic: String,
    pub title: String,
    #[sea_orm(unique)]
    pub url: String,
    pub source: Option<String>,
    pub published_date: chrono::DateTime<chrono::Utc>,
    pub body: String,
    pub summary: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
