use sea_orm::entity::prelude::*;

/// One materialized newsletter send.
///
/// `section_id` anchors the pending-uniqueness constraint
/// (owner_id, section_id, send_date); `section_refs` holds the full
/// set of aggregated section ids as a JSON array. `rendered_content`
/// stays null until population succeeds; `error_detail` is set only on
/// status = failed.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "scheduled_deliveries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub owner_id: Uuid,
    pub section_id: Uuid,
    pub section_refs: Json,
    pub status: String,
    pub send_date: chrono::DateTime<chrono::Utc>,
    pub next_date: chrono::DateTime<chrono::Utc>,
    pub rendered_content: Option<Json>,
    pub error_detail: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub sent_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subscribers::Entity",
        from = "Column::OwnerId",
        to = "super::subscribers::Column::Id"
    )]
    Subscriber,
}

impl Related<super::subscribers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subscriber.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
