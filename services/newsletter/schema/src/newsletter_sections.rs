use sea_orm::entity::prelude::*;

/// A user-defined recurring topic subscription. `anchor_send_time` is
/// when the current occurrence is due; `next_anchor_time` is one
/// frequency step later and both advance together after a send.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "newsletter_sections")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub owner_id: Uuid,
    pub topic: String,
    pub instructions: String,
    pub frequency: String,
    pub other_guidelines: String,
    pub anchor_send_time: chrono::DateTime<chrono::Utc>,
    pub next_anchor_time: chrono::DateTime<chrono::Utc>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
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
