use sea_orm::entity::prelude::*;

/// A newsletter recipient. Created by the account system; the engine
/// only reads the email address at dispatch time.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "subscribers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub email: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::newsletter_sections::Entity")]
    NewsletterSections,
    #[sea_orm(has_many = "super::scheduled_deliveries::Entity")]
    ScheduledDeliveries,
}

impl Related<super::newsletter_sections::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::NewsletterSections.def()
    }
}

impl Related<super::scheduled_deliveries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ScheduledDeliveries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
