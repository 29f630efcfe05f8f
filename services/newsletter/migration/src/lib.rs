use sea_orm_migration::prelude::*;

mod m20260801_000001_create_subscribers;
mod m20260801_000002_create_newsletter_sections;
mod m20260801_000003_create_scheduled_deliveries;
mod m20260801_000004_create_content_items;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260801_000001_create_subscribers::Migration),
            Box::new(m20260801_000002_create_newsletter_sections::Migration),
            Box::new(m20260801_000003_create_scheduled_deliveries::Migration),
            Box::new(m20260801_000004_create_content_items::Migration),
        ]
    }
}
