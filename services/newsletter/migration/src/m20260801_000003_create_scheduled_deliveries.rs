use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ScheduledDeliveries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ScheduledDeliveries::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ScheduledDeliveries::OwnerId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ScheduledDeliveries::SectionId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ScheduledDeliveries::SectionRefs)
                            .json_binary()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ScheduledDeliveries::Status).string().not_null())
                    .col(
                        ColumnDef::new(ScheduledDeliveries::SendDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ScheduledDeliveries::NextDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ScheduledDeliveries::RenderedContent).json_binary())
                    .col(ColumnDef::new(ScheduledDeliveries::ErrorDetail).text())
                    .col(
                        ColumnDef::new(ScheduledDeliveries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(ScheduledDeliveries::SentAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .from(ScheduledDeliveries::Table, ScheduledDeliveries::OwnerId)
                            .to(Subscribers::Table, Subscribers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Hard uniqueness for the materializer's idempotence guarantee:
        // at most one pending delivery per (owner, section, send_date).
        // Partial indexes are not expressible through the index builder,
        // so this one is raw SQL.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX uq_scheduled_deliveries_pending \
                 ON scheduled_deliveries (owner_id, section_id, send_date) \
                 WHERE status = 'pending'",
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(ScheduledDeliveries::Table)
                    .col(ScheduledDeliveries::Status)
                    .col(ScheduledDeliveries::SendDate)
                    .name("idx_scheduled_deliveries_status_send_date")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ScheduledDeliveries::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ScheduledDeliveries {
    Table,
    Id,
    OwnerId,
    SectionId,
    SectionRefs,
    Status,
    SendDate,
    NextDate,
    RenderedContent,
    ErrorDetail,
    CreatedAt,
    SentAt,
}

#[derive(Iden)]
enum Subscribers {
    Table,
    Id,
}
