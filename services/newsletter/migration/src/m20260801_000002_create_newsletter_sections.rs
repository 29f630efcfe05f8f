use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(NewsletterSections::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(NewsletterSections::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(NewsletterSections::OwnerId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(NewsletterSections::Topic).string().not_null())
                    .col(
                        ColumnDef::new(NewsletterSections::Instructions)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(NewsletterSections::Frequency)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(NewsletterSections::OtherGuidelines)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(NewsletterSections::AnchorSendTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(NewsletterSections::NextAnchorTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(NewsletterSections::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(NewsletterSections::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(NewsletterSections::Table, NewsletterSections::OwnerId)
                            .to(Subscribers::Table, Subscribers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(NewsletterSections::Table)
                    .col(NewsletterSections::OwnerId)
                    .name("idx_newsletter_sections_owner_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(NewsletterSections::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum NewsletterSections {
    Table,
    Id,
    OwnerId,
    Topic,
    Instructions,
    Frequency,
    OtherGuidelines,
    AnchorSendTime,
    NextAnchorTime,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Subscribers {
    Table,
    Id,
}
