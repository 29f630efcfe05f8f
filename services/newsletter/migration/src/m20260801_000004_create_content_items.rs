use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ContentItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContentItems::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ContentItems::Topic).string().not_null())
                    .col(ColumnDef::new(ContentItems::Title).string().not_null())
                    .col(
                        ColumnDef::new(ContentItems::Url)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(ContentItems::Source).string())
                    .col(
                        ColumnDef::new(ContentItems::PublishedDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ContentItems::Body).text().not_null())
                    .col(ColumnDef::new(ContentItems::Summary).text())
                    .col(
                        ColumnDef::new(ContentItems::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Population queries the N most recent items per topic.
        manager
            .create_index(
                Index::create()
                    .table(ContentItems::Table)
                    .col(ContentItems::Topic)
                    .col(ContentItems::PublishedDate)
                    .name("idx_content_items_topic_published_date")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ContentItems::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ContentItems {
    Table,
    Id,
    Topic,
    Title,
    Url,
    Source,
    PublishedDate,
    Body,
    Summary,
    CreatedAt,
}
