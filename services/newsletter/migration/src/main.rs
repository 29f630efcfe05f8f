use sea_orm_migration::prelude::*;

use plume_newsletter_migration::Migrator;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
