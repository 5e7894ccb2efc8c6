//! Create `foyer` table.
//!
//! Root entity of the residence directory; blocs reference it.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Foyer::Table)
                    .if_not_exists()
                    .col(big_integer(Foyer::IdFoyer).auto_increment().primary_key())
                    .col(string_len(Foyer::NomFoyer, 128).not_null())
                    .col(big_integer(Foyer::CapaciteFoyer).not_null().default(0))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Foyer::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Foyer { Table, IdFoyer, NomFoyer, CapaciteFoyer }
