//! Create `bloc` table with optional FK to `foyer`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bloc::Table)
                    .if_not_exists()
                    .col(big_integer(Bloc::IdBloc).auto_increment().primary_key())
                    .col(string_len(Bloc::NomBloc, 128).not_null())
                    .col(big_integer(Bloc::CapaciteBloc).not_null())
                    .col(ColumnDef::new(Bloc::FoyerId).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bloc_foyer")
                            .from(Bloc::Table, Bloc::FoyerId)
                            .to(Foyer::Table, Foyer::IdFoyer)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Bloc::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Bloc { Table, IdBloc, NomBloc, CapaciteBloc, FoyerId }

#[derive(DeriveIden)]
enum Foyer { Table, IdFoyer }
