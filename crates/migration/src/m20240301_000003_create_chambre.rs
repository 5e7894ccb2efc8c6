//! Create `chambre` table with optional FK to `bloc`.
//!
//! Rooms are detached (not deleted) when their bloc row goes away; the
//! service deletes rooms explicitly when it cascades.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Chambre::Table)
                    .if_not_exists()
                    .col(big_integer(Chambre::IdChambre).auto_increment().primary_key())
                    .col(big_integer(Chambre::NumeroChambre).not_null())
                    .col(string_len(Chambre::TypeChambre, 16).not_null().default("SIMPLE"))
                    .col(ColumnDef::new(Chambre::BlocId).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_chambre_bloc")
                            .from(Chambre::Table, Chambre::BlocId)
                            .to(Bloc::Table, Bloc::IdBloc)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Chambre::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Chambre { Table, IdChambre, NumeroChambre, TypeChambre, BlocId }

#[derive(DeriveIden)]
enum Bloc { Table, IdBloc }
