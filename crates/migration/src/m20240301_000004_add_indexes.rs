use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Secondary lookup keys; not unique
        manager
            .create_index(
                Index::create()
                    .name("idx_bloc_nom")
                    .table(Bloc::Table)
                    .col(Bloc::NomBloc)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_foyer_nom")
                    .table(Foyer::Table)
                    .col(Foyer::NomFoyer)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_chambre_numero")
                    .table(Chambre::Table)
                    .col(Chambre::NumeroChambre)
                    .to_owned(),
            )
            .await?;

        // Hydrating a bloc's rooms filters on bloc_id
        manager
            .create_index(
                Index::create()
                    .name("idx_chambre_bloc")
                    .table(Chambre::Table)
                    .col(Chambre::BlocId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_bloc_nom").table(Bloc::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_foyer_nom").table(Foyer::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_chambre_numero").table(Chambre::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_chambre_bloc").table(Chambre::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Bloc { Table, NomBloc }

#[derive(DeriveIden)]
enum Foyer { Table, NomFoyer }

#[derive(DeriveIden)]
enum Chambre { Table, NumeroChambre, BlocId }
