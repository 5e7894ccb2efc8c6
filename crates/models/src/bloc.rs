use sea_orm::{entity::prelude::*, Set, DatabaseConnection, QueryFilter};
use sea_orm::ActiveValue::NotSet;
use serde::{Deserialize, Serialize};

use crate::{chambre, errors, foyer};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bloc")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id_bloc: i64,
    pub nom_bloc: String,
    pub capacite_bloc: i64,
    pub foyer_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Foyer, Chambres }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Foyer => Entity::belongs_to(foyer::Entity).from(Column::FoyerId).to(foyer::Column::IdFoyer).into(),
            Relation::Chambres => Entity::has_many(chambre::Entity).into(),
        }
    }
}

impl Related<foyer::Entity> for Entity {
    fn to() -> RelationDef { Relation::Foyer.def() }
}

impl Related<chambre::Entity> for Entity {
    fn to() -> RelationDef { Relation::Chambres.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate(nom_bloc: &str, capacite_bloc: i64) -> Result<(), errors::ModelError> {
    if nom_bloc.trim().is_empty() { return Err(errors::ModelError::Validation("nom_bloc required".into())); }
    if capacite_bloc < 0 { return Err(errors::ModelError::Validation("capacite_bloc must be >= 0".into())); }
    Ok(())
}

/// Insert when `id` is `None` or unknown, otherwise overwrite the row.
/// An explicit-id insert moves the id sequence past it.
pub async fn upsert(
    db: &DatabaseConnection,
    id: Option<i64>,
    nom_bloc: &str,
    capacite_bloc: i64,
    foyer_id: Option<i64>,
) -> Result<Model, errors::ModelError> {
    validate(nom_bloc, capacite_bloc)?;
    let existing = match id {
        Some(id) => Entity::find_by_id(id).one(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?,
        None => None,
    };
    match existing {
        Some(found) => {
            let mut am: ActiveModel = found.into();
            am.nom_bloc = Set(nom_bloc.to_string());
            am.capacite_bloc = Set(capacite_bloc);
            am.foyer_id = Set(foyer_id);
            am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
        }
        None => {
            let am = ActiveModel {
                id_bloc: id.map(Set).unwrap_or(NotSet),
                nom_bloc: Set(nom_bloc.to_string()),
                capacite_bloc: Set(capacite_bloc),
                foyer_id: Set(foyer_id),
            };
            let inserted = am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
            if id.is_some() {
                crate::db::resync_sequence(db, "bloc", "id_bloc").await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
            }
            Ok(inserted)
        }
    }
}

pub async fn find_by_nom(db: &DatabaseConnection, nom_bloc: &str) -> Result<Option<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::NomBloc.eq(nom_bloc))
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn hard_delete(db: &DatabaseConnection, id: i64) -> Result<(), errors::ModelError> {
    Entity::delete_by_id(id).exec(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(())
}
