use sea_orm::{entity::prelude::*, Set, DatabaseConnection, QueryFilter};
use sea_orm::ActiveValue::NotSet;
use serde::{Deserialize, Serialize};

use crate::{bloc, errors};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "foyer")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id_foyer: i64,
    pub nom_foyer: String,
    pub capacite_foyer: i64,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Blocs }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Blocs => Entity::has_many(bloc::Entity).into() }
    }
}

impl Related<bloc::Entity> for Entity {
    fn to() -> RelationDef { Relation::Blocs.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate(nom_foyer: &str, capacite_foyer: i64) -> Result<(), errors::ModelError> {
    if nom_foyer.trim().is_empty() { return Err(errors::ModelError::Validation("nom_foyer required".into())); }
    if capacite_foyer < 0 { return Err(errors::ModelError::Validation("capacite_foyer must be >= 0".into())); }
    Ok(())
}

pub async fn create(db: &DatabaseConnection, nom_foyer: &str, capacite_foyer: i64) -> Result<Model, errors::ModelError> {
    validate(nom_foyer, capacite_foyer)?;
    let am = ActiveModel {
        id_foyer: NotSet,
        nom_foyer: Set(nom_foyer.to_string()),
        capacite_foyer: Set(capacite_foyer),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn find_by_nom(db: &DatabaseConnection, nom_foyer: &str) -> Result<Option<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::NomFoyer.eq(nom_foyer))
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn list_by_ids(db: &DatabaseConnection, ids: &[i64]) -> Result<Vec<Model>, errors::ModelError> {
    if ids.is_empty() { return Ok(Vec::new()); }
    Entity::find()
        .filter(Column::IdFoyer.is_in(ids.iter().copied()))
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn hard_delete(db: &DatabaseConnection, id: i64) -> Result<(), errors::ModelError> {
    Entity::delete_by_id(id).exec(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(())
}
