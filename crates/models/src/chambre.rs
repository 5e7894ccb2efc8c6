use std::fmt;
use std::str::FromStr;

use sea_orm::{entity::prelude::*, Set, DatabaseConnection, QueryFilter, QueryOrder};
use sea_orm::ActiveValue::NotSet;
use serde::{Deserialize, Serialize};

use crate::{bloc, errors};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "chambre")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id_chambre: i64,
    pub numero_chambre: i64,
    pub type_chambre: String,
    pub bloc_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Bloc }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Bloc => Entity::belongs_to(bloc::Entity).from(Column::BlocId).to(bloc::Column::IdBloc).into(),
        }
    }
}

impl Related<bloc::Entity> for Entity {
    fn to() -> RelationDef { Relation::Bloc.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Occupancy of a room; persisted as its upper-case name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TypeChambre {
    #[default]
    Simple,
    Double,
    Triple,
}

impl TypeChambre {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeChambre::Simple => "SIMPLE",
            TypeChambre::Double => "DOUBLE",
            TypeChambre::Triple => "TRIPLE",
        }
    }
}

impl fmt::Display for TypeChambre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for TypeChambre {
    type Err = errors::ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SIMPLE" => Ok(TypeChambre::Simple),
            "DOUBLE" => Ok(TypeChambre::Double),
            "TRIPLE" => Ok(TypeChambre::Triple),
            other => Err(errors::ModelError::Validation(format!("unknown type_chambre: {other}"))),
        }
    }
}

pub fn validate_numero(numero_chambre: i64) -> Result<(), errors::ModelError> {
    if numero_chambre < 0 { return Err(errors::ModelError::Validation("numero_chambre must be >= 0".into())); }
    Ok(())
}

/// Insert when `id` is `None` or unknown, otherwise overwrite the row.
/// An explicit-id insert moves the id sequence past it.
pub async fn upsert(
    db: &DatabaseConnection,
    id: Option<i64>,
    numero_chambre: i64,
    type_chambre: TypeChambre,
    bloc_id: Option<i64>,
) -> Result<Model, errors::ModelError> {
    validate_numero(numero_chambre)?;
    let existing = match id {
        Some(id) => Entity::find_by_id(id).one(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?,
        None => None,
    };
    match existing {
        Some(found) => {
            let mut am: ActiveModel = found.into();
            am.numero_chambre = Set(numero_chambre);
            am.type_chambre = Set(type_chambre.as_str().to_string());
            am.bloc_id = Set(bloc_id);
            am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
        }
        None => {
            let am = ActiveModel {
                id_chambre: id.map(Set).unwrap_or(NotSet),
                numero_chambre: Set(numero_chambre),
                type_chambre: Set(type_chambre.as_str().to_string()),
                bloc_id: Set(bloc_id),
            };
            let inserted = am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
            if id.is_some() {
                crate::db::resync_sequence(db, "chambre", "id_chambre").await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
            }
            Ok(inserted)
        }
    }
}

pub async fn find_by_numero(db: &DatabaseConnection, numero_chambre: i64) -> Result<Option<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::NumeroChambre.eq(numero_chambre))
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Rooms currently attached to any of the given blocs.
pub async fn list_for_blocs(db: &DatabaseConnection, bloc_ids: &[i64]) -> Result<Vec<Model>, errors::ModelError> {
    if bloc_ids.is_empty() { return Ok(Vec::new()); }
    Entity::find()
        .filter(Column::BlocId.is_in(bloc_ids.iter().copied()))
        .order_by_asc(Column::IdChambre)
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn hard_delete(db: &DatabaseConnection, id: i64) -> Result<(), errors::ModelError> {
    Entity::delete_by_id(id).exec(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(())
}
