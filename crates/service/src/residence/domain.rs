use serde::{Deserialize, Serialize};

use models::chambre::TypeChambre;

use crate::errors::ServiceError;

/// Residence (hostel) a bloc can be attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Foyer {
    pub id_foyer: Option<i64>,
    pub nom_foyer: String,
    pub capacite_foyer: i64,
}

impl Foyer {
    pub fn new(nom_foyer: impl Into<String>, capacite_foyer: i64) -> Self {
        Self { id_foyer: None, nom_foyer: nom_foyer.into(), capacite_foyer }
    }
}

/// Room; `bloc_id` is the back-reference to its owning bloc.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chambre {
    pub id_chambre: Option<i64>,
    pub numero_chambre: i64,
    #[serde(default)]
    pub type_chambre: TypeChambre,
    pub bloc_id: Option<i64>,
}

impl Chambre {
    pub fn new(numero_chambre: i64) -> Self {
        Self { id_chambre: None, numero_chambre, type_chambre: TypeChambre::default(), bloc_id: None }
    }

    pub fn with_type(mut self, type_chambre: TypeChambre) -> Self {
        self.type_chambre = type_chambre;
        self
    }
}

/// Building block. `chambres` is the attached room collection the service
/// cascades over; stores never persist it on their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bloc {
    pub id_bloc: Option<i64>,
    pub nom_bloc: String,
    pub capacite_bloc: i64,
    pub foyer: Option<Foyer>,
    #[serde(default)]
    pub chambres: Vec<Chambre>,
}

impl Bloc {
    pub fn new(nom_bloc: impl Into<String>, capacite_bloc: i64) -> Self {
        Self { id_bloc: None, nom_bloc: nom_bloc.into(), capacite_bloc, foyer: None, chambres: Vec::new() }
    }

    pub fn with_id(mut self, id_bloc: i64) -> Self {
        self.id_bloc = Some(id_bloc);
        self
    }

    pub fn with_chambres(mut self, chambres: Vec<Chambre>) -> Self {
        self.chambres = chambres;
        self
    }

    /// Id of the referenced foyer. A foyer that was never persisted cannot
    /// be referenced.
    pub fn foyer_id(&self) -> Result<Option<i64>, ServiceError> {
        match &self.foyer {
            None => Ok(None),
            Some(Foyer { id_foyer: Some(id), .. }) => Ok(Some(*id)),
            Some(f) => Err(ServiceError::Validation(format!("foyer `{}` must be persisted before a bloc references it", f.nom_foyer))),
        }
    }

    pub(crate) fn from_model(m: models::bloc::Model, foyer: Option<Foyer>, chambres: Vec<Chambre>) -> Self {
        Self { id_bloc: Some(m.id_bloc), nom_bloc: m.nom_bloc, capacite_bloc: m.capacite_bloc, foyer, chambres }
    }
}

impl From<models::foyer::Model> for Foyer {
    fn from(m: models::foyer::Model) -> Self {
        Self { id_foyer: Some(m.id_foyer), nom_foyer: m.nom_foyer, capacite_foyer: m.capacite_foyer }
    }
}

impl TryFrom<models::chambre::Model> for Chambre {
    type Error = ServiceError;

    fn try_from(m: models::chambre::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id_chambre: Some(m.id_chambre),
            numero_chambre: m.numero_chambre,
            type_chambre: m.type_chambre.parse()?,
            bloc_id: m.bloc_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpersisted_foyer_cannot_be_referenced() {
        let mut b = Bloc::new("Bloc A", 100);
        assert_eq!(b.foyer_id().unwrap(), None);

        b.foyer = Some(Foyer::new("Foyer A", 10));
        assert!(matches!(b.foyer_id(), Err(ServiceError::Validation(_))));

        b.foyer = Some(Foyer { id_foyer: Some(7), ..Foyer::new("Foyer A", 10) });
        assert_eq!(b.foyer_id().unwrap(), Some(7));
    }

    #[test]
    fn chambre_model_with_unknown_type_is_rejected() {
        let m = models::chambre::Model { id_chambre: 1, numero_chambre: 12, type_chambre: "SUITE".into(), bloc_id: None };
        assert!(Chambre::try_from(m).is_err());
    }

    #[test]
    fn bloc_json_defaults_missing_chambres() {
        let b: Bloc = serde_json::from_str(r#"{"id_bloc":null,"nom_bloc":"Bloc A","capacite_bloc":100,"foyer":null}"#).unwrap();
        assert!(b.chambres.is_empty());
        assert_eq!(b, Bloc::new("Bloc A", 100));
    }
}
