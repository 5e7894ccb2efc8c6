use std::collections::HashMap;

use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

use crate::errors::ServiceError;
use crate::residence::domain::{Bloc, Chambre, Foyer};
use crate::residence::repository::{BlocRepository, ChambreRepository, FoyerRepository};

pub struct SeaOrmBlocRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmBlocRepository {
    /// Attach foyers and chambres with one query each, whatever the row count.
    async fn hydrate(&self, rows: Vec<models::bloc::Model>) -> Result<Vec<Bloc>, ServiceError> {
        let bloc_ids: Vec<i64> = rows.iter().map(|b| b.id_bloc).collect();
        let mut foyer_ids: Vec<i64> = rows.iter().filter_map(|b| b.foyer_id).collect();
        foyer_ids.sort_unstable();
        foyer_ids.dedup();

        let foyers: HashMap<i64, Foyer> = models::foyer::list_by_ids(&self.db, &foyer_ids)
            .await?
            .into_iter()
            .map(|f| (f.id_foyer, Foyer::from(f)))
            .collect();

        let mut chambres: HashMap<i64, Vec<Chambre>> = HashMap::new();
        for m in models::chambre::list_for_blocs(&self.db, &bloc_ids).await? {
            let c = Chambre::try_from(m)?;
            if let Some(bloc_id) = c.bloc_id {
                chambres.entry(bloc_id).or_default().push(c);
            }
        }

        Ok(rows
            .into_iter()
            .map(|b| {
                let foyer = b.foyer_id.and_then(|id| foyers.get(&id).cloned());
                let attached = chambres.remove(&b.id_bloc).unwrap_or_default();
                Bloc::from_model(b, foyer, attached)
            })
            .collect())
    }

    async fn hydrate_one(&self, row: Option<models::bloc::Model>) -> Result<Option<Bloc>, ServiceError> {
        match row {
            Some(b) => Ok(self.hydrate(vec![b]).await?.pop()),
            None => Ok(None),
        }
    }
}

#[async_trait::async_trait]
impl BlocRepository for SeaOrmBlocRepository {
    async fn save(&self, bloc: Bloc) -> Result<Bloc, ServiceError> {
        let foyer_id = bloc.foyer_id()?;
        let saved = models::bloc::upsert(&self.db, bloc.id_bloc, &bloc.nom_bloc, bloc.capacite_bloc, foyer_id).await?;
        Ok(Bloc {
            id_bloc: Some(saved.id_bloc),
            nom_bloc: saved.nom_bloc,
            capacite_bloc: saved.capacite_bloc,
            foyer: bloc.foyer,
            chambres: bloc.chambres,
        })
    }

    async fn find_all(&self) -> Result<Vec<Bloc>, ServiceError> {
        let rows = models::bloc::Entity::find()
            .order_by_asc(models::bloc::Column::IdBloc)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        self.hydrate(rows).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Bloc>, ServiceError> {
        let row = models::bloc::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        self.hydrate_one(row).await
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError> {
        models::bloc::hard_delete(&self.db, id).await?;
        Ok(())
    }

    async fn delete(&self, bloc: &Bloc) -> Result<(), ServiceError> {
        if let Some(id) = bloc.id_bloc {
            models::bloc::hard_delete(&self.db, id).await?;
        }
        Ok(())
    }

    async fn find_by_nom_bloc(&self, nom_bloc: &str) -> Result<Option<Bloc>, ServiceError> {
        let row = models::bloc::find_by_nom(&self.db, nom_bloc).await?;
        self.hydrate_one(row).await
    }
}

pub struct SeaOrmChambreRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl ChambreRepository for SeaOrmChambreRepository {
    async fn save(&self, chambre: Chambre) -> Result<Chambre, ServiceError> {
        let saved = models::chambre::upsert(&self.db, chambre.id_chambre, chambre.numero_chambre, chambre.type_chambre, chambre.bloc_id).await?;
        Chambre::try_from(saved)
    }

    async fn delete(&self, chambre: &Chambre) -> Result<(), ServiceError> {
        if let Some(id) = chambre.id_chambre {
            models::chambre::hard_delete(&self.db, id).await?;
        }
        Ok(())
    }

    async fn find_by_numero_chambre(&self, numero_chambre: i64) -> Result<Option<Chambre>, ServiceError> {
        models::chambre::find_by_numero(&self.db, numero_chambre)
            .await?
            .map(Chambre::try_from)
            .transpose()
    }
}

pub struct SeaOrmFoyerRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl FoyerRepository for SeaOrmFoyerRepository {
    async fn find_by_nom_foyer(&self, nom_foyer: &str) -> Result<Option<Foyer>, ServiceError> {
        Ok(models::foyer::find_by_nom(&self.db, nom_foyer).await?.map(Foyer::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use uuid::Uuid;

    use crate::residence::BlocService;
    use crate::test_support::get_db;

    fn unique_numero() -> i64 {
        (Uuid::new_v4().as_u128() % 1_000_000_000) as i64
    }

    #[tokio::test]
    async fn assign_then_refetch_shows_chambre_on_bloc() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let svc = BlocService::new(
            Arc::new(SeaOrmBlocRepository { db: db.clone() }),
            Arc::new(SeaOrmChambreRepository { db: db.clone() }),
            Arc::new(SeaOrmFoyerRepository { db: db.clone() }),
        );

        let nom = format!("svc_bloc_{}", Uuid::new_v4());
        let bloc = svc.add_or_update(Bloc::new(nom.clone(), 40)).await?;
        let id = bloc.id_bloc.unwrap();

        let numero = unique_numero();
        let chambre = models::chambre::upsert(&db, None, numero, models::chambre::TypeChambre::Simple, None).await?;

        svc.affecter_chambres_a_bloc(&[numero], &nom).await?;
        let refetched = svc.find_by_id(id).await?;
        assert_eq!(refetched.chambres.len(), 1);
        assert_eq!(refetched.chambres[0].id_chambre, Some(chambre.id_chambre));
        assert_eq!(refetched.chambres[0].bloc_id, Some(id));

        svc.delete(&refetched).await?;
        assert!(matches!(svc.find_by_id(id).await, Err(ServiceError::NotFound(_))));
        assert!(models::chambre::find_by_numero(&db, numero).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn bloc_foyer_assignment_is_persisted() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let svc = BlocService::new(
            Arc::new(SeaOrmBlocRepository { db: db.clone() }),
            Arc::new(SeaOrmChambreRepository { db: db.clone() }),
            Arc::new(SeaOrmFoyerRepository { db: db.clone() }),
        );

        let nom_bloc = format!("svc_bloc_{}", Uuid::new_v4());
        let nom_foyer = format!("svc_foyer_{}", Uuid::new_v4());
        let foyer = models::foyer::create(&db, &nom_foyer, 200).await?;
        let bloc = svc.add_or_update(Bloc::new(nom_bloc.clone(), 40)).await?;

        let assigned = svc.affecter_bloc_a_foyer(&nom_bloc, &nom_foyer).await?;
        assert_eq!(assigned.foyer.as_ref().and_then(|f| f.id_foyer), Some(foyer.id_foyer));

        let refetched = svc.find_by_id(bloc.id_bloc.unwrap()).await?;
        assert_eq!(refetched.foyer.map(|f| f.nom_foyer), Some(nom_foyer));

        svc.delete_by_id(bloc.id_bloc.unwrap()).await?;
        models::foyer::hard_delete(&db, foyer.id_foyer).await?;
        Ok(())
    }

    #[tokio::test]
    async fn explicit_id_insert_does_not_block_generated_ids() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let svc = BlocService::new(
            Arc::new(SeaOrmBlocRepository { db: db.clone() }),
            Arc::new(SeaOrmChambreRepository { db: db.clone() }),
            Arc::new(SeaOrmFoyerRepository { db: db.clone() }),
        );

        let generated = svc.add_or_update(Bloc::new(format!("svc_bloc_{}", Uuid::new_v4()), 10)).await?;
        let explicit_id = generated.id_bloc.unwrap() + 10_000;
        let explicit = svc
            .add_or_update(Bloc::new(format!("svc_bloc_{}", Uuid::new_v4()), 10).with_id(explicit_id))
            .await?;
        assert_eq!(explicit.id_bloc, Some(explicit_id));

        let next = svc.add_or_update(Bloc::new(format!("svc_bloc_{}", Uuid::new_v4()), 10)).await?;
        assert!(next.id_bloc.unwrap() > explicit_id);

        let chambres = SeaOrmChambreRepository { db: db.clone() };
        let first = chambres.save(Chambre::new(unique_numero())).await?;
        let explicit_chambre_id = first.id_chambre.unwrap() + 10_000;
        let pinned = chambres
            .save(Chambre { id_chambre: Some(explicit_chambre_id), ..Chambre::new(unique_numero()) })
            .await?;
        assert_eq!(pinned.id_chambre, Some(explicit_chambre_id));
        let after = chambres.save(Chambre::new(unique_numero())).await?;
        assert!(after.id_chambre.unwrap() > explicit_chambre_id);

        for c in [first, pinned, after] {
            chambres.delete(&c).await?;
        }
        for b in [generated, explicit, next] {
            svc.delete_by_id(b.id_bloc.unwrap()).await?;
        }
        Ok(())
    }
}
