use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::domain::Bloc;
use super::repository::{BlocRepository, ChambreRepository, FoyerRepository};
use crate::errors::ServiceError;

/// Bloc operations over the three residence stores.
///
/// Multi-step operations issue one store call per record and open no
/// transaction: a failure midway leaves earlier writes in place.
pub struct BlocService<B: BlocRepository, C: ChambreRepository, F: FoyerRepository> {
    blocs: Arc<B>,
    chambres: Arc<C>,
    foyers: Arc<F>,
}

impl<S> BlocService<S, S, S>
where
    S: BlocRepository + ChambreRepository + FoyerRepository,
{
    /// One store serving all three repositories.
    pub fn with_store(store: Arc<S>) -> Self {
        Self { blocs: Arc::clone(&store), chambres: Arc::clone(&store), foyers: store }
    }
}

impl<B: BlocRepository, C: ChambreRepository, F: FoyerRepository> BlocService<B, C, F> {
    pub fn new(blocs: Arc<B>, chambres: Arc<C>, foyers: Arc<F>) -> Self { Self { blocs, chambres, foyers } }

    /// Save the bloc, then point every attached chambre at it and save each
    /// one. The returned bloc carries the saved chambres.
    ///
    /// # Examples
    /// ```
    /// use service::residence::{BlocService, domain::{Bloc, Chambre}, repository::mock::InMemoryResidenceStore};
    /// use std::sync::Arc;
    /// let store = Arc::new(InMemoryResidenceStore::default());
    /// let svc = BlocService::with_store(store.clone());
    /// let bloc = Bloc::new("Bloc A", 100).with_chambres(vec![Chambre::new(1), Chambre::new(2)]);
    /// let saved = tokio_test::block_on(svc.add_or_update(bloc)).unwrap();
    /// assert_eq!(saved.nom_bloc, "Bloc A");
    /// assert!(saved.chambres.iter().all(|c| c.bloc_id == saved.id_bloc));
    /// assert_eq!(store.calls("chambre.save"), 2);
    /// ```
    #[instrument(skip_all, fields(nom_bloc = tracing::field::Empty))]
    pub async fn add_or_update(&self, bloc: impl Into<Option<Bloc>> + Send) -> Result<Bloc, ServiceError> {
        let mut bloc = bloc.into().ok_or(ServiceError::MissingInput("bloc"))?;
        tracing::Span::current().record("nom_bloc", bloc.nom_bloc.as_str());

        let chambres = std::mem::take(&mut bloc.chambres);
        let mut saved = self.blocs.save(bloc).await?;
        let mut attached = Vec::with_capacity(chambres.len());
        for mut chambre in chambres {
            chambre.bloc_id = saved.id_bloc;
            attached.push(self.chambres.save(chambre).await?);
        }
        saved.chambres = attached;
        info!(id_bloc = ?saved.id_bloc, chambres = saved.chambres.len(), "bloc_saved");
        Ok(saved)
    }

    pub async fn find_all(&self) -> Result<Vec<Bloc>, ServiceError> {
        self.blocs.find_all().await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Bloc, ServiceError> {
        self.blocs
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(&format!("bloc {id}")))
    }

    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError> {
        self.blocs.delete_by_id(id).await?;
        info!(id_bloc = id, "bloc_deleted");
        Ok(())
    }

    /// Delete the attached chambres one by one, then the bloc.
    #[instrument(skip_all, fields(id_bloc = ?bloc.id_bloc, nom_bloc = %bloc.nom_bloc))]
    pub async fn delete(&self, bloc: &Bloc) -> Result<(), ServiceError> {
        for chambre in &bloc.chambres {
            self.chambres.delete(chambre).await?;
        }
        self.blocs.delete(bloc).await?;
        info!(chambres = bloc.chambres.len(), "bloc_deleted_with_chambres");
        Ok(())
    }

    /// Point every chambre found by number at the named bloc. Unknown
    /// numbers are skipped. The returned bloc is the one looked up; its
    /// `chambres` do not include this call's assignments.
    #[instrument(skip(self, numeros), fields(requested = numeros.len()))]
    pub async fn affecter_chambres_a_bloc(&self, numeros: &[i64], nom_bloc: &str) -> Result<Bloc, ServiceError> {
        let bloc = self
            .blocs
            .find_by_nom_bloc(nom_bloc)
            .await?
            .ok_or_else(|| ServiceError::InvalidArgument(format!("Bloc not found: {nom_bloc}")))?;

        let mut found = Vec::with_capacity(numeros.len());
        for &numero in numeros {
            match self.chambres.find_by_numero_chambre(numero).await? {
                Some(chambre) => found.push(chambre),
                None => warn!(numero_chambre = numero, "chambre not found, skipping"),
            }
        }

        let assigned = found.len();
        for mut chambre in found {
            chambre.bloc_id = bloc.id_bloc;
            debug!(numero_chambre = chambre.numero_chambre, "chambre_assigned");
            self.chambres.save(chambre).await?;
        }
        info!(id_bloc = ?bloc.id_bloc, assigned, "chambres_assigned_to_bloc");
        Ok(bloc)
    }

    /// Attach the named bloc to the named foyer and save it. An unknown foyer
    /// leaves the bloc without one; an unknown bloc is `NotFound`.
    #[instrument(skip(self))]
    pub async fn affecter_bloc_a_foyer(&self, nom_bloc: &str, nom_foyer: &str) -> Result<Bloc, ServiceError> {
        let bloc = self.blocs.find_by_nom_bloc(nom_bloc).await?;
        let foyer = self.foyers.find_by_nom_foyer(nom_foyer).await?;
        let mut bloc = bloc.ok_or_else(|| ServiceError::not_found(&format!("bloc {nom_bloc}")))?;

        if foyer.is_none() {
            warn!("foyer not found, bloc left unassigned");
        }
        bloc.foyer = foyer;
        let saved = self.blocs.save(bloc).await?;
        info!(id_bloc = ?saved.id_bloc, id_foyer = ?saved.foyer.as_ref().and_then(|f| f.id_foyer), "bloc_assigned_to_foyer");
        Ok(saved)
    }
}
