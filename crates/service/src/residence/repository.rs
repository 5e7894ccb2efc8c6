use async_trait::async_trait;

use super::domain::{Bloc, Chambre, Foyer};
use crate::errors::ServiceError;

/// Bloc persistence. Reads hydrate the bloc's foyer and the chambres that
/// currently point at it.
#[async_trait]
pub trait BlocRepository: Send + Sync {
    /// Insert when `id_bloc` is `None` or unknown, overwrite otherwise.
    async fn save(&self, bloc: Bloc) -> Result<Bloc, ServiceError>;
    async fn find_all(&self) -> Result<Vec<Bloc>, ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Bloc>, ServiceError>;
    /// Unknown ids are not an error.
    async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError>;
    /// A bloc without an id was never stored; deleting it does nothing.
    async fn delete(&self, bloc: &Bloc) -> Result<(), ServiceError>;
    async fn find_by_nom_bloc(&self, nom_bloc: &str) -> Result<Option<Bloc>, ServiceError>;
}

#[async_trait]
pub trait ChambreRepository: Send + Sync {
    async fn save(&self, chambre: Chambre) -> Result<Chambre, ServiceError>;
    async fn delete(&self, chambre: &Chambre) -> Result<(), ServiceError>;
    async fn find_by_numero_chambre(&self, numero_chambre: i64) -> Result<Option<Chambre>, ServiceError>;
}

#[async_trait]
pub trait FoyerRepository: Send + Sync {
    async fn find_by_nom_foyer(&self, nom_foyer: &str) -> Result<Option<Foyer>, ServiceError>;
}

/// Simple in-memory store for tests, benches and doc examples
pub mod mock {
    use super::*;
    use std::collections::{BTreeMap, HashMap};
    use std::sync::{Mutex, MutexGuard, PoisonError};

    #[derive(Default)]
    struct State {
        blocs: BTreeMap<i64, Bloc>,       // stored without chambres
        chambres: BTreeMap<i64, Chambre>,
        foyers: BTreeMap<i64, Foyer>,
        last_bloc: i64,
        last_chambre: i64,
        last_foyer: i64,
    }

    impl State {
        fn hydrate(&self, bloc: &Bloc) -> Bloc {
            let mut out = bloc.clone();
            out.chambres = self
                .chambres
                .values()
                .filter(|c| c.bloc_id.is_some() && c.bloc_id == bloc.id_bloc)
                .cloned()
                .collect();
            out
        }

        fn remove_bloc(&mut self, id: i64) {
            if self.blocs.remove(&id).is_some() {
                // mirrors ON DELETE SET NULL on chambre.bloc_id
                for c in self.chambres.values_mut().filter(|c| c.bloc_id == Some(id)) {
                    c.bloc_id = None;
                }
            }
        }
    }

    fn assign_id(last: &mut i64, requested: Option<i64>) -> i64 {
        match requested {
            Some(id) => {
                *last = (*last).max(id);
                id
            }
            None => {
                *last += 1;
                *last
            }
        }
    }

    /// Implements all three repositories over one shared state, so a room
    /// saved through the chambre side shows up on the next bloc read.
    /// Every trait call is counted under `"<store>.<operation>"`, e.g.
    /// `"chambre.save"`, and logged in call order; seeding helpers are not
    /// recorded.
    #[derive(Default)]
    pub struct InMemoryResidenceStore {
        state: Mutex<State>,
        calls: Mutex<HashMap<&'static str, usize>>,
        log: Mutex<Vec<&'static str>>,
    }

    impl InMemoryResidenceStore {
        fn state(&self) -> MutexGuard<'_, State> {
            self.state.lock().unwrap_or_else(PoisonError::into_inner)
        }

        fn record(&self, op: &'static str) {
            let mut calls = self.calls.lock().unwrap_or_else(PoisonError::into_inner);
            *calls.entry(op).or_insert(0) += 1;
            self.log.lock().unwrap_or_else(PoisonError::into_inner).push(op);
        }

        /// Number of trait calls made for `op` since creation or the last reset.
        pub fn calls(&self, op: &str) -> usize {
            let calls = self.calls.lock().unwrap_or_else(PoisonError::into_inner);
            calls.get(op).copied().unwrap_or(0)
        }

        /// Every recorded call, oldest first.
        pub fn call_log(&self) -> Vec<&'static str> {
            self.log.lock().unwrap_or_else(PoisonError::into_inner).clone()
        }

        pub fn reset_calls(&self) {
            self.calls.lock().unwrap_or_else(PoisonError::into_inner).clear();
            self.log.lock().unwrap_or_else(PoisonError::into_inner).clear();
        }

        pub fn insert_foyer(&self, mut foyer: Foyer) -> Foyer {
            let mut st = self.state();
            let id = assign_id(&mut st.last_foyer, foyer.id_foyer);
            foyer.id_foyer = Some(id);
            st.foyers.insert(id, foyer.clone());
            foyer
        }

        pub fn insert_chambre(&self, mut chambre: Chambre) -> Chambre {
            let mut st = self.state();
            let id = assign_id(&mut st.last_chambre, chambre.id_chambre);
            chambre.id_chambre = Some(id);
            st.chambres.insert(id, chambre.clone());
            chambre
        }

        pub fn chambre(&self, id: i64) -> Option<Chambre> {
            self.state().chambres.get(&id).cloned()
        }

        pub fn chambre_count(&self) -> usize {
            self.state().chambres.len()
        }
    }

    #[async_trait]
    impl BlocRepository for InMemoryResidenceStore {
        async fn save(&self, mut bloc: Bloc) -> Result<Bloc, ServiceError> {
            self.record("bloc.save");
            models::bloc::validate(&bloc.nom_bloc, bloc.capacite_bloc)?;
            bloc.foyer_id()?;
            let mut st = self.state();
            let id = assign_id(&mut st.last_bloc, bloc.id_bloc);
            bloc.id_bloc = Some(id);
            let stored = Bloc { chambres: Vec::new(), ..bloc.clone() };
            st.blocs.insert(id, stored);
            Ok(bloc)
        }

        async fn find_all(&self) -> Result<Vec<Bloc>, ServiceError> {
            self.record("bloc.find_all");
            let st = self.state();
            Ok(st.blocs.values().map(|b| st.hydrate(b)).collect())
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<Bloc>, ServiceError> {
            self.record("bloc.find_by_id");
            let st = self.state();
            Ok(st.blocs.get(&id).map(|b| st.hydrate(b)))
        }

        async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError> {
            self.record("bloc.delete_by_id");
            self.state().remove_bloc(id);
            Ok(())
        }

        async fn delete(&self, bloc: &Bloc) -> Result<(), ServiceError> {
            self.record("bloc.delete");
            if let Some(id) = bloc.id_bloc {
                self.state().remove_bloc(id);
            }
            Ok(())
        }

        async fn find_by_nom_bloc(&self, nom_bloc: &str) -> Result<Option<Bloc>, ServiceError> {
            self.record("bloc.find_by_nom_bloc");
            let st = self.state();
            Ok(st.blocs.values().find(|b| b.nom_bloc == nom_bloc).map(|b| st.hydrate(b)))
        }
    }

    #[async_trait]
    impl ChambreRepository for InMemoryResidenceStore {
        async fn save(&self, mut chambre: Chambre) -> Result<Chambre, ServiceError> {
            self.record("chambre.save");
            models::chambre::validate_numero(chambre.numero_chambre)?;
            let mut st = self.state();
            let id = assign_id(&mut st.last_chambre, chambre.id_chambre);
            chambre.id_chambre = Some(id);
            st.chambres.insert(id, chambre.clone());
            Ok(chambre)
        }

        async fn delete(&self, chambre: &Chambre) -> Result<(), ServiceError> {
            self.record("chambre.delete");
            if let Some(id) = chambre.id_chambre {
                self.state().chambres.remove(&id);
            }
            Ok(())
        }

        async fn find_by_numero_chambre(&self, numero_chambre: i64) -> Result<Option<Chambre>, ServiceError> {
            self.record("chambre.find_by_numero_chambre");
            let st = self.state();
            Ok(st.chambres.values().find(|c| c.numero_chambre == numero_chambre).cloned())
        }
    }

    #[async_trait]
    impl FoyerRepository for InMemoryResidenceStore {
        async fn find_by_nom_foyer(&self, nom_foyer: &str) -> Result<Option<Foyer>, ServiceError> {
            self.record("foyer.find_by_nom_foyer");
            let st = self.state();
            Ok(st.foyers.values().find(|f| f.nom_foyer == nom_foyer).cloned())
        }
    }

}
