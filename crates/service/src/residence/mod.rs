//! Residence directory: blocs, their rooms (chambres) and the foyer each
//! bloc belongs to.
//!
//! Same three layers as the rest of the crate: `domain` types, `repository`
//! traits with SeaORM and in-memory implementations, and the `service`.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use service::BlocService;
