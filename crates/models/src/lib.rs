//! SeaORM entities for the residence directory plus per-entity
//! persistence helpers that validate before they write.

pub mod errors;
pub mod db;
pub mod foyer;
pub mod bloc;
pub mod chambre;

#[cfg(test)]
mod tests;
