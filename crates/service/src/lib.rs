//! Service layer for the residence directory.
//! - Separates business logic from data access behind repository traits.
//! - Reuses validation and entity definitions in `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod residence;
pub mod runtime;
#[cfg(test)]
pub mod test_support;
