//! Domain types shared across Medicart services.
//!
//! This crate contains only pure types and static reference data with no
//! framework dependencies. Import in `usecase/` and `domain/` layers.

pub mod directory;
pub mod pagination;
pub mod role;
