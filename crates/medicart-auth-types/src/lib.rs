//! Auth types shared by Medicart crates.
//!
//! Provides bearer-token issue/validation and the `Identity` / `BearerToken` extractors.

pub mod identity;
pub mod token;
