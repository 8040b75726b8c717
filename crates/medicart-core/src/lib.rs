//! Cross-cutting plumbing shared by Medicart services.

pub mod config;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
