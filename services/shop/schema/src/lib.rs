//! sea-orm entities for the shop database.

pub mod accounts;
pub mod addresses;
pub mod categories;
pub mod order_items;
pub mod orders;
pub mod pending_registrations;
pub mod products;
