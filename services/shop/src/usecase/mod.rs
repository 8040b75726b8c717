pub mod account;
pub mod address;
pub mod catalog;
pub mod order;
pub mod password_reset;
