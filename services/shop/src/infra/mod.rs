pub mod chat;
pub mod codes;
pub mod db;
pub mod mail;
pub mod notify;
pub mod password;
pub mod storage;
pub mod sweep;
