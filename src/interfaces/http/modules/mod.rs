pub mod config;
pub mod echo;
pub mod health;
pub mod info;
pub mod logs;
pub mod pages;
pub mod request_id;
pub mod status;
