pub mod add;
pub mod auth;
pub mod chart;
pub mod config;
pub mod cycle;
pub mod del;
pub mod init;
pub mod list;
pub mod settings;
