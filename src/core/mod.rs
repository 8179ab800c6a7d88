pub mod add;
pub mod auth;
pub mod calculator;
pub mod del;
pub mod settings;
pub mod tracker;

pub use tracker::Tracker;
