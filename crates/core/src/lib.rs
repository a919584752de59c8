pub mod auth;
pub mod config;
pub mod data;
pub mod history;
pub mod model;
pub mod svg;
pub mod views;

pub use eeg_cloud_protocol as protocol;
