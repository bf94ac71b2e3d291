pub mod api;
pub mod batch;
pub mod clients;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod models;
pub mod transform;
pub mod worker;
