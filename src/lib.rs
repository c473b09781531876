pub mod config;
pub mod db;
pub mod error;
pub mod intake;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;
