//! Typed client core for the interview-prep app: local storage, auth, the setup
//! wizard, the live interview session, results, and the HTTP client for the
//! resume backend.

pub mod api;
pub mod app;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod models;
pub mod profile;
pub mod results;
pub mod routes;
pub mod session;
pub mod shell;
pub mod storage;
pub mod upload;
pub mod wizard;
