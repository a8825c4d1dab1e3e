//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod cache_control;
pub mod error;
pub mod health;
pub mod projects;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
pub mod test_cases;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;
