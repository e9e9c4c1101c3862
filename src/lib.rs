//! Asset energy demand lookup and reduction service.

#[cfg(feature = "api")]
pub mod api;
pub mod cli;
pub mod config;
pub mod logging;
pub mod reducer;
pub mod resolver;
pub mod store;
