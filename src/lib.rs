//! Weather widget - search a city, see its current conditions
//!
//! The library exposes every module so the binary and the integration tests
//! share one store, reducer and component tree.

pub mod action;
pub mod api;
pub mod components;
pub mod config;
pub mod effect;
pub mod reducer;
pub mod state;
pub mod validate;
pub mod view;
