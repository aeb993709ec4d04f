//! # Points Agent
//!
//! Reports loyalty-point balances for a fixed roster of members, fetched
//! from a third-party membership platform and cached in-process.
//!
//! Modules:
//! - `config` — service settings and the target roster
//! - `cache` — credential and roster response cache slots
//! - `upstream` — credential strategies and the member directory client
//! - `roster` — aggregation of upstream balances onto the roster
//! - `server` — HTTP surface

pub mod config;
pub mod cache;
pub mod upstream;
pub mod roster;
pub mod error;
pub mod server;
pub mod tests;
pub mod helpers;
pub mod utils;

pub use crate::config::settings::ServiceConfig;
