//! Houseplant catalog, collection tracking and care scheduling.
//!
//! - [`catalog`]: built-in species and care-tip catalogs.
//! - [`care`]: watering and fertilizing due dates.
//! - [`store`]: the persisted collection of tracked plants.
//! - [`identify`]: photo identification (simulated).
//! - [`api`]: HTTP interface over all of the above.

pub mod api;
pub mod care;
pub mod catalog;
pub mod config;
pub mod error;
pub mod identify;
pub mod models;
pub mod store;
