//! Domain models for PlantCare.
//!
//! # Core Concepts
//!
//! ## Catalog Entities
//!
//! Loaded once at startup and never mutated:
//!
//! - [`Species`]: A known plant type with its baseline care parameters.
//! - [`CareTip`]: An advice article, grouped by [`TipCategory`].
//!
//! ## Collection Entities
//!
//! - [`TrackedPlant`]: A user's own plant. Carries every [`Species`] field plus
//!   care history (last watered, last fertilized) and personal notes.
//! - [`PlantUpdate`]: Partial field set merged into a tracked plant.

mod plant;
mod species;
mod tip;

pub use plant::*;
pub use species::*;
pub use tip::*;
