//! Pure environmental logic for Urban Balance.
//!
//! This crate holds everything the dashboard computes: the city health
//! score, the what-if policy simulator, and the data sources that feed
//! them. Functions take plain data and return results, so they can be
//! exercised from tests, the headless harness, or any front end.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Dashboard configuration, validation, source selection |
//! | [`geography`] | Locations, urban density, coastal check, pollution zones |
//! | [`health`] | Weighted 0–100 city health score and tiers |
//! | [`levers`] | Policy levers, baselines, suggested plan |
//! | [`mock`] | Randomized location-aware reading generator |
//! | [`observations`] | Merge partial upstream observations into a reading |
//! | [`reading`] | `EnvironmentalReading` and simulated metrics |
//! | [`simulator`] | Lever sensitivities, `simulate`, `project` |
//! | [`sources`] | `DataSource` trait, fixtures, fallback chain |
//! | [`state`] | Dashboard session state |
//! | [`status`] | Per-metric status labels |

pub mod config;
pub mod geography;
pub mod health;
pub mod levers;
pub mod mock;
pub mod observations;
pub mod reading;
pub mod simulator;
pub mod sources;
pub mod state;
pub mod status;

pub use health::{compute_health_score, HealthScore};
pub use levers::SimulationLevers;
pub use reading::EnvironmentalReading;
pub use simulator::{project, simulate};
