//! `ordia-recon` — sampling and reconciliation engine.
//!
//! Pure engine crate: receives pre-loaded tables, returns classified
//! results. No CLI or IO dependencies.

pub mod classify;
pub mod config;
pub mod error;
pub mod model;
pub mod reconcile;
pub mod sampler;

pub use classify::MatchState;
pub use config::JobConfig;
pub use error::ReconError;
pub use model::{CompareSummary, Comparison, ComparisonRow, RunMeta, Selection};
pub use reconcile::reconcile;
pub use sampler::select;
