//! `ordia-report` — presentation layer for Ordia runs.
//!
//! Pure string/bytes producers: the callers decide where the documents go.

pub mod chart;
pub mod format;
pub mod html;
