//! Display formatting for batch reports.
//!
//! Per-file status lines follow a fixed `*** tag ***: ...` layout so they
//! stay greppable; the run summary is markdown for the terminal renderer.
//!
//! - [`report`]: `Display` for [`crate::batch::FileReport`]
//! - [`summary`]: `Display` for [`crate::batch::BatchSummary`]

pub mod report;
pub mod summary;

pub use report::StatusTag;
