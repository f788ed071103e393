//! Split marketing-campaign archives into client, campaign and economics tables.
//!
//! Every `*.zip` in the input directory is read in place. Each CSV entry is
//! matched against the three output schemas by its header, its rows are cleaned
//! per schema, and the accumulated tables are published once all archives are
//! consumed.

pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod process;
pub mod schema;

pub use config::Config;
pub use error::CleanError;
pub use pipeline::{Pipeline, RunSummary};
