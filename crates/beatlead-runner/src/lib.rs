//! # beatlead-runner
//!
//! Config-based lead discovery. Search a video platform for "<artist> type beat",
//! turn channel names into producer names, find artists crediting those producers
//! on an audio platform, and extract contact details from each artist's profile.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use beatlead_runner::{collect_leads, BrowserSource, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> beatlead_runner::Result<()> {
//! let config = Config::load("leads.yaml")?;
//! let mut source = BrowserSource::launch(&config).await?;
//! let report = collect_leads(&mut source, &config.search).await?;
//! println!("Leads: {}", report.leads.len());
//! source.close().await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod output;
mod pipeline;
mod source;

pub use config::{
    BrowserConfig, Config, OnFailure, OutputConfig, ParamDef, Params, RetryConfig, SearchConfig,
    Selectors, Sites, Timing, Viewport,
};
pub use output::{read_leads, resolve_output_path, write_leads};
pub use pipeline::{collect_leads, LeadReport};
pub use source::{BrowserSource, LeadSource};

/// Result type for beatlead-runner operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during config loading or a run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("yaml parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("browser error: {0}")]
    Browser(#[from] eoka::Error),

    #[error("page error: {0}")]
    Page(String),
}
