pub mod config;
pub mod error;
pub mod locator;
pub mod parser;
pub mod stats;
pub mod types;

pub use config::Config;
pub use error::ReportError;
pub use parser::RankingParser;
pub use stats::{summarize, AccuracySummary};
pub use types::*;
