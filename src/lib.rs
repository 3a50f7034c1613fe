pub mod cli;
pub mod config;
pub mod dot;
pub mod error;
pub mod highlight;
pub mod pipeline;
pub mod report;
pub mod reporting;
pub mod theme;
