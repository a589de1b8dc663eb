pub mod analyzers;
pub mod charts;
pub mod config;
pub mod error;
pub mod fetch;
pub mod infra;
pub mod observation;
pub mod output;
pub mod parser;
pub mod prediction;
pub mod services;
