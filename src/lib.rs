pub mod config;
pub mod output;
pub mod prompt;
pub mod scoring;
pub mod service;
pub mod store;
