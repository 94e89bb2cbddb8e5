pub mod app;
pub mod cli;
pub mod config;
pub mod directory;
pub mod error;
pub mod export;
pub mod logging;
pub mod source;
pub mod workshop;
