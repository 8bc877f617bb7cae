pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod image;
pub mod logging;
pub mod storage;
pub mod view;
