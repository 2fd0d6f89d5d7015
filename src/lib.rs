//! promptline - a one-shot terminal prompt client for LLMs

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod ui;

pub use error::{AppError, Result};
