//! Treeline - a streaming JSON viewer for the terminal
//!
//! This library exposes modules for use in integration tests.

pub mod app;
pub mod cli;
pub mod error;
pub mod flatten;
pub mod models;
pub mod pager;
pub mod prelude;
pub mod render;
pub mod session;
pub mod stream;
pub mod terminal;
pub mod tokenizer;
pub mod ui;
