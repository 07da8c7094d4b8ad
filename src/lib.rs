//! Optimization front-end library
//!
//! This library provides:
//! - Launcher configuration (config.toml + defaults)
//! - The optimizer command line and its runner
//! - Toolkit-free window state
//! - The GTK4/Libadwaita window

pub mod command;
pub mod config;
pub mod error;
pub mod runner;
pub mod state;
pub mod ui;
