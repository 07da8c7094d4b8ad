//! UI Module - GTK4 + Libadwaita Interface

pub mod app;
pub mod panels;
pub mod window;
