//! Dioxus component library for the Casebook app. Each component carries
//! its own stylesheet and reads colours from the theme variables defined by
//! the app's `theme-base.css`.

pub mod components;
pub mod theme;

pub use components::*;
