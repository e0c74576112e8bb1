//! Console UI for the hospital admin console
//!
//! `view` holds the rendered state, `actions` mutates it through the
//! API client, and `console` drives the interactive menu loop.

pub mod actions;
pub mod console;
pub mod view;

pub use console::Console;
