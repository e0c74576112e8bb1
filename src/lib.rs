//! Hospital admin console core library
//!
//! A terminal console for administering a hospital resource API:
//! it lists nurses, loads a selected nurse's patients and their
//! medications, and performs create/edit/delete operations through
//! the API's REST interface. All authoritative state lives on the
//! server; the console re-fetches after every mutation.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod ui;
