//! API module for the hospital admin console
//!
//! This module contains the REST client for the hospital service.

pub mod client;

pub use client::HospitalClient;
