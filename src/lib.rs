//! Fantasia - Event Ticketing Backend
//!
//! This crate implements ticket issuance and single-use gate validation
//! for the Fantasia event platform.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
