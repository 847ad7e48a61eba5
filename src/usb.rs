//! USB Subsystem
//!
//! Provides USB functionality for the route switch:
//! - CDC ACM for the route command channel

pub mod cdc;
