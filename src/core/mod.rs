//! Core infrastructure
//!
//! This module contains infrastructure shared across the datalogger core,
//! currently the logging abstraction.

pub mod logging;
