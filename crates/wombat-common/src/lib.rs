//! Common utilities for the Wombat HTML engine.
//!
//! This crate provides shared infrastructure used by the other components:
//! - **Warning System** - colored terminal output for recovered parse oddities

pub mod warning;
