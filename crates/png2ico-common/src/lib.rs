//! Common utilities for png2ico.
//!
//! This crate provides shared infrastructure used by the format crate and the CLI:
//! - **Binary layout** - PNG/ICO constants and fixed-endian byte helpers
//! - **Warning System** - colored terminal output for lossy conversions

pub mod layout;
pub mod warning;
