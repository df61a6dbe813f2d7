//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Math types and point-set operations
//! - Axis-aligned bounds
//! - Handle-based collections
//! - Logging utilities

pub mod math;
pub mod bounds;
pub mod collections;
pub mod logging;
