//! Centralized constants for the lms project.
//!
//! All project-wide constant values live here.
//! Change a value in one place and it applies everywhere.

pub mod circulation;
pub mod network;
pub mod paths;
pub mod session;
