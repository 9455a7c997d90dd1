//! Helpers shared by the modules of the core.
pub mod date_time;
pub mod string_utils;
