//! # Data Transfer Objects

pub mod access_change;
pub mod execution_options;
