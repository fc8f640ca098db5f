//! Workflows Adapter Modules

pub mod models;
