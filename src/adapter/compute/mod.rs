//! Compute Engine Adapter Modules

pub mod models;
