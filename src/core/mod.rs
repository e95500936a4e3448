//! Configuration, shared data model and the outbound reply seam.

pub mod config;
pub mod models;
pub mod reply;
