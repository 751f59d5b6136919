//! Persistence gateway for candidate records.

pub mod handlers;
pub mod repository;
