//! Application service layer - rental desk, config, seed data, queries

pub mod app;
pub mod config;
pub mod seed;
