//! Terminal front end for the rental desk

pub mod cli;
pub mod commands;
pub mod menu;
pub mod output;
pub mod prompt;
