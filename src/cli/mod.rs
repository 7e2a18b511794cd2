//! CLI infrastructure for the smartcab toolkit

pub mod commands;
pub mod output;
