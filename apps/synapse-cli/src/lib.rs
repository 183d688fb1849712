//! Pieces of the terminal front end that do not need a live backend.

pub mod commands;
pub mod health;
pub mod render;
