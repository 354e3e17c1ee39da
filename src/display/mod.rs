// src/display/mod.rs
//! Display modules

pub mod terminal;

pub use terminal::TerminalDisplay;
