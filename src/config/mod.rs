//! JSON configuration for the command-line tool.

pub mod grid;
