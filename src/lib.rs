pub mod api;
pub mod board;
pub mod config;
pub mod error;
pub mod loader;
pub mod signals;
// cmd and reports belong to the binary (main.rs); they render what api produces.
