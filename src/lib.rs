// Session engine and exercise catalog. The `wordform` binary in main.rs is a
// line-oriented terminal host built on top of this crate.

pub mod app;
pub mod config;
pub mod engine;
pub mod exercise;
pub mod session;
pub mod store;
