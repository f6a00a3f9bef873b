// ABOUTME: Library root for handsoff — host agent hooks that track workflow state per session.
// ABOUTME: The binary entry point is in main.rs, which uses this crate as a library.

pub mod app;
pub mod audit;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod hook;
pub mod session;
