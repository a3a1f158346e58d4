//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop. Pairs the shell lifecycle with the native webview backend.

mod core;
mod event_handler;
pub(crate) mod init;
mod polling;
mod shutdown;

pub use core::SightlineApp;
