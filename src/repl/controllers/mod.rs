//! # Controllers
//!
//! The event loop that ties input, dispatch and rendering together.

pub mod app_controller;

pub use app_controller::AppController;
