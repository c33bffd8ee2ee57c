//! Shared test infrastructure: the cucumber world that drives a real
//! `AppController` through mock I/O.

pub mod world;

pub use world::TermfolioWorld;
