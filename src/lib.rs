//! Bookmark Hub: a personal bookmark manager served as a JSON API.
//!
//! This library crate exposes all modules for use by the binary and integration tests.

pub mod api;
pub mod app;
pub mod config;
pub mod database;
pub mod logger;
pub mod managers;
pub mod services;
pub mod types;
