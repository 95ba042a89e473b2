//! CIQUAL Explorer Library
//!
//! Serves product names and per-ingredient environmental impacts from three
//! static JSON datasets loaded at startup.
//!
//! # Modules
//!
//! - `data`: Dataset records and the startup loader
//! - `lookup`: Metadata resolution over the loaded datasets
//! - `routes`: HTTP handlers and router

pub mod config;
pub mod data;
pub mod error;
pub mod lookup;
pub mod routes;
pub mod state;
