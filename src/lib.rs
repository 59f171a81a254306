//! shortalias - a URL shortener built around a concurrency-safe alias registry
//!
//! # Architecture
//! - `registry`: alias policy and the alias → URL registry
//! - `storage`: store trait with in-memory and JSON-file backends
//! - `api`: HTTP handlers and error mapping
//! - `config`: configuration loading and validation
//! - `runtime`: startup wiring, HTTP server and shutdown
//! - `system`: logging initialisation

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod registry;
pub mod runtime;
pub mod storage;
pub mod system;
pub mod utils;
