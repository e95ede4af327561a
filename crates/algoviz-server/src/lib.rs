//! HTTP/JSON API over the algoviz trace engines.
//!
//! Clients pick an algorithm, post its input and get back the full step
//! trace for replay. This crate contains the server configuration, API schema
//! types, error handling, and route definitions.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod schema;
pub mod service;
pub mod state;
