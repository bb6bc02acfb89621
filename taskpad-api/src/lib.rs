//! # Taskpad API Server Library
//!
//! Core functionality for the Taskpad API server.
//!
//! ## Modules
//!
//! - `app`: Application state, router builder, and bearer middleware
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `response`: Response envelope types shared by the handlers
//! - `routes`: API route handlers
//! - `validation`: Deterministic first-error derivation

pub mod app;
pub mod config;
pub mod error;
pub mod response;
pub mod routes;
pub mod validation;
