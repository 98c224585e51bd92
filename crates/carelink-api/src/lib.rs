//! # carelink-api
//!
//! HTTP API layer for CareLink, built on Axum. Contains the shared
//! application state, route definitions, error-to-response mapping,
//! extractors, request/response DTOs, and handlers.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;
