//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate query parsing and repository calls into use-case APIs.
//! - Keep CLI/UI layers decoupled from storage details.

pub mod album_service;
