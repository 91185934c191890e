//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store, cache and classifier calls into use-case APIs.
//! - Keep the excluded collaborators (routing, templating, sessions)
//!   decoupled from storage details.

pub mod glossary_service;
