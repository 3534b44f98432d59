//! Core use-case services.
//!
//! # Responsibility
//! - Validate user input (titles, tag lists) above the repository layer.
//! - Provide the area-panel and note-editor workflows consumed by the
//!   presentation layer.
//!
//! # Invariants
//! - Services never bypass repository load/save contracts.
//! - Services remain storage-agnostic.

pub mod area_service;
pub mod note_service;
