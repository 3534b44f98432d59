//! Flutter bridge for the PARA organizer core.

pub mod api;
