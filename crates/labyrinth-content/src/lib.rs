//! Labyrinth — resource tables.
//!
//! Responsible for the read-only data the game is built from: room
//! template variants per archetype, the glyph table, and quiz records.
//! Everything is loaded and validated once at startup and then shared
//! behind an `Arc`.

pub mod application;
pub mod domain;
