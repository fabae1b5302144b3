//! Labyrinth — world navigation engine.
//!
//! Responsible for the procedural world: spanning-tree maze generation,
//! mapping each maze cell's open neighbours to a rotated room archetype,
//! grid movement with collision inside a room, and room-to-room travel.

pub mod domain;
