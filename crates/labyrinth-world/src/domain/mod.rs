//! Domain types for the world engine.

pub mod direction;
pub mod entity;
pub mod maze;
pub mod room;
pub mod tile;
pub mod topology;
pub mod world;
