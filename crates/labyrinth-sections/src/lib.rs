//! Labyrinth — game phases.
//!
//! A session is a two-level state machine. The outer level,
//! [`manager::SectionStateMachine`], picks the active phase from typed
//! [`command::Command`]s. The inner level, [`section::run_section`], drives
//! one phase tick by tick through the [`section::GameSection`] hooks until
//! the phase finishes.

pub mod command;
pub mod config;
pub mod manager;
pub mod render;
pub mod section;
pub mod sections;
