#![warn(missing_docs)]
//! # elevatorsim
//!
//! Simulates a bank of elevators in a building: a dispatcher decides which unit answers
//! each hall call, and every unit runs its own directional scan from floor to floor.
//!
//! ## Overview
//! - **config**: Static parameters, print toggles, building size and timing.
//! - **error**: Errors rejected at the boundary.
//! - **init**: Command line and stdin startup.
//! - **print**: Colour-coded logging, event reporting and the status table.
//! - **world_view**: Shared types: directions, buttons, unit state, events.
//! - **elevator_logic**: The elevator unit and its stop/direction rules.
//! - **manager**: The dispatcher, its tracked view and cost heuristic.
//! - **building**: Ties dispatcher and units together; the inbound event surface.
//! - **workload**: Random cabin and hall button generators.

/// Global parameters
pub mod config;

/// Boundary errors
pub mod error;

/// Initialize functions
pub mod init;

/// Print functions with color coding
pub mod print;

/// Shared data model
pub mod world_view;

/// Elevator unit and motion logic
pub mod elevator_logic;

/// Hall call dispatch
pub mod manager;

/// The building
pub mod building;

/// Random call generators
pub mod workload;
