//! Core raindrop drainage simulation library.
//!
//! Models drainage over a discrete elevation surface by stepping many
//! independent raindrop agents downslope until they gather at the
//! landscape's points of minimum elevation (the outlets) or a step
//! budget runs out.
//!
//! Main components:
//! - [`grid`] — the immutable elevation surface and its CSV loader.
//! - [`drop`] — a single raindrop agent and its downslope step rule.
//! - [`visit_log`] — the shared, append-only record of successful moves.
//! - [`simulation`] — the tick driver and its terminal states.
//! - [`drainage`] — outlet volume and drainage-network aggregation.
//! - [`config`] — run parameters and their validation.
//! - [`error`] — error types shared across the crate.
//! - [`types`] — shared type aliases.

pub mod config;
pub mod drainage;
pub mod drop;
pub mod error;
pub mod grid;
pub mod simulation;
pub mod types;
pub mod visit_log;
