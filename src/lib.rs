//! Labor-day calendar engine
//!
//! This crate records daily labor in labor-day units (공수), prices each day
//! with a proportional rule plus an overtime premium beyond one labor-day,
//! aggregates monthly and lifetime statistics, and reapplies a new daily rate
//! to existing entries. It persists the calendar to a local JSON snapshot and
//! can mirror it to a remote REST store.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;
pub mod sync;
