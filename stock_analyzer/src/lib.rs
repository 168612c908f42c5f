//! Core analysis pipeline for single-ticker stock dashboards.
//!
//! The crate ties together a market data provider and a set of news sources:
//! [`ticker`] validates user-entered symbols, [`indicators`] computes the
//! technical series, [`config`] loads connection settings, and
//! [`orchestrator`] runs the whole fetch-and-enrich flow.

pub mod config;
pub mod indicators;
pub mod orchestrator;
pub mod ticker;
