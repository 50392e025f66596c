//! Domain library for the solar field-operations service.
//!
//! `calculators` holds the pure energy/financial calculation engine used to
//! turn customer-supplied figures into sizing and return projections. `visits`
//! holds the visit-report workflow that technicians drive from the field:
//! intake, assessment via the engine, and rendering for downstream PDF, email,
//! and spreadsheet consumers.

pub mod calculators;
pub mod config;
pub mod error;
pub mod telemetry;
pub mod visits;
