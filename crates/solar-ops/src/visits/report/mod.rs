//! Rendering for downstream consumers: summary views plus sheet-row and
//! email-body formatting. PDF layout and all delivery transports live outside
//! this crate.

pub mod email;
pub mod sheet;
mod summary;
pub mod views;
