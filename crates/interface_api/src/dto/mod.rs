//! Request and response bodies

pub mod sheet;
pub mod highlevel;
pub mod calculate;
