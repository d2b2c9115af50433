//! Request handlers

pub mod health;
pub mod sheet;
pub mod highlevel;
pub mod calculate;
