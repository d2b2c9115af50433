//! Core Kernel - Foundational types shared by the invoice calculator crates
//!
//! This crate provides the building blocks used across the workspace:
//! - Money types with precise decimal arithmetic and dollar formatting
//! - The port error type and marker trait for external collaborators

pub mod money;
pub mod ports;

pub use money::{Money, MoneyError, Rate, CENT_PLACES};
pub use ports::{DomainPort, ExternalAuthConfig, ExternalSystemConfig, PortError};
