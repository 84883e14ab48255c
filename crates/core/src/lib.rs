//! Domain logic for the rental reservation engine.
//!
//! This crate has zero internal dependencies so it can be used by the DB
//! and API layers as well as any future worker or CLI tooling. Everything
//! here is pure: status enums and their transition tables, loan-status
//! derivation, the fine schedule, and money parsing.

pub mod booking;
pub mod cart;
pub mod error;
pub mod feedback;
pub mod loan;
pub mod money;
pub mod payment;
pub mod returns;
pub mod roles;
pub mod types;
