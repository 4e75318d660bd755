//! # lrg-core
//!
//! Core types and error types for the LiteRide governance bootstrap.
//!
//! This crate provides the foundational types shared across all `lrg-*` crates:
//! - Logical contract kinds and timelock roles
//! - The bootstrap phase state machine
//! - Deployed contract handles
//! - Journal record envelope for JSONL persistence
//! - CLI response types
//! - Cross-cutting error types

pub mod contracts;
pub mod enums;
pub mod errors;
pub mod journal;
pub mod responses;
