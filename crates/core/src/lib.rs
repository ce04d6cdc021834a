//! Core business logic for the Mizan ledger.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `journal` - Double-entry bookkeeping invariants and split validation
//! - `reconciliation` - Bank statement matching and the line state machine
//! - `recurring` - Recurring entry templates and schedule advancement
//! - `invoice` - Credit invoice lifecycle and payment application

pub mod invoice;
pub mod journal;
pub mod reconciliation;
pub mod recurring;
