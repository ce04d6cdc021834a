//! Recurring entry template logic.
//!
//! A recurring entry is a journal-entry template that fires on a schedule:
//! when due, its split templates are copied 1:1 into a real journal entry
//! and the next run date advances by one period of its frequency.

pub mod error;
pub mod schedule;
pub mod types;

pub use error::RecurringError;
pub use schedule::{advance_next_run, is_due};
pub use types::{Frequency, RecurringStatus, RecurringTemplate};
