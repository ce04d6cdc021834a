//! Credit invoice lifecycle logic.
//!
//! Tracks invoice status (OPEN/PARTIAL/PAID) as payments are applied.
//! Status is always derived from amount paid vs total, never stored
//! independently of those two figures.

pub mod error;
pub mod types;

pub use error::InvoiceError;
pub use types::{apply_payment, InvoiceStatus, PaymentApplication, PaymentMethod};
