//! Session tracking.
//!
//! The boundary where sessions are created and edited. The aggregation engine
//! trusts its input; this module is where that input is checked.

mod ledger;
mod validation;

pub use ledger::{SessionLedger, SessionUpdate};
pub use validation::{
    edit_window_start, ensure_within_edit_window, validate_commitment_hours,
    validate_manual_entry,
};
