//! Sequential flash persistence
//!
//! This module owns the reserved erase region and the byte write cursor
//! that maps the incoming packet stream onto flash. Payloads are stored
//! back-to-back with no delimiters; packet boundaries exist only in the
//! receiver and are not recoverable from flash.

pub mod store;

pub use store::{FlashStore, StoreError};
