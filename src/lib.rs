//! # Invoicing Core
//!
//! A GST invoicing library providing line item tax calculation, invoice
//! aggregation, and sequential invoice numbering for Indian businesses.
//!
//! ## Features
//!
//! - **GST line calculations**: Quantity, price, and discount to a
//!   CGST/SGST or IGST breakdown per line
//! - **Place of supply**: Supply type classification from the business and
//!   customer states, with all 36 state/UT codes
//! - **Invoice assembly**: Drafts that recompute eagerly as lines and the
//!   customer change, folded into consistent header totals
//! - **Sequential numbering**: Per-business prefixed counters reserved
//!   atomically at the storage boundary
//! - **Lifecycle and payments**: Status transitions, payment recording,
//!   and overdue detection
//! - **Storage abstraction**: Database-agnostic design with trait-based storage
//!
//! ## Quick Start
//!
//! ```rust
//! use invoicing_core::{InvoiceDraft, LineItemResult, SupplyType};
//!
//! // This example shows basic usage - you need to implement InvoiceStorage
//! // trait for a real backend, or use MemoryStorage for testing.
//! // let storage = MemoryStorage::new();
//! // let manager = InvoiceManager::new(storage);
//! ```

pub mod invoice;
pub mod tax;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use invoice::*;
pub use tax::*;
pub use traits::*;
pub use types::*;
