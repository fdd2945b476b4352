//! Invoice module containing draft assembly, numbering, totals, and the
//! invoicing workflow

pub mod core;
pub mod draft;
pub mod numbering;
pub mod totals;

pub use self::core::*;
pub use draft::*;
pub use numbering::*;
pub use totals::*;
