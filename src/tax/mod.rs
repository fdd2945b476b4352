//! Tax module containing GST line calculations and place-of-supply rules

pub mod gst;
pub mod place_of_supply;

pub use gst::*;
pub use place_of_supply::*;
