//! Sequential invoice number generation
//!
//! Invoice numbers are `{prefix}-{sequence}` with the sequence zero-padded
//! to three digits ("INV-001", "INV-042"). Sequences past 999 simply grow
//! wider. Each business carries its own counter; the storage port hands
//! out the next value atomically so two invoices can never share a number,
//! though a failed insert after a reservation leaves a gap.

use serde::{Deserialize, Serialize};

/// Format an invoice number from its prefix and sequence value.
pub fn format_invoice_number(prefix: &str, sequence: u64) -> String {
    format!("{}-{:03}", prefix, sequence)
}

/// A counter value handed out by the storage port for one new invoice.
///
/// The reservation is consumed whether or not the invoice insert that
/// follows succeeds; numbering tolerates gaps but never duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberReservation {
    /// Invoice prefix of the business at reservation time
    pub prefix: String,
    /// The sequence value reserved for this invoice
    pub sequence: u64,
}

impl NumberReservation {
    /// The formatted invoice number for this reservation.
    pub fn invoice_number(&self) -> String {
        format_invoice_number(&self.prefix, self.sequence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pads_to_three_digits() {
        assert_eq!(format_invoice_number("INV", 1), "INV-001");
        assert_eq!(format_invoice_number("INV", 7), "INV-007");
        assert_eq!(format_invoice_number("INV", 42), "INV-042");
        assert_eq!(format_invoice_number("INV", 999), "INV-999");
    }

    #[test]
    fn test_grows_past_three_digits() {
        assert_eq!(format_invoice_number("INV", 1000), "INV-1000");
        assert_eq!(format_invoice_number("INV", 12345), "INV-12345");
    }

    #[test]
    fn test_custom_prefix() {
        assert_eq!(format_invoice_number("ACME", 3), "ACME-003");
        assert_eq!(format_invoice_number("2024INV", 15), "2024INV-015");
    }

    #[test]
    fn test_reservation_number() {
        let reservation = NumberReservation {
            prefix: "INV".to_string(),
            sequence: 7,
        };
        assert_eq!(reservation.invoice_number(), "INV-007");
    }
}
