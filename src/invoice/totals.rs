//! Invoice-level aggregation of computed line items

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::tax::gst::LineItemResult;
use crate::types::{Invoice, InvoiceStatus};

/// Header totals aggregated over an invoice's line items.
///
/// Each field is the plain sum of the corresponding already-rounded line
/// amounts; nothing here is rounded again, so the header always matches
/// the lines exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    /// Sum of taxable amounts (after line discounts, before tax)
    pub subtotal: BigDecimal,
    /// Sum of CGST across lines
    pub cgst_amount: BigDecimal,
    /// Sum of SGST across lines
    pub sgst_amount: BigDecimal,
    /// Sum of IGST across lines
    pub igst_amount: BigDecimal,
    /// Sum of all tax heads
    pub total_tax: BigDecimal,
    /// Grand total: subtotal plus tax
    pub total_amount: BigDecimal,
}

impl InvoiceTotals {
    /// All-zero totals, the state of an invoice with no lines.
    pub fn zero() -> Self {
        Self::from_line_items(&[])
    }

    /// Fold computed line items into header totals.
    pub fn from_line_items(lines: &[LineItemResult]) -> Self {
        let subtotal: BigDecimal = lines.iter().map(|line| &line.taxable_amount).sum();
        let cgst_amount: BigDecimal = lines.iter().map(|line| &line.cgst_amount).sum();
        let sgst_amount: BigDecimal = lines.iter().map(|line| &line.sgst_amount).sum();
        let igst_amount: BigDecimal = lines.iter().map(|line| &line.igst_amount).sum();

        let total_tax = &cgst_amount + &sgst_amount + &igst_amount;
        let total_amount = &subtotal + &total_tax;

        Self {
            subtotal,
            cgst_amount,
            sgst_amount,
            igst_amount,
            total_tax,
            total_amount,
        }
    }
}

impl Default for InvoiceTotals {
    fn default() -> Self {
        Self::zero()
    }
}

/// Tax collection summary across a period's invoices.
///
/// Cancelled invoices are left out; everything else counts regardless of
/// payment state, since GST liability arises on issue, not on receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GstSummary {
    /// Number of invoices included
    pub invoice_count: usize,
    /// Total taxable value across invoices
    pub taxable_amount: BigDecimal,
    /// Total CGST collected
    pub cgst_amount: BigDecimal,
    /// Total SGST collected
    pub sgst_amount: BigDecimal,
    /// Total IGST collected
    pub igst_amount: BigDecimal,
    /// Total tax across all heads
    pub total_tax: BigDecimal,
    /// Total invoice value including tax
    pub total_amount: BigDecimal,
}

impl GstSummary {
    /// Summarise tax collected over the given invoices.
    pub fn from_invoices(invoices: &[Invoice]) -> Self {
        let included: Vec<&Invoice> = invoices
            .iter()
            .filter(|invoice| invoice.status != InvoiceStatus::Cancelled)
            .collect();

        let taxable_amount: BigDecimal =
            included.iter().map(|inv| &inv.totals.subtotal).sum();
        let cgst_amount: BigDecimal =
            included.iter().map(|inv| &inv.totals.cgst_amount).sum();
        let sgst_amount: BigDecimal =
            included.iter().map(|inv| &inv.totals.sgst_amount).sum();
        let igst_amount: BigDecimal =
            included.iter().map(|inv| &inv.totals.igst_amount).sum();
        let total_tax: BigDecimal = included.iter().map(|inv| &inv.totals.total_tax).sum();
        let total_amount: BigDecimal =
            included.iter().map(|inv| &inv.totals.total_amount).sum();

        Self {
            invoice_count: included.len(),
            taxable_amount,
            cgst_amount,
            sgst_amount,
            igst_amount,
            total_tax,
            total_amount,
        }
    }
}
