//! Core types and data structures for the invoicing system

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::invoice::totals::InvoiceTotals;
use crate::tax::gst::{GstRate, LineItemResult};
use crate::tax::place_of_supply::StateCode;

/// Lifecycle status of an invoice.
///
/// Stored statuses only; "overdue" is never persisted. It is derived from
/// the status and due date via [`Invoice::is_overdue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// Created but not yet issued to the customer
    Draft,
    /// Issued and awaiting payment
    Sent,
    /// Partially paid
    Partial,
    /// Fully paid
    Paid,
    /// Cancelled; excluded from tax and sales summaries
    Cancelled,
}

impl InvoiceStatus {
    /// Returns the stored string form of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Sent => "sent",
            InvoiceStatus::Partial => "partial",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Cancelled => "cancelled",
        }
    }

    /// Whether the lifecycle permits moving from this status to `next`.
    ///
    /// Draft invoices can be sent or cancelled; sent and partially paid
    /// invoices can collect payments or be cancelled. Paid and cancelled
    /// are terminal.
    pub fn can_transition_to(&self, next: InvoiceStatus) -> bool {
        matches!(
            (self, next),
            (InvoiceStatus::Draft, InvoiceStatus::Sent)
                | (InvoiceStatus::Draft, InvoiceStatus::Cancelled)
                | (InvoiceStatus::Sent, InvoiceStatus::Partial)
                | (InvoiceStatus::Sent, InvoiceStatus::Paid)
                | (InvoiceStatus::Sent, InvoiceStatus::Cancelled)
                | (InvoiceStatus::Partial, InvoiceStatus::Paid)
                | (InvoiceStatus::Partial, InvoiceStatus::Cancelled)
        )
    }

    /// Paid and cancelled invoices accept no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, InvoiceStatus::Paid | InvoiceStatus::Cancelled)
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of invoice document being issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceType {
    /// Regular GST tax invoice
    TaxInvoice,
    /// Bill of supply (no tax charged, e.g. composition scheme)
    BillOfSupply,
    /// Credit note against an earlier invoice
    CreditNote,
    /// Debit note against an earlier invoice
    DebitNote,
}

impl InvoiceType {
    /// Returns the stored string form of this invoice type.
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceType::TaxInvoice => "tax_invoice",
            InvoiceType::BillOfSupply => "bill_of_supply",
            InvoiceType::CreditNote => "credit_note",
            InvoiceType::DebitNote => "debit_note",
        }
    }
}

impl std::fmt::Display for InvoiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Business profile of the invoicing party.
///
/// Owns the invoice numbering state: `invoice_prefix` plus the
/// monotonically increasing `invoice_counter`. The counter is only ever
/// advanced through the storage port's atomic reservation; see
/// [`crate::traits::InvoiceStorage::reserve_invoice_number`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessProfile {
    /// Unique identifier for the business
    pub id: Uuid,
    /// Registered business name
    pub name: String,
    /// GST registration number, if registered
    pub gstin: Option<String>,
    /// Permanent Account Number
    pub pan: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    /// Home state of the business; the origin side of place-of-supply
    pub state: Option<StateCode>,
    pub pincode: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub bank_name: Option<String>,
    pub bank_account_number: Option<String>,
    pub bank_ifsc: Option<String>,
    /// Prefix for generated invoice numbers (e.g. "INV")
    pub invoice_prefix: String,
    /// Next sequence value to assign; starts at 1
    pub invoice_counter: u64,
    /// When the profile was created
    pub created_at: NaiveDateTime,
    /// When the profile was last updated
    pub updated_at: NaiveDateTime,
}

impl BusinessProfile {
    /// Create a new business profile with default numbering ("INV", counter 1).
    pub fn new(name: String, state: Option<StateCode>) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: Uuid::new_v4(),
            name,
            gstin: None,
            pan: None,
            address_line1: None,
            address_line2: None,
            city: None,
            state,
            pincode: None,
            phone: None,
            email: None,
            bank_name: None,
            bank_account_number: None,
            bank_ifsc: None,
            invoice_prefix: "INV".to_string(),
            invoice_counter: 1,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A customer the business issues invoices to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Unique identifier for the customer
    pub id: Uuid,
    /// Business this customer belongs to
    pub business_id: Uuid,
    /// Customer name
    pub name: String,
    /// Customer's GST registration number, if registered
    pub gstin: Option<String>,
    pub pan: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    /// State of the customer; the destination side of place-of-supply
    pub state: Option<StateCode>,
    pub pincode: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// Inactive customers are hidden from selection but keep their history
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Customer {
    /// Create a new active customer.
    pub fn new(business_id: Uuid, name: String, state: Option<StateCode>) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: Uuid::new_v4(),
            business_id,
            name,
            gstin: None,
            pan: None,
            address_line1: None,
            address_line2: None,
            city: None,
            state,
            pincode: None,
            phone: None,
            email: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Catalog product or service used to prefill invoice line items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier for the product
    pub id: Uuid,
    /// Business this product belongs to
    pub business_id: Uuid,
    /// Product name; copied into the line description on selection
    pub name: String,
    /// Longer description, not copied onto invoices
    pub description: Option<String>,
    /// HSN (goods) or SAC (services) classification code
    pub hsn_sac_code: Option<String>,
    /// Unit of measure (e.g. "NOS", "KGS", "HRS")
    pub unit: String,
    /// Default unit price before tax
    pub unit_price: BigDecimal,
    /// Default GST rate for this product
    pub gst_rate: GstRate,
    /// Services carry SAC codes; goods carry HSN codes
    pub is_service: bool,
    /// Inactive products are hidden from selection
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Product {
    /// Create a new active product.
    pub fn new(
        business_id: Uuid,
        name: String,
        unit: String,
        unit_price: BigDecimal,
        gst_rate: GstRate,
    ) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: Uuid::new_v4(),
            business_id,
            name,
            description: None,
            hsn_sac_code: None,
            unit,
            unit_price,
            gst_rate,
            is_service: false,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Persisted invoice record: header fields plus computed totals.
///
/// Totals are fixed at creation time. Status changes and payments never
/// recompute them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique identifier for the invoice
    pub id: Uuid,
    /// Business that issued the invoice
    pub business_id: Uuid,
    /// Customer the invoice is billed to
    pub customer_id: Uuid,
    /// Sequential human-readable number (e.g. "INV-007")
    pub invoice_number: String,
    /// Kind of document
    pub invoice_type: InvoiceType,
    /// Date of issue
    pub invoice_date: NaiveDate,
    /// Payment due date, if any
    pub due_date: Option<NaiveDate>,
    /// Customer state captured at the time of issue
    pub place_of_supply: Option<StateCode>,
    /// Whether IGST applied (inter-state) rather than CGST + SGST
    pub is_inter_state: bool,
    /// Aggregated amounts over the invoice's line items
    #[serde(flatten)]
    pub totals: InvoiceTotals,
    /// Sum of payments recorded so far
    pub amount_paid: BigDecimal,
    /// Current lifecycle status
    pub status: InvoiceStatus,
    /// Free-form note to the customer
    pub notes: Option<String>,
    /// Payment terms and conditions text
    pub terms: Option<String>,
    /// User who created the invoice
    pub created_by: Option<Uuid>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Invoice {
    /// Amount still owed: grand total minus payments received.
    pub fn outstanding_amount(&self) -> BigDecimal {
        &self.totals.total_amount - &self.amount_paid
    }

    /// Whether the invoice is overdue as of the given date.
    ///
    /// Only sent or partially paid invoices with a due date in the past
    /// count as overdue; draft, paid, and cancelled invoices never do.
    pub fn is_overdue(&self, as_of: NaiveDate) -> bool {
        matches!(self.status, InvoiceStatus::Sent | InvoiceStatus::Partial)
            && self.due_date.is_some_and(|due| due < as_of)
    }

    /// Apply a received payment to the invoice.
    ///
    /// The invoice must be sent or partially paid, and the amount must be
    /// positive and at most the outstanding balance. On success
    /// `amount_paid` grows and the status moves to paid exactly when the
    /// balance hits zero; totals are untouched. On error nothing changes.
    pub fn apply_payment(&mut self, amount: &BigDecimal) -> InvoiceResult<()> {
        if !matches!(self.status, InvoiceStatus::Sent | InvoiceStatus::Partial) {
            return Err(InvoiceError::Validation(format!(
                "Invoice in status {} cannot accept payments",
                self.status
            )));
        }

        if *amount <= BigDecimal::from(0) {
            return Err(InvoiceError::Validation(
                "Payment amount must be positive".to_string(),
            ));
        }

        if *amount > self.outstanding_amount() {
            return Err(InvoiceError::Validation(
                "Payment exceeds outstanding amount".to_string(),
            ));
        }

        self.amount_paid = &self.amount_paid + amount;
        self.status = if self.outstanding_amount() == BigDecimal::from(0) {
            InvoiceStatus::Paid
        } else {
            InvoiceStatus::Partial
        };
        self.updated_at = chrono::Utc::now().naive_utc();
        Ok(())
    }
}

/// Persisted invoice line item with its computed tax breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItem {
    /// Unique identifier for the line item
    pub id: Uuid,
    /// Invoice this line belongs to
    pub invoice_id: Uuid,
    /// Catalog product the line was prefilled from, if any
    pub product_id: Option<Uuid>,
    /// Line description shown on the invoice
    pub description: String,
    /// HSN/SAC classification code
    pub hsn_sac_code: Option<String>,
    /// Quantity billed
    pub quantity: BigDecimal,
    /// Unit of measure
    pub unit: String,
    /// Price per unit before discount and tax
    pub unit_price: BigDecimal,
    /// Discount applied to the line, in percent
    pub discount_percent: BigDecimal,
    /// GST rate applied
    pub gst_rate: GstRate,
    /// Amount after discount, before tax
    pub taxable_amount: BigDecimal,
    /// Central GST portion (intra-state only)
    pub cgst_amount: BigDecimal,
    /// State GST portion (intra-state only)
    pub sgst_amount: BigDecimal,
    /// Integrated GST (inter-state only)
    pub igst_amount: BigDecimal,
    /// Taxable amount plus all tax heads
    pub total_amount: BigDecimal,
    pub created_at: NaiveDateTime,
}

impl InvoiceItem {
    /// Build the persisted row for a computed line item.
    pub fn from_line(invoice_id: Uuid, line: &LineItemResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            invoice_id,
            product_id: line.item.product_id,
            description: line.item.description.clone(),
            hsn_sac_code: line.item.hsn_sac_code.clone(),
            quantity: line.item.quantity.clone(),
            unit: line.item.unit.clone(),
            unit_price: line.item.unit_price.clone(),
            discount_percent: line.item.discount_percent.clone(),
            gst_rate: line.item.gst_rate,
            taxable_amount: line.taxable_amount.clone(),
            cgst_amount: line.cgst_amount.clone(),
            sgst_amount: line.sgst_amount.clone(),
            igst_amount: line.igst_amount.clone(),
            total_amount: line.total_amount.clone(),
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

/// Payment recorded against an invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier for the payment
    pub id: Uuid,
    /// Invoice the payment settles, fully or partially
    pub invoice_id: Uuid,
    /// Amount received
    pub amount: BigDecimal,
    /// Date the payment was received
    pub payment_date: NaiveDate,
    /// How the payment was made (e.g. "UPI", "bank transfer")
    pub payment_method: Option<String>,
    /// External reference such as a transaction id
    pub reference_number: Option<String>,
    pub notes: Option<String>,
    /// User who recorded the payment
    pub created_by: Option<Uuid>,
    pub created_at: NaiveDateTime,
}

impl Payment {
    /// Create a new payment record.
    pub fn new(invoice_id: Uuid, amount: BigDecimal, payment_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            invoice_id,
            amount,
            payment_date,
            payment_method: None,
            reference_number: None,
            notes: None,
            created_by: None,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

/// Errors that can occur in the invoicing system.
#[derive(Debug, thiserror::Error)]
pub enum InvoiceError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Business profile not found: {0}")]
    BusinessProfileNotFound(Uuid),
    #[error("Customer not found: {0}")]
    CustomerNotFound(Uuid),
    #[error("Product not found: {0}")]
    ProductNotFound(Uuid),
    #[error("Invoice not found: {0}")]
    InvoiceNotFound(Uuid),
    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition {
        from: InvoiceStatus,
        to: InvoiceStatus,
    },
    #[error("Unknown state code: {0}")]
    UnknownStateCode(String),
    #[error("Unsupported GST rate: {0}")]
    UnsupportedGstRate(String),
}

/// Result type for invoicing operations.
pub type InvoiceResult<T> = Result<T, InvoiceError>;
