//! Traits for storage abstraction and extensibility

use async_trait::async_trait;
use uuid::Uuid;

use crate::invoice::draft::InvoiceDraft;
use crate::invoice::numbering::NumberReservation;
use crate::types::*;

/// Storage abstraction for the invoicing system
///
/// This trait allows the invoicing core to work with any storage backend
/// (PostgreSQL, MySQL, SQLite, in-memory, etc.) by implementing these methods.
/// Methods take `&self`; implementations are expected to manage their own
/// interior locking so one storage handle can be shared across tasks.
#[async_trait]
pub trait InvoiceStorage: Send + Sync {
    /// Save or replace a business profile
    async fn save_business_profile(&self, profile: &BusinessProfile) -> InvoiceResult<()>;

    /// Get a business profile by ID
    async fn get_business_profile(&self, business_id: Uuid)
        -> InvoiceResult<Option<BusinessProfile>>;

    /// Save or replace a customer
    async fn save_customer(&self, customer: &Customer) -> InvoiceResult<()>;

    /// Get a customer by ID
    async fn get_customer(&self, customer_id: Uuid) -> InvoiceResult<Option<Customer>>;

    /// List all customers of a business
    async fn list_customers(&self, business_id: Uuid) -> InvoiceResult<Vec<Customer>>;

    /// Save or replace a product
    async fn save_product(&self, product: &Product) -> InvoiceResult<()>;

    /// Get a product by ID
    async fn get_product(&self, product_id: Uuid) -> InvoiceResult<Option<Product>>;

    /// List all products of a business
    async fn list_products(&self, business_id: Uuid) -> InvoiceResult<Vec<Product>>;

    /// Atomically reserve the next invoice number for a business.
    ///
    /// Returns the business's current counter value together with its
    /// prefix and advances the counter by one in the same step. Two
    /// concurrent reservations must never see the same value. A
    /// reservation is consumed even if the invoice insert that follows
    /// fails; the sequence may have gaps but never duplicates.
    async fn reserve_invoice_number(&self, business_id: Uuid) -> InvoiceResult<NumberReservation>;

    /// Save a new invoice together with its line items
    async fn save_invoice(&self, invoice: &Invoice, items: &[InvoiceItem]) -> InvoiceResult<()>;

    /// Get an invoice by ID
    async fn get_invoice(&self, invoice_id: Uuid) -> InvoiceResult<Option<Invoice>>;

    /// Get the line items of an invoice
    async fn get_invoice_items(&self, invoice_id: Uuid) -> InvoiceResult<Vec<InvoiceItem>>;

    /// List invoices of a business, optionally filtered by status
    async fn list_invoices(
        &self,
        business_id: Uuid,
        status: Option<InvoiceStatus>,
    ) -> InvoiceResult<Vec<Invoice>>;

    /// Update an existing invoice header (status, payments)
    async fn update_invoice(&self, invoice: &Invoice) -> InvoiceResult<()>;

    /// Atomically apply a payment to its invoice and persist both.
    ///
    /// The outstanding-balance check, the `amount_paid` and status
    /// update, and the payment insert must happen as one step (the rules
    /// themselves live in [`Invoice::apply_payment`]). Two concurrent
    /// payments must never both pass the check and overpay the invoice.
    /// Returns the updated invoice.
    async fn apply_payment(&self, payment: &Payment) -> InvoiceResult<Invoice>;

    /// List payments recorded against an invoice
    async fn list_payments(&self, invoice_id: Uuid) -> InvoiceResult<Vec<Payment>>;
}

/// Trait for implementing custom validation rules at the persistence
/// boundary
pub trait InvoiceValidator: Send + Sync {
    /// Validate a draft before it is finalized into an invoice
    fn validate_draft(&self, draft: &InvoiceDraft) -> InvoiceResult<()>;

    /// Validate a business profile before saving
    fn validate_business_profile(&self, profile: &BusinessProfile) -> InvoiceResult<()>;

    /// Validate a customer before saving
    fn validate_customer(&self, customer: &Customer) -> InvoiceResult<()>;

    /// Validate a product before saving
    fn validate_product(&self, product: &Product) -> InvoiceResult<()>;
}

/// Default validator with basic rules
pub struct DefaultInvoiceValidator;

impl InvoiceValidator for DefaultInvoiceValidator {
    fn validate_draft(&self, draft: &InvoiceDraft) -> InvoiceResult<()> {
        if draft.customer_id().is_none() {
            return Err(InvoiceError::Validation(
                "Please select a customer".to_string(),
            ));
        }

        if draft.billable_lines().is_empty() {
            return Err(InvoiceError::Validation(
                "Please add at least one item".to_string(),
            ));
        }

        Ok(())
    }

    fn validate_business_profile(&self, profile: &BusinessProfile) -> InvoiceResult<()> {
        if profile.name.trim().is_empty() {
            return Err(InvoiceError::Validation(
                "Business name cannot be empty".to_string(),
            ));
        }

        if profile.invoice_prefix.trim().is_empty() {
            return Err(InvoiceError::Validation(
                "Invoice prefix cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    fn validate_customer(&self, customer: &Customer) -> InvoiceResult<()> {
        if customer.name.trim().is_empty() {
            return Err(InvoiceError::Validation(
                "Customer name cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    fn validate_product(&self, product: &Product) -> InvoiceResult<()> {
        if product.name.trim().is_empty() {
            return Err(InvoiceError::Validation(
                "Product name cannot be empty".to_string(),
            ));
        }

        if product.unit.trim().is_empty() {
            return Err(InvoiceError::Validation(
                "Product unit cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
