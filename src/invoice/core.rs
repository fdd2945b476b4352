//! Main invoicing workflow that coordinates drafts, numbering, and storage

use chrono::NaiveDate;
use uuid::Uuid;

use crate::invoice::draft::InvoiceDraft;
use crate::invoice::totals::GstSummary;
use crate::traits::*;
use crate::types::*;

/// Main invoicing system that orchestrates all invoice operations
pub struct InvoiceManager<S: InvoiceStorage> {
    storage: S,
    validator: Box<dyn InvoiceValidator>,
}

impl<S: InvoiceStorage> InvoiceManager<S> {
    /// Create a new manager with the given storage backend
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            validator: Box::new(DefaultInvoiceValidator),
        }
    }

    /// Create a new manager with a custom validator
    pub fn with_validator(storage: S, validator: Box<dyn InvoiceValidator>) -> Self {
        Self { storage, validator }
    }

    // Business profile operations
    /// Save a business profile after validation
    pub async fn save_business_profile(&self, profile: &BusinessProfile) -> InvoiceResult<()> {
        self.validator.validate_business_profile(profile)?;
        self.storage.save_business_profile(profile).await
    }

    /// Get a business profile by ID
    pub async fn get_business_profile(
        &self,
        business_id: Uuid,
    ) -> InvoiceResult<Option<BusinessProfile>> {
        self.storage.get_business_profile(business_id).await
    }

    // Customer operations
    /// Save a customer after validation
    pub async fn save_customer(&self, customer: &Customer) -> InvoiceResult<()> {
        self.validator.validate_customer(customer)?;
        self.storage.save_customer(customer).await
    }

    /// Get a customer by ID
    pub async fn get_customer(&self, customer_id: Uuid) -> InvoiceResult<Option<Customer>> {
        self.storage.get_customer(customer_id).await
    }

    /// List all customers of a business
    pub async fn list_customers(&self, business_id: Uuid) -> InvoiceResult<Vec<Customer>> {
        self.storage.list_customers(business_id).await
    }

    // Product operations
    /// Save a product after validation
    pub async fn save_product(&self, product: &Product) -> InvoiceResult<()> {
        self.validator.validate_product(product)?;
        self.storage.save_product(product).await
    }

    /// Get a product by ID
    pub async fn get_product(&self, product_id: Uuid) -> InvoiceResult<Option<Product>> {
        self.storage.get_product(product_id).await
    }

    /// List all products of a business
    pub async fn list_products(&self, business_id: Uuid) -> InvoiceResult<Vec<Product>> {
        self.storage.list_products(business_id).await
    }

    // Draft operations
    /// Start a new invoice draft for a business
    pub async fn start_draft(
        &self,
        business_id: Uuid,
        invoice_date: NaiveDate,
    ) -> InvoiceResult<InvoiceDraft> {
        let profile = self
            .storage
            .get_business_profile(business_id)
            .await?
            .ok_or(InvoiceError::BusinessProfileNotFound(business_id))?;

        Ok(InvoiceDraft::new(&profile, invoice_date))
    }

    /// Select a stored customer into a draft
    pub async fn select_customer(
        &self,
        draft: &mut InvoiceDraft,
        customer_id: Uuid,
    ) -> InvoiceResult<()> {
        let customer = self
            .storage
            .get_customer(customer_id)
            .await?
            .ok_or(InvoiceError::CustomerNotFound(customer_id))?;

        draft.select_customer(&customer)
    }

    /// Prefill a draft line from a stored product
    pub async fn apply_product(
        &self,
        draft: &mut InvoiceDraft,
        line_index: usize,
        product_id: Uuid,
    ) -> InvoiceResult<()> {
        let product = self
            .storage
            .get_product(product_id)
            .await?
            .ok_or(InvoiceError::ProductNotFound(product_id))?;

        draft.apply_product(line_index, &product)
    }

    // Invoice operations
    /// Finalize a draft into a persisted invoice.
    ///
    /// Validates the draft, reserves the next invoice number for the
    /// business, assembles the invoice and its items, and saves them.
    /// The reservation is consumed even if the save fails, so a failed
    /// create leaves a gap in the sequence rather than a duplicate.
    pub async fn create_invoice(
        &self,
        draft: &InvoiceDraft,
        created_by: Option<Uuid>,
    ) -> InvoiceResult<Invoice> {
        self.validator.validate_draft(draft)?;

        let reservation = self
            .storage
            .reserve_invoice_number(draft.business_id())
            .await?;

        let (invoice, items) = draft.to_invoice(reservation.invoice_number(), created_by)?;
        self.storage.save_invoice(&invoice, &items).await?;

        Ok(invoice)
    }

    /// Get an invoice by ID
    pub async fn get_invoice(&self, invoice_id: Uuid) -> InvoiceResult<Option<Invoice>> {
        self.storage.get_invoice(invoice_id).await
    }

    /// Get the line items of an invoice
    pub async fn get_invoice_items(&self, invoice_id: Uuid) -> InvoiceResult<Vec<InvoiceItem>> {
        self.storage.get_invoice_items(invoice_id).await
    }

    /// List invoices of a business, optionally filtered by status
    pub async fn list_invoices(
        &self,
        business_id: Uuid,
        status: Option<InvoiceStatus>,
    ) -> InvoiceResult<Vec<Invoice>> {
        self.storage.list_invoices(business_id, status).await
    }

    /// Move an invoice to a new lifecycle status.
    ///
    /// Totals are never recomputed on a status change; only the status
    /// and the update timestamp move.
    pub async fn update_status(
        &self,
        invoice_id: Uuid,
        next: InvoiceStatus,
    ) -> InvoiceResult<Invoice> {
        let mut invoice = self
            .storage
            .get_invoice(invoice_id)
            .await?
            .ok_or(InvoiceError::InvoiceNotFound(invoice_id))?;

        if !invoice.status.can_transition_to(next) {
            return Err(InvoiceError::InvalidStatusTransition {
                from: invoice.status,
                to: next,
            });
        }

        invoice.status = next;
        invoice.updated_at = chrono::Utc::now().naive_utc();
        self.storage.update_invoice(&invoice).await?;

        Ok(invoice)
    }

    /// Cancel an invoice, removing it from tax summaries
    pub async fn cancel_invoice(&self, invoice_id: Uuid) -> InvoiceResult<Invoice> {
        self.update_status(invoice_id, InvoiceStatus::Cancelled).await
    }

    // Payment operations
    /// Record a payment against a sent or partially paid invoice.
    ///
    /// The payment must be positive and must not exceed the outstanding
    /// amount; storage checks and applies it in one step, so concurrent
    /// payments can never settle the same balance twice. The invoice
    /// moves to paid when fully settled, otherwise to partially paid.
    /// Its totals are untouched.
    pub async fn record_payment(&self, payment: Payment) -> InvoiceResult<Invoice> {
        self.storage.apply_payment(&payment).await
    }

    /// List payments recorded against an invoice
    pub async fn list_payments(&self, invoice_id: Uuid) -> InvoiceResult<Vec<Payment>> {
        self.storage.list_payments(invoice_id).await
    }

    // Reporting operations
    /// Summarise GST collected across a business's invoices.
    ///
    /// Cancelled invoices are excluded; unpaid ones are not, since the
    /// tax liability arises on issue.
    pub async fn gst_summary(&self, business_id: Uuid) -> InvoiceResult<GstSummary> {
        let invoices = self.storage.list_invoices(business_id, None).await?;
        Ok(GstSummary::from_invoices(&invoices))
    }

    /// List invoices that are overdue as of the given date
    pub async fn overdue_invoices(
        &self,
        business_id: Uuid,
        as_of: NaiveDate,
    ) -> InvoiceResult<Vec<Invoice>> {
        let invoices = self.storage.list_invoices(business_id, None).await?;
        Ok(invoices
            .into_iter()
            .filter(|invoice| invoice.is_overdue(as_of))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tax::gst::GstRate;
    use crate::tax::place_of_supply::{StateCode, SupplyType};
    use crate::utils::memory_storage::MemoryStorage;
    use bigdecimal::BigDecimal;

    fn dec(s: &str) -> BigDecimal {
        s.parse().unwrap()
    }

    fn issue_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()
    }

    async fn setup() -> (InvoiceManager<MemoryStorage>, BusinessProfile, Customer) {
        let manager = InvoiceManager::new(MemoryStorage::new());

        let business = BusinessProfile::new("Acme Traders".to_string(), Some(StateCode::Karnataka));
        manager.save_business_profile(&business).await.unwrap();

        let customer = Customer::new(
            business.id,
            "Globex".to_string(),
            Some(StateCode::Maharashtra),
        );
        manager.save_customer(&customer).await.unwrap();

        (manager, business, customer)
    }

    async fn draft_with_line(
        manager: &InvoiceManager<MemoryStorage>,
        business: &BusinessProfile,
        customer: &Customer,
    ) -> InvoiceDraft {
        let mut draft = manager.start_draft(business.id, issue_date()).await.unwrap();
        manager.select_customer(&mut draft, customer.id).await.unwrap();
        draft
            .update_line(0, |item| {
                item.description = "Widget".to_string();
                item.quantity = dec("3");
                item.unit_price = dec("100.00");
                item.discount_percent = dec("10");
                item.gst_rate = GstRate::Eighteen;
            })
            .unwrap();
        draft
    }

    #[tokio::test]
    async fn test_invoice_lifecycle() {
        let (manager, business, customer) = setup().await;

        let draft = draft_with_line(&manager, &business, &customer).await;
        assert_eq!(draft.supply_type(), SupplyType::InterState);

        let invoice = manager.create_invoice(&draft, None).await.unwrap();
        assert_eq!(invoice.invoice_number, "INV-001");
        assert_eq!(invoice.status, InvoiceStatus::Draft);
        assert!(invoice.is_inter_state);
        assert_eq!(invoice.totals.igst_amount, dec("48.60"));
        assert_eq!(invoice.totals.total_amount, dec("318.60"));

        // Items landed alongside the header.
        let items = manager.get_invoice_items(invoice.id).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].taxable_amount, dec("270.00"));

        // Counter advanced in storage.
        let profile = manager
            .get_business_profile(business.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(profile.invoice_counter, 2);

        // Send, then settle in two payments.
        let invoice = manager
            .update_status(invoice.id, InvoiceStatus::Sent)
            .await
            .unwrap();
        assert_eq!(invoice.status, InvoiceStatus::Sent);

        let invoice = manager
            .record_payment(Payment::new(invoice.id, dec("100.00"), issue_date()))
            .await
            .unwrap();
        assert_eq!(invoice.status, InvoiceStatus::Partial);
        assert_eq!(invoice.outstanding_amount(), dec("218.60"));

        let invoice = manager
            .record_payment(Payment::new(invoice.id, dec("218.60"), issue_date()))
            .await
            .unwrap();
        assert_eq!(invoice.status, InvoiceStatus::Paid);
        assert_eq!(invoice.outstanding_amount(), dec("0"));

        // Totals never moved.
        assert_eq!(invoice.totals.total_amount, dec("318.60"));

        let payments = manager.list_payments(invoice.id).await.unwrap();
        assert_eq!(payments.len(), 2);
    }

    #[tokio::test]
    async fn test_sequential_numbering() {
        let (manager, business, customer) = setup().await;

        for expected in ["INV-001", "INV-002", "INV-003"] {
            let draft = draft_with_line(&manager, &business, &customer).await;
            let invoice = manager.create_invoice(&draft, None).await.unwrap();
            assert_eq!(invoice.invoice_number, expected);
        }

        let profile = manager
            .get_business_profile(business.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(profile.invoice_counter, 4);
    }

    #[tokio::test]
    async fn test_custom_prefix_and_counter() {
        let manager = InvoiceManager::new(MemoryStorage::new());

        let mut business = BusinessProfile::new("Acme".to_string(), Some(StateCode::Karnataka));
        business.invoice_prefix = "ACME".to_string();
        business.invoice_counter = 41;
        manager.save_business_profile(&business).await.unwrap();

        let customer = Customer::new(business.id, "Globex".to_string(), Some(StateCode::Karnataka));
        manager.save_customer(&customer).await.unwrap();

        let draft = draft_with_line(&manager, &business, &customer).await;
        let invoice = manager.create_invoice(&draft, None).await.unwrap();
        assert_eq!(invoice.invoice_number, "ACME-041");
    }

    #[tokio::test]
    async fn test_create_requires_customer_and_items() {
        let (manager, business, customer) = setup().await;

        // No customer.
        let mut draft = manager.start_draft(business.id, issue_date()).await.unwrap();
        draft
            .update_line(0, |item| {
                item.description = "Widget".to_string();
                item.unit_price = dec("10.00");
            })
            .unwrap();
        assert!(matches!(
            manager.create_invoice(&draft, None).await,
            Err(InvoiceError::Validation(_))
        ));

        // Customer but no billable line.
        let mut draft = manager.start_draft(business.id, issue_date()).await.unwrap();
        manager.select_customer(&mut draft, customer.id).await.unwrap();
        assert!(matches!(
            manager.create_invoice(&draft, None).await,
            Err(InvoiceError::Validation(_))
        ));

        // Failed creates consumed no numbers.
        let profile = manager
            .get_business_profile(business.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(profile.invoice_counter, 1);
    }

    #[tokio::test]
    async fn test_unknown_references() {
        let (manager, business, _) = setup().await;

        assert!(matches!(
            manager.start_draft(Uuid::new_v4(), issue_date()).await,
            Err(InvoiceError::BusinessProfileNotFound(_))
        ));

        let mut draft = manager.start_draft(business.id, issue_date()).await.unwrap();
        assert!(matches!(
            manager.select_customer(&mut draft, Uuid::new_v4()).await,
            Err(InvoiceError::CustomerNotFound(_))
        ));
        assert!(matches!(
            manager.apply_product(&mut draft, 0, Uuid::new_v4()).await,
            Err(InvoiceError::ProductNotFound(_))
        ));

        assert!(matches!(
            manager.get_invoice(Uuid::new_v4()).await,
            Ok(None)
        ));
        assert!(matches!(
            manager.update_status(Uuid::new_v4(), InvoiceStatus::Sent).await,
            Err(InvoiceError::InvoiceNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_status_machine_enforced() {
        let (manager, business, customer) = setup().await;
        let draft = draft_with_line(&manager, &business, &customer).await;
        let invoice = manager.create_invoice(&draft, None).await.unwrap();

        // Draft cannot jump straight to paid.
        assert!(matches!(
            manager.update_status(invoice.id, InvoiceStatus::Paid).await,
            Err(InvoiceError::InvalidStatusTransition { .. })
        ));

        let invoice = manager
            .update_status(invoice.id, InvoiceStatus::Sent)
            .await
            .unwrap();
        let invoice = manager.cancel_invoice(invoice.id).await.unwrap();
        assert_eq!(invoice.status, InvoiceStatus::Cancelled);

        // Cancelled is terminal.
        assert!(matches!(
            manager.update_status(invoice.id, InvoiceStatus::Sent).await,
            Err(InvoiceError::InvalidStatusTransition { .. })
        ));
    }

    #[tokio::test]
    async fn test_payment_rules() {
        let (manager, business, customer) = setup().await;
        let draft = draft_with_line(&manager, &business, &customer).await;
        let invoice = manager.create_invoice(&draft, None).await.unwrap();

        // Draft invoices take no payments.
        assert!(matches!(
            manager
                .record_payment(Payment::new(invoice.id, dec("100.00"), issue_date()))
                .await,
            Err(InvoiceError::Validation(_))
        ));

        let invoice = manager
            .update_status(invoice.id, InvoiceStatus::Sent)
            .await
            .unwrap();

        // Zero, negative, and excessive amounts are rejected.
        for bad in ["0", "-5", "318.61"] {
            assert!(matches!(
                manager
                    .record_payment(Payment::new(invoice.id, dec(bad), issue_date()))
                    .await,
                Err(InvoiceError::Validation(_))
            ));
        }

        // Exact settlement in one go.
        let invoice = manager
            .record_payment(Payment::new(invoice.id, dec("318.60"), issue_date()))
            .await
            .unwrap();
        assert_eq!(invoice.status, InvoiceStatus::Paid);

        // Paid invoices take no more.
        assert!(matches!(
            manager
                .record_payment(Payment::new(invoice.id, dec("0.01"), issue_date()))
                .await,
            Err(InvoiceError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_gst_summary_excludes_cancelled() {
        let (manager, business, customer) = setup().await;

        let draft = draft_with_line(&manager, &business, &customer).await;
        manager.create_invoice(&draft, None).await.unwrap();
        let draft = draft_with_line(&manager, &business, &customer).await;
        let second = manager.create_invoice(&draft, None).await.unwrap();
        manager.cancel_invoice(second.id).await.unwrap();

        let summary = manager.gst_summary(business.id).await.unwrap();
        assert_eq!(summary.invoice_count, 1);
        assert_eq!(summary.igst_amount, dec("48.60"));
        assert_eq!(summary.total_amount, dec("318.60"));
    }

    #[tokio::test]
    async fn test_overdue_query() {
        let (manager, business, customer) = setup().await;

        let mut draft = draft_with_line(&manager, &business, &customer).await;
        draft.set_due_date(Some(NaiveDate::from_ymd_opt(2024, 4, 15).unwrap()));
        let invoice = manager.create_invoice(&draft, None).await.unwrap();

        // Draft invoices are never overdue, whatever the date.
        let overdue = manager
            .overdue_invoices(business.id, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
            .await
            .unwrap();
        assert!(overdue.is_empty());

        manager
            .update_status(invoice.id, InvoiceStatus::Sent)
            .await
            .unwrap();

        // On the due date itself the invoice still counts as current.
        let overdue = manager
            .overdue_invoices(business.id, NaiveDate::from_ymd_opt(2024, 4, 15).unwrap())
            .await
            .unwrap();
        assert!(overdue.is_empty());

        let overdue = manager
            .overdue_invoices(business.id, NaiveDate::from_ymd_opt(2024, 4, 16).unwrap())
            .await
            .unwrap();
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].id, invoice.id);
    }
}
