//! In-memory storage implementation for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::invoice::numbering::NumberReservation;
use crate::traits::*;
use crate::types::*;

/// In-memory storage implementation for testing and development
///
/// Cloning shares the underlying maps, so clones behave like extra handles
/// to the same store. Number reservation holds the profile map's write
/// lock for the whole read-and-increment, and payment application holds
/// the invoice map's write lock across check and update, so concurrent
/// calls of either serialize.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    profiles: Arc<RwLock<HashMap<Uuid, BusinessProfile>>>,
    customers: Arc<RwLock<HashMap<Uuid, Customer>>>,
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
    invoices: Arc<RwLock<HashMap<Uuid, Invoice>>>,
    invoice_items: Arc<RwLock<HashMap<Uuid, Vec<InvoiceItem>>>>,
    payments: Arc<RwLock<HashMap<Uuid, Vec<Payment>>>>,
}

impl MemoryStorage {
    /// Create a new memory storage instance
    pub fn new() -> Self {
        Self {
            profiles: Arc::new(RwLock::new(HashMap::new())),
            customers: Arc::new(RwLock::new(HashMap::new())),
            products: Arc::new(RwLock::new(HashMap::new())),
            invoices: Arc::new(RwLock::new(HashMap::new())),
            invoice_items: Arc::new(RwLock::new(HashMap::new())),
            payments: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) {
        self.profiles.write().unwrap().clear();
        self.customers.write().unwrap().clear();
        self.products.write().unwrap().clear();
        self.invoices.write().unwrap().clear();
        self.invoice_items.write().unwrap().clear();
        self.payments.write().unwrap().clear();
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InvoiceStorage for MemoryStorage {
    async fn save_business_profile(&self, profile: &BusinessProfile) -> InvoiceResult<()> {
        self.profiles
            .write()
            .unwrap()
            .insert(profile.id, profile.clone());
        Ok(())
    }

    async fn get_business_profile(
        &self,
        business_id: Uuid,
    ) -> InvoiceResult<Option<BusinessProfile>> {
        Ok(self.profiles.read().unwrap().get(&business_id).cloned())
    }

    async fn save_customer(&self, customer: &Customer) -> InvoiceResult<()> {
        self.customers
            .write()
            .unwrap()
            .insert(customer.id, customer.clone());
        Ok(())
    }

    async fn get_customer(&self, customer_id: Uuid) -> InvoiceResult<Option<Customer>> {
        Ok(self.customers.read().unwrap().get(&customer_id).cloned())
    }

    async fn list_customers(&self, business_id: Uuid) -> InvoiceResult<Vec<Customer>> {
        let customers = self.customers.read().unwrap();
        let mut filtered: Vec<Customer> = customers
            .values()
            .filter(|customer| customer.business_id == business_id)
            .cloned()
            .collect();
        filtered.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(filtered)
    }

    async fn save_product(&self, product: &Product) -> InvoiceResult<()> {
        self.products
            .write()
            .unwrap()
            .insert(product.id, product.clone());
        Ok(())
    }

    async fn get_product(&self, product_id: Uuid) -> InvoiceResult<Option<Product>> {
        Ok(self.products.read().unwrap().get(&product_id).cloned())
    }

    async fn list_products(&self, business_id: Uuid) -> InvoiceResult<Vec<Product>> {
        let products = self.products.read().unwrap();
        let mut filtered: Vec<Product> = products
            .values()
            .filter(|product| product.business_id == business_id)
            .cloned()
            .collect();
        filtered.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(filtered)
    }

    async fn reserve_invoice_number(&self, business_id: Uuid) -> InvoiceResult<NumberReservation> {
        // One write lock across read and increment; reservations serialize.
        let mut profiles = self.profiles.write().unwrap();
        let profile = profiles
            .get_mut(&business_id)
            .ok_or(InvoiceError::BusinessProfileNotFound(business_id))?;

        let reservation = NumberReservation {
            prefix: profile.invoice_prefix.clone(),
            sequence: profile.invoice_counter,
        };
        profile.invoice_counter += 1;
        profile.updated_at = chrono::Utc::now().naive_utc();

        Ok(reservation)
    }

    async fn save_invoice(&self, invoice: &Invoice, items: &[InvoiceItem]) -> InvoiceResult<()> {
        let mut invoices = self.invoices.write().unwrap();

        // Same uniqueness rule a database would enforce on the number.
        let duplicate = invoices.values().any(|existing| {
            existing.business_id == invoice.business_id
                && existing.invoice_number == invoice.invoice_number
        });
        if duplicate {
            return Err(InvoiceError::Storage(format!(
                "Invoice number {} already exists",
                invoice.invoice_number
            )));
        }

        invoices.insert(invoice.id, invoice.clone());
        self.invoice_items
            .write()
            .unwrap()
            .insert(invoice.id, items.to_vec());
        Ok(())
    }

    async fn get_invoice(&self, invoice_id: Uuid) -> InvoiceResult<Option<Invoice>> {
        Ok(self.invoices.read().unwrap().get(&invoice_id).cloned())
    }

    async fn get_invoice_items(&self, invoice_id: Uuid) -> InvoiceResult<Vec<InvoiceItem>> {
        Ok(self
            .invoice_items
            .read()
            .unwrap()
            .get(&invoice_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_invoices(
        &self,
        business_id: Uuid,
        status: Option<InvoiceStatus>,
    ) -> InvoiceResult<Vec<Invoice>> {
        let invoices = self.invoices.read().unwrap();
        let mut filtered: Vec<Invoice> = invoices
            .values()
            .filter(|invoice| {
                invoice.business_id == business_id
                    && status.is_none_or(|s| invoice.status == s)
            })
            .cloned()
            .collect();
        // Newest first, as listings show them.
        filtered.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(filtered)
    }

    async fn update_invoice(&self, invoice: &Invoice) -> InvoiceResult<()> {
        let mut invoices = self.invoices.write().unwrap();
        if invoices.contains_key(&invoice.id) {
            invoices.insert(invoice.id, invoice.clone());
            Ok(())
        } else {
            Err(InvoiceError::InvoiceNotFound(invoice.id))
        }
    }

    async fn apply_payment(&self, payment: &Payment) -> InvoiceResult<Invoice> {
        // One write lock across check and update, like number reservation.
        let mut invoices = self.invoices.write().unwrap();
        let invoice = invoices
            .get_mut(&payment.invoice_id)
            .ok_or(InvoiceError::InvoiceNotFound(payment.invoice_id))?;

        invoice.apply_payment(&payment.amount)?;
        self.payments
            .write()
            .unwrap()
            .entry(payment.invoice_id)
            .or_default()
            .push(payment.clone());

        Ok(invoice.clone())
    }

    async fn list_payments(&self, invoice_id: Uuid) -> InvoiceResult<Vec<Payment>> {
        Ok(self
            .payments
            .read()
            .unwrap()
            .get(&invoice_id)
            .cloned()
            .unwrap_or_default())
    }
}
