//! Invoice draft assembly
//!
//! A draft is the editing context for one invoice before it is persisted:
//! header fields, the selected customer, and a list of line items that are
//! recomputed eagerly on every edit. Switching the customer re-derives the
//! supply type and reworks every line between the CGST/SGST split and
//! IGST, so displayed amounts are never stale.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::invoice::totals::InvoiceTotals;
use crate::tax::gst::{LineItemInput, LineItemResult};
use crate::tax::place_of_supply::{StateCode, SupplyType};
use crate::types::{
    BusinessProfile, Customer, Invoice, InvoiceError, InvoiceItem, InvoiceResult, InvoiceStatus,
    InvoiceType, Product,
};

/// A fresh editing row. No price yet, so every amount is zero.
fn blank_line() -> LineItemResult {
    let zero = bigdecimal::BigDecimal::from(0);
    LineItemResult {
        item: LineItemInput::new(),
        taxable_amount: zero.clone(),
        cgst_amount: zero.clone(),
        sgst_amount: zero.clone(),
        igst_amount: zero.clone(),
        total_amount: zero,
    }
}

/// In-progress invoice being assembled line by line.
///
/// Lines hold their computed tax breakdown at all times. Blank lines (no
/// description yet) are kept as editing rows but never count toward totals
/// or reach storage.
#[derive(Debug, Clone)]
pub struct InvoiceDraft {
    business_id: Uuid,
    business_state: Option<StateCode>,
    customer_id: Option<Uuid>,
    customer_state: Option<StateCode>,
    supply_type: SupplyType,
    invoice_type: InvoiceType,
    invoice_date: NaiveDate,
    due_date: Option<NaiveDate>,
    notes: Option<String>,
    terms: Option<String>,
    lines: Vec<LineItemResult>,
}

impl InvoiceDraft {
    /// Start a draft for a business with one empty line.
    ///
    /// With no customer selected yet the draft is treated as intra-state.
    pub fn new(business: &BusinessProfile, invoice_date: NaiveDate) -> Self {
        Self {
            business_id: business.id,
            business_state: business.state,
            customer_id: None,
            customer_state: None,
            supply_type: SupplyType::IntraState,
            invoice_type: InvoiceType::TaxInvoice,
            invoice_date,
            due_date: None,
            notes: None,
            terms: None,
            lines: vec![blank_line()],
        }
    }

    /// Select the customer being billed.
    ///
    /// Re-derives the supply type from the customer's state against the
    /// business's and recomputes every line under it. If any line fails to
    /// recompute the draft is left exactly as it was.
    pub fn select_customer(&mut self, customer: &Customer) -> InvoiceResult<()> {
        if customer.business_id != self.business_id {
            return Err(InvoiceError::Validation(
                "Customer belongs to a different business".to_string(),
            ));
        }

        let supply_type = SupplyType::for_transaction(self.business_state, customer.state);
        let recomputed = self
            .lines
            .iter()
            .map(|line| line.clone().recompute(supply_type))
            .collect::<InvoiceResult<Vec<_>>>()?;

        self.customer_id = Some(customer.id);
        self.customer_state = customer.state;
        self.supply_type = supply_type;
        self.lines = recomputed;
        Ok(())
    }

    /// Append a fresh empty line and return its index.
    pub fn add_line(&mut self) -> usize {
        self.lines.push(blank_line());
        self.lines.len() - 1
    }

    /// Edit the line at `index` and recompute its amounts.
    ///
    /// If the edit leaves the line invalid (negative quantity or price,
    /// discount outside 0 to 100) the line keeps its previous state and
    /// the error is returned.
    pub fn update_line<F>(&mut self, index: usize, edit: F) -> InvoiceResult<()>
    where
        F: FnOnce(&mut LineItemInput),
    {
        let line = self
            .lines
            .get(index)
            .ok_or_else(|| InvoiceError::Validation(format!("No line item at index {}", index)))?;

        let mut item = line.item.clone();
        edit(&mut item);
        self.lines[index] = LineItemResult::compute(item, self.supply_type)?;
        Ok(())
    }

    /// Prefill the line at `index` from a catalog product.
    pub fn apply_product(&mut self, index: usize, product: &Product) -> InvoiceResult<()> {
        self.update_line(index, |item| item.apply_product(product))
    }

    /// Remove the line at `index`. The last remaining line cannot be
    /// removed; an invoice always keeps at least one editing row.
    pub fn remove_line(&mut self, index: usize) -> InvoiceResult<()> {
        if index >= self.lines.len() {
            return Err(InvoiceError::Validation(format!(
                "No line item at index {}",
                index
            )));
        }
        if self.lines.len() == 1 {
            return Err(InvoiceError::Validation(
                "An invoice needs at least one line item".to_string(),
            ));
        }
        self.lines.remove(index);
        Ok(())
    }

    /// Set the document kind (tax invoice, bill of supply, ...).
    pub fn set_invoice_type(&mut self, invoice_type: InvoiceType) {
        self.invoice_type = invoice_type;
    }

    /// Set or clear the payment due date.
    pub fn set_due_date(&mut self, due_date: Option<NaiveDate>) {
        self.due_date = due_date;
    }

    /// Set or clear the customer-facing note.
    pub fn set_notes(&mut self, notes: Option<String>) {
        self.notes = notes;
    }

    /// Set or clear the terms and conditions text.
    pub fn set_terms(&mut self, terms: Option<String>) {
        self.terms = terms;
    }

    /// All lines, blank editing rows included.
    pub fn lines(&self) -> &[LineItemResult] {
        &self.lines
    }

    /// Lines that will appear on the invoice (description filled in).
    pub fn billable_lines(&self) -> Vec<&LineItemResult> {
        self.lines
            .iter()
            .filter(|line| line.item.is_billable())
            .collect()
    }

    /// Header totals over the billable lines.
    ///
    /// Blank rows contribute nothing, so these always equal the totals of
    /// the items that would be persisted.
    pub fn totals(&self) -> InvoiceTotals {
        let billable: Vec<LineItemResult> = self
            .lines
            .iter()
            .filter(|line| line.item.is_billable())
            .cloned()
            .collect();
        InvoiceTotals::from_line_items(&billable)
    }

    /// Current supply type classification.
    pub fn supply_type(&self) -> SupplyType {
        self.supply_type
    }

    /// The selected customer, if any.
    pub fn customer_id(&self) -> Option<Uuid> {
        self.customer_id
    }

    /// The business this draft belongs to.
    pub fn business_id(&self) -> Uuid {
        self.business_id
    }

    /// Date of issue.
    pub fn invoice_date(&self) -> NaiveDate {
        self.invoice_date
    }

    /// Payment due date, if set.
    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Finalize the draft into a persistable invoice and its items.
    ///
    /// Requires a selected customer and at least one billable line. Only
    /// billable lines become items; header totals are folded over exactly
    /// those lines.
    pub fn to_invoice(
        &self,
        invoice_number: String,
        created_by: Option<Uuid>,
    ) -> InvoiceResult<(Invoice, Vec<InvoiceItem>)> {
        let customer_id = self.customer_id.ok_or_else(|| {
            InvoiceError::Validation("Please select a customer".to_string())
        })?;

        let billable = self.billable_lines();
        if billable.is_empty() {
            return Err(InvoiceError::Validation(
                "Please add at least one item".to_string(),
            ));
        }

        let billable_owned: Vec<LineItemResult> =
            billable.iter().map(|line| (*line).clone()).collect();
        let totals = InvoiceTotals::from_line_items(&billable_owned);

        let now = chrono::Utc::now().naive_utc();
        let invoice = Invoice {
            id: Uuid::new_v4(),
            business_id: self.business_id,
            customer_id,
            invoice_number,
            invoice_type: self.invoice_type,
            invoice_date: self.invoice_date,
            due_date: self.due_date,
            place_of_supply: self.customer_state,
            is_inter_state: self.supply_type.is_inter_state(),
            totals,
            amount_paid: bigdecimal::BigDecimal::from(0),
            status: InvoiceStatus::Draft,
            notes: self.notes.clone(),
            terms: self.terms.clone(),
            created_by,
            created_at: now,
            updated_at: now,
        };

        let items = billable_owned
            .iter()
            .map(|line| InvoiceItem::from_line(invoice.id, line))
            .collect();

        Ok((invoice, items))
    }
}
