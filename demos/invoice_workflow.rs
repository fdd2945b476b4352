//! End-to-end invoice workflow example

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use invoicing_core::utils::MemoryStorage;
use invoicing_core::{
    BusinessProfile, Customer, GstRate, InvoiceManager, InvoiceStatus, Payment, Product, StateCode,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🧾 Invoicing Core - Invoice Workflow Example\n");

    // Create the invoicing manager with in-memory storage
    let storage = MemoryStorage::new();
    let manager = InvoiceManager::new(storage);

    // 1. Set up the business profile that issues invoices
    println!("🏢 Setting up Business Profile...");
    let mut business = BusinessProfile::new(
        "Acme Traders".to_string(),
        Some(StateCode::Karnataka),
    );
    business.gstin = Some("29ABCDE1234F1Z5".to_string());
    business.city = Some("Bengaluru".to_string());
    business.pincode = Some("560001".to_string());
    manager.save_business_profile(&business).await?;
    println!(
        "  ✓ {} ({}), numbering {}-### from {}",
        business.name,
        business.state.map(|s| s.abbreviation()).unwrap_or("-"),
        business.invoice_prefix,
        business.invoice_counter
    );
    println!();

    // 2. Add customers in and out of the home state
    println!("👥 Adding Customers...");
    let remote_customer = Customer::new(
        business.id,
        "Globex Industries".to_string(),
        Some(StateCode::Maharashtra),
    );
    manager.save_customer(&remote_customer).await?;

    let local_customer = Customer::new(
        business.id,
        "Initech Solutions".to_string(),
        Some(StateCode::Karnataka),
    );
    manager.save_customer(&local_customer).await?;

    for customer in manager.list_customers(business.id).await? {
        println!(
            "  ✓ {} ({})",
            customer.name,
            customer.state.map(|s| s.abbreviation()).unwrap_or("-")
        );
    }
    println!();

    // 3. Add catalog products used to prefill invoice lines
    println!("📦 Adding Products...");
    let mut amc = Product::new(
        business.id,
        "Annual maintenance contract".to_string(),
        "NOS".to_string(),
        "12000.00".parse()?,
        GstRate::Eighteen,
    );
    amc.hsn_sac_code = Some("998713".to_string());
    amc.is_service = true;
    manager.save_product(&amc).await?;

    let keyboard = Product::new(
        business.id,
        "Wireless keyboard".to_string(),
        "NOS".to_string(),
        "1200.00".parse()?,
        GstRate::Eighteen,
    );
    manager.save_product(&keyboard).await?;

    for product in manager.list_products(business.id).await? {
        println!(
            "  ✓ {} @ ₹{} ({}% GST)",
            product.name, product.unit_price, product.gst_rate
        );
    }
    println!();

    // 4. Draft an inter-state invoice: product line plus a manual line
    println!("🧾 Creating an Inter-state Invoice...");
    let invoice_date = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
    let mut draft = manager.start_draft(business.id, invoice_date).await?;
    manager.select_customer(&mut draft, remote_customer.id).await?;
    println!("  Supply type: {:?}", draft.supply_type());

    manager.apply_product(&mut draft, 0, amc.id).await?;

    let second = draft.add_line();
    draft.update_line(second, |item| {
        item.description = "On-site installation".to_string();
        item.quantity = BigDecimal::from(1);
        item.unit_price = "3000.00".parse().unwrap();
        item.discount_percent = BigDecimal::from(10);
        item.gst_rate = GstRate::Eighteen;
    })?;
    draft.set_due_date(Some(NaiveDate::from_ymd_opt(2024, 4, 30).unwrap()));
    draft.set_notes(Some("Thank you for your business".to_string()));

    let invoice = manager.create_invoice(&draft, None).await?;
    println!("  ✓ Created {} for {}", invoice.invoice_number, remote_customer.name);

    let items = manager.get_invoice_items(invoice.id).await?;
    for item in &items {
        println!(
            "    {} × {} @ ₹{} = ₹{} (IGST ₹{})",
            item.quantity, item.description, item.unit_price, item.taxable_amount, item.igst_amount
        );
    }
    println!("  Subtotal:    ₹{}", invoice.totals.subtotal);
    println!("  IGST:        ₹{}", invoice.totals.igst_amount);
    println!("  Grand Total: ₹{}", invoice.totals.total_amount);
    println!();

    // 5. Send the invoice and settle it in two payments
    println!("💰 Recording Payments...");
    let invoice = manager.update_status(invoice.id, InvoiceStatus::Sent).await?;
    println!("  ✓ {} marked as {}", invoice.invoice_number, invoice.status);

    let mut advance = Payment::new(
        invoice.id,
        "10000.00".parse()?,
        NaiveDate::from_ymd_opt(2024, 4, 10).unwrap(),
    );
    advance.payment_method = Some("UPI".to_string());
    advance.reference_number = Some("UPI-584712".to_string());

    let invoice = manager.record_payment(advance).await?;
    println!(
        "  ✓ Received ₹10000.00, status {}, outstanding ₹{}",
        invoice.status,
        invoice.outstanding_amount()
    );

    let settlement = Payment::new(
        invoice.id,
        invoice.outstanding_amount(),
        NaiveDate::from_ymd_opt(2024, 4, 25).unwrap(),
    );
    let invoice = manager.record_payment(settlement).await?;
    println!(
        "  ✓ Settled in full, status {}, outstanding ₹{}",
        invoice.status,
        invoice.outstanding_amount()
    );
    println!();

    // 6. An intra-state invoice splits the tax into CGST and SGST
    println!("🏠 Creating an Intra-state Invoice...");
    let mut draft = manager.start_draft(business.id, invoice_date).await?;
    manager.select_customer(&mut draft, local_customer.id).await?;
    manager.apply_product(&mut draft, 0, keyboard.id).await?;
    draft.update_line(0, |item| {
        item.quantity = BigDecimal::from(5);
    })?;
    draft.set_due_date(Some(NaiveDate::from_ymd_opt(2024, 5, 15).unwrap()));

    let unpaid = manager.create_invoice(&draft, None).await?;
    println!("  ✓ Created {} for {}", unpaid.invoice_number, local_customer.name);
    println!("  Subtotal:    ₹{}", unpaid.totals.subtotal);
    println!("  CGST (9%):   ₹{}", unpaid.totals.cgst_amount);
    println!("  SGST (9%):   ₹{}", unpaid.totals.sgst_amount);
    println!("  Grand Total: ₹{}", unpaid.totals.total_amount);

    manager.update_status(unpaid.id, InvoiceStatus::Sent).await?;
    println!("  ✓ Sent, due {}", unpaid.due_date.unwrap());
    println!();

    // 7. Cancelled invoices fall out of the tax summary
    println!("🗑️ Cancelling a Draft...");
    let mut draft = manager.start_draft(business.id, invoice_date).await?;
    manager.select_customer(&mut draft, local_customer.id).await?;
    draft.update_line(0, |item| {
        item.description = "Packing material".to_string();
        item.unit_price = "500.00".parse().unwrap();
        item.gst_rate = GstRate::Five;
    })?;
    let cancelled = manager.create_invoice(&draft, None).await?;
    let cancelled = manager.cancel_invoice(cancelled.id).await?;
    println!(
        "  ✓ {} created and then {}",
        cancelled.invoice_number, cancelled.status
    );
    println!();

    // 8. GST summary across the business
    println!("📈 GST Summary (cancelled excluded):");
    let summary = manager.gst_summary(business.id).await?;
    println!("  Invoices:       {}", summary.invoice_count);
    println!("  Taxable Value:  ₹{}", summary.taxable_amount);
    println!("  CGST:           ₹{}", summary.cgst_amount);
    println!("  SGST:           ₹{}", summary.sgst_amount);
    println!("  IGST:           ₹{}", summary.igst_amount);
    println!("  Total Tax:      ₹{}", summary.total_tax);
    println!("  Invoice Value:  ₹{}", summary.total_amount);
    println!();

    // 9. Overdue check past the second invoice's due date
    println!("⏰ Overdue Invoices as of 2024-06-01:");
    let overdue = manager
        .overdue_invoices(business.id, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
        .await?;
    for invoice in &overdue {
        println!(
            "  ⚠ {} due {} with ₹{} outstanding",
            invoice.invoice_number,
            invoice.due_date.unwrap(),
            invoice.outstanding_amount()
        );
    }

    println!("\n🎉 Invoice workflow example completed successfully!");
    Ok(())
}
