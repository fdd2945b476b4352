//! GST line item calculation examples

use bigdecimal::BigDecimal;
use invoicing_core::{
    GstRate, InvoiceTotals, LineItemInput, LineItemResult, StateCode, SupplyType,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🧾 Invoicing Core - GST Line Item Examples\n");

    // 1. The notified rate slabs
    println!("📊 GST Rate Slabs:");
    let slabs = [
        (GstRate::Zero, "Exempt and zero-rated supplies"),
        (GstRate::Five, "Essentials and transport"),
        (GstRate::Twelve, "Standard rate, lower band"),
        (GstRate::Eighteen, "Standard rate, most services"),
        (GstRate::TwentyEight, "Luxury and sin goods"),
    ];

    for (rate, description) in slabs.iter() {
        println!("  {}% - {}", rate, description);
    }
    println!();

    // 2. Supply type classification from party states
    println!("🗺️ Place of Supply Classification:");
    let local = SupplyType::for_transaction(Some(StateCode::Karnataka), Some(StateCode::Karnataka));
    let remote =
        SupplyType::for_transaction(Some(StateCode::Karnataka), Some(StateCode::Maharashtra));

    println!(
        "  {} → {}: {:?}",
        StateCode::Karnataka.name(),
        StateCode::Karnataka.name(),
        local
    );
    println!(
        "  {} → {}: {:?}",
        StateCode::Karnataka.name(),
        StateCode::Maharashtra.name(),
        remote
    );
    println!();

    // 3. Intra-state line: the rate splits between CGST and SGST
    println!("🏢 Intra-state Line (CGST + SGST):");
    let mut item = LineItemInput::new();
    item.description = "Consulting services".to_string();
    item.quantity = BigDecimal::from(3);
    item.unit_price = "100.00".parse()?;
    item.discount_percent = BigDecimal::from(10);
    item.gst_rate = GstRate::Eighteen;

    let intra = LineItemResult::compute(item.clone(), SupplyType::IntraState)?;
    println!("  3 × ₹100.00 with 10% discount at 18% GST");
    println!("  Taxable:    ₹{}", intra.taxable_amount);
    println!("  CGST (9%):  ₹{}", intra.cgst_amount);
    println!("  SGST (9%):  ₹{}", intra.sgst_amount);
    println!("  IGST:       ₹{}", intra.igst_amount);
    println!("  Line Total: ₹{}", intra.total_amount);
    println!();

    // 4. The same line inter-state: the full rate lands on IGST
    println!("🌍 Same Line Inter-state (IGST only):");
    let inter = LineItemResult::compute(item, SupplyType::InterState)?;
    println!("  Taxable:    ₹{}", inter.taxable_amount);
    println!("  CGST:       ₹{}", inter.cgst_amount);
    println!("  SGST:       ₹{}", inter.sgst_amount);
    println!("  IGST (18%): ₹{}", inter.igst_amount);
    println!("  Line Total: ₹{}", inter.total_amount);
    println!();

    // 5. Rounding happens per tax head, so the split can differ from
    //    IGST by a paisa on amounts like ₹101 at 5%
    println!("🪙 Per-head Rounding:");
    let mut odd = LineItemInput::new();
    odd.description = "Courier charge".to_string();
    odd.unit_price = "101.00".parse()?;
    odd.gst_rate = GstRate::Five;

    let odd_intra = LineItemResult::compute(odd.clone(), SupplyType::IntraState)?;
    let odd_inter = LineItemResult::compute(odd, SupplyType::InterState)?;
    println!("  ₹101.00 at 5% intra-state:");
    println!(
        "    CGST ₹{} + SGST ₹{} = total ₹{}",
        odd_intra.cgst_amount, odd_intra.sgst_amount, odd_intra.total_amount
    );
    println!("  ₹101.00 at 5% inter-state:");
    println!(
        "    IGST ₹{} = total ₹{}",
        odd_inter.igst_amount, odd_inter.total_amount
    );
    println!();

    // 6. Folding several computed lines into invoice totals
    println!("🧾 Multi-line Invoice Totals:");
    let entries = [
        ("Rice - 10kg bag", "2", "150.00", GstRate::Zero),
        ("Coffee powder - 500g", "1", "400.00", GstRate::Five),
        ("Cooking oil - 1L", "3", "120.00", GstRate::Twelve),
        ("Consultation service", "1", "2000.00", GstRate::Eighteen),
    ];

    let mut lines = Vec::new();
    for (description, quantity, unit_price, rate) in entries.iter() {
        let mut line = LineItemInput::new();
        line.description = description.to_string();
        line.quantity = quantity.parse()?;
        line.unit_price = unit_price.parse()?;
        line.gst_rate = *rate;
        lines.push(LineItemResult::compute(line, SupplyType::IntraState)?);
    }

    println!("  Line Items:");
    for (i, line) in lines.iter().enumerate() {
        println!(
            "    {}. {} × {} @ ₹{} = ₹{} (GST: ₹{})",
            i + 1,
            line.item.description,
            line.item.quantity,
            line.item.unit_price,
            line.taxable_amount,
            line.total_tax()
        );
    }
    println!();

    let totals = InvoiceTotals::from_line_items(&lines);
    println!("  Invoice Summary:");
    println!("    Subtotal:    ₹{}", totals.subtotal);
    println!("    Total CGST:  ₹{}", totals.cgst_amount);
    println!("    Total SGST:  ₹{}", totals.sgst_amount);
    println!("    Total IGST:  ₹{}", totals.igst_amount);
    println!("    Total GST:   ₹{}", totals.total_tax);
    println!("    Grand Total: ₹{}", totals.total_amount);
    println!();

    // 7. Out-of-range inputs are rejected rather than clamped
    println!("✅ Input Validation:");
    let mut negative = LineItemInput::new();
    negative.description = "Bad line".to_string();
    negative.quantity = BigDecimal::from(-1);

    match LineItemResult::compute(negative, SupplyType::IntraState) {
        Ok(_) => println!("  ✓ Line accepted"),
        Err(e) => println!("  ❌ Rejected: {}", e),
    }

    let mut over_discounted = LineItemInput::new();
    over_discounted.description = "Bad discount".to_string();
    over_discounted.unit_price = "100.00".parse()?;
    over_discounted.discount_percent = "100.01".parse()?;

    match LineItemResult::compute(over_discounted, SupplyType::IntraState) {
        Ok(_) => println!("  ✓ Line accepted"),
        Err(e) => println!("  ❌ Rejected: {}", e),
    }

    println!("\n🎉 GST line item examples completed successfully!");
    Ok(())
}
