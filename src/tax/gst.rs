//! GST (Goods and Services Tax) line item calculation for Indian tax compliance
//!
//! Every invoice line goes through the same pipeline: gross amount from
//! quantity and unit price, percentage discount off, then GST on the
//! discounted (taxable) amount. The supply type decides how the tax is
//! split: intra-state supplies charge CGST and SGST at half the rate each,
//! inter-state supplies charge the full rate as IGST.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::tax::place_of_supply::SupplyType;
use crate::types::{InvoiceError, InvoiceResult, Product};
use crate::utils::money::round_money;
use crate::utils::validation::{
    validate_discount_percent, validate_quantity, validate_unit_price,
};

/// GST rate slabs notified for goods and services.
///
/// The slab set is closed; arbitrary percentages are not representable.
/// Serialized as the percentage string ("0", "5", "12", "18", "28") to
/// match stored records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GstRate {
    /// Exempt and zero-rated supplies
    #[serde(rename = "0")]
    Zero,
    /// Reduced rate (essentials, transport)
    #[serde(rename = "5")]
    Five,
    /// Standard rate, lower band
    #[serde(rename = "12")]
    Twelve,
    /// Standard rate, upper band; the default for most services
    #[serde(rename = "18")]
    Eighteen,
    /// Highest slab (luxury and sin goods)
    #[serde(rename = "28")]
    TwentyEight,
}

impl GstRate {
    /// All rate slabs, lowest first.
    pub const ALL: [GstRate; 5] = [
        GstRate::Zero,
        GstRate::Five,
        GstRate::Twelve,
        GstRate::Eighteen,
        GstRate::TwentyEight,
    ];

    /// Rate as a whole-number percentage.
    pub fn percent(&self) -> BigDecimal {
        match self {
            GstRate::Zero => BigDecimal::from(0),
            GstRate::Five => BigDecimal::from(5),
            GstRate::Twelve => BigDecimal::from(12),
            GstRate::Eighteen => BigDecimal::from(18),
            GstRate::TwentyEight => BigDecimal::from(28),
        }
    }

    /// The stored percentage string for this slab.
    pub fn as_str(&self) -> &'static str {
        match self {
            GstRate::Zero => "0",
            GstRate::Five => "5",
            GstRate::Twelve => "12",
            GstRate::Eighteen => "18",
            GstRate::TwentyEight => "28",
        }
    }

    /// Look up a slab from its percentage string.
    pub fn from_percent(value: &str) -> Option<GstRate> {
        match value {
            "0" => Some(GstRate::Zero),
            "5" => Some(GstRate::Five),
            "12" => Some(GstRate::Twelve),
            "18" => Some(GstRate::Eighteen),
            "28" => Some(GstRate::TwentyEight),
            _ => None,
        }
    }
}

impl FromStr for GstRate {
    type Err = InvoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GstRate::from_percent(s).ok_or_else(|| InvoiceError::UnsupportedGstRate(s.to_string()))
    }
}

impl std::fmt::Display for GstRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Editable fields of one invoice line, before tax is computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemInput {
    /// Stable identity of the line within a draft
    pub id: Uuid,
    /// Catalog product this line was prefilled from, if any
    pub product_id: Option<Uuid>,
    /// Description shown on the invoice; blank lines are not billable
    pub description: String,
    /// HSN/SAC classification code
    pub hsn_sac_code: Option<String>,
    /// Quantity billed; must not be negative
    pub quantity: BigDecimal,
    /// Unit of measure
    pub unit: String,
    /// Price per unit before discount and tax; must not be negative
    pub unit_price: BigDecimal,
    /// Discount in percent; must be between 0 and 100
    pub discount_percent: BigDecimal,
    /// GST slab applied to the line
    pub gst_rate: GstRate,
}

impl LineItemInput {
    /// Create an empty line with the usual starting values:
    /// quantity 1, no price or discount, 18% GST, unit "NOS".
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            product_id: None,
            description: String::new(),
            hsn_sac_code: None,
            quantity: BigDecimal::from(1),
            unit: "NOS".to_string(),
            unit_price: BigDecimal::from(0),
            discount_percent: BigDecimal::from(0),
            gst_rate: GstRate::Eighteen,
        }
    }

    /// Prefill the line from a catalog product.
    ///
    /// Copies the product's name, classification code, unit, price, and
    /// rate. Quantity and discount are left as entered.
    pub fn apply_product(&mut self, product: &Product) {
        self.product_id = Some(product.id);
        self.description = product.name.clone();
        self.hsn_sac_code = product.hsn_sac_code.clone();
        self.unit = product.unit.clone();
        self.unit_price = product.unit_price.clone();
        self.gst_rate = product.gst_rate;
    }

    /// A line counts toward the invoice only once it has a description.
    pub fn is_billable(&self) -> bool {
        !self.description.trim().is_empty()
    }

    /// Check that the numeric fields are in range.
    pub fn validate(&self) -> InvoiceResult<()> {
        validate_quantity(&self.quantity)?;
        validate_unit_price(&self.unit_price)?;
        validate_discount_percent(&self.discount_percent)?;
        Ok(())
    }
}

impl Default for LineItemInput {
    fn default() -> Self {
        Self::new()
    }
}

/// One invoice line with its computed tax breakdown.
///
/// Amounts are rounded to two decimal places when computed; the line total
/// is the plain sum of the rounded parts, so `taxable + cgst + sgst + igst`
/// always reproduces `total_amount` exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemResult {
    /// The input the amounts were computed from
    pub item: LineItemInput,
    /// Amount after discount, before tax
    pub taxable_amount: BigDecimal,
    /// Central GST; zero on inter-state supplies
    pub cgst_amount: BigDecimal,
    /// State GST; zero on inter-state supplies
    pub sgst_amount: BigDecimal,
    /// Integrated GST; zero on intra-state supplies
    pub igst_amount: BigDecimal,
    /// Taxable amount plus all tax heads
    pub total_amount: BigDecimal,
}

impl LineItemResult {
    /// Compute the tax breakdown for a line under the given supply type.
    ///
    /// The gross amount is quantity times unit price; the discount
    /// percentage comes off that, and GST is charged on the remainder.
    /// Intra-state supplies split the rate evenly between CGST and SGST
    /// (half the rate each); inter-state supplies charge the whole rate
    /// as IGST. Rejects negative quantities or prices and discounts
    /// outside 0 to 100.
    pub fn compute(item: LineItemInput, supply_type: SupplyType) -> InvoiceResult<Self> {
        item.validate()?;

        let gross = &item.quantity * &item.unit_price;
        let discount = (&gross * &item.discount_percent) / BigDecimal::from(100);
        let taxable_amount = round_money(&(gross - discount));

        let rate = item.gst_rate.percent();
        let zero = BigDecimal::from(0);
        let (cgst_amount, sgst_amount, igst_amount) = if supply_type.is_inter_state() {
            let igst = round_money(&((&taxable_amount * &rate) / BigDecimal::from(100)));
            (zero.clone(), zero, igst)
        } else {
            let half = round_money(&((&taxable_amount * &rate) / BigDecimal::from(200)));
            (half.clone(), half, zero)
        };

        let total_amount = &taxable_amount + &cgst_amount + &sgst_amount + &igst_amount;

        Ok(Self {
            item,
            taxable_amount,
            cgst_amount,
            sgst_amount,
            igst_amount,
            total_amount,
        })
    }

    /// Recompute this line under a different supply type.
    ///
    /// Used when the customer changes mid-draft and every line has to
    /// switch between the CGST/SGST split and IGST.
    pub fn recompute(self, supply_type: SupplyType) -> InvoiceResult<Self> {
        Self::compute(self.item, supply_type)
    }

    /// Combined tax across all three heads.
    pub fn total_tax(&self) -> BigDecimal {
        &self.cgst_amount + &self.sgst_amount + &self.igst_amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> BigDecimal {
        s.parse().unwrap()
    }

    fn line(quantity: &str, unit_price: &str, discount: &str, rate: GstRate) -> LineItemInput {
        let mut item = LineItemInput::new();
        item.description = "Widget".to_string();
        item.quantity = dec(quantity);
        item.unit_price = dec(unit_price);
        item.discount_percent = dec(discount);
        item.gst_rate = rate;
        item
    }

    #[test]
    fn test_rate_percentages() {
        assert_eq!(GstRate::Zero.percent(), BigDecimal::from(0));
        assert_eq!(GstRate::Five.percent(), BigDecimal::from(5));
        assert_eq!(GstRate::Twelve.percent(), BigDecimal::from(12));
        assert_eq!(GstRate::Eighteen.percent(), BigDecimal::from(18));
        assert_eq!(GstRate::TwentyEight.percent(), BigDecimal::from(28));
    }

    #[test]
    fn test_rate_from_percent() {
        assert_eq!(GstRate::from_percent("18"), Some(GstRate::Eighteen));
        assert_eq!(GstRate::from_percent("0"), Some(GstRate::Zero));
        assert_eq!(GstRate::from_percent("3"), None);
        assert_eq!(GstRate::from_percent("18.0"), None);

        let parsed: Result<GstRate, _> = "7".parse();
        assert!(matches!(
            parsed,
            Err(InvoiceError::UnsupportedGstRate(ref r)) if r == "7"
        ));
    }

    #[test]
    fn test_rate_serialization() {
        let json = serde_json::to_string(&GstRate::TwentyEight).unwrap();
        assert_eq!(json, "\"28\"");

        let rate: GstRate = serde_json::from_str("\"5\"").unwrap();
        assert_eq!(rate, GstRate::Five);
    }

    #[test]
    fn test_every_slab_round_trips_through_its_string() {
        for rate in GstRate::ALL {
            assert_eq!(GstRate::from_percent(rate.as_str()), Some(rate));
            assert_eq!(rate.to_string(), rate.as_str());
        }
    }

    #[test]
    fn test_new_line_defaults() {
        let item = LineItemInput::new();
        assert_eq!(item.quantity, BigDecimal::from(1));
        assert_eq!(item.unit, "NOS");
        assert_eq!(item.unit_price, BigDecimal::from(0));
        assert_eq!(item.discount_percent, BigDecimal::from(0));
        assert_eq!(item.gst_rate, GstRate::Eighteen);
        assert!(!item.is_billable());
    }

    #[test]
    fn test_apply_product_prefills_line() {
        let product = {
            let mut p = Product::new(
                Uuid::new_v4(),
                "Consulting".to_string(),
                "HRS".to_string(),
                dec("1500.00"),
                GstRate::Eighteen,
            );
            p.hsn_sac_code = Some("998313".to_string());
            p.is_service = true;
            p
        };

        let mut item = LineItemInput::new();
        item.quantity = dec("8");
        item.apply_product(&product);

        assert_eq!(item.product_id, Some(product.id));
        assert_eq!(item.description, "Consulting");
        assert_eq!(item.hsn_sac_code, Some("998313".to_string()));
        assert_eq!(item.unit, "HRS");
        assert_eq!(item.unit_price, dec("1500.00"));
        assert_eq!(item.gst_rate, GstRate::Eighteen);
        // Entered quantity survives the prefill.
        assert_eq!(item.quantity, dec("8"));
        assert!(item.is_billable());
    }

    #[test]
    fn test_intra_state_split() {
        let item = line("3", "100.00", "10", GstRate::Eighteen);
        let result = LineItemResult::compute(item, SupplyType::IntraState).unwrap();

        assert_eq!(result.taxable_amount, dec("270.00"));
        assert_eq!(result.cgst_amount, dec("24.30"));
        assert_eq!(result.sgst_amount, dec("24.30"));
        assert_eq!(result.igst_amount, dec("0"));
        assert_eq!(result.total_amount, dec("318.60"));
        assert_eq!(result.total_tax(), dec("48.60"));
    }

    #[test]
    fn test_inter_state_single_head() {
        let item = line("3", "100.00", "10", GstRate::Eighteen);
        let result = LineItemResult::compute(item, SupplyType::InterState).unwrap();

        assert_eq!(result.taxable_amount, dec("270.00"));
        assert_eq!(result.cgst_amount, dec("0"));
        assert_eq!(result.sgst_amount, dec("0"));
        assert_eq!(result.igst_amount, dec("48.60"));
        assert_eq!(result.total_amount, dec("318.60"));
    }

    #[test]
    fn test_zero_rate_charges_no_tax() {
        let item = line("5", "40.00", "0", GstRate::Zero);
        let result = LineItemResult::compute(item, SupplyType::IntraState).unwrap();

        assert_eq!(result.taxable_amount, dec("200.00"));
        assert_eq!(result.cgst_amount, dec("0"));
        assert_eq!(result.sgst_amount, dec("0"));
        assert_eq!(result.igst_amount, dec("0"));
        assert_eq!(result.total_amount, dec("200.00"));
    }

    #[test]
    fn test_full_discount_zeroes_line() {
        let item = line("2", "99.99", "100", GstRate::TwentyEight);
        let result = LineItemResult::compute(item, SupplyType::InterState).unwrap();

        assert_eq!(result.taxable_amount, dec("0.00"));
        assert_eq!(result.igst_amount, dec("0.00"));
        assert_eq!(result.total_amount, dec("0.00"));
    }

    #[test]
    fn test_fractional_quantity() {
        let item = line("2.5", "10.10", "0", GstRate::Five);
        let result = LineItemResult::compute(item, SupplyType::IntraState).unwrap();

        // 25.25 taxable; each half-head is 0.63125, rounded to 0.63.
        assert_eq!(result.taxable_amount, dec("25.25"));
        assert_eq!(result.cgst_amount, dec("0.63"));
        assert_eq!(result.sgst_amount, dec("0.63"));
        assert_eq!(result.total_amount, dec("26.51"));
    }

    #[test]
    fn test_half_even_rounding_on_tax_heads() {
        // 101.00 at 5% intra-state: each head is 2.525, which rounds to
        // the even cent 2.52.
        let item = line("1", "101.00", "0", GstRate::Five);
        let result = LineItemResult::compute(item, SupplyType::IntraState).unwrap();

        assert_eq!(result.cgst_amount, dec("2.52"));
        assert_eq!(result.sgst_amount, dec("2.52"));
        assert_eq!(result.total_amount, dec("106.04"));

        // The same line inter-state rounds once on the full 5.05.
        let item = line("1", "101.00", "0", GstRate::Five);
        let result = LineItemResult::compute(item, SupplyType::InterState).unwrap();

        assert_eq!(result.igst_amount, dec("5.05"));
        assert_eq!(result.total_amount, dec("106.05"));
    }

    #[test]
    fn test_parts_always_sum_to_total() {
        let cases = [
            ("3", "100.00", "10", GstRate::Eighteen),
            ("7", "33.33", "12.5", GstRate::Five),
            ("1", "0.01", "99.99", GstRate::TwentyEight),
            ("12", "1234.56", "0", GstRate::Twelve),
        ];

        for (quantity, price, discount, rate) in cases {
            for supply in [SupplyType::IntraState, SupplyType::InterState] {
                let item = line(quantity, price, discount, rate);
                let result = LineItemResult::compute(item, supply).unwrap();
                let sum = &result.taxable_amount
                    + &result.cgst_amount
                    + &result.sgst_amount
                    + &result.igst_amount;
                assert_eq!(sum, result.total_amount);
            }
        }
    }

    #[test]
    fn test_identical_inputs_identical_results() {
        let item = line("7", "33.33", "12.5", GstRate::Five);
        let first = LineItemResult::compute(item.clone(), SupplyType::IntraState).unwrap();
        let second = LineItemResult::compute(item, SupplyType::IntraState).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_recompute_switches_supply_type() {
        let item = line("3", "100.00", "10", GstRate::Eighteen);
        let intra = LineItemResult::compute(item, SupplyType::IntraState).unwrap();
        let inter = intra.recompute(SupplyType::InterState).unwrap();

        assert_eq!(inter.cgst_amount, dec("0"));
        assert_eq!(inter.igst_amount, dec("48.60"));

        let back = inter.recompute(SupplyType::IntraState).unwrap();
        assert_eq!(back.cgst_amount, dec("24.30"));
        assert_eq!(back.igst_amount, dec("0"));
    }

    #[test]
    fn test_rejects_out_of_range_inputs() {
        let item = line("-1", "100.00", "0", GstRate::Eighteen);
        assert!(matches!(
            LineItemResult::compute(item, SupplyType::IntraState),
            Err(InvoiceError::Validation(_))
        ));

        let item = line("1", "-0.01", "0", GstRate::Eighteen);
        assert!(matches!(
            LineItemResult::compute(item, SupplyType::IntraState),
            Err(InvoiceError::Validation(_))
        ));

        let item = line("1", "100.00", "100.01", GstRate::Eighteen);
        assert!(matches!(
            LineItemResult::compute(item, SupplyType::IntraState),
            Err(InvoiceError::Validation(_))
        ));

        let item = line("1", "100.00", "-5", GstRate::Eighteen);
        assert!(matches!(
            LineItemResult::compute(item, SupplyType::IntraState),
            Err(InvoiceError::Validation(_))
        ));
    }

    #[test]
    fn test_zero_quantity_and_price_are_allowed() {
        let item = line("0", "100.00", "0", GstRate::Eighteen);
        let result = LineItemResult::compute(item, SupplyType::IntraState).unwrap();
        assert_eq!(result.total_amount, dec("0.00"));

        let item = line("4", "0", "50", GstRate::Five);
        let result = LineItemResult::compute(item, SupplyType::InterState).unwrap();
        assert_eq!(result.total_amount, dec("0.00"));
    }
}
