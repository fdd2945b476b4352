//! Validation utilities

use crate::invoice::draft::InvoiceDraft;
use crate::traits::*;
use crate::types::*;
use crate::utils::money::is_negative;
use bigdecimal::BigDecimal;

/// Validate that a quantity is not negative
pub fn validate_quantity(quantity: &BigDecimal) -> InvoiceResult<()> {
    if is_negative(quantity) {
        Err(InvoiceError::Validation(
            "Quantity cannot be negative".to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Validate that a unit price is not negative
pub fn validate_unit_price(unit_price: &BigDecimal) -> InvoiceResult<()> {
    if is_negative(unit_price) {
        Err(InvoiceError::Validation(
            "Unit price cannot be negative".to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Validate that a discount percentage lies between 0 and 100
pub fn validate_discount_percent(discount_percent: &BigDecimal) -> InvoiceResult<()> {
    if is_negative(discount_percent) || *discount_percent > BigDecimal::from(100) {
        Err(InvoiceError::Validation(
            "Discount must be between 0 and 100 percent".to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Validate that a line description is valid
pub fn validate_line_description(description: &str) -> InvoiceResult<()> {
    if description.trim().is_empty() {
        return Err(InvoiceError::Validation(
            "Line description cannot be empty".to_string(),
        ));
    }

    if description.len() > 500 {
        return Err(InvoiceError::Validation(
            "Line description cannot exceed 500 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validate an invoice number prefix
pub fn validate_invoice_prefix(prefix: &str) -> InvoiceResult<()> {
    if prefix.trim().is_empty() {
        return Err(InvoiceError::Validation(
            "Invoice prefix cannot be empty".to_string(),
        ));
    }

    if prefix.len() > 10 {
        return Err(InvoiceError::Validation(
            "Invoice prefix cannot exceed 10 characters".to_string(),
        ));
    }

    if !prefix.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(InvoiceError::Validation(
            "Invoice prefix can only contain letters and digits".to_string(),
        ));
    }

    Ok(())
}

/// Validate the structure of a GSTIN (GST registration number).
///
/// Expects the 15-character layout: two-digit state code, five letters and
/// four digits of the PAN, the PAN check letter, entity number, the
/// literal 'Z', and a checksum character.
pub fn validate_gstin(gstin: &str) -> InvoiceResult<()> {
    let chars: Vec<char> = gstin.chars().collect();

    if chars.len() != 15 {
        return Err(InvoiceError::Validation(
            "GSTIN must be exactly 15 characters".to_string(),
        ));
    }

    let entity_char = chars[12];
    let structure_ok = chars[0].is_ascii_digit()
        && chars[1].is_ascii_digit()
        && chars[2..7].iter().all(|c| c.is_ascii_uppercase())
        && chars[7..11].iter().all(|c| c.is_ascii_digit())
        && chars[11].is_ascii_uppercase()
        && (entity_char.is_ascii_uppercase() || ('1'..='9').contains(&entity_char))
        && chars[13] == 'Z'
        && (chars[14].is_ascii_uppercase() || chars[14].is_ascii_digit());

    if !structure_ok {
        return Err(InvoiceError::Validation(
            "GSTIN is not in a valid format".to_string(),
        ));
    }

    Ok(())
}

/// Validate the structure of a PAN (Permanent Account Number).
///
/// Expects five letters, four digits, and a final check letter.
pub fn validate_pan(pan: &str) -> InvoiceResult<()> {
    let chars: Vec<char> = pan.chars().collect();

    let structure_ok = chars.len() == 10
        && chars[0..5].iter().all(|c| c.is_ascii_uppercase())
        && chars[5..9].iter().all(|c| c.is_ascii_digit())
        && chars[9].is_ascii_uppercase();

    if !structure_ok {
        return Err(InvoiceError::Validation(
            "PAN is not in a valid format".to_string(),
        ));
    }

    Ok(())
}

/// Validate an Indian postal PIN code (six digits, not starting with zero)
pub fn validate_pincode(pincode: &str) -> InvoiceResult<()> {
    let chars: Vec<char> = pincode.chars().collect();

    let structure_ok = chars.len() == 6
        && ('1'..='9').contains(&chars[0])
        && chars[1..].iter().all(|c| c.is_ascii_digit());

    if !structure_ok {
        return Err(InvoiceError::Validation(
            "PIN code must be six digits".to_string(),
        ));
    }

    Ok(())
}

/// Enhanced validator with structural checks on registration numbers,
/// addresses, and dates
pub struct EnhancedInvoiceValidator;

impl InvoiceValidator for EnhancedInvoiceValidator {
    fn validate_draft(&self, draft: &InvoiceDraft) -> InvoiceResult<()> {
        // Basic validation
        DefaultInvoiceValidator.validate_draft(draft)?;

        // Enhanced validations
        if let Some(due) = draft.due_date() {
            if due < draft.invoice_date() {
                return Err(InvoiceError::Validation(
                    "Due date cannot be before the invoice date".to_string(),
                ));
            }
        }

        for line in draft.billable_lines() {
            validate_line_description(&line.item.description)?;
            line.item.validate()?;
        }

        Ok(())
    }

    fn validate_business_profile(&self, profile: &BusinessProfile) -> InvoiceResult<()> {
        DefaultInvoiceValidator.validate_business_profile(profile)?;
        validate_invoice_prefix(&profile.invoice_prefix)?;

        if let Some(ref gstin) = profile.gstin {
            validate_gstin(gstin)?;

            // A GSTIN is issued in the state of registration, so its
            // numeric prefix has to agree with the profile's home state.
            if let Some(state) = profile.state {
                if !gstin.starts_with(state.gst_code()) {
                    return Err(InvoiceError::Validation(format!(
                        "GSTIN state code does not match {}",
                        state.name()
                    )));
                }
            }
        }
        if let Some(ref pan) = profile.pan {
            validate_pan(pan)?;
        }
        if let Some(ref pincode) = profile.pincode {
            validate_pincode(pincode)?;
        }

        Ok(())
    }

    fn validate_customer(&self, customer: &Customer) -> InvoiceResult<()> {
        DefaultInvoiceValidator.validate_customer(customer)?;

        if let Some(ref gstin) = customer.gstin {
            validate_gstin(gstin)?;
        }
        if let Some(ref pan) = customer.pan {
            validate_pan(pan)?;
        }
        if let Some(ref pincode) = customer.pincode {
            validate_pincode(pincode)?;
        }

        Ok(())
    }

    fn validate_product(&self, product: &Product) -> InvoiceResult<()> {
        DefaultInvoiceValidator.validate_product(product)?;
        validate_unit_price(&product.unit_price)?;

        Ok(())
    }
}
