//! Order draft validation.
//!
//! Purely local and synchronous: a draft that fails any rule never reaches
//! the payment orchestrator.

use serde::Deserialize;
use std::collections::HashMap;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::aggregates::order::Address;

/// The raw checkout form payload. Card fields are transient input and are
/// never persisted or tokenized.
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    #[validate(length(min = 2, message = "Full Name is required"))]
    pub full_name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 5, message = "Address is required"))]
    pub address: String,
    #[validate(length(min = 2, message = "City is required"))]
    pub city: String,
    #[validate(length(min = 4, message = "ZIP code is required"))]
    pub zip: String,
    #[validate(length(min = 16, max = 19, message = "Invalid card number"))]
    pub card_number: String,
    #[validate(custom = "expiry_shape")]
    pub expiry: String,
    #[validate(length(min = 3, message = "CVC required"))]
    pub cvc: String,
}

impl OrderDraft {
    /// Returns the draft unchanged or a field → message map keyed by the
    /// wire (camelCase) field names.
    pub fn validated(self) -> Result<Self, HashMap<String, String>> {
        match self.validate() {
            Ok(()) => Ok(self),
            Err(errors) => Err(field_messages(&errors)),
        }
    }

    /// Shipping address for the order record. State and country are demo
    /// placeholders; the form does not collect them.
    pub fn shipping_address(&self) -> Address {
        Address {
            full_name: self.full_name.clone(),
            street: self.address.clone(),
            city: self.city.clone(),
            state: "NY".into(),
            zip: self.zip.clone(),
            country: "USA".into(),
        }
    }
}

// MM/YY: five chars, separator in the middle, digits elsewhere.
fn expiry_shape(value: &str) -> Result<(), ValidationError> {
    let bytes = value.as_bytes();
    let well_formed = bytes.len() == 5
        && bytes[2] == b'/'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 2 || b.is_ascii_digit());
    if well_formed {
        Ok(())
    } else {
        let mut error = ValidationError::new("expiry");
        error.message = Some("Format MM/YY".into());
        Err(error)
    }
}

/// Flattens `ValidationErrors` to one human-readable message per field.
pub fn field_messages(errors: &ValidationErrors) -> HashMap<String, String> {
    errors
        .field_errors()
        .iter()
        .map(|(field, field_errors)| {
            let message = field_errors
                .first()
                .and_then(|e| e.message.as_ref())
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{field} is invalid"));
            (camel_case(field), message)
        })
        .collect()
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> OrderDraft {
        OrderDraft {
            full_name: "John Doe".into(),
            email: "user@nexus.com".into(),
            address: "123 Main St".into(),
            city: "New York".into(),
            zip: "10001".into(),
            card_number: "4242424242424242".into(),
            expiry: "12/27".into(),
            cvc: "123".into(),
        }
    }

    #[test]
    fn test_valid_draft_passes() {
        assert!(valid_draft().validated().is_ok());
    }

    #[test]
    fn test_errors_keyed_by_wire_field_names() {
        let mut draft = valid_draft();
        draft.full_name = "J".into();
        draft.card_number = "1234".into();
        let errors = draft.validated().unwrap_err();
        assert_eq!(errors.get("fullName").map(String::as_str), Some("Full Name is required"));
        assert_eq!(errors.get("cardNumber").map(String::as_str), Some("Invalid card number"));
    }

    #[test]
    fn test_email_syntax() {
        let mut draft = valid_draft();
        draft.email = "not-an-email".into();
        let errors = draft.validated().unwrap_err();
        assert_eq!(errors.get("email").map(String::as_str), Some("Invalid email address"));
    }

    #[test]
    fn test_expiry_shape() {
        for bad in ["1227", "12-27", "1/277", "ab/cd", "12/2"] {
            let mut draft = valid_draft();
            draft.expiry = bad.into();
            let errors = draft.validated().unwrap_err();
            assert_eq!(errors.get("expiry").map(String::as_str), Some("Format MM/YY"));
        }
    }

    #[test]
    fn test_card_number_upper_bound() {
        let mut draft = valid_draft();
        draft.card_number = "4".repeat(20);
        assert!(draft.validated().is_err());
    }

    #[test]
    fn test_shipping_address_placeholders() {
        let address = valid_draft().shipping_address();
        assert_eq!(address.state, "NY");
        assert_eq!(address.country, "USA");
        assert_eq!(address.street, "123 Main St");
    }
}
