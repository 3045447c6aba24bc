use serde::{Deserialize, Serialize};

use crate::validation::{require, unit_amount};
use crate::xml::{XmlElement, XmlError, XmlResource, XmlWriter};
use crate::ValidationError;

/// An add-on attached to one subscription, priced per unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionAddOn {
    pub add_on_code: String,
    pub unit_amount_in_cents: i64,
    pub quantity: u32,
}

impl SubscriptionAddOn {
    pub fn new(add_on_code: impl Into<String>, unit_amount_in_cents: i64) -> Self {
        Self {
            add_on_code: add_on_code.into(),
            unit_amount_in_cents,
            quantity: 1,
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require("add_on_code", &self.add_on_code)?;
        unit_amount("unit_amount_in_cents", self.unit_amount_in_cents)?;
        if self.quantity < 1 {
            return Err(ValidationError::OutOfRange {
                field: "quantity",
                value: i64::from(self.quantity),
                reason: "must be at least 1",
            });
        }
        Ok(())
    }

    /// Quantity is only written when above 1.
    pub(crate) fn write_xml(&self, writer: &mut XmlWriter) -> Result<(), XmlError> {
        writer.start(Self::ELEMENT_NAME)?;
        writer.element("add_on_code", &self.add_on_code)?;
        writer.element_int("unit_amount_in_cents", self.unit_amount_in_cents)?;
        writer.element_int_if_provided(
            "quantity",
            (self.quantity > 1).then_some(i64::from(self.quantity)),
        )?;
        writer.end(Self::ELEMENT_NAME)
    }
}

impl XmlResource for SubscriptionAddOn {
    const ELEMENT_NAME: &'static str = "subscription_add_on";

    fn from_element(element: &XmlElement) -> Result<Self, XmlError> {
        Ok(Self {
            add_on_code: element.child_string("add_on_code").unwrap_or_default(),
            unit_amount_in_cents: element.child_i64("unit_amount_in_cents")?.unwrap_or_default(),
            quantity: element.child_u32("quantity")?.unwrap_or(1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_quantity_is_not_written() {
        let xml = XmlWriter::document(|w| SubscriptionAddOn::new("ip", 150).write_xml(w))
            .expect("must write");
        assert!(!xml.contains("quantity"));

        let xml = XmlWriter::document(|w| SubscriptionAddOn::new("ip", 150).with_quantity(4).write_xml(w))
            .expect("must write");
        assert!(xml.contains("<quantity>4</quantity>"));
    }

    #[test]
    fn validation_bounds() {
        assert!(SubscriptionAddOn::new("ip", 150).with_quantity(0).validate().is_err());
        assert!(SubscriptionAddOn::new("ip", 10_000_001).validate().is_err());
        assert!(SubscriptionAddOn::new("ip", 10_000_000).validate().is_ok());
    }
}
