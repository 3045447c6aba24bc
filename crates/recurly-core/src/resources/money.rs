use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::validation::{unit_amount, validate_currency_code};
use crate::xml::{XmlElement, XmlError, XmlWriter};
use crate::ValidationError;

/// Per-currency amounts in cents, e.g.
/// `<unit_amount_in_cents><USD>1000</USD><EUR>800</EUR></unit_amount_in_cents>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyAmounts(BTreeMap<String, i64>);

impl CurrencyAmounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(currency: &str, cents: i64) -> Self {
        Self::new().with(currency, cents)
    }

    pub fn with(mut self, currency: &str, cents: i64) -> Self {
        self.insert(currency, cents);
        self
    }

    pub fn insert(&mut self, currency: &str, cents: i64) {
        self.0.insert(currency.trim().to_ascii_uppercase(), cents);
    }

    pub fn get(&self, currency: &str) -> Option<i64> {
        self.0.get(&currency.trim().to_ascii_uppercase()).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.0.iter().map(|(currency, cents)| (currency.as_str(), *cents))
    }

    pub(crate) fn from_element(element: &XmlElement) -> Result<Self, XmlError> {
        let mut amounts = Self::new();
        for child in element.children() {
            let Some(value) = child.value() else {
                continue;
            };
            let cents = value.parse::<i64>().map_err(|_| XmlError::InvalidValue {
                element: format!("{}/{}", element.name(), child.name()),
                value: value.to_owned(),
                expected: "an integer amount in cents",
            })?;
            amounts.insert(child.name(), cents);
        }
        Ok(amounts)
    }

    pub(crate) fn from_child(element: &XmlElement, name: &str) -> Result<Self, XmlError> {
        element
            .child(name)
            .map(Self::from_element)
            .transpose()
            .map(Option::unwrap_or_default)
    }

    pub(crate) fn write(&self, writer: &mut XmlWriter, name: &str) -> Result<(), XmlError> {
        writer.start(name)?;
        for (currency, cents) in self.iter() {
            writer.element_int(currency, cents)?;
        }
        writer.end(name)
    }

    /// Require at least one amount, each keyed by an ISO currency and within the accepted range.
    pub(crate) fn validate(&self, field: &'static str) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::Empty { field });
        }
        for (currency, cents) in self.iter() {
            validate_currency_code(currency)?;
            unit_amount(field, cents)?;
        }
        Ok(())
    }
}

impl FromIterator<(String, i64)> for CurrencyAmounts {
    fn from_iter<I: IntoIterator<Item = (String, i64)>>(iter: I) -> Self {
        let mut amounts = Self::new();
        for (currency, cents) in iter {
            amounts.insert(&currency, cents);
        }
        amounts
    }
}
