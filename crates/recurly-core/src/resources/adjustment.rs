use serde::{Deserialize, Serialize};

use crate::client::segment;
use crate::http_client::HttpMethod;
use crate::pager::Pager;
use crate::resources::account::account_path;
use crate::validation::{
    max_len, require, unit_amount, validate_currency_code, MAX_ACCOUNTING_CODE_LEN,
};
use crate::xml::{wire_enum, XmlElement, XmlError, XmlResource, XmlWriter};
use crate::{RecurlyClient, RecurlyError, UtcDateTime, ValidationError};

wire_enum! {
    pub enum AdjustmentType {
        Charge => "charge",
        Credit => "credit",
    }
}

wire_enum! {
    pub enum AdjustmentState {
        Active => "active",
        Pending => "pending",
        Invoiced => "invoiced",
    }
}

/// A one-off charge (positive) or credit (negative) on an account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adjustment {
    pub uuid: Option<String>,
    pub adjustment_type: Option<AdjustmentType>,
    pub account_code: Option<String>,
    pub description: Option<String>,
    pub accounting_code: Option<String>,
    pub origin: Option<String>,
    pub unit_amount_in_cents: i64,
    pub quantity: u32,
    pub discount_in_cents: Option<i64>,
    pub tax_in_cents: Option<i64>,
    pub total_in_cents: Option<i64>,
    pub currency: Option<String>,
    pub taxable: Option<bool>,
    pub product_code: Option<String>,
    pub start_date: Option<UtcDateTime>,
    pub end_date: Option<UtcDateTime>,
    pub created_at: Option<UtcDateTime>,
}

impl XmlResource for Adjustment {
    const ELEMENT_NAME: &'static str = "adjustment";

    fn from_element(element: &XmlElement) -> Result<Self, XmlError> {
        Ok(Self {
            uuid: element.child_string("uuid"),
            adjustment_type: element.attr_enum("type")?,
            account_code: element.child_href_id("account"),
            description: element.child_string("description"),
            accounting_code: element.child_string("accounting_code"),
            origin: element.child_string("origin"),
            unit_amount_in_cents: element.child_i64("unit_amount_in_cents")?.unwrap_or_default(),
            quantity: element.child_u32("quantity")?.unwrap_or(1),
            discount_in_cents: element.child_i64("discount_in_cents")?,
            tax_in_cents: element.child_i64("tax_in_cents")?,
            total_in_cents: element.child_i64("total_in_cents")?,
            currency: element.child_string("currency"),
            taxable: element.child_bool("taxable")?,
            product_code: element.child_string("product_code"),
            start_date: element.child_datetime("start_date")?,
            end_date: element.child_datetime("end_date")?,
            created_at: element.child_datetime("created_at")?,
        })
    }
}

/// Parameters for [`RecurlyClient::charge_account`] and [`RecurlyClient::credit_account`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAdjustment {
    pub unit_amount_in_cents: i64,
    pub description: Option<String>,
    pub accounting_code: Option<String>,
    /// Falls back to the client's default currency.
    pub currency: Option<String>,
    pub quantity: u32,
}

impl NewAdjustment {
    pub fn new(unit_amount_in_cents: i64, description: impl Into<String>) -> Self {
        Self {
            unit_amount_in_cents,
            description: Some(description.into()),
            accounting_code: None,
            currency: None,
            quantity: 1,
        }
    }

    pub fn with_accounting_code(mut self, accounting_code: impl Into<String>) -> Self {
        self.accounting_code = Some(accounting_code.into());
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    fn validate(&self) -> Result<(), ValidationError> {
        unit_amount("unit_amount_in_cents", self.unit_amount_in_cents)?;
        if self.quantity < 1 {
            return Err(ValidationError::OutOfRange {
                field: "quantity",
                value: i64::from(self.quantity),
                reason: "must be at least 1",
            });
        }
        if let Some(code) = &self.accounting_code {
            max_len("accounting_code", code, MAX_ACCOUNTING_CODE_LEN)?;
        }
        Ok(())
    }

    fn write_xml(&self, writer: &mut XmlWriter, currency: &str) -> Result<(), XmlError> {
        writer.start(Adjustment::ELEMENT_NAME)?;
        writer.element("currency", currency)?;
        writer.element_int("unit_amount_in_cents", self.unit_amount_in_cents)?;
        writer.element_if_provided("description", self.description.as_deref())?;
        writer.element_int_if_provided(
            "quantity",
            (self.quantity > 1).then_some(i64::from(self.quantity)),
        )?;
        writer.element_if_provided("accounting_code", self.accounting_code.as_deref())?;
        writer.end(Adjustment::ELEMENT_NAME)
    }
}

impl RecurlyClient {
    /// Charge the account; the amount must be positive.
    pub async fn charge_account(
        &self,
        account_code: &str,
        adjustment: &NewAdjustment,
    ) -> Result<Adjustment, RecurlyError> {
        if adjustment.unit_amount_in_cents < 1 {
            return Err(ValidationError::OutOfRange {
                field: "unit_amount_in_cents",
                value: adjustment.unit_amount_in_cents,
                reason: "a charge must be greater than 0",
            }
            .into());
        }
        self.create_adjustment(account_code, adjustment).await
    }

    /// Credit the account; the amount must be negative.
    pub async fn credit_account(
        &self,
        account_code: &str,
        adjustment: &NewAdjustment,
    ) -> Result<Adjustment, RecurlyError> {
        if adjustment.unit_amount_in_cents > -1 {
            return Err(ValidationError::OutOfRange {
                field: "unit_amount_in_cents",
                value: adjustment.unit_amount_in_cents,
                reason: "a credit must be less than 0",
            }
            .into());
        }
        self.create_adjustment(account_code, adjustment).await
    }

    async fn create_adjustment(
        &self,
        account_code: &str,
        adjustment: &NewAdjustment,
    ) -> Result<Adjustment, RecurlyError> {
        require("account_code", account_code)?;
        adjustment.validate()?;
        let currency = match adjustment.currency.as_deref() {
            Some(currency) if !currency.trim().is_empty() => validate_currency_code(currency)?,
            _ => self.default_currency().to_owned(),
        };

        let body = XmlWriter::document(|w| adjustment.write_xml(w, &currency))?;
        self.send_resource(
            HttpMethod::Post,
            &format!("{}/adjustments", account_path(account_code)),
            Some(body),
        )
        .await
    }

    /// Remove an adjustment that has not been invoiced yet.
    pub async fn delete_adjustment(&self, uuid: &str) -> Result<(), RecurlyError> {
        require("uuid", uuid)?;
        self.send_empty(HttpMethod::Delete, &format!("/adjustments/{}", segment(uuid)))
            .await
    }

    /// `None` lists both charges and credits; `Active` is the default state and sends no filter.
    pub fn list_account_adjustments(
        &self,
        account_code: &str,
        adjustment_type: Option<AdjustmentType>,
        state: AdjustmentState,
        page_size: u32,
    ) -> Result<Pager<Adjustment>, RecurlyError> {
        require("account_code", account_code)?;
        let mut params = Vec::new();
        if let Some(adjustment_type) = adjustment_type {
            params.push(("type", adjustment_type.to_string()));
        }
        if state != AdjustmentState::Active {
            params.push(("state", state.to_string()));
        }
        Ok(Pager::new(
            self.clone(),
            &format!("{}/adjustments", account_path(account_code)),
            params,
            page_size,
        )?)
    }
}
