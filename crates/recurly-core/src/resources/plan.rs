use serde::{Deserialize, Serialize};

use crate::client::segment;
use crate::http_client::HttpMethod;
use crate::pager::Pager;
use crate::validation::{lower_code, max_len, require, MAX_ACCOUNTING_CODE_LEN, MAX_CODE_LEN, MAX_NAME_LEN};
use crate::xml::{wire_enum, XmlElement, XmlError, XmlResource, XmlWriter};
use crate::{CurrencyAmounts, RecurlyClient, RecurlyError, UtcDateTime, ValidationError};

wire_enum! {
    pub enum IntervalUnit {
        Days => "days",
        Months => "months",
    }
}

/// A subscription plan with per-currency pricing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub plan_code: String,
    pub name: String,
    pub description: Option<String>,
    pub success_url: Option<String>,
    pub cancel_url: Option<String>,
    pub display_donation_amounts: Option<bool>,
    pub display_quantity: Option<bool>,
    pub display_phone_number: Option<bool>,
    pub bypass_hosted_confirmation: Option<bool>,
    pub unit_name: Option<String>,
    pub payment_page_tos_link: Option<String>,
    pub plan_interval_length: u32,
    pub plan_interval_unit: IntervalUnit,
    pub trial_interval_length: u32,
    pub trial_interval_unit: IntervalUnit,
    pub accounting_code: Option<String>,
    pub created_at: Option<UtcDateTime>,
    pub unit_amount_in_cents: CurrencyAmounts,
    pub setup_fee_in_cents: CurrencyAmounts,
    pub total_billing_cycles: Option<u32>,
}

impl Plan {
    /// Monthly plan with no trial.
    pub fn new(plan_code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            plan_code: plan_code.into(),
            name: name.into(),
            description: None,
            success_url: None,
            cancel_url: None,
            display_donation_amounts: None,
            display_quantity: None,
            display_phone_number: None,
            bypass_hosted_confirmation: None,
            unit_name: None,
            payment_page_tos_link: None,
            plan_interval_length: 1,
            plan_interval_unit: IntervalUnit::Months,
            trial_interval_length: 0,
            trial_interval_unit: IntervalUnit::Days,
            accounting_code: None,
            created_at: None,
            unit_amount_in_cents: CurrencyAmounts::new(),
            setup_fee_in_cents: CurrencyAmounts::new(),
            total_billing_cycles: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        lower_code("plan_code", &self.plan_code, MAX_CODE_LEN)?;
        require("name", &self.name)?;
        max_len("name", &self.name, MAX_NAME_LEN)?;
        if let Some(code) = self.accounting_code.as_deref().filter(|code| !code.is_empty()) {
            lower_code("accounting_code", code, MAX_ACCOUNTING_CODE_LEN)?;
        }
        if !self.setup_fee_in_cents.is_empty() {
            self.setup_fee_in_cents.validate("setup_fee_in_cents")?;
        }
        self.unit_amount_in_cents.validate("unit_amount_in_cents")
    }

    fn write_xml(&self, writer: &mut XmlWriter) -> Result<(), XmlError> {
        writer.start(Self::ELEMENT_NAME)?;
        writer.element("plan_code", &self.plan_code)?;
        writer.element("name", &self.name)?;
        writer.element_if_provided("description", self.description.as_deref())?;
        writer.element_if_provided("success_url", self.success_url.as_deref())?;
        writer.element_if_provided("cancel_url", self.cancel_url.as_deref())?;
        writer.element_bool_if_provided("display_quantity", self.display_quantity)?;
        writer.element_if_provided("unit_name", self.unit_name.as_deref())?;
        writer.element_int("plan_interval_length", i64::from(self.plan_interval_length))?;
        writer.element_enum("plan_interval_unit", self.plan_interval_unit)?;
        writer.element_int("trial_interval_length", i64::from(self.trial_interval_length))?;
        writer.element_enum("trial_interval_unit", self.trial_interval_unit)?;
        writer.element_if_provided("accounting_code", self.accounting_code.as_deref())?;
        self.unit_amount_in_cents.write(writer, "unit_amount_in_cents")?;
        if !self.setup_fee_in_cents.is_empty() {
            self.setup_fee_in_cents.write(writer, "setup_fee_in_cents")?;
        }
        writer.element_int_if_provided(
            "total_billing_cycles",
            self.total_billing_cycles.map(i64::from),
        )?;
        writer.end(Self::ELEMENT_NAME)
    }
}

impl XmlResource for Plan {
    const ELEMENT_NAME: &'static str = "plan";

    fn from_element(element: &XmlElement) -> Result<Self, XmlError> {
        let mut plan = Self::new(
            element.child_string("plan_code").unwrap_or_default(),
            element.child_string("name").unwrap_or_default(),
        );
        plan.description = element.child_string("description");
        plan.success_url = element.child_string("success_url");
        plan.cancel_url = element.child_string("cancel_url");
        plan.display_donation_amounts = element.child_bool("display_donation_amounts")?;
        plan.display_quantity = element.child_bool("display_quantity")?;
        plan.display_phone_number = element.child_bool("display_phone_number")?;
        plan.bypass_hosted_confirmation = element.child_bool("bypass_hosted_confirmation")?;
        plan.unit_name = element.child_string("unit_name");
        plan.payment_page_tos_link = element.child_string("payment_page_tos_link");
        if let Some(length) = element.child_u32("plan_interval_length")? {
            plan.plan_interval_length = length;
        }
        if let Some(unit) = element.child_enum("plan_interval_unit")? {
            plan.plan_interval_unit = unit;
        }
        if let Some(length) = element.child_u32("trial_interval_length")? {
            plan.trial_interval_length = length;
        }
        if let Some(unit) = element.child_enum("trial_interval_unit")? {
            plan.trial_interval_unit = unit;
        }
        plan.accounting_code = element.child_string("accounting_code");
        plan.created_at = element.child_datetime("created_at")?;
        plan.unit_amount_in_cents = CurrencyAmounts::from_child(element, "unit_amount_in_cents")?;
        plan.setup_fee_in_cents = CurrencyAmounts::from_child(element, "setup_fee_in_cents")?;
        plan.total_billing_cycles = element.child_u32("total_billing_cycles")?;
        Ok(plan)
    }
}

pub(crate) fn plan_path(plan_code: &str) -> String {
    format!("/plans/{}", segment(plan_code))
}

impl RecurlyClient {
    pub async fn get_plan(&self, plan_code: &str) -> Result<Plan, RecurlyError> {
        require("plan_code", plan_code)?;
        self.get_resource(&plan_path(plan_code)).await
    }

    pub async fn create_plan(&self, plan: &Plan) -> Result<Plan, RecurlyError> {
        plan.validate()?;
        let body = XmlWriter::document(|w| plan.write_xml(w))?;
        self.send_resource(HttpMethod::Post, "/plans", Some(body)).await
    }

    pub async fn update_plan(&self, plan: &Plan) -> Result<Plan, RecurlyError> {
        plan.validate()?;
        let body = XmlWriter::document(|w| plan.write_xml(w))?;
        self.send_resource(HttpMethod::Put, &plan_path(&plan.plan_code), Some(body))
            .await
    }

    pub async fn delete_plan(&self, plan_code: &str) -> Result<(), RecurlyError> {
        require("plan_code", plan_code)?;
        self.send_empty(HttpMethod::Delete, &plan_path(plan_code)).await
    }

    pub fn list_plans(&self, page_size: u32) -> Result<Pager<Plan>, RecurlyError> {
        Ok(Pager::new(self.clone(), "/plans", Vec::new(), page_size)?)
    }
}
