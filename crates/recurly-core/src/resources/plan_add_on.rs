use serde::{Deserialize, Serialize};

use crate::client::segment;
use crate::http_client::HttpMethod;
use crate::pager::Pager;
use crate::resources::plan::plan_path;
use crate::validation::{lower_code, max_len, require, MAX_ACCOUNTING_CODE_LEN, MAX_CODE_LEN};
use crate::xml::{XmlElement, XmlError, XmlResource, XmlWriter};
use crate::{CurrencyAmounts, RecurlyClient, RecurlyError, UtcDateTime, ValidationError};

/// An optional extra sold alongside a plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanAddOn {
    pub add_on_code: String,
    pub plan_code: Option<String>,
    pub name: String,
    pub display_quantity_on_hosted_page: Option<bool>,
    pub default_quantity: Option<u32>,
    pub unit_amount_in_cents: CurrencyAmounts,
    pub accounting_code: Option<String>,
    pub created_at: Option<UtcDateTime>,
}

impl PlanAddOn {
    pub fn new(
        add_on_code: impl Into<String>,
        name: impl Into<String>,
        unit_amount_in_cents: CurrencyAmounts,
    ) -> Self {
        Self {
            add_on_code: add_on_code.into(),
            name: name.into(),
            unit_amount_in_cents,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require("add_on_code", &self.add_on_code)?;
        max_len("add_on_code", &self.add_on_code, MAX_CODE_LEN)?;
        self.unit_amount_in_cents.validate("unit_amount_in_cents")?;
        if let Some(code) = self.accounting_code.as_deref().filter(|code| !code.is_empty()) {
            lower_code("accounting_code", code, MAX_ACCOUNTING_CODE_LEN)?;
        }
        Ok(())
    }

    fn write_xml(&self, writer: &mut XmlWriter) -> Result<(), XmlError> {
        writer.start(Self::ELEMENT_NAME)?;
        writer.element("add_on_code", &self.add_on_code)?;
        writer.element("name", &self.name)?;
        self.unit_amount_in_cents.write(writer, "unit_amount_in_cents")?;
        writer.element_int("default_quantity", i64::from(self.default_quantity.unwrap_or(1)))?;
        writer.element_bool(
            "display_quantity_on_hosted_page",
            self.display_quantity_on_hosted_page.unwrap_or(false),
        )?;
        writer.element_if_provided("accounting_code", self.accounting_code.as_deref())?;
        writer.end(Self::ELEMENT_NAME)
    }
}

impl XmlResource for PlanAddOn {
    const ELEMENT_NAME: &'static str = "add_on";

    fn from_element(element: &XmlElement) -> Result<Self, XmlError> {
        Ok(Self {
            add_on_code: element.child_string("add_on_code").unwrap_or_default(),
            plan_code: element.child_href_id("plan"),
            name: element.child_string("name").unwrap_or_default(),
            display_quantity_on_hosted_page: element.child_bool("display_quantity_on_hosted_page")?,
            default_quantity: element.child_u32("default_quantity")?,
            unit_amount_in_cents: CurrencyAmounts::from_child(element, "unit_amount_in_cents")?,
            accounting_code: element.child_string("accounting_code"),
            created_at: element.child_datetime("created_at")?,
        })
    }
}

fn add_ons_path(plan_code: &str) -> String {
    format!("{}/add_ons", plan_path(plan_code))
}

fn add_on_path(plan_code: &str, add_on_code: &str) -> String {
    format!("{}/{}", add_ons_path(plan_code), segment(add_on_code))
}

impl RecurlyClient {
    pub async fn get_plan_add_on(
        &self,
        plan_code: &str,
        add_on_code: &str,
    ) -> Result<PlanAddOn, RecurlyError> {
        require("plan_code", plan_code)?;
        require("add_on_code", add_on_code)?;
        self.get_resource(&add_on_path(plan_code, add_on_code)).await
    }

    pub async fn create_plan_add_on(
        &self,
        plan_code: &str,
        add_on: &PlanAddOn,
    ) -> Result<PlanAddOn, RecurlyError> {
        require("plan_code", plan_code)?;
        add_on.validate()?;
        let body = XmlWriter::document(|w| add_on.write_xml(w))?;
        self.send_resource(HttpMethod::Post, &add_ons_path(plan_code), Some(body))
            .await
    }

    pub async fn update_plan_add_on(
        &self,
        plan_code: &str,
        add_on: &PlanAddOn,
    ) -> Result<PlanAddOn, RecurlyError> {
        require("plan_code", plan_code)?;
        add_on.validate()?;
        let body = XmlWriter::document(|w| add_on.write_xml(w))?;
        self.send_resource(
            HttpMethod::Put,
            &add_on_path(plan_code, &add_on.add_on_code),
            Some(body),
        )
        .await
    }

    pub async fn delete_plan_add_on(
        &self,
        plan_code: &str,
        add_on_code: &str,
    ) -> Result<(), RecurlyError> {
        require("plan_code", plan_code)?;
        require("add_on_code", add_on_code)?;
        self.send_empty(HttpMethod::Delete, &add_on_path(plan_code, add_on_code))
            .await
    }

    pub fn list_plan_add_ons(
        &self,
        plan_code: &str,
        page_size: u32,
    ) -> Result<Pager<PlanAddOn>, RecurlyError> {
        require("plan_code", plan_code)?;
        Ok(Pager::new(
            self.clone(),
            &add_ons_path(plan_code),
            Vec::new(),
            page_size,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::test_support::{test_client, ScriptedHttpClient};

    const ADD_ON_XML: &str = r#"<add_on href="https://acme.recurly.com/v2/plans/gold/add_ons/ipaddresses">
  <plan href="https://acme.recurly.com/v2/plans/gold"/>
  <add_on_code>ipaddresses</add_on_code>
  <name>IP Addresses</name>
  <display_quantity_on_hosted_page type="boolean">false</display_quantity_on_hosted_page>
  <default_quantity type="integer">1</default_quantity>
  <unit_amount_in_cents>
    <USD type="integer">200</USD>
  </unit_amount_in_cents>
  <accounting_code nil="nil"></accounting_code>
  <created_at type="datetime">2011-06-28T12:34:56Z</created_at>
</add_on>"#;

    #[test]
    fn reads_add_on_with_plan_href() {
        let add_on = PlanAddOn::from_xml(ADD_ON_XML).expect("must parse");
        assert_eq!(add_on.plan_code.as_deref(), Some("gold"));
        assert_eq!(add_on.unit_amount_in_cents.get("USD"), Some(200));
        assert_eq!(add_on.default_quantity, Some(1));
    }

    #[tokio::test]
    async fn update_targets_the_add_on_path() {
        let http = Arc::new(ScriptedHttpClient::xml(200, ADD_ON_XML));
        let client = test_client(http.clone());
        let add_on = PlanAddOn::new("ipaddresses", "IP Addresses", CurrencyAmounts::single("USD", 200));

        client.update_plan_add_on("gold", &add_on).await.expect("updated");

        let request = http.only_request();
        assert_eq!(request.method, HttpMethod::Put);
        assert_eq!(
            request.url,
            "https://acme.recurly.com/v2/plans/gold/add_ons/ipaddresses"
        );
        let body = request.body.expect("body");
        assert!(body.contains("<default_quantity>1</default_quantity>"));
        assert!(body.contains("<display_quantity_on_hosted_page>false</display_quantity_on_hosted_page>"));
    }

    #[test]
    fn validation_caps_amount_and_code_length() {
        let too_much = PlanAddOn::new("ip", "IP", CurrencyAmounts::single("USD", 10_000_001));
        assert!(matches!(too_much.validate(), Err(ValidationError::OutOfRange { .. })));

        let long_code = PlanAddOn::new("a".repeat(51), "IP", CurrencyAmounts::single("USD", 1));
        assert!(matches!(long_code.validate(), Err(ValidationError::TooLong { .. })));

        let no_amount = PlanAddOn::new("ip", "IP", CurrencyAmounts::new());
        assert!(matches!(no_amount.validate(), Err(ValidationError::Empty { .. })));
    }
}
