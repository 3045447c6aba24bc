use serde::{Deserialize, Serialize};

use crate::http_client::HttpMethod;
use crate::resources::account::account_path;
use crate::validation::require;
use crate::xml::{XmlElement, XmlError, XmlResource, XmlWriter};
use crate::{Account, Address, RecurlyClient, RecurlyError};

/// Card details. `number` and `verification_value` are write-only; Recurly
/// only ever returns the masked `first_six` / `last_four`.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditCard {
    pub first_six: Option<String>,
    pub last_four: Option<String>,
    pub card_type: Option<String>,
    pub month: Option<u32>,
    pub year: Option<u32>,
    #[serde(skip)]
    pub number: Option<String>,
    #[serde(skip)]
    pub verification_value: Option<String>,
}

impl CreditCard {
    pub fn new(number: impl Into<String>, month: u32, year: u32) -> Self {
        Self {
            number: Some(number.into()),
            month: Some(month),
            year: Some(year),
            ..Self::default()
        }
    }

    pub fn with_verification_value(mut self, cvv: impl Into<String>) -> Self {
        self.verification_value = Some(cvv.into());
        self
    }
}

impl std::fmt::Debug for CreditCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreditCard")
            .field("first_six", &self.first_six)
            .field("last_four", &self.last_four)
            .field("card_type", &self.card_type)
            .field("month", &self.month)
            .field("year", &self.year)
            .field("number", &self.number.as_ref().map(|_| "<redacted>"))
            .field(
                "verification_value",
                &self.verification_value.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard(CreditCard),
    /// Set up through PayPal's hosted flow; read-only here.
    #[serde(rename = "paypal")]
    PayPal { billing_agreement_id: Option<String> },
}

/// Billing details stored on an account. Address lines sit inline, not in `<address>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingInfo {
    pub account_code: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address: Address,
    pub vat_number: Option<String>,
    pub ip_address: Option<String>,
    pub ip_address_country: Option<String>,
    pub payment_method: Option<PaymentMethod>,
}

impl BillingInfo {
    pub fn credit_card(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        card: CreditCard,
    ) -> Self {
        Self {
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
            payment_method: Some(PaymentMethod::CreditCard(card)),
            ..Self::default()
        }
    }

    pub fn with_address(mut self, address: Address) -> Self {
        self.address = address;
        self
    }

    pub fn with_ip_address(mut self, ip_address: impl Into<String>) -> Self {
        self.ip_address = Some(ip_address.into());
        self
    }

    pub(crate) fn write_xml(&self, writer: &mut XmlWriter) -> Result<(), XmlError> {
        if self.ip_address.as_deref().map_or(true, |ip| ip.trim().is_empty()) {
            tracing::warn!("billing info written without ip_address; recording it is strongly recommended");
        }

        writer.start(Self::ELEMENT_NAME)?;
        writer.element_if_provided("first_name", self.first_name.as_deref())?;
        writer.element_if_provided("last_name", self.last_name.as_deref())?;
        self.address.write_fields(writer)?;
        writer.element_if_provided("vat_number", self.vat_number.as_deref())?;
        writer.element_if_provided("ip_address", self.ip_address.as_deref())?;
        if let Some(PaymentMethod::CreditCard(card)) = &self.payment_method {
            writer.element_if_provided("number", card.number.as_deref())?;
            writer.element_if_provided("verification_value", card.verification_value.as_deref())?;
            writer.element_int_if_provided("month", card.month.map(i64::from))?;
            writer.element_int_if_provided("year", card.year.map(i64::from))?;
        }
        writer.end(Self::ELEMENT_NAME)
    }
}

fn read_payment_method(element: &XmlElement) -> Result<Option<PaymentMethod>, XmlError> {
    let kind = element.attr("type").map(str::to_ascii_lowercase);
    let looks_like_card = element.child("last_four").is_some() || element.child("card_type").is_some();
    let looks_like_paypal = element.child("paypal_billing_agreement_id").is_some();

    match kind.as_deref() {
        Some("paypal") => Ok(Some(read_paypal(element))),
        Some("credit_card") => read_card(element).map(Some),
        _ if looks_like_paypal => Ok(Some(read_paypal(element))),
        _ if looks_like_card => read_card(element).map(Some),
        _ => Ok(None),
    }
}

fn read_paypal(element: &XmlElement) -> PaymentMethod {
    PaymentMethod::PayPal {
        billing_agreement_id: element.child_string("paypal_billing_agreement_id"),
    }
}

fn read_card(element: &XmlElement) -> Result<PaymentMethod, XmlError> {
    Ok(PaymentMethod::CreditCard(CreditCard {
        first_six: element.child_string("first_six"),
        last_four: element.child_string("last_four"),
        card_type: element.child_string("card_type"),
        month: element.child_u32("month")?,
        year: element.child_u32("year")?,
        number: None,
        verification_value: None,
    }))
}

impl XmlResource for BillingInfo {
    const ELEMENT_NAME: &'static str = "billing_info";

    fn from_element(element: &XmlElement) -> Result<Self, XmlError> {
        Ok(Self {
            account_code: element.child_href_id("account"),
            first_name: element.child_string("first_name"),
            last_name: element.child_string("last_name"),
            address: Address::read_fields(element),
            vat_number: element.child_string("vat_number"),
            ip_address: element.child_string("ip_address"),
            ip_address_country: element.child_string("ip_address_country"),
            payment_method: read_payment_method(element)?,
        })
    }
}

impl RecurlyClient {
    pub async fn get_billing_info(&self, account_code: &str) -> Result<BillingInfo, RecurlyError> {
        require("account_code", account_code)?;
        self.get_resource(&format!("{}/billing_info", account_path(account_code)))
            .await
    }

    /// Replace the account's billing info by updating the account with it nested.
    pub async fn update_billing_info(
        &self,
        account_code: &str,
        billing_info: &BillingInfo,
    ) -> Result<Account, RecurlyError> {
        self.update_account(&Account::new(account_code), Some(billing_info))
            .await
    }

    pub async fn delete_billing_info(&self, account_code: &str) -> Result<(), RecurlyError> {
        require("account_code", account_code)?;
        self.send_empty(
            HttpMethod::Delete,
            &format!("{}/billing_info", account_path(account_code)),
        )
        .await
    }
}
