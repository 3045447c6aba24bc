use serde::{Deserialize, Serialize};

use crate::client::{segment, with_query};
use crate::error::TransactionError;
use crate::http_client::HttpMethod;
use crate::pager::Pager;
use crate::resources::account::account_path;
use crate::validation::require;
use crate::xml::{wire_enum, XmlElement, XmlError, XmlResource};
use crate::{Address, RecurlyClient, RecurlyError, UtcDateTime, ValidationError};

wire_enum! {
    /// Value of the `type` attribute on `<transaction>`, and the `type` list filter.
    pub enum TransactionType {
        Authorization => "authorization",
        Refund => "refund",
        Purchase => "purchase",
    }
}

wire_enum! {
    /// `state` list filter for transactions.
    pub enum TransactionState {
        Successful => "successful",
        Failed => "failed",
        Voided => "voided",
    }
}

/// Gateway check result such as CVV or AVS, e.g. `<cvv_result code="M">Match</cvv_result>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub code: Option<String>,
    pub message: Option<String>,
}

impl CheckResult {
    fn read(element: &XmlElement, name: &str) -> Option<Self> {
        let child = element.child(name)?;
        let result = Self {
            code: child.attr("code").map(str::to_owned).filter(|code| !code.is_empty()),
            message: child.value().map(str::to_owned),
        };
        (result.code.is_some() || result.message.is_some()).then_some(result)
    }
}

/// Card and address on file when the transaction ran.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionBillingDetails {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address: Address,
    pub vat_number: Option<String>,
    pub card_type: Option<String>,
    pub month: Option<u32>,
    pub year: Option<u32>,
    pub first_six: Option<String>,
    pub last_four: Option<String>,
}

impl TransactionBillingDetails {
    fn read(element: &XmlElement) -> Result<Self, XmlError> {
        Ok(Self {
            first_name: element.child_string("first_name"),
            last_name: element.child_string("last_name"),
            address: Address::read_fields(element),
            vat_number: element.child_string("vat_number"),
            card_type: element.child_string("card_type"),
            month: element.child_u32("month")?,
            year: element.child_u32("year")?,
            first_six: element.child_string("first_six"),
            last_four: element.child_string("last_four"),
        })
    }
}

/// Snapshot of the account in `<details>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDetails {
    pub account_code: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company_name: Option<String>,
    pub email: Option<String>,
    pub billing_info: Option<TransactionBillingDetails>,
}

impl TransactionDetails {
    fn read(details: &XmlElement) -> Result<Option<Self>, XmlError> {
        let Some(account) = details.child("account") else {
            return Ok(None);
        };
        Ok(Some(Self {
            account_code: account.child_string("account_code"),
            first_name: account.child_string("first_name"),
            last_name: account.child_string("last_name"),
            company_name: account.child_string("company_name"),
            email: account.child_string("email"),
            billing_info: account
                .child("billing_info")
                .map(TransactionBillingDetails::read)
                .transpose()?,
        }))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub uuid: String,
    pub transaction_type: Option<TransactionType>,
    pub account_code: Option<String>,
    pub invoice_number: Option<u64>,
    pub subscription_uuid: Option<String>,
    pub action: Option<String>,
    pub amount_in_cents: i64,
    pub tax_in_cents: i64,
    pub currency: Option<String>,
    /// Gateway status, e.g. `success`, `declined` or `void`.
    pub status: Option<String>,
    pub reference: Option<String>,
    pub test: bool,
    pub voidable: bool,
    pub refundable: bool,
    pub cvv_result: Option<CheckResult>,
    pub avs_result: Option<CheckResult>,
    pub avs_result_street: Option<String>,
    pub avs_result_postal: Option<String>,
    pub created_at: Option<UtcDateTime>,
    pub transaction_error: Option<TransactionError>,
    pub details: Option<TransactionDetails>,
}

impl XmlResource for Transaction {
    const ELEMENT_NAME: &'static str = "transaction";

    fn from_element(element: &XmlElement) -> Result<Self, XmlError> {
        let invoice_number = match element.child_href_id("invoice") {
            Some(id) => Some(id.parse::<u64>().map_err(|_| XmlError::InvalidValue {
                element: String::from("invoice"),
                value: id.clone(),
                expected: "an invoice number",
            })?),
            None => None,
        };

        Ok(Self {
            uuid: element.child_string("uuid").unwrap_or_default(),
            transaction_type: element.attr_enum("type")?,
            account_code: element.child_href_id("account"),
            invoice_number,
            subscription_uuid: element.child_href_id("subscription"),
            action: element.child_string("action"),
            amount_in_cents: element.child_i64("amount_in_cents")?.unwrap_or_default(),
            tax_in_cents: element.child_i64("tax_in_cents")?.unwrap_or_default(),
            currency: element.child_string("currency"),
            status: element.child_string("status"),
            reference: element.child_string("reference"),
            test: element.child_bool("test")?.unwrap_or(false),
            voidable: element.child_bool("voidable")?.unwrap_or(false),
            refundable: element.child_bool("refundable")?.unwrap_or(false),
            cvv_result: CheckResult::read(element, "cvv_result"),
            avs_result: CheckResult::read(element, "avs_result"),
            avs_result_street: element.child_string("avs_result_street"),
            avs_result_postal: element.child_string("avs_result_postal"),
            created_at: element.child_datetime("created_at")?,
            transaction_error: element
                .child("transaction_error")
                .filter(|error| !error.children().is_empty())
                .map(TransactionError::from_element),
            details: element
                .child("details")
                .map(TransactionDetails::read)
                .transpose()?
                .flatten(),
        })
    }
}

fn transaction_path(uuid: &str) -> String {
    format!("/transactions/{}", segment(uuid))
}

fn list_filters(
    state: Option<TransactionState>,
    transaction_type: Option<TransactionType>,
) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(state) = state {
        params.push(("state", state.to_string()));
    }
    if let Some(transaction_type) = transaction_type {
        params.push(("type", transaction_type.to_string()));
    }
    params
}

impl RecurlyClient {
    pub async fn get_transaction(&self, uuid: &str) -> Result<Transaction, RecurlyError> {
        require("uuid", uuid)?;
        self.get_resource(&transaction_path(uuid)).await
    }

    /// Refund the whole amount. Unsettled transactions are voided instead.
    pub async fn refund_transaction(&self, uuid: &str) -> Result<(), RecurlyError> {
        require("uuid", uuid)?;
        self.send_empty(HttpMethod::Delete, &transaction_path(uuid))
            .await
    }

    /// Refund part of a settled transaction.
    pub async fn refund_transaction_partial(
        &self,
        uuid: &str,
        amount_in_cents: i64,
    ) -> Result<(), RecurlyError> {
        require("uuid", uuid)?;
        if amount_in_cents < 1 {
            return Err(ValidationError::OutOfRange {
                field: "amount_in_cents",
                value: amount_in_cents,
                reason: "a refund must be greater than 0",
            }
            .into());
        }
        let path = with_query(
            &transaction_path(uuid),
            &[("amount_in_cents", amount_in_cents.to_string())],
        );
        self.send_empty(HttpMethod::Delete, &path).await
    }

    /// `None` for either filter lists everything.
    pub fn list_transactions(
        &self,
        state: Option<TransactionState>,
        transaction_type: Option<TransactionType>,
        page_size: u32,
    ) -> Result<Pager<Transaction>, RecurlyError> {
        Ok(Pager::new(
            self.clone(),
            "/transactions",
            list_filters(state, transaction_type),
            page_size,
        )?)
    }

    pub fn list_account_transactions(
        &self,
        account_code: &str,
        state: Option<TransactionState>,
        transaction_type: Option<TransactionType>,
        page_size: u32,
    ) -> Result<Pager<Transaction>, RecurlyError> {
        require("account_code", account_code)?;
        Ok(Pager::new(
            self.clone(),
            &format!("{}/transactions", account_path(account_code)),
            list_filters(state, transaction_type),
            page_size,
        )?)
    }
}
