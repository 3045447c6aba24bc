use serde::{Deserialize, Serialize};

use crate::http_client::HttpMethod;
use crate::pager::Pager;
use crate::resources::account::account_path;
use crate::validation::require;
use crate::xml::{wire_enum, XmlElement, XmlError, XmlResource};
use crate::{RecurlyClient, RecurlyError, Transaction, UtcDateTime};

wire_enum! {
    pub enum InvoiceState {
        Open => "open",
        Collected => "collected",
        Failed => "failed",
        PastDue => "past_due",
    }
}

/// Error symbol Recurly answers with when an account has nothing to invoice.
const NOTHING_TO_INVOICE: &str = "will_not_invoice";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub uuid: String,
    pub state: Option<InvoiceState>,
    pub invoice_number: u64,
    pub po_number: Option<String>,
    pub vat_number: Option<String>,
    pub subtotal_in_cents: i64,
    pub tax_in_cents: i64,
    pub total_in_cents: i64,
    pub currency: Option<String>,
    pub created_at: Option<UtcDateTime>,
    pub account_code: Option<String>,
    pub transactions: Vec<Transaction>,
}

impl XmlResource for Invoice {
    const ELEMENT_NAME: &'static str = "invoice";

    fn from_element(element: &XmlElement) -> Result<Self, XmlError> {
        let transactions = match element.child("transactions") {
            Some(list) => list
                .children_named(Transaction::ELEMENT_NAME)
                .map(Transaction::from_element)
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };

        Ok(Self {
            uuid: element.child_string("uuid").unwrap_or_default(),
            state: element.child_enum("state")?,
            invoice_number: element.child_u64("invoice_number")?.unwrap_or_default(),
            po_number: element.child_string("po_number"),
            vat_number: element.child_string("vat_number"),
            subtotal_in_cents: element.child_i64("subtotal_in_cents")?.unwrap_or_default(),
            tax_in_cents: element.child_i64("tax_in_cents")?.unwrap_or_default(),
            total_in_cents: element.child_i64("total_in_cents")?.unwrap_or_default(),
            currency: element.child_string("currency"),
            created_at: element.child_datetime("created_at")?,
            account_code: element.child_href_id("account"),
            transactions,
        })
    }
}

pub(crate) fn invoice_path(invoice_number: u64) -> String {
    format!("/invoices/{invoice_number}")
}

fn state_filter(state: Option<InvoiceState>) -> Vec<(&'static str, String)> {
    state
        .map(|state| vec![("state", state.to_string())])
        .unwrap_or_default()
}

impl RecurlyClient {
    pub async fn get_invoice(&self, invoice_number: u64) -> Result<Invoice, RecurlyError> {
        self.get_resource(&invoice_path(invoice_number)).await
    }

    pub async fn mark_invoice_successful(&self, invoice_number: u64) -> Result<Invoice, RecurlyError> {
        self.send_resource(
            HttpMethod::Put,
            &format!("{}/mark_successful", invoice_path(invoice_number)),
            None,
        )
        .await
    }

    pub async fn mark_invoice_failed(&self, invoice_number: u64) -> Result<Invoice, RecurlyError> {
        self.send_resource(
            HttpMethod::Put,
            &format!("{}/mark_failed", invoice_path(invoice_number)),
            None,
        )
        .await
    }

    /// Invoice every uninvoiced charge on the account.
    ///
    /// Returns `Ok(None)` when the account has no pending charges.
    pub async fn invoice_pending_charges(
        &self,
        account_code: &str,
    ) -> Result<Option<Invoice>, RecurlyError> {
        require("account_code", account_code)?;
        let path = format!("{}/invoices", account_path(account_code));
        match self.send_resource(HttpMethod::Post, &path, None).await {
            Ok(invoice) => Ok(Some(invoice)),
            Err(RecurlyError::Rejected { errors, .. })
                if errors.iter().any(|error| error.symbol == NOTHING_TO_INVOICE) =>
            {
                tracing::debug!(account_code, "no pending charges to invoice");
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }

    /// `None` lists invoices in every state.
    pub fn list_invoices(
        &self,
        state: Option<InvoiceState>,
        page_size: u32,
    ) -> Result<Pager<Invoice>, RecurlyError> {
        Ok(Pager::new(self.clone(), "/invoices", state_filter(state), page_size)?)
    }

    pub fn list_account_invoices(
        &self,
        account_code: &str,
        state: Option<InvoiceState>,
        page_size: u32,
    ) -> Result<Pager<Invoice>, RecurlyError> {
        require("account_code", account_code)?;
        Ok(Pager::new(
            self.clone(),
            &format!("{}/invoices", account_path(account_code)),
            state_filter(state),
            page_size,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::http_client::HttpResponse;
    use crate::test_support::{test_client, ScriptedHttpClient};

    const INVOICE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<invoice href="https://acme.recurly.com/v2/invoices/1108">
  <account href="https://acme.recurly.com/v2/accounts/verena"/>
  <uuid>421f7b7d414e4c6792938e7c49d552e9</uuid>
  <state>open</state>
  <invoice_number type="integer">1108</invoice_number>
  <po_number nil="nil"></po_number>
  <vat_number nil="nil"></vat_number>
  <subtotal_in_cents type="integer">900</subtotal_in_cents>
  <tax_in_cents type="integer">0</tax_in_cents>
  <total_in_cents type="integer">900</total_in_cents>
  <currency>USD</currency>
  <created_at type="datetime">2011-08-25T12:00:00Z</created_at>
  <line_items type="array"></line_items>
  <transactions type="array">
    <transaction href="https://acme.recurly.com/v2/transactions/abc" type="purchase">
      <uuid>abc</uuid>
      <amount_in_cents type="integer">900</amount_in_cents>
      <status>success</status>
    </transaction>
  </transactions>
</invoice>"#;

    #[test]
    fn reads_invoice_with_transactions() {
        let invoice = Invoice::from_xml(INVOICE_XML).expect("must parse");
        assert_eq!(invoice.invoice_number, 1108);
        assert_eq!(invoice.state, Some(InvoiceState::Open));
        assert_eq!(invoice.account_code.as_deref(), Some("verena"));
        assert_eq!(invoice.po_number, None);
        assert_eq!(invoice.total_in_cents, 900);
        assert_eq!(invoice.transactions.len(), 1);
        assert_eq!(invoice.transactions[0].status.as_deref(), Some("success"));
    }

    #[tokio::test]
    async fn mark_successful_and_failed_use_put() {
        let http = Arc::new(ScriptedHttpClient::new(vec![
            HttpResponse::ok_xml(INVOICE_XML),
            HttpResponse::ok_xml(INVOICE_XML),
        ]));
        let client = test_client(http.clone());

        client.mark_invoice_successful(1108).await.expect("marked");
        client.mark_invoice_failed(1108).await.expect("marked");

        let requests = http.recorded_requests();
        assert!(requests.iter().all(|r| r.method == HttpMethod::Put));
        assert_eq!(
            requests[0].url,
            "https://acme.recurly.com/v2/invoices/1108/mark_successful"
        );
        assert_eq!(requests[1].url, "https://acme.recurly.com/v2/invoices/1108/mark_failed");
    }

    #[tokio::test]
    async fn pending_charges_posts_to_account_invoices() {
        let http = Arc::new(ScriptedHttpClient::xml(201, INVOICE_XML));
        let client = test_client(http.clone());

        let invoice = client
            .invoice_pending_charges("verena")
            .await
            .expect("invoiced")
            .expect("an invoice");
        assert_eq!(invoice.invoice_number, 1108);

        let request = http.only_request();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, "https://acme.recurly.com/v2/accounts/verena/invoices");
        assert!(request.body.is_none());
    }

    #[tokio::test]
    async fn nothing_to_invoice_is_none() {
        let http = Arc::new(ScriptedHttpClient::xml(
            422,
            r#"<errors><error field="base" symbol="will_not_invoice">No charges to invoice</error></errors>"#,
        ));
        let client = test_client(http);

        let invoice = client
            .invoice_pending_charges("verena")
            .await
            .expect("not an error");
        assert!(invoice.is_none());
    }

    #[tokio::test]
    async fn other_rejections_still_fail() {
        let http = Arc::new(ScriptedHttpClient::xml(
            422,
            r#"<errors><error field="account" symbol="invalid">is closed</error></errors>"#,
        ));
        let client = test_client(http);

        let err = client
            .invoice_pending_charges("verena")
            .await
            .expect_err("must fail");
        assert_eq!(err.errors()[0].symbol, "invalid");
    }

    #[test]
    fn list_state_filter() {
        let client = test_client(Arc::new(ScriptedHttpClient::new(Vec::new())));
        assert_eq!(
            client.list_invoices(None, 50).expect("pager").first_page_path(),
            "/invoices"
        );
        assert_eq!(
            client
                .list_account_invoices("verena", Some(InvoiceState::PastDue), 50)
                .expect("pager")
                .first_page_path(),
            "/accounts/verena/invoices?state=past_due"
        );
    }
}
