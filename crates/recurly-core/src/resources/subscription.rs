use serde::{Deserialize, Serialize};

use crate::client::{segment, with_query};
use crate::http_client::HttpMethod;
use crate::pager::Pager;
use crate::resources::account::account_path;
use crate::validation::{require, validate_currency_code};
use crate::xml::{wire_enum, XmlElement, XmlError, XmlResource, XmlWriter};
use crate::{
    Account, BillingInfo, RecurlyClient, RecurlyError, SubscriptionAddOn, UtcDateTime,
    ValidationError,
};

wire_enum! {
    /// Subscription state. `Live` only exists as a list filter: every state except expired.
    pub enum SubscriptionState {
        Active => "active",
        Canceled => "canceled",
        Future => "future",
        Expired => "expired",
        InTrial => "in_trial",
        PastDue => "past_due",
        Live => "live",
    }
}

wire_enum! {
    /// When a plan or quantity change takes effect.
    pub enum ChangeTimeframe {
        Now => "now",
        Renewal => "renewal",
    }
}

wire_enum! {
    pub enum RefundType {
        Full => "full",
        Partial => "partial",
        None => "none",
    }
}

wire_enum! {
    pub enum CollectionMethod {
        Automatic => "automatic",
        Manual => "manual",
    }
}

/// Invoice terms for manually collected subscriptions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualInvoiceDetails {
    pub net_terms: u32,
    pub po_number: Option<String>,
}

impl ManualInvoiceDetails {
    fn read(element: &XmlElement) -> Result<Option<Self>, XmlError> {
        let net_terms = element.child_u32("net_terms")?;
        let po_number = element.child_string("po_number");
        if net_terms.is_none() && po_number.is_none() {
            return Ok(None);
        }
        Ok(Some(Self {
            net_terms: net_terms.unwrap_or_default(),
            po_number,
        }))
    }

    fn write_xml(&self, writer: &mut XmlWriter) -> Result<(), XmlError> {
        writer.element_enum("collection_method", CollectionMethod::Manual)?;
        writer.element_int("net_terms", i64::from(self.net_terms))?;
        writer.element_if_provided("po_number", self.po_number.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub uuid: Option<String>,
    pub account_code: Option<String>,
    pub plan_code: String,
    pub plan_name: Option<String>,
    pub state: Option<SubscriptionState>,
    pub unit_amount_in_cents: Option<i64>,
    pub quantity: u32,
    pub currency: Option<String>,
    pub activated_at: Option<UtcDateTime>,
    pub canceled_at: Option<UtcDateTime>,
    pub expires_at: Option<UtcDateTime>,
    pub current_period_started_at: Option<UtcDateTime>,
    pub current_period_ends_at: Option<UtcDateTime>,
    pub trial_started_at: Option<UtcDateTime>,
    pub trial_ends_at: Option<UtcDateTime>,
    pub add_ons: Vec<SubscriptionAddOn>,
    /// Change scheduled for the next renewal.
    pub pending_subscription: Option<Box<Subscription>>,
    pub collection_method: Option<CollectionMethod>,
    pub manual_invoice: Option<ManualInvoiceDetails>,
}

impl XmlResource for Subscription {
    const ELEMENT_NAME: &'static str = "subscription";

    fn from_element(element: &XmlElement) -> Result<Self, XmlError> {
        // Plan code is nested under <plan> in responses and flat in older payloads.
        let plan = element.child("plan");
        let plan_code = plan
            .and_then(|plan| plan.child_string("plan_code"))
            .or_else(|| element.child_string("plan_code"))
            .or_else(|| plan.and_then(XmlElement::href_id).map(str::to_owned))
            .unwrap_or_default();

        let add_ons = match element.child("subscription_add_ons") {
            Some(list) => list
                .children_named(SubscriptionAddOn::ELEMENT_NAME)
                .map(SubscriptionAddOn::from_element)
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };

        let pending_subscription = match element.child("pending_subscription") {
            Some(pending) if !pending.children().is_empty() => {
                Some(Box::new(Self::from_element(pending)?))
            }
            _ => None,
        };

        Ok(Self {
            uuid: element.child_string("uuid"),
            account_code: element.child_href_id("account"),
            plan_code,
            plan_name: plan.and_then(|plan| plan.child_string("name")),
            state: element.child_enum("state")?,
            unit_amount_in_cents: element.child_i64("unit_amount_in_cents")?,
            quantity: element.child_u32("quantity")?.unwrap_or(1),
            currency: element.child_string("currency"),
            activated_at: element.child_datetime("activated_at")?,
            canceled_at: element.child_datetime("canceled_at")?,
            expires_at: element.child_datetime("expires_at")?,
            current_period_started_at: element.child_datetime("current_period_started_at")?,
            current_period_ends_at: element.child_datetime("current_period_ends_at")?,
            trial_started_at: element.child_datetime("trial_started_at")?,
            trial_ends_at: element.child_datetime("trial_ends_at")?,
            add_ons,
            pending_subscription,
            collection_method: element.child_enum("collection_method")?,
            manual_invoice: ManualInvoiceDetails::read(element)?,
        })
    }
}

/// Parameters for [`RecurlyClient::create_subscription`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubscription {
    pub plan_code: String,
    /// Falls back to the client's default currency.
    pub currency: Option<String>,
    pub unit_amount_in_cents: Option<i64>,
    pub quantity: u32,
    pub coupon_code: Option<String>,
    pub trial_ends_at: Option<UtcDateTime>,
    /// Only sent when in the future.
    pub starts_at: Option<UtcDateTime>,
    pub total_billing_cycles: Option<u32>,
    pub first_renewal_date: Option<UtcDateTime>,
    pub add_ons: Vec<SubscriptionAddOn>,
    pub collection_method: CollectionMethod,
    pub manual_invoice: Option<ManualInvoiceDetails>,
    /// Stored on the account as part of the signup.
    pub billing_info: Option<BillingInfo>,
}

impl NewSubscription {
    pub fn new(plan_code: impl Into<String>) -> Self {
        Self {
            plan_code: plan_code.into(),
            currency: None,
            unit_amount_in_cents: None,
            quantity: 1,
            coupon_code: None,
            trial_ends_at: None,
            starts_at: None,
            total_billing_cycles: None,
            first_renewal_date: None,
            add_ons: Vec::new(),
            collection_method: CollectionMethod::Automatic,
            manual_invoice: None,
            billing_info: None,
        }
    }

    /// Switch to manual collection with the given invoice terms.
    pub fn with_manual_invoice(mut self, details: ManualInvoiceDetails) -> Self {
        self.collection_method = CollectionMethod::Manual;
        self.manual_invoice = Some(details);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require("plan_code", &self.plan_code)?;
        if self.total_billing_cycles == Some(0) {
            return Err(ValidationError::OutOfRange {
                field: "total_billing_cycles",
                value: 0,
                reason: "must be greater than 0 when provided",
            });
        }
        if self.quantity < 1 {
            return Err(ValidationError::OutOfRange {
                field: "quantity",
                value: i64::from(self.quantity),
                reason: "must be at least 1",
            });
        }
        if let Some(trial_ends_at) = self.trial_ends_at {
            if !trial_ends_at.is_future() {
                return Err(ValidationError::NotInFuture {
                    field: "trial_ends_at",
                });
            }
        }
        if let (Some(starts_at), Some(first_renewal)) = (self.starts_at, self.first_renewal_date) {
            if first_renewal < starts_at {
                return Err(ValidationError::DateOrder {
                    earlier: "starts_at",
                    later: "first_renewal_date",
                });
            }
        }
        for add_on in &self.add_ons {
            add_on.validate()?;
        }
        Ok(())
    }

    fn write_xml(&self, writer: &mut XmlWriter, account: &Account, currency: &str) -> Result<(), XmlError> {
        writer.start(Subscription::ELEMENT_NAME)?;
        writer.element("plan_code", &self.plan_code)?;
        account.write_xml(writer, true, self.billing_info.as_ref())?;
        writer.element_if_provided("coupon_code", self.coupon_code.as_deref())?;
        writer.element_int_if_provided("unit_amount_in_cents", self.unit_amount_in_cents)?;
        writer.element("currency", currency)?;
        writer.element_int_if_provided(
            "quantity",
            (self.quantity > 1).then_some(i64::from(self.quantity)),
        )?;
        writer.element_datetime_if_provided("trial_ends_at", self.trial_ends_at)?;
        writer.element_datetime_if_provided(
            "starts_at",
            self.starts_at.filter(|starts_at| starts_at.is_future()),
        )?;
        writer.element_int_if_provided(
            "total_billing_cycles",
            self.total_billing_cycles.map(i64::from),
        )?;
        writer.element_datetime_if_provided("first_renewal_date", self.first_renewal_date)?;
        writer.list_if_any("subscription_add_ons", &self.add_ons, |w, add_on| add_on.write_xml(w))?;
        write_collection(writer, self.collection_method, self.manual_invoice.as_ref())?;
        writer.end(Subscription::ELEMENT_NAME)
    }
}

/// Parameters for [`RecurlyClient::update_subscription`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionChange {
    pub timeframe: ChangeTimeframe,
    pub plan_code: Option<String>,
    pub quantity: Option<u32>,
    pub unit_amount_in_cents: Option<i64>,
    pub add_ons: Vec<SubscriptionAddOn>,
    pub manual_invoice: Option<ManualInvoiceDetails>,
}

impl SubscriptionChange {
    pub fn new(timeframe: ChangeTimeframe) -> Self {
        Self {
            timeframe,
            plan_code: None,
            quantity: None,
            unit_amount_in_cents: None,
            add_ons: Vec::new(),
            manual_invoice: None,
        }
    }

    pub fn with_plan_code(mut self, plan_code: impl Into<String>) -> Self {
        self.plan_code = Some(plan_code.into());
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(plan_code) = &self.plan_code {
            require("plan_code", plan_code)?;
        }
        if self.quantity == Some(0) {
            return Err(ValidationError::OutOfRange {
                field: "quantity",
                value: 0,
                reason: "must be at least 1",
            });
        }
        for add_on in &self.add_ons {
            add_on.validate()?;
        }
        Ok(())
    }

    fn write_xml(&self, writer: &mut XmlWriter) -> Result<(), XmlError> {
        writer.start(Subscription::ELEMENT_NAME)?;
        writer.element_enum("timeframe", self.timeframe)?;
        writer.element_if_provided("plan_code", self.plan_code.as_deref())?;
        writer.element_int_if_provided("quantity", self.quantity.map(i64::from))?;
        writer.element_int_if_provided("unit_amount_in_cents", self.unit_amount_in_cents)?;
        writer.list_if_any("subscription_add_ons", &self.add_ons, |w, add_on| add_on.write_xml(w))?;
        if let Some(details) = &self.manual_invoice {
            details.write_xml(writer)?;
        }
        writer.end(Subscription::ELEMENT_NAME)
    }
}

fn write_collection(
    writer: &mut XmlWriter,
    method: CollectionMethod,
    details: Option<&ManualInvoiceDetails>,
) -> Result<(), XmlError> {
    match (method, details) {
        (CollectionMethod::Manual, Some(details)) => details.write_xml(writer),
        (CollectionMethod::Automatic, Some(_)) => {
            tracing::warn!("manual invoice details ignored for automatically collected subscription");
            Ok(())
        }
        _ => Ok(()),
    }
}

fn subscription_path(uuid: &str) -> String {
    format!("/subscriptions/{}", segment(uuid))
}

impl RecurlyClient {
    pub async fn get_subscription(&self, uuid: &str) -> Result<Subscription, RecurlyError> {
        require("uuid", uuid)?;
        self.get_resource(&subscription_path(uuid)).await
    }

    /// Sign `account` up to a plan. The account is created if it does not exist yet.
    pub async fn create_subscription(
        &self,
        account: &Account,
        subscription: &NewSubscription,
    ) -> Result<Subscription, RecurlyError> {
        require("account_code", &account.account_code)?;
        subscription.validate()?;
        let currency = match subscription.currency.as_deref() {
            Some(currency) if !currency.trim().is_empty() => validate_currency_code(currency)?,
            _ => self.default_currency().to_owned(),
        };

        let body = XmlWriter::document(|w| subscription.write_xml(w, account, &currency))?;
        self.send_resource(HttpMethod::Post, "/subscriptions", Some(body))
            .await
    }

    pub async fn update_subscription(
        &self,
        uuid: &str,
        change: &SubscriptionChange,
    ) -> Result<Subscription, RecurlyError> {
        require("uuid", uuid)?;
        change.validate()?;
        let body = XmlWriter::document(|w| change.write_xml(w))?;
        self.send_resource(HttpMethod::Put, &subscription_path(uuid), Some(body))
            .await
    }

    /// Cancel at the end of the current term; the subscription stays active until then.
    pub async fn cancel_subscription(&self, uuid: &str) -> Result<Subscription, RecurlyError> {
        self.transition_subscription(uuid, "cancel", &[]).await
    }

    pub async fn reactivate_subscription(&self, uuid: &str) -> Result<Subscription, RecurlyError> {
        self.transition_subscription(uuid, "reactivate", &[]).await
    }

    /// End the subscription immediately.
    pub async fn terminate_subscription(
        &self,
        uuid: &str,
        refund: RefundType,
    ) -> Result<Subscription, RecurlyError> {
        self.transition_subscription(uuid, "terminate", &[("refund", refund.to_string())])
            .await
    }

    /// Move the next renewal to `next_renewal_date`, which must be after today.
    pub async fn postpone_subscription(
        &self,
        uuid: &str,
        next_renewal_date: UtcDateTime,
    ) -> Result<Subscription, RecurlyError> {
        if next_renewal_date.date() <= UtcDateTime::now().date() {
            return Err(ValidationError::NotInFuture {
                field: "next_renewal_date",
            }
            .into());
        }
        self.transition_subscription(
            uuid,
            "postpone",
            &[("next_renewal_date", next_renewal_date.format_rfc3339())],
        )
        .await
    }

    async fn transition_subscription(
        &self,
        uuid: &str,
        action: &str,
        params: &[(&str, String)],
    ) -> Result<Subscription, RecurlyError> {
        require("uuid", uuid)?;
        let path = with_query(&format!("{}/{}", subscription_path(uuid), action), params);
        self.send_resource(HttpMethod::Put, &path, None).await
    }

    /// `Live` is the server default and sends no filter.
    pub fn list_subscriptions(
        &self,
        state: SubscriptionState,
        page_size: u32,
    ) -> Result<Pager<Subscription>, RecurlyError> {
        Ok(Pager::new(
            self.clone(),
            "/subscriptions",
            state_filter(state),
            page_size,
        )?)
    }

    pub fn list_account_subscriptions(
        &self,
        account_code: &str,
        state: SubscriptionState,
        page_size: u32,
    ) -> Result<Pager<Subscription>, RecurlyError> {
        require("account_code", account_code)?;
        Ok(Pager::new(
            self.clone(),
            &format!("{}/subscriptions", account_path(account_code)),
            state_filter(state),
            page_size,
        )?)
    }
}

fn state_filter(state: SubscriptionState) -> Vec<(&'static str, String)> {
    if state == SubscriptionState::Live {
        return Vec::new();
    }
    vec![("state", state.to_string())]
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::test_support::{test_client, ScriptedHttpClient};

    const SUBSCRIPTION_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<subscription href="https://acme.recurly.com/v2/subscriptions/44f83d7cba354d5b84812419f923ea96">
  <account href="https://acme.recurly.com/v2/accounts/1"/>
  <plan href="https://acme.recurly.com/v2/plans/gold">
    <plan_code>gold</plan_code>
    <name>Gold plan</name>
  </plan>
  <uuid>44f83d7cba354d5b84812419f923ea96</uuid>
  <state>active</state>
  <unit_amount_in_cents type="integer">800</unit_amount_in_cents>
  <currency>EUR</currency>
  <quantity type="integer">1</quantity>
  <activated_at type="datetime">2011-05-27T07:00:00Z</activated_at>
  <canceled_at nil="nil" type="datetime"></canceled_at>
  <expires_at nil="nil" type="datetime"></expires_at>
  <current_period_started_at type="datetime">2011-06-27T07:00:00Z</current_period_started_at>
  <current_period_ends_at type="datetime">2011-07-27T07:00:00Z</current_period_ends_at>
  <trial_started_at nil="nil" type="datetime"></trial_started_at>
  <trial_ends_at nil="nil" type="datetime"></trial_ends_at>
  <collection_method>manual</collection_method>
  <net_terms type="integer">10</net_terms>
  <po_number>PO-1</po_number>
  <subscription_add_ons type="array">
    <subscription_add_on>
      <add_on_code>ipaddresses</add_on_code>
      <quantity>10</quantity>
      <unit_amount_in_cents>150</unit_amount_in_cents>
    </subscription_add_on>
  </subscription_add_ons>
  <pending_subscription type="subscription">
    <plan href="https://acme.recurly.com/v2/plans/silver">
      <plan_code>silver</plan_code>
      <name>Silver plan</name>
    </plan>
    <unit_amount_in_cents type="integer">400</unit_amount_in_cents>
    <quantity type="integer">1</quantity>
    <subscription_add_ons type="array"></subscription_add_ons>
  </pending_subscription>
</subscription>"#;

    #[test]
    fn reads_nested_plan_add_ons_and_pending_change() {
        let subscription = Subscription::from_xml(SUBSCRIPTION_XML).expect("must parse");
        assert_eq!(subscription.plan_code, "gold");
        assert_eq!(subscription.plan_name.as_deref(), Some("Gold plan"));
        assert_eq!(subscription.account_code.as_deref(), Some("1"));
        assert_eq!(subscription.state, Some(SubscriptionState::Active));
        assert_eq!(subscription.canceled_at, None);
        assert_eq!(subscription.add_ons.len(), 1);
        assert_eq!(subscription.add_ons[0].quantity, 10);
        assert_eq!(subscription.collection_method, Some(CollectionMethod::Manual));
        assert_eq!(
            subscription.manual_invoice,
            Some(ManualInvoiceDetails {
                net_terms: 10,
                po_number: Some(String::from("PO-1"))
            })
        );

        let pending = subscription.pending_subscription.expect("pending change");
        assert_eq!(pending.plan_code, "silver");
        assert_eq!(pending.unit_amount_in_cents, Some(400));
        assert!(pending.pending_subscription.is_none());
    }

    #[tokio::test]
    async fn create_nests_account_and_defaults_currency() {
        let http = Arc::new(ScriptedHttpClient::xml(201, SUBSCRIPTION_XML));
        let client = test_client(http.clone());
        let mut request = NewSubscription::new("gold");
        request.quantity = 3;
        request.add_ons.push(SubscriptionAddOn::new("ipaddresses", 150).with_quantity(10));

        client
            .create_subscription(&Account::new("1"), &request)
            .await
            .expect("created");

        let request = http.only_request();
        assert_eq!(request.url, "https://acme.recurly.com/v2/subscriptions");
        let body = request.body.expect("body");
        assert!(body.contains("<plan_code>gold</plan_code>"));
        assert!(body.contains("<account_code>1</account_code>"));
        assert!(body.contains("<currency>USD</currency>"));
        assert!(body.contains("<quantity>3</quantity>"));
        assert!(body.contains("<subscription_add_ons>"));
        assert!(!body.contains("collection_method"));
    }

    #[tokio::test]
    async fn manual_collection_writes_invoice_terms() {
        let http = Arc::new(ScriptedHttpClient::xml(201, SUBSCRIPTION_XML));
        let client = test_client(http.clone());
        let request = NewSubscription::new("gold").with_manual_invoice(ManualInvoiceDetails {
            net_terms: 30,
            po_number: None,
        });

        client
            .create_subscription(&Account::new("1"), &request)
            .await
            .expect("created");

        let body = http.only_request().body.expect("body");
        assert!(body.contains("<collection_method>manual</collection_method>"));
        assert!(body.contains("<net_terms>30</net_terms>"));
    }

    #[test]
    fn create_validation() {
        assert!(matches!(
            NewSubscription::new(" ").validate(),
            Err(ValidationError::Required { field: "plan_code" })
        ));

        let mut cycles = NewSubscription::new("gold");
        cycles.total_billing_cycles = Some(0);
        assert!(cycles.validate().is_err());

        let mut past_trial = NewSubscription::new("gold");
        past_trial.trial_ends_at = Some(UtcDateTime::parse("2001-01-01T00:00:00Z").expect("ts"));
        assert!(matches!(
            past_trial.validate(),
            Err(ValidationError::NotInFuture { field: "trial_ends_at" })
        ));

        let mut renewal = NewSubscription::new("gold");
        renewal.starts_at = Some(UtcDateTime::parse("2030-02-01T00:00:00Z").expect("ts"));
        renewal.first_renewal_date = Some(UtcDateTime::parse("2030-01-01T00:00:00Z").expect("ts"));
        assert!(matches!(
            renewal.validate(),
            Err(ValidationError::DateOrder { .. })
        ));
    }

    #[tokio::test]
    async fn blank_new_plan_code_is_rejected() {
        let client = test_client(Arc::new(ScriptedHttpClient::new(Vec::new())));
        let change = SubscriptionChange::new(ChangeTimeframe::Now).with_plan_code("");
        let err = client
            .update_subscription("abc", &change)
            .await
            .expect_err("must fail");
        assert!(matches!(err, RecurlyError::Validation(ValidationError::Required { .. })));
    }

    #[tokio::test]
    async fn update_writes_timeframe_first() {
        let http = Arc::new(ScriptedHttpClient::xml(200, SUBSCRIPTION_XML));
        let client = test_client(http.clone());
        let change = SubscriptionChange::new(ChangeTimeframe::Renewal)
            .with_plan_code("silver")
            .with_quantity(2);

        client.update_subscription("abc", &change).await.expect("updated");

        let request = http.only_request();
        assert_eq!(request.method, HttpMethod::Put);
        assert_eq!(request.url, "https://acme.recurly.com/v2/subscriptions/abc");
        let body = request.body.expect("body");
        assert!(body.contains("<timeframe>renewal</timeframe>"));
        assert!(body.contains("<plan_code>silver</plan_code>"));
        assert!(body.contains("<quantity>2</quantity>"));
    }

    #[tokio::test]
    async fn state_transitions_use_put_with_query() {
        let http = Arc::new(ScriptedHttpClient::new(vec![
            crate::http_client::HttpResponse::ok_xml(SUBSCRIPTION_XML),
            crate::http_client::HttpResponse::ok_xml(SUBSCRIPTION_XML),
            crate::http_client::HttpResponse::ok_xml(SUBSCRIPTION_XML),
        ]));
        let client = test_client(http.clone());

        client.cancel_subscription("abc").await.expect("canceled");
        client.reactivate_subscription("abc").await.expect("reactivated");
        client
            .terminate_subscription("abc", RefundType::Partial)
            .await
            .expect("terminated");

        let urls: Vec<String> = http.recorded_requests().into_iter().map(|r| r.url).collect();
        assert_eq!(
            urls,
            vec![
                String::from("https://acme.recurly.com/v2/subscriptions/abc/cancel"),
                String::from("https://acme.recurly.com/v2/subscriptions/abc/reactivate"),
                String::from("https://acme.recurly.com/v2/subscriptions/abc/terminate?refund=partial"),
            ]
        );
        assert!(http
            .recorded_requests()
            .iter()
            .all(|r| r.method == HttpMethod::Put && r.body.is_none()));
    }

    #[tokio::test]
    async fn postpone_requires_a_future_date() {
        let http = Arc::new(ScriptedHttpClient::xml(200, SUBSCRIPTION_XML));
        let client = test_client(http.clone());

        let err = client
            .postpone_subscription("abc", UtcDateTime::now())
            .await
            .expect_err("today is not in the future");
        assert!(matches!(err, RecurlyError::Validation(ValidationError::NotInFuture { .. })));

        let next = UtcDateTime::parse("2099-03-01T00:00:00Z").expect("ts");
        client.postpone_subscription("abc", next).await.expect("postponed");
        assert_eq!(
            http.only_request().url,
            "https://acme.recurly.com/v2/subscriptions/abc/postpone?next_renewal_date=2099-03-01T00%3A00%3A00Z"
        );
    }

    #[test]
    fn live_filter_is_implicit() {
        let client = test_client(Arc::new(ScriptedHttpClient::new(Vec::new())));
        let live = client
            .list_subscriptions(SubscriptionState::Live, 50)
            .expect("pager");
        assert_eq!(live.first_page_path(), "/subscriptions");

        let trial = client
            .list_account_subscriptions("1", SubscriptionState::InTrial, 50)
            .expect("pager");
        assert_eq!(trial.first_page_path(), "/accounts/1/subscriptions?state=in_trial");
    }
}
