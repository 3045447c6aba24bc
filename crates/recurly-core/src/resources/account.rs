use serde::{Deserialize, Serialize};

use crate::client::segment;
use crate::http_client::HttpMethod;
use crate::pager::Pager;
use crate::validation::require;
use crate::xml::{wire_enum, XmlElement, XmlError, XmlResource, XmlWriter};
use crate::{Address, BillingInfo, RecurlyClient, RecurlyError, UtcDateTime};

wire_enum! {
    /// Account lifecycle state. Also the `state` filter of [`RecurlyClient::list_accounts`].
    pub enum AccountState {
        Active => "active",
        Closed => "closed",
        PastDue => "past_due",
    }
}

/// A customer account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub account_code: String,
    pub state: Option<AccountState>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company_name: Option<String>,
    pub accept_language: Option<String>,
    pub hosted_login_token: Option<String>,
    pub created_at: Option<UtcDateTime>,
    pub address: Option<Address>,
}

impl Account {
    pub fn new(account_code: impl Into<String>) -> Self {
        Self {
            account_code: account_code.into(),
            ..Self::default()
        }
    }

    /// Writes the `<account>` element. Updates omit `account_code`, which lives in the URL.
    pub(crate) fn write_xml(
        &self,
        writer: &mut XmlWriter,
        include_account_code: bool,
        billing_info: Option<&BillingInfo>,
    ) -> Result<(), XmlError> {
        writer.start(Self::ELEMENT_NAME)?;
        if include_account_code {
            writer.element("account_code", &self.account_code)?;
        }
        writer.element_if_provided("username", self.username.as_deref())?;
        writer.element_if_provided("email", self.email.as_deref())?;
        writer.element_if_provided("first_name", self.first_name.as_deref())?;
        writer.element_if_provided("last_name", self.last_name.as_deref())?;
        writer.element_if_provided("company_name", self.company_name.as_deref())?;
        writer.element_if_provided("accept_language", self.accept_language.as_deref())?;
        if let Some(billing_info) = billing_info {
            billing_info.write_xml(writer)?;
        }
        if let Some(address) = &self.address {
            address.write_xml(writer)?;
        }
        writer.end(Self::ELEMENT_NAME)
    }
}

impl XmlResource for Account {
    const ELEMENT_NAME: &'static str = "account";

    fn from_element(element: &XmlElement) -> Result<Self, XmlError> {
        Ok(Self {
            account_code: element
                .child_string("account_code")
                .or_else(|| element.href_id().map(str::to_owned))
                .unwrap_or_default(),
            state: element.child_enum("state")?,
            username: element.child_string("username"),
            email: element.child_string("email"),
            first_name: element.child_string("first_name"),
            last_name: element.child_string("last_name"),
            company_name: element.child_string("company_name"),
            accept_language: element.child_string("accept_language"),
            hosted_login_token: element.child_string("hosted_login_token"),
            created_at: element.child_datetime("created_at")?,
            address: element
                .child(Address::ELEMENT_NAME)
                .map(Address::from_element)
                .transpose()?,
        })
    }
}

pub(crate) fn account_path(account_code: &str) -> String {
    format!("/accounts/{}", segment(account_code))
}

impl RecurlyClient {
    pub async fn get_account(&self, account_code: &str) -> Result<Account, RecurlyError> {
        require("account_code", account_code)?;
        self.get_resource(&account_path(account_code)).await
    }

    /// Create an account, optionally storing billing info in the same call.
    pub async fn create_account(
        &self,
        account: &Account,
        billing_info: Option<&BillingInfo>,
    ) -> Result<Account, RecurlyError> {
        require("account_code", &account.account_code)?;
        let body = XmlWriter::document(|w| account.write_xml(w, true, billing_info))?;
        self.send_resource(HttpMethod::Post, "/accounts", Some(body))
            .await
    }

    pub async fn update_account(
        &self,
        account: &Account,
        billing_info: Option<&BillingInfo>,
    ) -> Result<Account, RecurlyError> {
        require("account_code", &account.account_code)?;
        let body = XmlWriter::document(|w| account.write_xml(w, false, billing_info))?;
        self.send_resource(
            HttpMethod::Put,
            &account_path(&account.account_code),
            Some(body),
        )
        .await
    }

    /// Close the account. Recurly cancels its subscriptions and drops stored billing info.
    pub async fn close_account(&self, account_code: &str) -> Result<(), RecurlyError> {
        require("account_code", account_code)?;
        self.send_empty(HttpMethod::Delete, &account_path(account_code))
            .await
    }

    pub async fn reopen_account(&self, account_code: &str) -> Result<(), RecurlyError> {
        require("account_code", account_code)?;
        self.send_empty(
            HttpMethod::Put,
            &format!("{}/reopen", account_path(account_code)),
        )
        .await
    }

    /// Accounts in `state`; `Active` is the server default and sends no filter.
    pub fn list_accounts(
        &self,
        state: AccountState,
        page_size: u32,
    ) -> Result<Pager<Account>, RecurlyError> {
        let mut params = Vec::new();
        if state != AccountState::Active {
            params.push(("state", state.to_string()));
        }
        Ok(Pager::new(self.clone(), "/accounts", params, page_size)?)
    }
}
