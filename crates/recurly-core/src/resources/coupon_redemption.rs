use serde::{Deserialize, Serialize};

use crate::http_client::HttpMethod;
use crate::resources::account::account_path;
use crate::resources::invoice::invoice_path;
use crate::validation::require;
use crate::xml::{XmlElement, XmlError, XmlResource, XmlWriter};
use crate::{RecurlyClient, RecurlyError, UtcDateTime};

/// A coupon applied to an account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponRedemption {
    pub account_code: Option<String>,
    pub coupon_code: Option<String>,
    pub currency: Option<String>,
    pub single_use: bool,
    pub total_discounted_in_cents: i64,
    pub state: Option<String>,
    pub created_at: Option<UtcDateTime>,
}

impl CouponRedemption {
    pub(crate) fn write_request(
        writer: &mut XmlWriter,
        account_code: &str,
        currency: &str,
    ) -> Result<(), XmlError> {
        writer.start(Self::ELEMENT_NAME)?;
        writer.element("account_code", account_code)?;
        writer.element("currency", currency)?;
        writer.end(Self::ELEMENT_NAME)
    }
}

impl XmlResource for CouponRedemption {
    const ELEMENT_NAME: &'static str = "redemption";

    fn from_element(element: &XmlElement) -> Result<Self, XmlError> {
        Ok(Self {
            account_code: element
                .child_string("account_code")
                .or_else(|| element.child_href_id("account")),
            coupon_code: element
                .child_string("coupon_code")
                .or_else(|| element.child_href_id("coupon")),
            currency: element.child_string("currency"),
            single_use: element.child_bool("single_use")?.unwrap_or(false),
            total_discounted_in_cents: element
                .child_i64("total_discounted_in_cents")?
                .unwrap_or_default(),
            state: element.child_string("state"),
            created_at: element.child_datetime("created_at")?,
        })
    }
}

fn account_redemption_path(account_code: &str) -> String {
    format!("{}/redemption", account_path(account_code))
}

impl RecurlyClient {
    pub async fn get_account_redemption(
        &self,
        account_code: &str,
    ) -> Result<CouponRedemption, RecurlyError> {
        require("account_code", account_code)?;
        self.get_resource(&account_redemption_path(account_code))
            .await
    }

    /// Remove the coupon from the account. It still counts towards the coupon's redemption cap.
    pub async fn remove_account_redemption(&self, account_code: &str) -> Result<(), RecurlyError> {
        require("account_code", account_code)?;
        self.send_empty(HttpMethod::Delete, &account_redemption_path(account_code))
            .await
    }

    pub async fn get_invoice_redemption(
        &self,
        invoice_number: u64,
    ) -> Result<CouponRedemption, RecurlyError> {
        self.get_resource(&format!("{}/redemption", invoice_path(invoice_number)))
            .await
    }
}
