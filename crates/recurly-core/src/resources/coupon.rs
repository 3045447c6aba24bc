use serde::{Deserialize, Serialize};

use crate::client::segment;
use crate::http_client::HttpMethod;
use crate::pager::Pager;
use crate::validation::{max_len, mixed_case_code, require, validate_currency_code, MAX_CODE_LEN, MAX_NAME_LEN};
use crate::xml::{wire_enum, XmlElement, XmlError, XmlResource, XmlWriter};
use crate::{CouponRedemption, CurrencyAmounts, RecurlyClient, RecurlyError, UtcDateTime, ValidationError};

wire_enum! {
    pub enum CouponState {
        Redeemable => "redeemable",
        Expired => "expired",
        MaxedOut => "maxed_out",
    }
}

wire_enum! {
    pub enum DiscountType {
        Percent => "percent",
        Dollars => "dollars",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coupon {
    pub coupon_code: String,
    pub name: String,
    pub state: Option<CouponState>,
    pub hosted_description: Option<String>,
    pub invoice_description: Option<String>,
    pub discount_type: DiscountType,
    /// Whole percent, 1 to 100. Used by percent coupons.
    pub discount_percent: Option<u32>,
    /// Used by dollar coupons.
    pub discount_in_cents: CurrencyAmounts,
    pub redeem_by_date: Option<UtcDateTime>,
    pub single_use: Option<bool>,
    pub applies_for_months: Option<u32>,
    pub max_redemptions: Option<u32>,
    pub applies_to_all_plans: bool,
    pub plan_codes: Vec<String>,
    pub created_at: Option<UtcDateTime>,
}

impl Coupon {
    /// A percent-off coupon valid for every plan.
    pub fn percent(coupon_code: impl Into<String>, name: impl Into<String>, percent: u32) -> Self {
        Self::with_discount(coupon_code, name, DiscountType::Percent, Some(percent), CurrencyAmounts::new())
    }

    /// A fixed-amount coupon valid for every plan.
    pub fn dollars(
        coupon_code: impl Into<String>,
        name: impl Into<String>,
        discount_in_cents: CurrencyAmounts,
    ) -> Self {
        Self::with_discount(coupon_code, name, DiscountType::Dollars, None, discount_in_cents)
    }

    fn with_discount(
        coupon_code: impl Into<String>,
        name: impl Into<String>,
        discount_type: DiscountType,
        discount_percent: Option<u32>,
        discount_in_cents: CurrencyAmounts,
    ) -> Self {
        Self {
            coupon_code: coupon_code.into(),
            name: name.into(),
            state: None,
            hosted_description: None,
            invoice_description: None,
            discount_type,
            discount_percent,
            discount_in_cents,
            redeem_by_date: None,
            single_use: None,
            applies_for_months: None,
            max_redemptions: None,
            applies_to_all_plans: true,
            plan_codes: Vec::new(),
            created_at: None,
        }
    }

    /// Restrict the coupon to the given plans.
    pub fn for_plans<I, S>(mut self, plan_codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.applies_to_all_plans = false;
        self.plan_codes = plan_codes.into_iter().map(Into::into).collect();
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        mixed_case_code("coupon_code", &self.coupon_code, MAX_CODE_LEN)?;
        require("name", &self.name)?;
        max_len("name", &self.name, MAX_NAME_LEN)?;
        match self.discount_type {
            DiscountType::Percent => match self.discount_percent {
                None => return Err(ValidationError::Required { field: "discount_percent" }),
                Some(percent) if !(1..=100).contains(&percent) => {
                    return Err(ValidationError::OutOfRange {
                        field: "discount_percent",
                        value: i64::from(percent),
                        reason: "must be between 1 and 100",
                    });
                }
                Some(_) => {}
            },
            DiscountType::Dollars => self.discount_in_cents.validate("discount_in_cents")?,
        }
        if !self.applies_to_all_plans && self.plan_codes.is_empty() {
            return Err(ValidationError::Empty { field: "plan_codes" });
        }
        Ok(())
    }

    fn write_xml(&self, writer: &mut XmlWriter) -> Result<(), XmlError> {
        writer.start(Self::ELEMENT_NAME)?;
        writer.element("coupon_code", &self.coupon_code)?;
        writer.element("name", &self.name)?;
        writer.element_if_provided("hosted_description", self.hosted_description.as_deref())?;
        writer.element_if_provided("invoice_description", self.invoice_description.as_deref())?;
        writer.element_datetime_if_provided("redeem_by_date", self.redeem_by_date)?;
        writer.element_bool_if_provided("single_use", self.single_use)?;
        writer.element_int_if_provided("applies_for_months", self.applies_for_months.map(i64::from))?;
        writer.element_int_if_provided("max_redemptions", self.max_redemptions.map(i64::from))?;
        writer.element_enum("discount_type", self.discount_type)?;
        match self.discount_type {
            DiscountType::Percent => {
                writer.element_int_if_provided("discount_percent", self.discount_percent.map(i64::from))?;
            }
            DiscountType::Dollars => self.discount_in_cents.write(writer, "discount_in_cents")?,
        }
        if !self.applies_to_all_plans {
            writer.element_bool("applies_to_all_plans", false)?;
            writer.list("plan_codes", &self.plan_codes, |w, code| w.element("plan_code", code))?;
        }
        writer.end(Self::ELEMENT_NAME)
    }
}

impl XmlResource for Coupon {
    const ELEMENT_NAME: &'static str = "coupon";

    fn from_element(element: &XmlElement) -> Result<Self, XmlError> {
        let plan_codes = element
            .child("plan_codes")
            .map(|list| {
                list.children_named("plan_code")
                    .filter_map(XmlElement::value)
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            coupon_code: element.child_string("coupon_code").unwrap_or_default(),
            name: element.child_string("name").unwrap_or_default(),
            state: element.child_enum("state")?,
            hosted_description: element.child_string("hosted_description"),
            invoice_description: element.child_string("invoice_description"),
            discount_type: element
                .child_enum("discount_type")?
                .unwrap_or(DiscountType::Percent),
            discount_percent: element.child_u32("discount_percent")?,
            discount_in_cents: CurrencyAmounts::from_child(element, "discount_in_cents")?,
            redeem_by_date: element.child_datetime("redeem_by_date")?,
            single_use: element.child_bool("single_use")?,
            applies_for_months: element.child_u32("applies_for_months")?,
            max_redemptions: element.child_u32("max_redemptions")?,
            applies_to_all_plans: element.child_bool("applies_to_all_plans")?.unwrap_or(true),
            plan_codes,
            created_at: element.child_datetime("created_at")?,
        })
    }
}

fn coupon_path(coupon_code: &str) -> String {
    format!("/coupons/{}", segment(coupon_code))
}

impl RecurlyClient {
    pub async fn get_coupon(&self, coupon_code: &str) -> Result<Coupon, RecurlyError> {
        require("coupon_code", coupon_code)?;
        self.get_resource(&coupon_path(coupon_code)).await
    }

    pub async fn create_coupon(&self, coupon: &Coupon) -> Result<Coupon, RecurlyError> {
        coupon.validate()?;
        let body = XmlWriter::document(|w| coupon.write_xml(w))?;
        self.send_resource(HttpMethod::Post, "/coupons", Some(body))
            .await
    }

    /// Stop new redemptions. Existing redemptions keep their discount.
    pub async fn deactivate_coupon(&self, coupon_code: &str) -> Result<(), RecurlyError> {
        require("coupon_code", coupon_code)?;
        self.send_empty(HttpMethod::Delete, &coupon_path(coupon_code))
            .await
    }

    /// Apply a coupon to an account. `currency` falls back to the client default.
    pub async fn redeem_coupon(
        &self,
        coupon_code: &str,
        account_code: &str,
        currency: Option<&str>,
    ) -> Result<CouponRedemption, RecurlyError> {
        require("coupon_code", coupon_code)?;
        require("account_code", account_code)?;
        let currency = match currency {
            Some(currency) if !currency.trim().is_empty() => validate_currency_code(currency)?,
            _ => self.default_currency().to_owned(),
        };

        let body =
            XmlWriter::document(|w| CouponRedemption::write_request(w, account_code, &currency))?;
        self.send_resource(
            HttpMethod::Post,
            &format!("{}/redeem", coupon_path(coupon_code)),
            Some(body),
        )
        .await
    }

    /// `None` lists coupons in every state.
    pub fn list_coupons(
        &self,
        state: Option<CouponState>,
        page_size: u32,
    ) -> Result<Pager<Coupon>, RecurlyError> {
        let params = state
            .map(|state| vec![("state", state.to_string())])
            .unwrap_or_default();
        Ok(Pager::new(self.clone(), "/coupons", params, page_size)?)
    }
}
