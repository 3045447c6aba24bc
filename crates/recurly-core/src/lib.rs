//! # Recurly Core
//!
//! Typed client for the Recurly v2 subscription billing API.
//!
//! ## Overview
//!
//! Every billing entity Recurly exposes over its XML API is mirrored as a plain
//! Rust type, and every operation on it is an async method on [`RecurlyClient`]:
//!
//! - **Accounts** with billing info, adjustments, notes and coupon redemptions
//! - **Plans** and their add-ons, with per-currency pricing
//! - **Subscriptions** including plan changes and state transitions
//! - **Invoices** and **transactions**, including refunds
//! - **Coupons** and redemptions
//! - **Paging** over list endpoints via the `Link` and `X-Records` headers
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Client configuration and environment loading |
//! | [`http_client`] | HTTP transport abstraction (reqwest or a test fake) |
//! | [`pager`] | Cursor over paged list endpoints |
//! | [`xml`] | Wire format reader and writer |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use recurly_core::{Account, NewSubscription, RecurlyClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads RECURLY_API_KEY, RECURLY_SUBDOMAIN and friends
//!     let client = RecurlyClient::from_env()?;
//!
//!     let account = client.get_account("verena").await?;
//!     let subscription = client
//!         .create_subscription(&account, &NewSubscription::new("gold"))
//!         .await?;
//!     println!("{} is {:?}", subscription.plan_code, subscription.state);
//!
//!     let mut accounts = client.list_accounts(recurly_core::AccountState::PastDue, 50)?;
//!     while let Some(page) = accounts.next_page().await? {
//!         for account in page {
//!             println!("{}", account.account_code);
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Client-side checks fail with [`ValidationError`] before anything is sent.
//! Everything else surfaces as a [`RecurlyError`] variant mapped from the HTTP status:
//!
//! ```rust
//! use recurly_core::RecurlyError;
//!
//! fn describe(error: &RecurlyError) -> String {
//!     match error {
//!         RecurlyError::NotFound { message, .. } => format!("missing: {message}"),
//!         RecurlyError::Rejected { errors, .. } => format!("{} field errors", errors.len()),
//!         other if other.retryable() => String::from("try again later"),
//!         other => other.to_string(),
//!     }
//! }
//! ```
//!
//! ## Security
//!
//! - The API key is only sent as a Basic auth header and is redacted from `Debug` output
//! - Card numbers and verification values are redacted from `Debug` output
//! - All HTTP requests use TLS via rustls

mod client;
pub mod config;
mod error;
pub mod http_client;
pub mod pager;
mod resources;
mod timestamp;
mod validation;
pub mod xml;

#[cfg(test)]
mod test_support;

// Client and configuration
pub use client::RecurlyClient;
pub use config::ClientConfig;

// Error types
pub use error::{ApiError, RecurlyError, TransactionError, ValidationError};

// HTTP transport
pub use http_client::{
    HttpAuth, HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, ReqwestHttpClient,
};

// Paging
pub use pager::{Pager, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

// Resources
pub use resources::{
    Account, AccountNote, AccountState, Address, Adjustment, AdjustmentState, AdjustmentType,
    BillingInfo, ChangeTimeframe, CheckResult, CollectionMethod, Coupon, CouponRedemption,
    CouponState, CreditCard, CurrencyAmounts, DiscountType, IntervalUnit, Invoice, InvoiceState,
    ManualInvoiceDetails, NewAdjustment, NewSubscription, PaymentMethod, Plan, PlanAddOn,
    RefundType, Subscription, SubscriptionAddOn, SubscriptionChange, SubscriptionState,
    Transaction, TransactionBillingDetails, TransactionDetails, TransactionState, TransactionType,
};

// Primitives
pub use timestamp::UtcDateTime;
pub use validation::{validate_currency_code, MAX_UNIT_AMOUNT_IN_CENTS};
