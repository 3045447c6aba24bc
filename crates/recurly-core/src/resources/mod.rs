//! Recurly resources and the client operations that act on them.

pub(crate) mod account;
mod account_note;
mod address;
mod adjustment;
mod billing_info;
mod coupon;
mod coupon_redemption;
pub(crate) mod invoice;
mod money;
pub(crate) mod plan;
mod plan_add_on;
mod subscription;
mod subscription_add_on;
mod transaction;

pub use account::{Account, AccountState};
pub use account_note::AccountNote;
pub use address::Address;
pub use adjustment::{Adjustment, AdjustmentState, AdjustmentType, NewAdjustment};
pub use billing_info::{BillingInfo, CreditCard, PaymentMethod};
pub use coupon::{Coupon, CouponState, DiscountType};
pub use coupon_redemption::CouponRedemption;
pub use invoice::{Invoice, InvoiceState};
pub use money::CurrencyAmounts;
pub use plan::{IntervalUnit, Plan};
pub use plan_add_on::PlanAddOn;
pub use subscription::{
    ChangeTimeframe, CollectionMethod, ManualInvoiceDetails, NewSubscription, RefundType,
    Subscription, SubscriptionChange, SubscriptionState,
};
pub use subscription_add_on::SubscriptionAddOn;
pub use transaction::{
    CheckResult, Transaction, TransactionBillingDetails, TransactionDetails, TransactionState,
    TransactionType,
};
