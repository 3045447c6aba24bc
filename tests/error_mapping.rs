//! Behavior tests for mapping Recurly status codes and error bodies to `RecurlyError`.

use recurly_core::{RecurlyError, ValidationError};
use recurly_tests::{client_with, FakeTransport, HttpResponse};

const VALIDATION_ERRORS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<errors>
  <error field="account.email" symbol="invalid_email">is not a valid email address</error>
  <error field="account.account_code" symbol="taken">has already been taken</error>
</errors>"#;

const DECLINED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<errors>
  <transaction_error>
    <error_code>insufficient_funds</error_code>
    <error_category>soft</error_category>
    <merchant_message>The card has insufficient funds to cover the cost of the transaction.</merchant_message>
    <customer_message>The card has insufficient funds to cover the cost of the transaction.</customer_message>
  </transaction_error>
  <error field="transaction.account.billing_info.number" symbol="declined">Your card has insufficient funds.</error>
</errors>"#;

async fn fetch_with_status(status: u16, body: &str) -> RecurlyError {
    let transport = FakeTransport::new();
    transport.push(HttpResponse::new(status, body));
    client_with(transport)
        .get_account("verena")
        .await
        .expect_err("non-success status must fail")
}

#[tokio::test]
async fn when_recurly_rejects_fields_every_error_is_kept_in_order() {
    // Given: A 422 with two field errors
    // When: The request fails
    let error = fetch_with_status(422, VALIDATION_ERRORS).await;

    // Then: Both errors are available with field and symbol
    let errors = error.errors();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].field.as_deref(), Some("account.email"));
    assert_eq!(errors[0].symbol, "invalid_email");
    assert_eq!(errors[1].description, "has already been taken");
    assert!(!error.retryable());
}

#[tokio::test]
async fn when_a_payment_is_declined_the_gateway_details_are_exposed() {
    let error = fetch_with_status(422, DECLINED).await;

    let transaction_error = error
        .transaction_error()
        .expect("decline details should be attached");
    assert_eq!(transaction_error.code, "insufficient_funds");
    assert_eq!(transaction_error.category.as_deref(), Some("soft"));
    assert_eq!(error.errors()[0].symbol, "declined");
}

#[tokio::test]
async fn when_status_codes_vary_each_maps_to_its_own_variant() {
    assert!(matches!(
        fetch_with_status(401, "").await,
        RecurlyError::InvalidCredentials { .. }
    ));
    assert!(matches!(
        fetch_with_status(403, "").await,
        RecurlyError::InvalidCredentials { .. }
    ));
    assert!(matches!(
        fetch_with_status(412, VALIDATION_ERRORS).await,
        RecurlyError::Rejected { .. }
    ));
    assert!(matches!(
        fetch_with_status(500, "").await,
        RecurlyError::Server { .. }
    ));
    assert!(matches!(
        fetch_with_status(418, "").await,
        RecurlyError::UnexpectedStatus { status: 418, .. }
    ));
}

#[tokio::test]
async fn when_recurly_is_down_the_error_is_retryable() {
    let error = fetch_with_status(503, "").await;

    assert!(matches!(error, RecurlyError::TemporarilyUnavailable));
    assert!(error.retryable());
}

#[tokio::test]
async fn when_a_resource_is_missing_a_default_message_is_used() {
    let error = fetch_with_status(404, "").await;

    assert!(error.is_not_found());
    assert_eq!(error.to_string(), "The requested object was not found.");
}

#[tokio::test]
async fn when_the_error_body_is_not_xml_the_status_still_decides() {
    let error = fetch_with_status(500, "<html><body>Bad gateway").await;

    assert!(matches!(error, RecurlyError::Server { ref errors } if errors.is_empty()));
}

#[tokio::test]
async fn when_input_is_blank_validation_fails_before_the_network() {
    let transport = FakeTransport::new();
    let client = client_with(transport.clone());

    let error = client.get_plan("   ").await.expect_err("blank code");

    assert!(matches!(
        error,
        RecurlyError::Validation(ValidationError::Required { field: "plan_code" })
    ));
    assert!(transport.requests().is_empty());
}
