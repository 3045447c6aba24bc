//! Behavior tests for the cursor pager over list endpoints.

use recurly_core::{AccountState, RecurlyError, SubscriptionState, ValidationError, MAX_PAGE_SIZE};
use recurly_tests::{accounts_page, client_with, FakeTransport, HttpError, HttpResponse, BASE};

fn next_link(cursor: &str) -> String {
    format!(r#"<{BASE}/accounts?cursor={cursor}>; rel="next", <{BASE}/accounts>; rel="start""#)
}

#[tokio::test]
async fn when_pages_link_to_each_other_the_pager_follows_until_the_last() {
    // Given: Two pages, the first linking to the second
    let transport = FakeTransport::new();
    transport
        .push(
            HttpResponse::ok_xml(accounts_page(&["a", "b"]))
                .with_header("X-Records", "3")
                .with_header("Link", next_link("1304958672")),
        )
        .push(
            HttpResponse::ok_xml(accounts_page(&["c"]))
                .with_header("X-Records", "3")
                .with_header("Link", format!(r#"<{BASE}/accounts>; rel="start""#)),
        );
    let client = client_with(transport.clone());
    let mut pager = client
        .list_accounts(AccountState::Active, 2)
        .expect("pager should build");

    // When: Pages are read one at a time
    let first = pager.next_page().await.expect("first page").expect("items");
    assert!(!pager.end_of_pages());
    let second = pager.next_page().await.expect("second page").expect("items");

    // Then: Both pages arrive in order, and the pager reports the end
    let codes: Vec<_> = first
        .iter()
        .chain(second.iter())
        .map(|account| account.account_code.as_str())
        .collect();
    assert_eq!(codes, vec!["a", "b", "c"]);
    assert_eq!(pager.total_records(), Some(3));
    assert!(pager.end_of_pages());
    assert!(pager.next_page().await.expect("no error").is_none());

    let requests = transport.requests();
    assert_eq!(requests.len(), 2, "a finished pager makes no more requests");
    assert_eq!(requests[0].url, format!("{BASE}/accounts?per_page=2"));
    assert_eq!(requests[1].url, format!("{BASE}/accounts?cursor=1304958672"));
}

#[tokio::test]
async fn when_all_pages_are_collected_the_items_are_concatenated() {
    let transport = FakeTransport::new();
    transport
        .push(HttpResponse::ok_xml(accounts_page(&["a"])).with_header("Link", next_link("2")))
        .push(HttpResponse::ok_xml(accounts_page(&["b"])).with_header("Link", next_link("3")))
        .push(HttpResponse::ok_xml(accounts_page(&[])));
    let client = client_with(transport.clone());

    let accounts = client
        .list_accounts(AccountState::Closed, 1)
        .expect("pager should build")
        .collect_all()
        .await
        .expect("all pages");

    assert_eq!(accounts.len(), 2);
    assert_eq!(transport.requests().len(), 3);
    assert_eq!(
        transport.request(0).url,
        format!("{BASE}/accounts?state=closed&per_page=1")
    );
}

#[tokio::test]
async fn when_a_page_request_fails_the_pager_retries_the_same_page() {
    // Given: The second page fails once
    let transport = FakeTransport::new();
    transport
        .push(HttpResponse::ok_xml(accounts_page(&["a"])).with_header("Link", next_link("9")))
        .push_failure(HttpError::new("connection reset"))
        .push(HttpResponse::ok_xml(accounts_page(&["b"])));
    let client = client_with(transport.clone());
    let mut pager = client
        .list_accounts(AccountState::Active, 1)
        .expect("pager should build");

    // When: The caller retries after the failure
    pager.next_page().await.expect("first page");
    let failure = pager.next_page().await.expect_err("second page fails");
    let retried = pager.next_page().await.expect("retry").expect("items");

    // Then: The failure is retryable and the retry targets the same cursor
    assert!(failure.retryable());
    assert_eq!(retried[0].account_code, "b");
    let requests = transport.requests();
    assert_eq!(requests[1].url, requests[2].url);
}

#[tokio::test]
async fn when_a_list_page_is_empty_the_pager_yields_an_empty_page_then_stops() {
    let transport = FakeTransport::new();
    transport.push(HttpResponse::ok_xml(
        r#"<?xml version="1.0" encoding="UTF-8"?><subscriptions type="array"></subscriptions>"#,
    ));
    let client = client_with(transport.clone());
    let mut pager = client
        .list_subscriptions(SubscriptionState::Live, 50)
        .expect("pager should build");

    let page = pager.next_page().await.expect("page").expect("items");

    assert!(page.is_empty());
    assert!(pager.end_of_pages());
    assert_eq!(transport.request(0).url, format!("{BASE}/subscriptions"));
}

#[test]
fn when_the_page_size_is_out_of_range_no_pager_is_built() {
    let client = client_with(FakeTransport::new());

    for size in [0, MAX_PAGE_SIZE + 1] {
        let result = client.list_accounts(AccountState::Active, size);
        assert!(matches!(
            result,
            Err(RecurlyError::Validation(ValidationError::InvalidPageSize { .. }))
        ));
    }
    assert!(client.list_accounts(AccountState::Active, MAX_PAGE_SIZE).is_ok());
}
