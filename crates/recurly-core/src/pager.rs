use std::marker::PhantomData;

use crate::client::with_query;
use crate::http_client::{HttpMethod, HttpResponse};
use crate::xml::{XmlElement, XmlResource};
use crate::{RecurlyClient, RecurlyError, ValidationError};

pub const DEFAULT_PAGE_SIZE: u32 = 50;
pub const MAX_PAGE_SIZE: u32 = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Cursor {
    NotStarted,
    Next(String),
    Done,
}

/// Cursor over a list endpoint.
///
/// Each call to [`Pager::next_page`] performs one GET. The next page's URL comes from
/// the `rel="next"` entry of the `Link` header; a response without one ends paging.
/// `X-Records` carries the total count across all pages.
#[derive(Debug)]
pub struct Pager<T> {
    client: RecurlyClient,
    first_page: String,
    cursor: Cursor,
    total_records: Option<u64>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: XmlResource> Pager<T> {
    pub(crate) fn new(
        client: RecurlyClient,
        path: &str,
        mut params: Vec<(&str, String)>,
        page_size: u32,
    ) -> Result<Self, ValidationError> {
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(ValidationError::InvalidPageSize {
                value: page_size,
                max: MAX_PAGE_SIZE,
            });
        }
        if page_size != DEFAULT_PAGE_SIZE {
            params.push(("per_page", page_size.to_string()));
        }

        Ok(Self {
            client,
            first_page: with_query(path, &params),
            cursor: Cursor::NotStarted,
            total_records: None,
            _marker: PhantomData,
        })
    }

    /// Fetch the next page, or `Ok(None)` once the last page has been read.
    ///
    /// A failed request leaves the cursor where it was.
    pub async fn next_page(&mut self) -> Result<Option<Vec<T>>, RecurlyError> {
        let target = match &self.cursor {
            Cursor::NotStarted => self.first_page.clone(),
            Cursor::Next(url) => url.clone(),
            Cursor::Done => return Ok(None),
        };

        let response = self
            .client
            .perform_request(HttpMethod::Get, &target, None)
            .await?;
        let items = parse_items::<T>(&response)?;

        if let Some(total) = response
            .header("x-records")
            .and_then(|value| value.trim().parse::<u64>().ok())
        {
            self.total_records = Some(total);
        }
        self.cursor = match response.header("link").and_then(next_link) {
            Some(url) => Cursor::Next(url),
            None => Cursor::Done,
        };

        tracing::debug!(
            element = T::ELEMENT_NAME,
            count = items.len(),
            total = ?self.total_records,
            done = self.end_of_pages(),
            "fetched page"
        );
        Ok(Some(items))
    }

    /// Drain every remaining page into one list.
    pub async fn collect_all(mut self) -> Result<Vec<T>, RecurlyError> {
        let mut all = Vec::new();
        while let Some(page) = self.next_page().await? {
            all.extend(page);
        }
        Ok(all)
    }

    pub fn end_of_pages(&self) -> bool {
        self.cursor == Cursor::Done
    }

    /// Total across all pages, known after the first page has been fetched.
    pub fn total_records(&self) -> Option<u64> {
        self.total_records
    }

    /// Request path of the first page, including filters.
    pub fn first_page_path(&self) -> &str {
        &self.first_page
    }
}

fn parse_items<T: XmlResource>(response: &HttpResponse) -> Result<Vec<T>, RecurlyError> {
    if response.body.trim().is_empty() {
        return Ok(Vec::new());
    }
    let root = XmlElement::parse(&response.body)?;
    root.children_named(T::ELEMENT_NAME)
        .map(|element| T::from_element(element).map_err(RecurlyError::from))
        .collect()
}

/// Extract the `rel="next"` target from a `Link` header.
pub(crate) fn next_link(header: &str) -> Option<String> {
    let mut rest = header;
    while let Some(open) = rest.find('<') {
        let after_open = &rest[open + 1..];
        let close = after_open.find('>')?;
        let url = after_open[..close].trim();
        let tail = &after_open[close + 1..];
        let params_end = tail.find('<').unwrap_or(tail.len());

        if !url.is_empty() && tail[..params_end].split(';').any(is_rel_next) {
            return Some(url.to_owned());
        }
        rest = &tail[params_end..];
    }
    None
}

fn is_rel_next(param: &str) -> bool {
    let Some((key, value)) = param.split_once('=') else {
        return false;
    };
    let value = value.trim().trim_end_matches(',').trim().trim_matches('"');
    key.trim().eq_ignore_ascii_case("rel")
        && value
            .split_whitespace()
            .any(|rel| rel.eq_ignore_ascii_case("next"))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::test_support::{test_client, ScriptedHttpClient};
    use crate::Account;

    const PAGE_ONE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<accounts type="array">
  <account href="https://acme.recurly.com/v2/accounts/a1">
    <account_code>a1</account_code>
    <state>active</state>
  </account>
  <account href="https://acme.recurly.com/v2/accounts/a2">
    <account_code>a2</account_code>
    <state>closed</state>
  </account>
</accounts>"#;

    const PAGE_TWO: &str = r#"<accounts type="array">
  <account><account_code>a3</account_code></account>
</accounts>"#;

    #[test]
    fn finds_next_among_several_links() {
        let header = r#"<https://acme.recurly.com/v2/accounts>; rel="start", <https://acme.recurly.com/v2/accounts?cursor=1318388868>; rel="next""#;
        assert_eq!(
            next_link(header).as_deref(),
            Some("https://acme.recurly.com/v2/accounts?cursor=1318388868")
        );
    }

    #[test]
    fn link_without_next_ends_paging() {
        assert_eq!(next_link(r#"<https://acme.recurly.com/v2/accounts>; rel="start""#), None);
        assert_eq!(next_link(""), None);
        assert_eq!(next_link("garbage"), None);
        assert_eq!(next_link("<>; rel=\"next\""), None);
    }

    #[test]
    fn rel_match_is_case_insensitive_and_unquoted() {
        assert_eq!(
            next_link("</v2/plans?cursor=9>; REL=Next").as_deref(),
            Some("/v2/plans?cursor=9")
        );
    }

    #[tokio::test]
    async fn follows_link_header_until_exhausted() {
        let http = Arc::new(ScriptedHttpClient::new(vec![
            HttpResponse::ok_xml(PAGE_ONE)
                .with_header("X-Records", "3")
                .with_header(
                    "Link",
                    r#"<https://acme.recurly.com/v2/accounts?cursor=a2>; rel="next""#,
                ),
            HttpResponse::ok_xml(PAGE_TWO).with_header("X-Records", "3"),
        ]));
        let client = test_client(http.clone());
        let mut pager = Pager::<Account>::new(client, "/accounts", Vec::new(), 2)
            .expect("valid page size");

        let first = pager.next_page().await.expect("first page").expect("items");
        assert_eq!(first.len(), 2);
        assert_eq!(pager.total_records(), Some(3));
        assert!(!pager.end_of_pages());

        let second = pager.next_page().await.expect("second page").expect("items");
        assert_eq!(second[0].account_code, "a3");
        assert!(pager.end_of_pages());
        assert!(pager.next_page().await.expect("no request").is_none());

        let urls: Vec<String> = http.recorded_requests().into_iter().map(|r| r.url).collect();
        assert_eq!(
            urls,
            vec![
                String::from("https://acme.recurly.com/v2/accounts?per_page=2"),
                String::from("https://acme.recurly.com/v2/accounts?cursor=a2"),
            ]
        );
    }

    #[test]
    fn default_page_size_is_not_sent() {
        let client = test_client(Arc::new(ScriptedHttpClient::new(Vec::new())));
        let pager = Pager::<Account>::new(
            client,
            "/accounts",
            vec![("state", String::from("closed"))],
            DEFAULT_PAGE_SIZE,
        )
        .expect("valid page size");
        assert_eq!(pager.first_page_path(), "/accounts?state=closed");
    }

    #[test]
    fn rejects_oversized_pages() {
        let client = test_client(Arc::new(ScriptedHttpClient::new(Vec::new())));
        let err = Pager::<Account>::new(client.clone(), "/accounts", Vec::new(), 201)
            .expect_err("must fail");
        assert_eq!(err, ValidationError::InvalidPageSize { value: 201, max: 200 });
        assert!(Pager::<Account>::new(client, "/accounts", Vec::new(), 0).is_err());
    }

    #[tokio::test]
    async fn failed_page_keeps_cursor() {
        let http = Arc::new(ScriptedHttpClient::new(vec![
            HttpResponse::new(503, ""),
            HttpResponse::ok_xml("<accounts type=\"array\"></accounts>"),
        ]));
        let client = test_client(http);
        let mut pager =
            Pager::<Account>::new(client, "/accounts", Vec::new(), DEFAULT_PAGE_SIZE).expect("valid");

        let err = pager.next_page().await.expect_err("unavailable");
        assert!(err.retryable());
        assert!(!pager.end_of_pages());

        let items = pager.collect_all().await.expect("retry succeeds");
        assert!(items.is_empty());
    }
}
