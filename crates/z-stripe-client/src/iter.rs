//! Lazy cursor pagination over list endpoints.

use std::collections::VecDeque;
use std::fmt;

use futures::future::BoxFuture;
use futures::Stream;
use z_stripe_core::{FormBody, FormEncode, List, ListItem, ListMeta, ListParams};

use crate::error::ClientError;

/// Future returned by a page fetch.
pub type PageFuture<T> = BoxFuture<'static, Result<List<T>, ClientError>>;

type FetchPage<T> = Box<dyn FnMut(FormBody) -> PageFuture<T> + Send>;

/// Forward-only iterator over every record of a list endpoint.
///
/// Nothing is fetched until the first [`next`](Self::next). Pages are then
/// requested one at a time as the buffer drains, advancing the cursor to the
/// last delivered record. A fetch error is terminal: it is returned by that
/// call and by every later one.
///
/// Not restartable. Each list call builds a fresh iterator.
pub struct ListIter<T> {
    fetch: FetchPage<T>,
    base: FormBody,
    params: ListParams,
    buffer: VecDeque<T>,
    meta: Option<ListMeta>,
    exhausted: bool,
    error: Option<ClientError>,
}

impl<T> ListIter<T>
where
    T: ListItem + Send + 'static,
{
    /// Build an iterator.
    ///
    /// `params` of `None` uses server defaults. `base` holds endpoint-specific
    /// fields sent with every page; paging fields are added per request.
    /// `fetch` performs one page request for the given body.
    pub fn new<F>(params: Option<ListParams>, base: FormBody, fetch: F) -> Self
    where
        F: FnMut(FormBody) -> PageFuture<T> + Send + 'static,
    {
        Self {
            fetch: Box::new(fetch),
            base,
            params: params.unwrap_or_default(),
            buffer: VecDeque::new(),
            meta: None,
            exhausted: false,
            error: None,
        }
    }

    /// Next record, fetching the next page when the buffer is empty.
    ///
    /// Returns `Ok(None)` once every page has been delivered.
    ///
    /// # Errors
    ///
    /// Returns the fetch error that terminated iteration.
    pub async fn next(&mut self) -> Result<Option<T>, ClientError> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }

        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Ok(Some(item));
            }
            if self.exhausted {
                return Ok(None);
            }
            self.fetch_page().await?;
        }
    }

    /// Whether no more records can be obtained.
    #[must_use]
    pub fn stop(&self) -> bool {
        self.error.is_some() || (self.exhausted && self.buffer.is_empty())
    }

    /// Metadata of the most recently fetched page.
    #[must_use]
    pub fn meta(&self) -> Option<&ListMeta> {
        self.meta.as_ref()
    }

    /// Adapt into a stream that ends after the last record or the first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<T, ClientError>> + Send {
        futures::stream::unfold(Some(self), |state| async move {
            let Some(mut iter) = state else {
                return None;
            };
            match iter.next().await {
                Ok(Some(item)) => Some((Ok(item), Some(iter))),
                Ok(None) => None,
                Err(err) => Some((Err(err), None)),
            }
        })
    }

    async fn fetch_page(&mut self) -> Result<(), ClientError> {
        let mut body = self.base.clone();
        self.params.encode_into(&mut body);

        let page = match (self.fetch)(body).await {
            Ok(page) => page,
            Err(err) => {
                tracing::debug!(error = %err, "List page fetch failed");
                self.buffer.clear();
                self.error = Some(err.clone());
                return Err(err);
            }
        };

        let mut items = page.data;
        if self.params.is_backward() {
            // Deliver records moving away from the `ending_before` cursor.
            items.reverse();
        }

        match items.last() {
            Some(last) => self.params.advance(last.id().to_owned()),
            None => self.exhausted = true,
        }
        if self.params.single || !page.meta.has_more {
            self.exhausted = true;
        }

        self.buffer.extend(items);
        self.meta = Some(page.meta);
        Ok(())
    }
}

impl<T> fmt::Debug for ListIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListIter")
            .field("params", &self.params)
            .field("buffered", &self.buffer.len())
            .field("meta", &self.meta)
            .field("exhausted", &self.exhausted)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use futures::TryStreamExt;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item(String);

    impl ListItem for Item {
        fn id(&self) -> &str {
            &self.0
        }
    }

    fn item(id: &str) -> Item {
        Item(id.to_string())
    }

    fn page(ids: &[&str], has_more: bool) -> List<Item> {
        List {
            meta: ListMeta {
                has_more,
                ..ListMeta::default()
            },
            data: ids.iter().map(|id| item(id)).collect(),
        }
    }

    fn api_error() -> ClientError {
        ClientError::Api {
            status: 500,
            error_type: "api_error".into(),
            message: "boom".into(),
            code: None,
            param: None,
        }
    }

    /// Serves `pages` in order and records every request body.
    fn scripted(
        pages: Vec<Result<List<Item>, ClientError>>,
    ) -> (
        impl FnMut(FormBody) -> PageFuture<Item> + Send + 'static,
        Arc<Mutex<Vec<FormBody>>>,
    ) {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);
        let mut pages = pages.into_iter();
        let fetch = move |body: FormBody| -> PageFuture<Item> {
            seen.lock().unwrap().push(body);
            let next = pages.next().expect("unexpected page request");
            Box::pin(async move { next })
        };
        (fetch, requests)
    }

    #[tokio::test]
    async fn pages_through_three_items_in_pages_of_two() {
        let (fetch, requests) = scripted(vec![
            Ok(page(&["item1", "item2"], true)),
            Ok(page(&["item3"], false)),
        ]);
        let mut iter = ListIter::new(Some(ListParams::new().limit(2)), FormBody::new(), fetch);

        assert!(iter.meta().is_none());
        assert!(!iter.stop());

        assert_eq!(iter.next().await.unwrap(), Some(item("item1")));
        assert!(iter.meta().unwrap().has_more);
        assert_eq!(iter.next().await.unwrap(), Some(item("item2")));
        assert!(!iter.stop());
        assert_eq!(iter.next().await.unwrap(), Some(item("item3")));
        assert!(!iter.meta().unwrap().has_more);
        assert!(iter.stop());
        assert_eq!(iter.next().await.unwrap(), None);

        let requests = requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].get("limit"), Some("2"));
        assert!(!requests[0].contains_key("starting_after"));
        assert_eq!(requests[1].get("starting_after"), Some("item2"));
        assert_eq!(requests[1].get("limit"), Some("2"));
    }

    /// `total` items split into pages of `size`; an empty list is one empty page.
    fn paged(total: usize, size: usize) -> Vec<Result<List<Item>, ClientError>> {
        let ids: Vec<String> = (0..total).map(|i| format!("item{i}")).collect();
        if ids.is_empty() {
            return vec![Ok(page(&[], false))];
        }
        let chunks: Vec<&[String]> = ids.chunks(size).collect();
        let last = chunks.len() - 1;
        chunks
            .iter()
            .enumerate()
            .map(|(n, chunk)| {
                let refs: Vec<&str> = chunk.iter().map(String::as_str).collect();
                Ok(page(&refs, n < last))
            })
            .collect()
    }

    #[tokio::test]
    async fn delivers_every_item_for_any_page_size() {
        for (total, size) in [(0, 2), (1, 1), (1, 3), (4, 2), (5, 2), (7, 3), (9, 10), (10, 1)] {
            let pages = paged(total, size);
            let page_count = pages.len();
            let (fetch, requests) = scripted(pages);
            let limit = u32::try_from(size).unwrap();
            let params = ListParams::new().limit(limit);
            let mut iter = ListIter::new(Some(params), FormBody::new(), fetch);

            let last_page_start = (page_count - 1) * size;
            let mut delivered = 0;
            while let Some(got) = iter.next().await.unwrap() {
                assert_eq!(got, item(&format!("item{delivered}")), "total={total} size={size}");
                let on_last_page = delivered >= last_page_start;
                assert_eq!(
                    iter.meta().unwrap().has_more,
                    !on_last_page,
                    "total={total} size={size} index={delivered}"
                );
                delivered += 1;
            }

            assert_eq!(delivered, total, "total={total} size={size}");
            assert!(iter.stop());
            assert!(!iter.meta().unwrap().has_more);
            assert_eq!(requests.lock().unwrap().len(), page_count);
        }
    }

    #[tokio::test]
    async fn error_on_second_page_after_first_page_delivered() {
        let (fetch, _) = scripted(vec![Ok(page(&["a", "b"], true)), Err(api_error())]);
        let mut iter = ListIter::new(None, FormBody::new(), fetch);

        assert_eq!(iter.next().await.unwrap(), Some(item("a")));
        assert_eq!(iter.next().await.unwrap(), Some(item("b")));

        let err = iter.next().await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert!(iter.stop());

        // Terminal: same error again, no further fetch.
        let again = iter.next().await.unwrap_err();
        assert_eq!(again.to_string(), err.to_string());
    }

    #[tokio::test]
    async fn error_on_first_page() {
        let (fetch, _) = scripted(vec![Err(api_error())]);
        let mut iter = ListIter::new(None, FormBody::new(), fetch);

        assert!(iter.next().await.is_err());
        assert!(iter.stop());
        assert!(iter.meta().is_none());
    }

    #[tokio::test]
    async fn empty_list_stops_immediately() {
        let (fetch, _) = scripted(vec![Ok(page(&[], false))]);
        let mut iter = ListIter::new(None, FormBody::new(), fetch);

        assert_eq!(iter.next().await.unwrap(), None);
        assert!(iter.stop());
        assert!(iter.meta().is_some());
    }

    #[tokio::test]
    async fn empty_page_claiming_more_ends_iteration() {
        let (fetch, requests) = scripted(vec![Ok(page(&[], true))]);
        let mut iter = ListIter::new(None, FormBody::new(), fetch);

        assert_eq!(iter.next().await.unwrap(), None);
        assert!(iter.stop());
        assert_eq!(requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn single_fetches_one_page() {
        let (fetch, requests) = scripted(vec![Ok(page(&["a"], true))]);
        let mut iter = ListIter::new(Some(ListParams::new().single()), FormBody::new(), fetch);

        assert_eq!(iter.next().await.unwrap(), Some(item("a")));
        assert_eq!(iter.next().await.unwrap(), None);
        assert!(iter.stop());
        assert_eq!(requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn base_body_is_sent_with_every_page() {
        let (fetch, requests) = scripted(vec![Ok(page(&["a"], true)), Ok(page(&["b"], false))]);
        let mut base = FormBody::new();
        base.add("type", "invoice.paid");
        let mut iter = ListIter::new(None, base, fetch);

        while iter.next().await.unwrap().is_some() {}

        let requests = requests.lock().unwrap();
        assert!(requests.iter().all(|r| r.get("type") == Some("invoice.paid")));
        assert_eq!(requests[1].get_all("starting_after"), ["a"]);
    }

    #[tokio::test]
    async fn backward_paging_reverses_pages_and_moves_ending_before() {
        let (fetch, requests) = scripted(vec![
            Ok(page(&["e5", "e4"], true)),
            Ok(page(&["e7", "e6"], false)),
        ]);
        let params = ListParams::new().ending_before("e3").limit(2);
        let mut iter = ListIter::new(Some(params), FormBody::new(), fetch);

        let mut seen = Vec::new();
        while let Some(item) = iter.next().await.unwrap() {
            seen.push(item.0);
        }

        assert_eq!(seen, ["e4", "e5", "e6", "e7"]);
        let requests = requests.lock().unwrap();
        assert_eq!(requests[0].get("ending_before"), Some("e3"));
        assert_eq!(requests[1].get("ending_before"), Some("e5"));
        assert!(!requests[1].contains_key("starting_after"));
    }

    #[tokio::test]
    async fn stream_yields_items_then_ends_after_error() {
        let (fetch, _) = scripted(vec![Ok(page(&["a", "b"], true)), Err(api_error())]);
        let iter = ListIter::new(None, FormBody::new(), fetch);

        let collected: Vec<Result<Item, ClientError>> =
            futures::StreamExt::collect(iter.into_stream()).await;

        assert_eq!(collected.len(), 3);
        assert!(collected[0].is_ok());
        assert!(collected[1].is_ok());
        assert!(collected[2].is_err());
    }

    #[tokio::test]
    async fn stream_try_collect_all_pages() {
        let (fetch, _) = scripted(vec![Ok(page(&["a"], true)), Ok(page(&["b", "c"], false))]);
        let iter = ListIter::new(None, FormBody::new(), fetch);

        let items: Vec<Item> = iter.into_stream().try_collect().await.unwrap();
        assert_eq!(items, [item("a"), item("b"), item("c")]);
    }
}
