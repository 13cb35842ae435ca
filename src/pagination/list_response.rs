//! Lazy cursor over a paged list endpoint

use super::types::{resolve_has_more, DecodedItems, PageEnvelope, DEFAULT_PAGE_SIZE};
use crate::client::AccelaClient;
use crate::entity::{self, Entity};
use crate::error::{Error, Result};
use crate::http::ApiRequest;
use crate::types::JsonValue;
use futures::stream::{self, Stream, TryStreamExt};
use std::collections::VecDeque;
use std::fmt;
use tracing::debug;

/// A page of entities plus what is needed to fetch the rest
///
/// Follow-up pages re-issue the original request (same method, URL, query
/// and body) with `offset` advanced by `limit`. Nothing is fetched until
/// [`next_page`](Self::next_page) or the stream returned by
/// [`auto_paging_stream`](Self::auto_paging_stream) asks for it.
pub struct ListResponse<E> {
    items: Vec<E>,
    has_more: bool,
    offset: u32,
    limit: u32,
    total: u64,
    request: ApiRequest,
    result_key: &'static str,
    client: AccelaClient,
}

impl<E: Entity> ListResponse<E> {
    /// Issue `request` and wrap its first page
    pub(crate) async fn fetch(
        client: AccelaClient,
        mut request: ApiRequest,
        result_key: &'static str,
    ) -> Result<Self> {
        let limit = request.query.get_u32("limit").unwrap_or(DEFAULT_PAGE_SIZE);
        let offset = request.query.get_u32("offset").unwrap_or(0);
        request.query.set("limit", limit.to_string());
        request.query.set("offset", offset.to_string());

        let body = client.execute(request.clone()).await?;
        Self::from_first_page(client, request, result_key, body)
    }

    /// Wrap an already fetched first page
    ///
    /// Fails if any entity on the page fails to decode.
    pub fn from_first_page(
        client: AccelaClient,
        request: ApiRequest,
        result_key: &'static str,
        body: JsonValue,
    ) -> Result<Self> {
        let limit = request.query.get_u32("limit").unwrap_or(DEFAULT_PAGE_SIZE);
        let offset = request.query.get_u32("offset").unwrap_or(0);

        let page = PageEnvelope::parse(body, result_key)?;
        let returned = page.items.len();
        let reported_total = page.total;
        let reported_more = page.has_more;
        let items: Vec<E> = page.decode_items(client.timezone()).into_result()?;

        let total = reported_total.unwrap_or(returned as u64);
        let has_more =
            returned > 0 && resolve_has_more(reported_more, returned, limit, offset, total);

        debug!(
            entity = E::MAPPING.entity,
            offset,
            count = items.len(),
            total,
            has_more,
            "Fetched first page"
        );

        Ok(Self {
            items,
            has_more,
            offset,
            limit,
            total,
            request,
            result_key,
            client,
        })
    }

    /// Entities on the current page
    pub fn items(&self) -> &[E] {
        &self.items
    }

    /// Whether another page may exist
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Offset of the current page
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Page size
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Total reported by the server (or the first page's size)
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Take the current page's entities
    pub fn into_items(self) -> Vec<E> {
        self.items
    }

    /// Replace the current page with the next one
    ///
    /// Returns `false`, without any request, once the list is exhausted. If
    /// any entity on the next page fails to decode, the error is returned and
    /// the cursor stays on the current page.
    pub async fn next_page(&mut self) -> Result<bool> {
        if !self.has_more {
            return Ok(false);
        }
        let mut next = self.fetch_next().await?;
        if let Some(err) = next.decoded.failure.take() {
            return Err(err);
        }
        self.commit(next);
        Ok(!self.items.is_empty())
    }

    /// Fetch the page after the current one without moving the cursor
    async fn fetch_next(&self) -> Result<NextPage<E>> {
        let offset = self.offset.saturating_add(self.limit);
        let mut request = self.request.clone();
        request.query.set("offset", offset.to_string());

        let body = self.client.execute(request.clone()).await?;
        let page = PageEnvelope::parse(body, self.result_key)?;

        Ok(NextPage {
            offset,
            returned: page.items.len(),
            total: page.total,
            has_more: page.has_more,
            decoded: page.decode_items(self.client.timezone()),
            request,
        })
    }

    fn commit(&mut self, next: NextPage<E>) {
        if let Some(total) = next.total {
            self.total = total;
        }
        // An empty page ends the list whatever the server claims
        self.has_more = next.returned > 0
            && resolve_has_more(
                next.has_more,
                next.returned,
                self.limit,
                next.offset,
                self.total,
            );
        self.offset = next.offset;
        self.items = next.decoded.items;
        self.request = next.request;

        debug!(
            entity = E::MAPPING.entity,
            offset = self.offset,
            count = self.items.len(),
            has_more = self.has_more,
            "Fetched continuation page"
        );
    }

    /// Stream every entity from the current page onward
    ///
    /// Continuation pages are fetched one at a time, only once the buffered
    /// entities run out. When an entity on a page fails to decode, the
    /// page's other entities are yielded first and the decode error ends the
    /// stream. Any other error ends it immediately.
    ///
    /// ```rust,ignore
    /// let stream = records.list(params).await?.auto_paging_stream();
    /// futures::pin_mut!(stream);
    /// while let Some(record) = stream.try_next().await? {
    ///     println!("{:?}", record.id);
    /// }
    /// ```
    pub fn auto_paging_stream(mut self) -> impl Stream<Item = Result<E>> {
        let buffer: VecDeque<E> = std::mem::take(&mut self.items).into();
        let pending: Option<Error> = None;

        stream::try_unfold(
            (self, buffer, pending),
            |(mut page, mut buffer, mut pending)| async move {
                loop {
                    if let Some(item) = buffer.pop_front() {
                        return Ok(Some((item, (page, buffer, pending))));
                    }
                    if let Some(err) = pending.take() {
                        return Err(err);
                    }
                    if !page.has_more {
                        return Ok(None);
                    }

                    let mut next = match page.fetch_next().await {
                        Ok(next) => next,
                        Err(err) => return Err(err),
                    };
                    if let Some(err) = next.decoded.failure.take() {
                        buffer = std::mem::take(&mut next.decoded.items).into();
                        pending = Some(err);
                        page.has_more = false;
                        continue;
                    }

                    page.commit(next);
                    buffer = std::mem::take(&mut page.items).into();
                }
            },
        )
    }

    /// Drain every remaining page into one vector
    pub async fn collect_all(self) -> Result<Vec<E>> {
        self.auto_paging_stream().try_collect().await
    }

    /// Project the current page into JSON
    ///
    /// ```text
    /// { "data": [...], "has_more": bool, "offset": n, "limit": n, "total": n }
    /// ```
    pub fn to_value(&self) -> Result<JsonValue> {
        let data = self
            .items
            .iter()
            .map(|item| entity::encode(item).map(JsonValue::Object))
            .collect::<Result<Vec<_>>>()?;

        Ok(serde_json::json!({
            "data": data,
            "has_more": self.has_more,
            "offset": self.offset,
            "limit": self.limit,
            "total": self.total,
        }))
    }

    /// Serialize the current page as a JSON string
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let value = self.to_value()?;
        let json = if pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        Ok(json)
    }
}

/// A fetched continuation page, not yet applied to the cursor
struct NextPage<E> {
    request: ApiRequest,
    offset: u32,
    returned: usize,
    total: Option<u64>,
    has_more: Option<bool>,
    decoded: DecodedItems<E>,
}

impl<'a, E> IntoIterator for &'a ListResponse<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<E> fmt::Debug for ListResponse<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListResponse")
            .field("items", &self.items.len())
            .field("has_more", &self.has_more)
            .field("offset", &self.offset)
            .field("limit", &self.limit)
            .field("total", &self.total)
            .finish_non_exhaustive()
    }
}
