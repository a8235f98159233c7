//! Cursor-following ingestion of the complete `GetSchemaItems` list.
//!
//! Pages are requested strictly one after another: the `start` parameter of
//! each request is the `next` cursor of the page before it. The loop ends when
//! a page omits `next`; an optional page bound guards against a server that
//! never does.

use tracing::{debug, instrument};

use crate::api::types::SchemaItemsResult;
use crate::api::{START_PARAMETER, SchemaQuery, Transport};

use super::SchemaError;
use super::request::get_result;

/// Fetches every page and returns the items in page order.
///
/// The returned result carries the last page's `status` and `items_game_url`
/// and never a `next` cursor.
#[instrument(skip_all, fields(url = %query.redacted(), max_pages = ?max_pages))]
pub(super) async fn fetch_all_items(
    transport: &dyn Transport,
    mut query: SchemaQuery,
    max_pages: Option<usize>,
) -> Result<SchemaItemsResult, SchemaError> {
    let mut items = Vec::new();
    let mut pages = 0usize;

    loop {
        if let Some(limit) = max_pages
            && pages >= limit
        {
            return Err(SchemaError::PageLimitExceeded { limit });
        }

        let mut page: SchemaItemsResult = get_result(transport, query.url()).await?;
        pages += 1;
        debug!(
            page = pages,
            page_items = page.items.len(),
            next = ?page.next,
            "Fetched schema items page"
        );

        if !page.items.is_empty() {
            items.append(&mut page.items);
        }

        match page.next.take() {
            Some(cursor) => query.set_param(START_PARAMETER, &cursor.to_string()),
            None => {
                debug!(pages, total_items = items.len(), "Schema item pagination complete");
                page.items = items;
                return Ok(page);
            }
        }
    }
}
