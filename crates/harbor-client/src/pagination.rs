//! Collecting every page of a Harbor list operation.

use std::future::Future;

use crate::config::RequestOptions;

/// One page of a list operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items on this page, in server order.
    pub items: Vec<T>,
    /// Collection size reported by the server, if any.
    pub total: Option<i64>,
}

/// Fetches pages until the whole collection has been read.
///
/// Starts at the configured page and asks `fetch` for consecutive page
/// numbers. Stops on an empty page, or once the accumulated item count
/// reaches the reported total. When the server reports no total, a page
/// shorter than the configured page size ends the collection.
///
/// # Errors
///
/// Returns the first error `fetch` yields; items read before it are dropped.
pub async fn collect_pages<T, E, F, Fut>(
    options: &RequestOptions,
    mut fetch: F,
) -> Result<Vec<T>, E>
where
    F: FnMut(i64) -> Fut,
    Fut: Future<Output = Result<Page<T>, E>>,
{
    let mut page = options.page;
    let mut items = Vec::new();

    loop {
        let batch = fetch(page).await?;
        if batch.items.is_empty() {
            break;
        }

        let received = batch.items.len();
        items.extend(batch.items);
        tracing::debug!(page, received, total = ?batch.total, "Fetched page");

        let done = match batch.total {
            Some(total) => count(items.len()) >= total,
            None => count(received) < options.page_size,
        };
        if done {
            break;
        }
        page += 1;
    }

    Ok(items)
}

fn count(len: usize) -> i64 {
    i64::try_from(len).unwrap_or(i64::MAX)
}
