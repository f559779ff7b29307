use std::future::Future;

use super::model::Page;

/// Why a single page could not be turned into records.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("malformed page body: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("fetching {url} failed after {gathered} records: {source}")]
    Page {
        url: String,
        gathered: usize,
        #[source]
        source: PageError,
    },
    #[error("failed to start fetch runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("fetch worker exited without a result")]
    Disconnected,
}

/// Follows `next` links from `start_url` until a page has none, returning the
/// records of every page in arrival order. The first failing page aborts the
/// whole listing.
pub async fn fetch_all_pages_with<T, F, Fut>(
    start_url: &str,
    mut get_page: F,
) -> Result<Vec<T>, FetchError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<Page<T>, PageError>>,
{
    let mut records = Vec::new();
    let mut next = Some(start_url.to_string());

    while let Some(url) = next.take() {
        match get_page(url.clone()).await {
            Ok(page) => {
                log::debug!("{}: {} records", url, page.results.len());
                records.extend(page.results);
                next = page.next.filter(|n| !n.is_empty());
            }
            Err(source) => {
                log::warn!("Page {} failed after {} records: {}", url, records.len(), source);
                return Err(FetchError::Page {
                    url,
                    gathered: records.len(),
                    source,
                });
            }
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn page(names: &[&str], next: Option<&str>) -> Page<String> {
        Page {
            next: next.map(str::to_string),
            results: names.iter().map(|n| n.to_string()).collect(),
        }
    }

    async fn serve(
        pages: &HashMap<String, Page<String>>,
        url: String,
    ) -> Result<Page<String>, PageError> {
        pages.get(&url).cloned().ok_or(PageError::Status(404))
    }

    #[tokio::test]
    async fn follows_next_links_in_order() {
        let mut pages = HashMap::new();
        pages.insert("p1".to_string(), page(&["a", "b"], Some("p2")));
        pages.insert("p2".to_string(), page(&["c"], Some("p3")));
        pages.insert("p3".to_string(), page(&["d", "e"], None));

        let records = fetch_all_pages_with("p1", |url| serve(&pages, url)).await.unwrap();
        assert_eq!(records, vec!["a", "b", "c", "d", "e"]);
    }

    #[tokio::test]
    async fn empty_next_ends_listing() {
        let mut pages = HashMap::new();
        pages.insert("p1".to_string(), page(&["a"], Some("")));

        let records = fetch_all_pages_with("p1", |url| serve(&pages, url)).await.unwrap();
        assert_eq!(records, vec!["a"]);
    }

    #[tokio::test]
    async fn failing_page_reports_url_and_progress() {
        let mut pages = HashMap::new();
        pages.insert("p1".to_string(), page(&["a", "b"], Some("p2")));

        let err = fetch_all_pages_with("p1", |url| serve(&pages, url))
            .await
            .unwrap_err();
        match err {
            FetchError::Page { url, gathered, source } => {
                assert_eq!(url, "p2");
                assert_eq!(gathered, 2);
                assert!(matches!(source, PageError::Status(404)));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn pages_are_requested_sequentially() {
        let mut pages = HashMap::new();
        pages.insert("p1".to_string(), page(&["a"], Some("p2")));
        pages.insert("p2".to_string(), page(&["b"], None));

        let mut requested = Vec::new();
        fetch_all_pages_with("p1", |url| {
            requested.push(url.clone());
            serve(&pages, url)
        })
        .await
        .unwrap();
        assert_eq!(requested, vec!["p1", "p2"]);
    }
}
