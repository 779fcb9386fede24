use std::path::PathBuf;

/// Where page text comes from.
///
/// Stands in for the browser's active tab: a front end hands over either the
/// text it already has, raw HTML, a URL to fetch, or a saved file.
#[derive(Debug, Clone, PartialEq)]
pub enum PageSource {
    Text(String),
    Html(String),
    Url(String),
    File(PathBuf),
}

impl PageSource {
    /// The visible, whitespace-normalized text of the page.
    pub async fn extract_text(&self) -> crate::Result<String> {
        match self {
            PageSource::Text(text) => Ok(page_text::TextCleaner::new().run(text)),
            PageSource::Html(html) => page_text::visible_text(html),
            PageSource::Url(url) => page_text::visible_text(&fetch_html(url).await?),
            PageSource::File(path) => {
                let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
                    crate::anyhow!("failed to read page file {}: {e}", path.display())
                })?;
                if is_html_path(path) {
                    page_text::visible_text(&contents)
                } else {
                    Ok(page_text::TextCleaner::new().run(&contents))
                }
            }
        }
    }
}

/// GETs `url` and returns the response body.
pub async fn fetch_html(url: &str) -> crate::Result<String> {
    let url = url::Url::parse(url).map_err(|e| crate::anyhow!("invalid page url '{url}': {e}"))?;
    crate::debug!("Fetching page {url}");
    let response = reqwest::get(url.clone()).await?.error_for_status()?;
    let body = response.text().await?;
    crate::trace!("Fetched {} bytes from {url}", body.len());
    Ok(body)
}

fn is_html_path(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"))
}
