use crate::{UrlError, UrlResult};
use url::Url;

/// Parses a base URL, accepting only HTTP and HTTPS
///
/// # Examples
///
/// ```
/// use shelf_scraper::url::parse_base;
///
/// assert!(parse_base("http://books.toscrape.com/").is_ok());
/// assert!(parse_base("mailto:someone@example.com").is_err());
/// ```
pub fn parse_base(url_str: &str) -> UrlResult<Url> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Join {
        base: url_str.to_string(),
        href: String::new(),
        message: e.to_string(),
    })?;

    check_scheme(url)
}

/// Resolves `href` against `base` using RFC 3986 reference resolution
///
/// Absolute hrefs pass through unchanged, `../` segments are collapsed, and
/// surplus `..` segments above the root are dropped.
///
/// # Examples
///
/// ```
/// use shelf_scraper::url::resolve;
/// use url::Url;
///
/// let page = Url::parse("http://site/catalogue/category/books/travel_2/index.html").unwrap();
/// let book = resolve(&page, "../../../its-only-the-himalayas_981/index.html").unwrap();
/// assert_eq!(book.as_str(), "http://site/catalogue/its-only-the-himalayas_981/index.html");
/// ```
pub fn resolve(base: &Url, href: &str) -> UrlResult<Url> {
    let href = href.trim();

    let joined = base.join(href).map_err(|e| UrlError::Join {
        base: base.to_string(),
        href: href.to_string(),
        message: e.to_string(),
    })?;

    check_scheme(joined)
}

fn check_scheme(url: Url) -> UrlResult<Url> {
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            other
        ))),
    }
}
