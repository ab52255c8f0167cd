use url::Url;

/// Returns the last path segment of an image URL, used as its local file name
///
/// Returns `None` when the URL ends in `/` or has no usable segment.
///
/// # Examples
///
/// ```
/// use shelf_scraper::url::image_file_name;
/// use url::Url;
///
/// let url = Url::parse("http://site/media/cache/2c/da/2cdad67c.jpg").unwrap();
/// assert_eq!(image_file_name(&url).as_deref(), Some("2cdad67c.jpg"));
/// ```
pub fn image_file_name(url: &Url) -> Option<String> {
    let segment = url.path_segments()?.next_back()?;

    // Keep the name inside the target directory
    if segment.is_empty() || segment == "." || segment == ".." {
        return None;
    }

    Some(segment.to_string())
}
