//! HTML extraction for catalog pages
//!
//! Three kinds of markup are understood:
//! - the site root, whose sidebar lists every category
//! - listing pages, made of product "pods" plus an optional "next" control
//! - detail pages, holding one product and its information table
//!
//! All functions are pure: markup text in, structured data out. Listing
//! extraction never fails (missing markup yields empty results); detail
//! extraction fails with [`ParseError`] when a required field is absent.

use crate::model::{BookRecord, Rating};
use crate::ParseError;
use scraper::{ElementRef, Html, Selector};
use url::Url;

const CATEGORY_LINKS: &str = ".side_categories a";
const BOOK_POD: &str = "article.product_pod";
const POD_LINK: &str = "h3 a";
const NEXT_LINK: &str = "li.next a";

const TITLE: &str = "div.product_main h1";
const PRICE: &str = "p.price_color";
const RATING: &str = "p.star-rating";
const INFO_TABLE_ROWS: &str = "table.table-striped tr";
const INFO_CELL: &str = "td";
const DESCRIPTION: &str = "meta[name=\"description\"]";
const GALLERY_IMAGE: &str = "#product_gallery img";
const ANY_IMAGE: &str = "img";

/// Row positions inside the product information table
///
/// Fields are located by position, not by their label text. A change in the
/// site's table layout only needs this table updated.
struct InfoRows {
    upc: usize,
    price_excl_tax: usize,
    price_incl_tax: usize,
    tax: usize,
    availability: usize,
    number_of_reviews: usize,
}

const INFO_ROWS: InfoRows = InfoRows {
    upc: 0,
    price_excl_tax: 2,
    price_incl_tax: 3,
    tax: 4,
    availability: 5,
    number_of_reviews: 6,
};

/// A category entry from the site sidebar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryLink {
    /// Display name, whitespace-trimmed
    pub name: String,

    /// Link exactly as it appears in the markup (usually relative)
    pub href: String,
}

/// Links extracted from one listing page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingPage {
    /// Detail-page hrefs in pod order
    pub book_links: Vec<String>,

    /// Href of the pagination "next" control, if present
    pub next_link: Option<String>,
}

/// Extracts sidebar category links in document order
///
/// Returns an empty list when the sidebar is absent.
///
/// # Example
///
/// ```
/// use shelf_scraper::crawler::extract_categories;
///
/// let html = r#"<div class="side_categories"><ul><li>
///     <a href="catalogue/category/books/travel_2/index.html">
///         Travel
///     </a></li></ul></div>"#;
/// let categories = extract_categories(html);
/// assert_eq!(categories[0].name, "Travel");
/// ```
pub fn extract_categories(html: &str) -> Vec<CategoryLink> {
    let document = Html::parse_document(html);
    let mut categories = Vec::new();

    let Ok(selector) = Selector::parse(CATEGORY_LINKS) else {
        return categories;
    };

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let name = element_text(&element);
        if name.is_empty() {
            continue;
        }

        categories.push(CategoryLink {
            name,
            href: href.trim().to_string(),
        });
    }

    categories
}

/// Extracts detail-page hrefs from a listing page, one per pod, in pod order
pub fn extract_book_links(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    book_links(&document)
}

/// Extracts the pagination "next" href, if the page has one
pub fn extract_next_link(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    next_link(&document)
}

/// Parses a listing page once and returns both its pod links and next link
pub fn parse_listing(html: &str) -> ListingPage {
    let document = Html::parse_document(html);

    ListingPage {
        book_links: book_links(&document),
        next_link: next_link(&document),
    }
}

fn book_links(document: &Html) -> Vec<String> {
    let (Ok(pod_selector), Ok(link_selector)) =
        (Selector::parse(BOOK_POD), Selector::parse(POD_LINK))
    else {
        return Vec::new();
    };

    document
        .select(&pod_selector)
        .filter_map(|pod| {
            let href = pod
                .select(&link_selector)
                .next()
                .and_then(|link| link.value().attr("href"));

            if href.is_none() {
                tracing::debug!("Skipping product pod without a link");
            }

            href.map(|h| h.trim().to_string())
        })
        .filter(|href| !href.is_empty())
        .collect()
}

fn next_link(document: &Html) -> Option<String> {
    let selector = Selector::parse(NEXT_LINK).ok()?;

    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr("href"))
        .map(|href| href.trim().to_string())
        .filter(|href| !href.is_empty())
}

/// Extracts a full [`BookRecord`] from a detail page
///
/// # Field Sources
///
/// | Field | Source |
/// |-------|--------|
/// | title | `div.product_main h1` |
/// | price | first `p.price_color` |
/// | rating | second class token of `p.star-rating`, `unknown` if absent |
/// | description | `<meta name="description">` content (required) |
/// | upc, prices, tax, availability, reviews | information table rows 0, 2-6 |
/// | image_url | gallery `img` (or first `img`), resolved against `source_url` |
///
/// # Errors
///
/// Returns [`ParseError`] when the title, price, description, information
/// table row, or image is missing.
pub fn extract_book_detail(html: &str, source_url: &Url) -> Result<BookRecord, ParseError> {
    let document = Html::parse_document(html);
    let url = source_url.as_str();

    let title = select_first(&document, TITLE)
        .map(|e| element_text(&e))
        .ok_or_else(|| missing(url, "title"))?;

    let price = select_first(&document, PRICE)
        .map(|e| element_text(&e))
        .ok_or_else(|| missing(url, "price"))?;

    let rating = extract_rating(&document);

    let description = select_first(&document, DESCRIPTION)
        .ok_or_else(|| missing(url, "description meta tag"))?
        .value()
        .attr("content")
        .map(|content| content.trim().to_string())
        .ok_or_else(|| ParseError::MissingAttribute {
            url: url.to_string(),
            element: "description meta tag",
            attribute: "content",
        })?;

    let rows = info_rows(&document);
    let cell = |row: usize, field: &'static str| -> Result<String, ParseError> {
        rows.get(row)
            .and_then(|r| r.as_ref())
            .cloned()
            .ok_or_else(|| ParseError::MissingRow {
                url: url.to_string(),
                row,
                field,
            })
    };

    let upc = cell(INFO_ROWS.upc, "upc")?;
    let price_excl_tax = cell(INFO_ROWS.price_excl_tax, "price_excl_tax")?;
    let price_incl_tax = cell(INFO_ROWS.price_incl_tax, "price_incl_tax")?;
    let tax = cell(INFO_ROWS.tax, "tax")?;
    let availability = cell(INFO_ROWS.availability, "availability")?;
    let number_of_reviews = cell(INFO_ROWS.number_of_reviews, "number_of_reviews")?;

    let image_src = select_first(&document, GALLERY_IMAGE)
        .or_else(|| select_first(&document, ANY_IMAGE))
        .ok_or_else(|| missing(url, "image"))?
        .value()
        .attr("src")
        .map(str::trim)
        .filter(|src| !src.is_empty())
        .ok_or_else(|| ParseError::MissingAttribute {
            url: url.to_string(),
            element: "image",
            attribute: "src",
        })?
        .to_string();

    let image_url = crate::url::resolve(source_url, &image_src)
        .map_err(|_| ParseError::InvalidUrl {
            url: url.to_string(),
            href: image_src.clone(),
        })?
        .to_string();

    Ok(BookRecord {
        title,
        price,
        rating,
        availability,
        description,
        upc,
        price_excl_tax,
        price_incl_tax,
        tax,
        number_of_reviews,
        url: url.to_string(),
        image_url,
    })
}

/// Reads the tier from `class="star-rating Four"`
fn extract_rating(document: &Html) -> Rating {
    select_first(document, RATING)
        .and_then(|e| e.value().attr("class"))
        .and_then(|classes| classes.split_whitespace().nth(1))
        .map(Rating::from_class)
        .unwrap_or(Rating::Unknown)
}

/// Text of the first `td` in each information table row, `None` for rows
/// without a data cell
fn info_rows(document: &Html) -> Vec<Option<String>> {
    let (Ok(row_selector), Ok(cell_selector)) =
        (Selector::parse(INFO_TABLE_ROWS), Selector::parse(INFO_CELL))
    else {
        return Vec::new();
    };

    document
        .select(&row_selector)
        .map(|row| row.select(&cell_selector).next().map(|td| element_text(&td)))
        .collect()
}

fn select_first<'a>(document: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    document.select(&selector).next()
}

fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn missing(url: &str, element: &'static str) -> ParseError {
    ParseError::MissingElement {
        url: url.to_string(),
        element,
    }
}
