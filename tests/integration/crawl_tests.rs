//! Integration tests for the crawler
//!
//! These tests use wiremock to serve a small synthetic bookstore and run the
//! category index, pagination, detail collection, and exports against it.

use shelf_scraper::config::{Config, CrawlerConfig, OutputConfig};
use shelf_scraper::crawler::{collect_details, walk_listing, CategoryIndex, Fetcher};
use shelf_scraper::{BookRecord, CrawlSession, CrawlStatus, Rating, ScraperError};
use std::path::Path;
use std::time::{Duration, Instant};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LISTING: &str = "/catalogue/category/books/mystery_3/index.html";

/// Creates a test configuration pointed at the mock server
fn create_test_config(base_url: &str, exports: &Path) -> Config {
    Config {
        crawler: CrawlerConfig {
            base_url: format!("{}/", base_url),
            request_delay_ms: 0,
            timeout_secs: 5,
            connect_timeout_secs: 2,
            max_pages: 50,
            user_agent: None,
        },
        output: OutputConfig {
            exports_dir: exports.join("exports"),
            images_dir: exports.join("images"),
        },
    }
}

fn fetcher() -> Fetcher {
    Fetcher::new(&CrawlerConfig {
        timeout_secs: 5,
        connect_timeout_secs: 2,
        ..CrawlerConfig::default()
    })
    .expect("Failed to build fetcher")
}

fn root_page(categories: &[(&str, &str)]) -> String {
    let items: String = categories
        .iter()
        .map(|(name, href)| format!("<li><a href=\"{}\">\n    {}\n</a></li>", href, name))
        .collect();
    format!(
        r#"<html><body><div class="side_categories"><ul class="nav nav-list">{}</ul></div></body></html>"#,
        items
    )
}

fn listing_page(books: &[&str], next: Option<&str>) -> String {
    let pods: String = books
        .iter()
        .map(|href| {
            format!(
                r#"<li><article class="product_pod"><h3><a href="{}">Book</a></h3></article></li>"#,
                href
            )
        })
        .collect();
    let pager = next
        .map(|href| format!(r#"<ul class="pager"><li class="next"><a href="{}">next</a></li></ul>"#, href))
        .unwrap_or_default();
    format!(
        r#"<html><body><ol class="row">{}</ol>{}</body></html>"#,
        pods, pager
    )
}

fn detail_page(title: &str, price: &str, upc: &str) -> String {
    format!(
        r#"<html><head><meta name="description" content="  About {title}.  " /></head>
        <body>
          <div id="product_gallery"><img src="../../media/cache/aa/{upc}.jpg" alt="{title}" /></div>
          <div class="product_main">
            <h1>{title}</h1>
            <p class="price_color">{price}</p>
            <p class="star-rating Four"></p>
          </div>
          <table class="table table-striped">
            <tr><th>UPC</th><td>{upc}</td></tr>
            <tr><th>Product Type</th><td>Books</td></tr>
            <tr><th>Price (excl. tax)</th><td>{price}</td></tr>
            <tr><th>Price (incl. tax)</th><td>{price}</td></tr>
            <tr><th>Tax</th><td>£0.00</td></tr>
            <tr><th>Availability</th><td>In stock (3 available)</td></tr>
            <tr><th>Number of reviews</th><td>0</td></tr>
          </table>
        </body></html>"#
    )
}

async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

async fn mount_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

fn page_url(server: &MockServer, route: &str) -> Url {
    Url::parse(&format!("{}{}", server.uri(), route)).expect("Failed to build URL")
}

/// Mounts a three-page mystery category with two books per page
async fn mount_three_page_category(server: &MockServer) {
    mount_page(
        server,
        LISTING,
        listing_page(
            &["../../../book-1_1/index.html", "../../../book-2_2/index.html"],
            Some("page-2.html"),
        ),
    )
    .await;
    mount_page(
        server,
        "/catalogue/category/books/mystery_3/page-2.html",
        listing_page(
            &["../../../book-3_3/index.html", "../../../book-4_4/index.html"],
            Some("page-3.html"),
        ),
    )
    .await;
    mount_page(
        server,
        "/catalogue/category/books/mystery_3/page-3.html",
        listing_page(
            &["../../../book-5_5/index.html", "../../../book-6_6/index.html"],
            None,
        ),
    )
    .await;
}

#[tokio::test]
async fn test_walk_three_pages_in_order() {
    let server = MockServer::start().await;
    mount_three_page_category(&server).await;

    let walk = walk_listing(&fetcher(), page_url(&server, LISTING), 50).await;

    let paths: Vec<&str> = walk.book_urls.iter().map(|u| u.path()).collect();
    assert_eq!(
        paths,
        vec![
            "/catalogue/book-1_1/index.html",
            "/catalogue/book-2_2/index.html",
            "/catalogue/book-3_3/index.html",
            "/catalogue/book-4_4/index.html",
            "/catalogue/book-5_5/index.html",
            "/catalogue/book-6_6/index.html",
        ]
    );
    assert_eq!(walk.pages_visited, 3);
    assert_eq!(walk.status, CrawlStatus::Complete);
}

#[tokio::test]
async fn test_walk_stops_on_self_referencing_next_link() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(LISTING))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(
            &["../../../book-1_1/index.html"],
            Some("index.html"),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let walk = walk_listing(&fetcher(), page_url(&server, LISTING), 50).await;

    assert_eq!(walk.book_urls.len(), 1);
    assert_eq!(walk.pages_visited, 1);
    assert!(matches!(walk.status, CrawlStatus::LoopDetected { .. }));
    assert!(walk.status.is_partial());
}

#[tokio::test]
async fn test_walk_ignores_fragment_on_self_referencing_next_link() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(LISTING))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(
            &["../../../book-1_1/index.html"],
            Some("index.html#top"),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let walk = walk_listing(&fetcher(), page_url(&server, LISTING), 50).await;

    assert_eq!(walk.book_urls.len(), 1);
    assert_eq!(walk.pages_visited, 1);
    assert!(matches!(walk.status, CrawlStatus::LoopDetected { .. }));
}

#[tokio::test]
async fn test_walk_keeps_duplicate_book_urls() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/c/index.html",
        listing_page(&["../a/index.html"], Some("page-2.html")),
    )
    .await;
    mount_page(
        &server,
        "/c/page-2.html",
        listing_page(&["../a/index.html"], None),
    )
    .await;

    let walk = walk_listing(&fetcher(), page_url(&server, "/c/index.html"), 50).await;

    assert_eq!(walk.book_urls.len(), 2);
    assert_eq!(walk.book_urls[0], walk.book_urls[1]);
    assert_eq!(walk.book_urls[0].path(), "/a/index.html");
    assert_eq!(walk.pages_visited, 2);
    assert_eq!(walk.status, CrawlStatus::Complete);
}

#[tokio::test]
async fn test_walk_truncates_on_listing_failure() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        LISTING,
        listing_page(
            &["../../../book-1_1/index.html", "../../../book-2_2/index.html"],
            Some("page-2.html"),
        ),
    )
    .await;
    mount_status(&server, "/catalogue/category/books/mystery_3/page-2.html", 500).await;

    let walk = walk_listing(&fetcher(), page_url(&server, LISTING), 50).await;

    assert_eq!(walk.book_urls.len(), 2);
    assert_eq!(walk.pages_visited, 1);
    match walk.status {
        CrawlStatus::Truncated { url, reason } => {
            assert!(url.ends_with("/page-2.html"));
            assert!(reason.contains("500"));
        }
        other => panic!("unexpected status: {other:?}"),
    }
}

#[tokio::test]
async fn test_walk_respects_page_limit() {
    let server = MockServer::start().await;
    mount_three_page_category(&server).await;

    let walk = walk_listing(&fetcher(), page_url(&server, LISTING), 2).await;

    assert_eq!(walk.book_urls.len(), 4);
    assert_eq!(walk.pages_visited, 2);
    assert_eq!(walk.status, CrawlStatus::PageLimitReached { limit: 2 });
}

#[tokio::test]
async fn test_collector_skips_failed_fetch() {
    let server = MockServer::start().await;
    mount_page(&server, "/b1/index.html", detail_page("First", "£10.00", "u1")).await;
    mount_status(&server, "/b2/index.html", 404).await;
    mount_page(&server, "/b3/index.html", detail_page("Third", "£30.00", "u3")).await;

    let urls = vec![
        page_url(&server, "/b1/index.html"),
        page_url(&server, "/b2/index.html"),
        page_url(&server, "/b3/index.html"),
    ];
    let collected = collect_details(&fetcher(), &urls, Duration::ZERO).await;

    let titles: Vec<&str> = collected.books.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["First", "Third"]);
    assert_eq!(collected.skipped.len(), 1);
    assert_eq!(collected.skipped[0].url, urls[1].as_str());
}

#[tokio::test]
async fn test_collector_skips_unparseable_page() {
    let server = MockServer::start().await;
    mount_page(&server, "/b1/index.html", detail_page("First", "£10.00", "u1")).await;
    mount_page(
        &server,
        "/b2/index.html",
        "<html><body><h1>Not a product</h1></body></html>".to_string(),
    )
    .await;

    let urls = vec![page_url(&server, "/b1/index.html"), page_url(&server, "/b2/index.html")];
    let collected = collect_details(&fetcher(), &urls, Duration::ZERO).await;

    assert_eq!(collected.books.len(), 1);
    assert_eq!(collected.skipped.len(), 1);
}

#[tokio::test]
async fn test_collector_waits_between_fetches() {
    let server = MockServer::start().await;
    for i in 1..=3 {
        mount_page(
            &server,
            &format!("/b{}/index.html", i),
            detail_page("Book", "£1.00", &format!("u{}", i)),
        )
        .await;
    }

    let urls: Vec<Url> = (1..=3)
        .map(|i| page_url(&server, &format!("/b{}/index.html", i)))
        .collect();

    let start = Instant::now();
    let collected = collect_details(&fetcher(), &urls, Duration::from_millis(60)).await;

    assert_eq!(collected.books.len(), 3);
    assert!(start.elapsed() >= Duration::from_millis(120));
}

#[tokio::test]
async fn test_category_index_built_once_per_session() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(root_page(&[
            ("Books", "catalogue/category/books_1/index.html"),
            ("Mystery", "catalogue/category/books/mystery_3/index.html"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = CrawlSession::new(create_test_config(&server.uri(), dir.path())).unwrap();

    let mystery = session.lookup("Mystery").await.unwrap();
    assert_eq!(mystery, page_url(&server, LISTING));

    let books = session.lookup("Books").await.unwrap();
    assert_eq!(books.path(), "/catalogue/category/books_1/index.html");
}

#[tokio::test]
async fn test_category_not_found() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    mount_page(
        &server,
        "/",
        root_page(&[("Travel", "catalogue/category/books/travel_2/index.html")]),
    )
    .await;

    let mut session = CrawlSession::new(create_test_config(&server.uri(), dir.path())).unwrap();

    let before = session.categories().await.unwrap().clone();
    let err = session.get_all_books("Poetry").await.unwrap_err();

    assert!(matches!(err, ScraperError::CategoryNotFound { ref name } if name == "Poetry"));
    assert_eq!(session.categories().await.unwrap(), &before);
    assert!(!dir.path().join("exports").exists());
}

#[tokio::test]
async fn test_invalidated_index_is_rebuilt() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(root_page(&[(
            "Travel",
            "catalogue/category/books/travel_2/index.html",
        )])))
        .expect(2)
        .mount(&server)
        .await;

    let mut session = CrawlSession::new(create_test_config(&server.uri(), dir.path())).unwrap();

    session.lookup("Travel").await.unwrap();
    assert!(session.has_categories());

    session.invalidate_categories();
    assert!(!session.has_categories());

    session.lookup("Travel").await.unwrap();
}

#[tokio::test]
async fn test_unreachable_root_is_network_error() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    mount_status(&server, "/", 503).await;

    let mut session = CrawlSession::new(create_test_config(&server.uri(), dir.path())).unwrap();
    let err = session.get_all_books("Travel").await.unwrap_err();

    assert!(matches!(err, ScraperError::Network(_)));
    assert!(!session.has_categories());
}

#[tokio::test]
async fn test_end_to_end_travel_category() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    mount_page(
        &server,
        "/travel/",
        listing_page(&["book-a/index.html", "book-b/index.html"], None),
    )
    .await;
    mount_page(
        &server,
        "/travel/book-a/index.html",
        detail_page("Alpha Trails", "£12.50", "aaaa"),
    )
    .await;
    mount_page(
        &server,
        "/travel/book-b/index.html",
        detail_page("Beta Roads", "£20.00", "bbbb"),
    )
    .await;

    let index = CategoryIndex::from_entries(vec![(
        "Travel".to_string(),
        page_url(&server, "/travel/"),
    )]);
    let config = create_test_config(&server.uri(), dir.path());
    let mut session = CrawlSession::with_categories(config, index).unwrap();

    let outcome = session.get_all_books("Travel").await.unwrap();

    assert_eq!(outcome.books.len(), 2);
    assert_eq!(outcome.books[0].title, "Alpha Trails");
    assert_eq!(outcome.books[0].price, "£12.50");
    assert_eq!(outcome.books[0].rating, Rating::Four);
    assert_eq!(outcome.books[0].description, "About Alpha Trails.");
    assert_eq!(outcome.books[0].url, page_url(&server, "/travel/book-a/index.html").as_str());
    assert_eq!(outcome.books[0].image_url, page_url(&server, "/media/cache/aa/aaaa.jpg").as_str());
    assert_eq!(outcome.books[1].title, "Beta Roads");
    assert_eq!(outcome.books[1].price, "£20.00");
    assert!(outcome.status.is_complete());
    assert!(outcome.skipped.is_empty());
    assert_eq!(outcome.pages_visited, 1);

    let json_path = dir.path().join("exports").join("Travel.json");
    assert_eq!(outcome.json_path.as_deref(), Some(json_path.as_path()));
    assert_eq!(session.load_books("Travel").unwrap(), outcome.books);
}

#[tokio::test]
async fn test_full_crawl_from_root() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    mount_page(
        &server,
        "/",
        root_page(&[
            ("Books", "catalogue/category/books_1/index.html"),
            ("Mystery", "catalogue/category/books/mystery_3/index.html"),
        ]),
    )
    .await;
    mount_three_page_category(&server).await;
    for i in 1..=6 {
        let route = format!("/catalogue/book-{i}_{i}/index.html");
        if i == 4 {
            mount_status(&server, &route, 500).await;
        } else {
            mount_page(
                &server,
                &route,
                detail_page(&format!("Book {i}"), "£5.00", &format!("upc{i}")),
            )
            .await;
        }
    }

    let mut session = CrawlSession::new(create_test_config(&server.uri(), dir.path())).unwrap();
    let outcome = session.get_all_books("Mystery").await.unwrap();

    let titles: Vec<&str> = outcome.books.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["Book 1", "Book 2", "Book 3", "Book 5", "Book 6"]);
    assert_eq!(outcome.links_found, 6);
    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.pages_visited, 3);

    let report = session.export_books(&outcome.books, "Mystery");
    assert!(report.is_success());
    assert!(dir.path().join("exports").join("Mystery.csv").exists());
    assert!(dir.path().join("exports").join("Mystery.xlsx").exists());
}

#[tokio::test]
async fn test_empty_category_writes_no_files() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    mount_page(&server, "/empty/", listing_page(&[], None)).await;

    let index = CategoryIndex::from_entries(vec![("Empty".to_string(), page_url(&server, "/empty/"))]);
    let mut session =
        CrawlSession::with_categories(create_test_config(&server.uri(), dir.path()), index)
            .unwrap();

    let outcome = session.get_all_books("Empty").await.unwrap();
    assert!(outcome.books.is_empty());
    assert!(outcome.json_path.is_none());

    let report = session.export_books(&outcome.books, "Empty");
    assert!(report.is_success());
    assert!(report.written.is_empty());
    assert!(!dir.path().join("exports").exists());
}

#[tokio::test]
async fn test_download_images() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    mount_page(&server, "/b1/index.html", detail_page("First", "£1.00", "cover1")).await;
    mount_page(&server, "/b2/index.html", detail_page("Second", "£2.00", "cover2")).await;
    Mock::given(method("GET"))
        .and(path("/media/cache/aa/cover1.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFF, 0xD8, 0xFF, 0xE0]))
        .mount(&server)
        .await;
    mount_status(&server, "/media/cache/aa/cover2.jpg", 404).await;

    let session = CrawlSession::new(create_test_config(&server.uri(), dir.path())).unwrap();
    let urls = vec![page_url(&server, "/b1/index.html"), page_url(&server, "/b2/index.html")];
    let collected = collect_details(session.fetcher(), &urls, Duration::ZERO).await;
    assert_eq!(collected.books.len(), 2);

    let report = session.download_images(&collected.books).await.unwrap();

    let image = dir.path().join("images").join("cover1.jpg");
    assert_eq!(report.downloaded, vec![image.clone()]);
    assert_eq!(std::fs::read(&image).unwrap(), vec![0xFF, 0xD8, 0xFF, 0xE0]);
    assert_eq!(report.failed.len(), 1);
    assert!(report.failed[0].url.ends_with("cover2.jpg"));
}

fn book_with_image(title: &str, image_url: String) -> BookRecord {
    BookRecord {
        title: title.to_string(),
        price: "£1.00".to_string(),
        rating: Rating::One,
        availability: "In stock".to_string(),
        description: String::new(),
        upc: title.to_string(),
        price_excl_tax: "£1.00".to_string(),
        price_incl_tax: "£1.00".to_string(),
        tax: "£0.00".to_string(),
        number_of_reviews: "0".to_string(),
        url: format!("http://site/{}/index.html", title),
        image_url,
    }
}

#[tokio::test]
async fn test_download_images_keeps_first_of_colliding_names() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/media/a/cover.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"first".to_vec()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/media/b/cover.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"second".to_vec()))
        .expect(0)
        .mount(&server)
        .await;

    let books = vec![
        book_with_image("one", format!("{}/media/a/cover.jpg", server.uri())),
        book_with_image("two", format!("{}/media/b/cover.jpg", server.uri())),
    ];

    let session = CrawlSession::new(create_test_config(&server.uri(), dir.path())).unwrap();
    let report = session.download_images(&books).await.unwrap();

    let image = dir.path().join("images").join("cover.jpg");
    assert_eq!(report.downloaded, vec![image.clone()]);
    assert_eq!(std::fs::read(&image).unwrap(), b"first".to_vec());
    assert_eq!(report.failed.len(), 1);
    assert!(report.failed[0].url.ends_with("/media/b/cover.jpg"));
    assert!(report.failed[0].reason.contains("collides"));
}
