//! Comprehensive tests for bri11iant-html
//!
//! Parsing realistic pages and resolving their resources.

use bri11iant_html::{HtmlParser, ResourcePathResolver, parse, resolve_markup};

const PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Test Page</title>
    <link rel="stylesheet" href="css/site.css">
    <style>p { color: #333; }</style>
    <script src="js/app.js"></script>
</head>
<body>
    <nav>
        <a href="/">Home</a>
        <a href="/about">About</a>
    </nav>
    <main>
        <h1>Welcome</h1>
        <p class="intro">This is a test.</p>
        <figure>
            <img src="img/cat.png" alt="A cat">
            <figcaption>Cat</figcaption>
        </figure>
        <video src="media/clip.mp4"><track src="media/clip.vtt"></video>
        <ul>
            <li>Item 1</li>
            <li>Item 2</li>
        </ul>
    </main>
</body>
</html>"#;

// ============================================================================
// PARSING
// ============================================================================

#[test]
fn test_parse_page_structure() {
    let doc = parse(PAGE).unwrap();

    assert_eq!(doc.title(), "Test Page");
    assert_eq!(doc.elements_by_tag("a").count(), 2);
    assert_eq!(doc.elements_by_tag("li").count(), 2);
    let html = doc.element(doc.document_element()).unwrap();
    assert_eq!(html.attr("lang"), Some("en"));
}

#[test]
fn test_every_body_element_found_in_source() {
    let doc = parse(PAGE).unwrap();
    let body = doc.element(doc.body()).unwrap();

    for elem in body.descendant_elements() {
        let key = elem.outer_html();
        assert!(PAGE.contains(&key), "serialization key of <{}> not in source: {}", elem.tag(), key);
    }
}

#[test]
fn test_head_children_found_in_source() {
    let doc = parse(PAGE).unwrap();
    let head = doc.element(doc.head()).unwrap();

    for elem in head.child_elements() {
        assert!(PAGE.contains(&elem.outer_html()), "<{}> not in source", elem.tag());
    }
}

#[test]
fn test_parse_with_url_records_url() {
    let doc = HtmlParser::new().parse_with_url(PAGE, "file:///site/index.html").unwrap();
    assert_eq!(doc.url(), "file:///site/index.html");
}

#[test]
fn test_parse_large_document() {
    let mut html = String::from("<html><body><ul>");
    for i in 0..2000 {
        html.push_str(&format!("<li><a href=\"/p/{i}\">Item {i}</a></li>"));
    }
    html.push_str("</ul></body></html>");

    let doc = parse(&html).unwrap();
    assert_eq!(doc.elements_by_tag("a").count(), 2000);
}

// ============================================================================
// RESOURCE RESOLUTION
// ============================================================================

#[test]
fn test_resolve_page_resources() {
    let mut doc = parse(PAGE).unwrap();
    let resolver = ResourcePathResolver::from_document_uri("file:///home/me/site/index.html");

    // link, script, img, video, track
    assert_eq!(resolver.rewrite(&mut doc), 5);
    let script = doc.elements_by_tag("script").next().unwrap();
    assert_eq!(script.attr("src"), Some("file:///home/me/site/js/app.js"));
    let track = doc.elements_by_tag("track").next().unwrap();
    assert_eq!(track.attr("src"), Some("file:///home/me/site/media/clip.vtt"));
    let nav_links: Vec<_> = doc.elements_by_tag("a").filter_map(|a| a.attr("href")).collect();
    assert_eq!(nav_links, vec!["/", "/about"]);
}

#[test]
fn test_resolve_markup_round_trip() {
    let uri = "file:///home/me/site/index.html";
    let resolved = resolve_markup(PAGE, uri).unwrap();

    assert!(resolved.contains(r#"href="file:///home/me/site/css/site.css""#));
    assert!(resolved.contains(r#"src="file:///home/me/site/img/cat.png""#));

    // Stripping the injected prefix gives back the original serialization
    let stripped = resolved.replace("file:///home/me/site/", "");
    assert_eq!(stripped, resolve_markup(PAGE, "untitled").unwrap());
}

#[test]
fn test_resolve_markup_is_stable() {
    let uri = "file:///a/b/c.html";
    let once = resolve_markup(PAGE, uri).unwrap();
    let again = resolve_markup(PAGE, uri).unwrap();
    assert_eq!(once, again);
}
