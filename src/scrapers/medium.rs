//! Lead-image resolution for Medium blog posts.
//!
//! A post page is fetched once and searched for a representative image with
//! the following heuristics, in strict priority order (first hit wins):
//!
//! 1. `<meta property="og:image">`
//! 2. `<meta name="twitter:image">`
//! 3. The `image` field of a `<script type="application/ld+json">` block
//! 4. The first `<img>` served from Medium's CDN whose URL carries a large
//!    size token (`828`, `1400`, `2000`, `4800`)
//! 5. The first `<img>` served from Medium's CDN at any size
//!
//! Every candidate is passed through [`normalize_image_url`] and resolved
//! against the page URL, so callers always receive an absolute URL to the
//! original, untransformed image.

use crate::utils::normalize_image_url;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use serde_json::Value;
use std::error::Error;
use tracing::{debug, info, instrument};
use url::Url;

/// Substrings identifying an `<img src>` hosted on Medium's image CDN.
pub const CDN_MARKERS: [&str; 2] = ["miro.medium.com", "cdn-images"];

/// Width tokens Medium uses for full-size article images.
pub const LARGE_SIZE_TOKENS: [&str; 4] = ["828", "1400", "2000", "4800"];

static OG_IMAGE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[property="og:image"]"#).unwrap());
static TWITTER_IMAGE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[name="twitter:image"]"#).unwrap());
static JSON_LD: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"script[type="application/ld+json"]"#).unwrap());
static IMG_SRC: Lazy<Selector> = Lazy::new(|| Selector::parse("img[src]").unwrap());

/// Fetch a post page and resolve its lead image.
///
/// # Returns
///
/// `Ok(Some(url))` with an absolute image URL, `Ok(None)` when the page has no
/// image signal, or an error if the request fails or returns a non-success
/// status.
#[instrument(level = "info", skip_all, fields(%url))]
pub async fn fetch_image_url(client: &Client, url: &str) -> Result<Option<String>, Box<dyn Error>> {
    let page_url = Url::parse(url)?;
    let html = client
        .get(page_url.clone())
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    info!(bytes = html.len(), "Fetched post page");

    let image = extract_image_url(&html, &page_url);
    debug!(image = ?image, "Resolved lead image");
    Ok(image)
}

/// Apply the resolution heuristics to an already fetched HTML document.
pub fn extract_image_url(html: &str, page_url: &Url) -> Option<String> {
    let document = Html::parse_document(html);
    let absolute = |candidate: &str| absolutize(page_url, candidate);

    if let Some(url) = meta_content(&document, &OG_IMAGE).and_then(absolute) {
        debug!(method = "og:image", %url, "Matched image");
        return Some(url);
    }

    if let Some(url) = meta_content(&document, &TWITTER_IMAGE).and_then(absolute) {
        debug!(method = "twitter:image", %url, "Matched image");
        return Some(url);
    }

    if let Some(url) = json_ld_image(&document).as_deref().and_then(absolute) {
        debug!(method = "ld+json", %url, "Matched image");
        return Some(url);
    }

    let cdn_images: Vec<String> = document
        .select(&IMG_SRC)
        .filter_map(|img| img.value().attr("src"))
        .filter(|src| CDN_MARKERS.iter().any(|marker| src.contains(marker)))
        .filter_map(absolute)
        .collect();

    if let Some(url) = cdn_images
        .iter()
        .find(|url| LARGE_SIZE_TOKENS.iter().any(|size| url.contains(size)))
    {
        debug!(method = "large cdn img", %url, "Matched image");
        return Some(url.clone());
    }

    let url = cdn_images.into_iter().next()?;
    debug!(method = "cdn img", %url, "Matched image");
    Some(url)
}

/// First non-empty `content` attribute among the selected `<meta>` tags.
fn meta_content<'a>(document: &'a Html, selector: &Selector) -> Option<&'a str> {
    document
        .select(selector)
        .filter_map(|meta| meta.value().attr("content"))
        .find(|content| !content.trim().is_empty())
}

/// The `image` of the first linked-data block that has a usable one.
///
/// Blocks that fail to parse are skipped.
fn json_ld_image(document: &Html) -> Option<String> {
    document.select(&JSON_LD).find_map(|script| {
        let text = script.text().collect::<String>();
        match serde_json::from_str::<Value>(text.trim()) {
            Ok(data) => data
                .as_object()?
                .get("image")
                .and_then(image_value)
                .map(str::to_string),
            Err(e) => {
                debug!(error = %e, "Skipping unparseable ld+json block");
                None
            }
        }
    })
}

/// `image` may be a plain URL, an `ImageObject` with a `url`, or a list of either.
fn image_value(value: &Value) -> Option<&str> {
    match value {
        Value::String(url) if !url.trim().is_empty() => Some(url.as_str()),
        Value::Object(obj) => obj
            .get("url")
            .and_then(Value::as_str)
            .filter(|url| !url.trim().is_empty()),
        Value::Array(items) => items.iter().find_map(image_value),
        _ => None,
    }
}

/// Normalize a candidate and resolve it against the page it was found on.
fn absolutize(page_url: &Url, candidate: &str) -> Option<String> {
    let cleaned = normalize_image_url(candidate.trim());
    page_url.join(&cleaned).ok().map(|url| url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Url {
        Url::parse("https://medium.com/@author/a-post-0123456789ab").unwrap()
    }

    fn resolve(html: &str) -> Option<String> {
        extract_image_url(html, &page())
    }

    #[test]
    fn test_og_image_is_stripped_of_query_and_resize() {
        let html = r#"<html><head>
            <meta property="og:image" content="https://miro.medium.com/v2/resize:fit:1200/1*hero.png?q=20">
        </head><body></body></html>"#;

        assert_eq!(
            resolve(html).as_deref(),
            Some("https://miro.medium.com/v2/1*hero.png")
        );
    }

    #[test]
    fn test_og_image_beats_every_other_signal() {
        let html = r#"<html><head>
            <meta name="twitter:image" content="https://miro.medium.com/v2/twitter.png">
            <meta property="og:image" content="https://miro.medium.com/v2/og.png">
            <script type="application/ld+json">{"image": "https://miro.medium.com/v2/ld.png"}</script>
        </head><body><img src="https://miro.medium.com/max/1400/body.png"></body></html>"#;

        assert_eq!(resolve(html).as_deref(), Some("https://miro.medium.com/v2/og.png"));
    }

    #[test]
    fn test_twitter_image_when_og_missing() {
        let html = r#"<html><head>
            <meta property="og:image" content="">
            <meta name="twitter:image" content="https://miro.medium.com/v2/resize:fill:88:88/tw.png">
            <script type="application/ld+json">{"image": "https://miro.medium.com/v2/ld.png"}</script>
        </head></html>"#;

        assert_eq!(resolve(html).as_deref(), Some("https://miro.medium.com/v2/tw.png"));
    }

    #[test]
    fn test_json_ld_string_image() {
        let html = r#"<html><head>
            <script type="application/ld+json">
                {"@context": "http://schema.org", "@type": "NewsArticle", "image": "https://miro.medium.com/v2/ld.png?x=1"}
            </script>
        </head><body><img src="https://miro.medium.com/max/1400/body.png"></body></html>"#;

        assert_eq!(resolve(html).as_deref(), Some("https://miro.medium.com/v2/ld.png"));
    }

    #[test]
    fn test_json_ld_nested_image_object() {
        let html = r#"<script type="application/ld+json">
            {"image": {"@type": "ImageObject", "url": "https://miro.medium.com/v2/resize:fit:800/obj.jpg", "width": 800}}
        </script>"#;

        assert_eq!(resolve(html).as_deref(), Some("https://miro.medium.com/v2/obj.jpg"));
    }

    #[test]
    fn test_json_ld_image_list_uses_first_entry() {
        let html = r#"<script type="application/ld+json">
            {"image": ["https://miro.medium.com/v2/first.jpg", "https://miro.medium.com/v2/second.jpg"]}
        </script>"#;

        assert_eq!(resolve(html).as_deref(), Some("https://miro.medium.com/v2/first.jpg"));
    }

    #[test]
    fn test_broken_json_ld_falls_through_to_next_block() {
        let html = r#"
            <script type="application/ld+json">{"image": </script>
            <script type="application/ld+json">{"image": "https://miro.medium.com/v2/ok.jpg"}</script>
        "#;

        assert_eq!(resolve(html).as_deref(), Some("https://miro.medium.com/v2/ok.jpg"));
    }

    #[test]
    fn test_large_cdn_image_preferred_over_earlier_small_one() {
        let html = r#"<html><body>
            <img src="https://example.com/logo-1400.png">
            <img src="https://miro.medium.com/v2/resize:fill:88:88/0*avatar.jpg">
            <img src="https://miro.medium.com/max/1400/1*article.jpeg?q=20">
        </body></html>"#;

        assert_eq!(
            resolve(html).as_deref(),
            Some("https://miro.medium.com/max/1400/1*article.jpeg")
        );
    }

    #[test]
    fn test_size_token_inside_resize_directive_does_not_count() {
        let html = r#"<body>
            <img src="https://miro.medium.com/v2/resize:fit:1400/0*first.jpg">
            <img src="https://cdn-images-1.medium.com/max/2000/1*second.jpg">
        </body>"#;

        assert_eq!(
            resolve(html).as_deref(),
            Some("https://cdn-images-1.medium.com/max/2000/1*second.jpg")
        );
    }

    #[test]
    fn test_first_cdn_image_when_none_is_large() {
        let html = r#"<body>
            <img src="https://other.example.com/a.png">
            <img src="https://miro.medium.com/v2/resize:fill:64:64/small-a.png">
            <img src="https://miro.medium.com/v2/small-b.png">
        </body>"#;

        assert_eq!(resolve(html).as_deref(), Some("https://miro.medium.com/v2/small-a.png"));
    }

    #[test]
    fn test_relative_candidate_is_made_absolute() {
        let html = r#"<meta property="og:image" content="/images/cover.png?w=10">"#;

        assert_eq!(resolve(html).as_deref(), Some("https://medium.com/images/cover.png"));
    }

    #[test]
    fn test_no_image_signal() {
        let html = r#"<html><head><title>Nothing here</title>
            <meta name="description" content="text only">
            <script type="application/ld+json">{"headline": "No image"}</script>
        </head><body><img src="https://example.com/pic.png"><p>Hi</p></body></html>"#;

        assert_eq!(resolve(html), None);
    }
}
