//! Blog platform scrapers.
//!
//! Each scraper turns a post URL into the URL of the post's lead image.
//!
//! | Platform | Module | Method |
//! |----------|--------|--------|
//! | Medium | [`medium`] | HTML metadata, linked data, then CDN `<img>` tags |
//!
//! Scrapers return `Result<Option<String>, _>`: `Ok(None)` means the page was
//! fetched but carried no usable image, errors cover network and HTTP status
//! failures. The caller decides how to log and count either case.

pub mod medium;
