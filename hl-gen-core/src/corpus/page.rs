use std::time::Duration;

use log::info;
use reqwest::blocking::Client;
use scraper::{Html, Selector};

use crate::error::{Error, Result};

/// Page that redirects to a random article on every request.
pub const DEFAULT_RANDOM_PAGE_URL: &str = "http://www.upworthy.com/random";

/// Where an article page keeps its headline.
const TITLE_SELECTOR: &str = "div#pagetitle header";

/// Blocking client scraping the headline of one article page per request.
pub struct PageScraper {
	client: Client,
	url: String,
}

impl PageScraper {
	/// Creates a scraper for `url` with a request timeout.
	pub fn new(url: &str, timeout: Duration) -> Result<Self> {
		let client = Client::builder().timeout(timeout).build()?;
		Ok(Self { client, url: url.to_owned() })
	}

	pub fn url(&self) -> &str {
		&self.url
	}

	/// Fetches the page and returns its headline.
	///
	/// Returns `Ok(None)` when the headline element exists but is blank.
	///
	/// # Errors
	/// Returns an error on transport failure, on a non-success status, or if
	/// the page has no headline element.
	pub fn fetch_title(&self) -> Result<Option<String>> {
		let body = self
			.client
			.get(&self.url)
			.send()?
			.error_for_status()?
			.text()?;

		let title = parse_page_title(&body)?;
		if let Some(title) = &title {
			info!("scraped \"{}\" from {}", title, self.url);
		}
		Ok(title)
	}
}

/// Extracts the text of `div#pagetitle header` from an article page.
///
/// Text of nested elements is concatenated and trimmed.
///
/// # Errors
/// Returns `Error::Feed` if the page has no such element.
pub fn parse_page_title(html: &str) -> Result<Option<String>> {
	let selector =
		Selector::parse(TITLE_SELECTOR).map_err(|e| Error::Feed(format!("bad selector {}: {:?}", TITLE_SELECTOR, e)))?;
	let document = Html::parse_document(html);

	let header = document
		.select(&selector)
		.next()
		.ok_or_else(|| Error::Feed("page has no title header".to_owned()))?;

	let text = header.text().collect::<String>();
	let text = text.trim();
	Ok((!text.is_empty()).then(|| text.to_owned()))
}
