use std::time::Duration;

use log::info;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use reqwest::blocking::Client;

use crate::error::{Error, Result};

/// Feed polled when no other URL is configured.
pub const DEFAULT_FEED_URL: &str = "http://feeds.feedburner.com/upworthy";

/// Blocking RSS client holding a reusable HTTP client.
pub struct FeedClient {
	client: Client,
	url: String,
}

impl FeedClient {
	/// Creates a client for `url` with a request timeout.
	pub fn new(url: &str, timeout: Duration) -> Result<Self> {
		let client = Client::builder().timeout(timeout).build()?;
		Ok(Self { client, url: url.to_owned() })
	}

	pub fn url(&self) -> &str {
		&self.url
	}

	/// Fetches the feed and returns the titles of its items.
	///
	/// # Errors
	/// Returns an error on transport failure, on a non-success status, or if
	/// the body is not an RSS document.
	pub fn fetch_titles(&self) -> Result<Vec<String>> {
		let body = self
			.client
			.get(&self.url)
			.send()?
			.error_for_status()?
			.text()?;

		let titles = parse_titles(&body)?;
		info!("fetched {} titles from {}", titles.len(), self.url);
		Ok(titles)
	}
}

/// Element path of an item title, from the document root.
const TITLE_PATH: [&[u8]; 4] = [b"rss", b"channel", b"item", b"title"];

/// Extracts `rss > channel > item > title` text from an RSS document.
///
/// - Text and CDATA inside a title are concatenated, entities unescaped
/// - Surrounding whitespace is trimmed, empty titles are skipped
///
/// Channel-level and image titles are ignored, as is anything inside
/// comments or CDATA sections. Titles are returned in document order.
///
/// # Errors
/// - `Error::Feed` if the root element is not `<rss>`
/// - `Error::Xml` if the document is malformed or uses an unknown entity
pub fn parse_titles(xml: &str) -> Result<Vec<String>> {
	let mut reader = Reader::from_str(xml);

	let mut path: Vec<Vec<u8>> = Vec::new();
	let mut current = String::new();
	let mut titles = Vec::new();
	let mut saw_root = false;

	loop {
		match reader.read_event()? {
			Event::Start(e) => {
				if path.is_empty() {
					if e.local_name().as_ref() != b"rss" {
						return Err(Error::Feed("document is not an RSS feed".to_owned()));
					}
					saw_root = true;
				}
				path.push(e.local_name().as_ref().to_vec());
				if in_title(&path) {
					current.clear();
				}
			}
			Event::Empty(e) if path.is_empty() && e.local_name().as_ref() != b"rss" => {
				return Err(Error::Feed("document is not an RSS feed".to_owned()));
			}
			Event::Text(e) if in_title(&path) => {
				let text = e.unescape().map_err(|err| Error::Xml(err.into()))?;
				current.push_str(&text);
			}
			Event::CData(e) if in_title(&path) => current.push_str(&String::from_utf8_lossy(&e.into_inner())),
			Event::End(_) => {
				if in_title(&path) {
					let title = current.trim();
					if !title.is_empty() {
						titles.push(title.to_owned());
					}
				}
				path.pop();
			}
			Event::Eof => break,
			_ => {}
		}
	}

	if !saw_root {
		return Err(Error::Feed("document is not an RSS feed".to_owned()));
	}
	Ok(titles)
}

fn in_title(path: &[Vec<u8>]) -> bool {
	path.len() == TITLE_PATH.len() && path.iter().zip(TITLE_PATH).all(|(name, want)| name.as_slice() == want)
}

#[cfg(test)]
mod tests {
	use super::*;

	const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Upworthy</title>
    <image><title>Upworthy logo</title></image>
    <item>
      <title>A Kid Asked A Question. The Answer Is Perfect.</title>
      <link>http://example.com/1</link>
    </item>
    <item rdf:about="x">
      <title><![CDATA[Watch This & Then Call Your Mom]]></title>
    </item>
    <item>
      <title>
        Dogs &amp; Cats &#8212; Together &#x2764;
      </title>
    </item>
    <item><title></title></item>
    <item><description>no title here</description></item>
  </channel>
</rss>"#;

	#[test]
	fn extracts_item_titles_only() {
		let titles = parse_titles(FEED).unwrap();
		assert_eq!(
			titles,
			vec![
				"A Kid Asked A Question. The Answer Is Perfect.".to_owned(),
				"Watch This & Then Call Your Mom".to_owned(),
				"Dogs & Cats \u{2014} Together \u{2764}".to_owned(),
			]
		);
	}

	#[test]
	fn rejects_non_rss_documents() {
		assert!(matches!(parse_titles("<html><body/></html>"), Err(Error::Feed(_))));
	}

	#[test]
	fn empty_channel_has_no_titles() {
		let titles = parse_titles("<rss><channel><title>x</title></channel></rss>").unwrap();
		assert!(titles.is_empty());
	}

	#[test]
	fn items_element_is_not_an_item() {
		let xml = "<rss><channel><items><title>nope</title></items></channel></rss>";
		assert!(parse_titles(xml).unwrap().is_empty());
	}

	#[test]
	fn unknown_entities_are_errors() {
		let xml = "<rss><channel><item><title>R&D &nbsp;</title></item></channel></rss>";
		assert!(matches!(parse_titles(xml), Err(Error::Xml(_))));
	}

	#[test]
	fn markup_inside_cdata_is_text() {
		let xml = "<rss><channel><item><description><![CDATA[<p><title>fake</title></p>]]></description>\
			<title>Real Title</title></item></channel></rss>";
		assert_eq!(parse_titles(xml).unwrap(), vec!["Real Title".to_owned()]);
	}

	#[test]
	fn commented_out_items_are_skipped() {
		let xml = "<rss><channel><!-- <item><title>old</title></item> -->\
			<item><title>Real</title></item></channel></rss>";
		assert_eq!(parse_titles(xml).unwrap(), vec!["Real".to_owned()]);
	}

	#[test]
	fn mismatched_tags_are_errors() {
		let xml = "<rss><channel><item><title>broken</item></channel></rss>";
		assert!(matches!(parse_titles(xml), Err(Error::Xml(_))));
	}
}
