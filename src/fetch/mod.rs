//! Price fetcher module.
//!
//! Issues a single GET per fetch and extracts a best-effort title and price
//! from the returned HTML. All failure modes (network, timeout, layout
//! mismatch, malformed price text) collapse into one outcome, logged before
//! collapsing; callers only see "no price".

use std::time::Duration;

use scraper::{Html, Selector};

use crate::errors::AppError;

/// Fixed desktop browser User-Agent sent with every fetch.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Per-request timeout.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Title used when the page has no recognizable product title.
pub const UNKNOWN_PRODUCT: &str = "Unknown Product";

/// Title reported when the fetch itself failed.
const FETCH_ERROR_TITLE: &str = "Error";

/// Best-effort result of a page fetch.
#[derive(Debug, Clone)]
pub struct ProductQuote {
    pub title: String,
    pub price: Option<f64>,
}

/// Raw fields pulled out of a page by a site adapter, before any
/// normalization or numeric parsing.
#[derive(Debug, Default)]
pub struct Extraction {
    pub title: Option<String>,
    pub price_text: Option<String>,
}

/// Per-site extraction rules. One adapter per supported page layout, so a
/// layout change stays contained in one place.
pub trait SiteAdapter: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether this adapter handles pages from the given host.
    fn matches(&self, host: &str) -> bool;

    /// Pull the raw title and price text out of a parsed document.
    fn extract(&self, document: &Html) -> Extraction;
}

/// Adapter for Amazon-style product markup: `#productTitle`, price in
/// `span.a-price-whole` with `span.a-offscreen` as the fallback.
struct AmazonAdapter {
    title: Selector,
    price_whole: Selector,
    price_offscreen: Selector,
}

impl AmazonAdapter {
    fn new() -> Self {
        Self {
            title: Selector::parse("#productTitle").unwrap(),
            price_whole: Selector::parse("span.a-price-whole").unwrap(),
            price_offscreen: Selector::parse("span.a-offscreen").unwrap(),
        }
    }
}

impl SiteAdapter for AmazonAdapter {
    fn name(&self) -> &'static str {
        "amazon"
    }

    fn matches(&self, host: &str) -> bool {
        host.contains("amazon.") || host.contains("amzn.")
    }

    fn extract(&self, document: &Html) -> Extraction {
        let element_text = |selector: &Selector| {
            document
                .select(selector)
                .next()
                .map(|el| el.text().collect::<String>().trim().to_string())
        };

        Extraction {
            title: element_text(&self.title),
            price_text: element_text(&self.price_whole)
                .or_else(|| element_text(&self.price_offscreen)),
        }
    }
}

/// Internal fetch failure, collapsed before it leaves this module.
#[derive(Debug)]
enum FetchError {
    Request(reqwest::Error),
    MalformedPrice(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Request(err) => write!(f, "request failed: {}", err),
            FetchError::MalformedPrice(text) => write!(f, "malformed price text {:?}", text),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Request(err)
    }
}

/// Fetches product pages and extracts title and price.
pub struct PriceFetcher {
    client: reqwest::Client,
    adapters: Vec<Box<dyn SiteAdapter>>,
}

impl PriceFetcher {
    pub fn new() -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            adapters: vec![Box::new(AmazonAdapter::new())],
        })
    }

    /// Fetch a product page. Never fails: a fetch or parse failure yields
    /// `("Error", None)`, a page without a price node yields
    /// `(title, None)`.
    pub async fn fetch(&self, url: &str) -> ProductQuote {
        match self.try_fetch(url).await {
            Ok(quote) => quote,
            Err(err) => {
                tracing::warn!(url, error = %err, "Price fetch failed");
                ProductQuote {
                    title: FETCH_ERROR_TITLE.to_string(),
                    price: None,
                }
            }
        }
    }

    async fn try_fetch(&self, url: &str) -> Result<ProductQuote, FetchError> {
        let body = self.client.get(url).send().await?.text().await?;

        let adapter = self.adapter_for(url);
        tracing::debug!(url, adapter = adapter.name(), "Extracting price");

        // Html is parsed and dropped without an await in between.
        let extraction = {
            let document = Html::parse_document(&body);
            adapter.extract(&document)
        };

        let title = extraction
            .title
            .unwrap_or_else(|| UNKNOWN_PRODUCT.to_string());
        let price = match extraction.price_text {
            Some(text) => Some(parse_price(&text)?),
            None => None,
        };

        Ok(ProductQuote { title, price })
    }

    /// Pick the adapter for a URL by host; the first adapter doubles as the
    /// default for unrecognized hosts.
    fn adapter_for(&self, url: &str) -> &dyn SiteAdapter {
        let host = reqwest::Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string));

        match host {
            Some(host) => self
                .adapters
                .iter()
                .find(|a| a.matches(&host))
                .unwrap_or(&self.adapters[0])
                .as_ref(),
            None => self.adapters[0].as_ref(),
        }
    }
}

/// Strip the currency symbol and thousands separators, then parse.
fn parse_price(text: &str) -> Result<f64, FetchError> {
    let normalized: String = text
        .chars()
        .filter(|c| !matches!(c, '₹' | '$' | ','))
        .collect();

    normalized
        .trim()
        .parse()
        .map_err(|_| FetchError::MalformedPrice(text.to_string()))
}
