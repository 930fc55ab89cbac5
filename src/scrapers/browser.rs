use crate::models::Listing;
use crate::scrapers::markers::{CompiledMarkers, PageMarkers};
use crate::scrapers::traits::Collector;
use anyhow::{ensure, Context, Result};
use async_trait::async_trait;
use headless_chrome::{Browser, LaunchOptions};
use scraper::{ElementRef, Html, Selector};
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

const SOURCE_URL: &str = "https://www.redbus.in/";

/// Flat settle period for the page's dynamic content. The site gives no
/// usable readiness signal, so we wait a fixed delay after navigation.
const SETTLE_DELAY: Duration = Duration::from_secs(5);

/// Browser-based collector for redBus using headless Chrome.
pub struct BrowserCollector {
    markers: PageMarkers,
}

impl BrowserCollector {
    pub fn new(markers: PageMarkers) -> Self {
        Self { markers }
    }

    /// Drive one headless browser session against the listing page and
    /// return its rendered HTML. The browser lives only inside this
    /// call and is torn down on every return path.
    fn fetch_page_html(&self) -> Result<String> {
        info!("Launching headless Chrome...");

        let options = LaunchOptions::default_builder()
            .headless(true)
            .build()
            .context("Failed to build launch options")?;

        let browser = Browser::new(options).context("Failed to launch Chrome browser")?;

        info!("Opening {}", SOURCE_URL);
        let tab = browser.new_tab()?;
        tab.navigate_to(SOURCE_URL)?;
        tab.wait_until_navigated()?;

        info!("Waiting for dynamic content to render...");
        thread::sleep(SETTLE_DELAY);

        let html = tab
            .evaluate("document.documentElement.outerHTML", false)?
            .value
            .and_then(|v| v.as_str().map(str::to_owned))
            .unwrap_or_default();

        debug!("Captured {} bytes of page HTML", html.len());
        Ok(html)
    }
}

#[async_trait]
impl Collector for BrowserCollector {
    async fn collect(&self) -> Result<Vec<Listing>> {
        let html = self.fetch_page_html()?;
        if html.is_empty() {
            warn!("Page HTML is empty, nothing to extract");
            return Ok(Vec::new());
        }

        let listings = parse_listings(&html, &self.markers)?;
        info!(
            "Collected {} listings from {}",
            listings.len(),
            self.source_name()
        );
        Ok(listings)
    }

    fn source_name(&self) -> &'static str {
        "redBus"
    }
}

/// Extract listings from captured page HTML.
///
/// Extraction is best-effort per container: a container failing any
/// field read or parse is dropped and the rest continue. Which field
/// failed is deliberately not reported; only a skip count at debug.
pub fn parse_listings(html: &str, markers: &PageMarkers) -> Result<Vec<Listing>> {
    let compiled = markers.compile()?;
    let document = Html::parse_document(html);

    let containers: Vec<_> = document.select(&compiled.container).collect();
    info!("Found {} listing containers", containers.len());

    let mut listings = Vec::new();
    let mut skipped = 0usize;
    for container in containers {
        match extract_listing(container, &compiled) {
            Ok(listing) => listings.push(listing),
            Err(_) => skipped += 1,
        }
    }

    debug!("Extracted {} listings, skipped {}", listings.len(), skipped);
    Ok(listings)
}

/// Read all ten fields of one listing container. Any missing element,
/// empty text, or failed numeric parse fails the whole listing.
fn extract_listing(container: ElementRef<'_>, markers: &CompiledMarkers) -> Result<Listing> {
    let route_link = container
        .select(&markers.route_link)
        .next()
        .and_then(|a| a.value().attr("href"))
        .context("missing route link anchor")?
        .to_string();

    let price_text = field_text(container, &markers.price)?;
    let price: f64 = price_text
        .replace('₹', "")
        .trim()
        .parse()
        .with_context(|| format!("unparseable price {:?}", price_text))?;

    let star_rating: f64 = field_text(container, &markers.star_rating)?
        .parse()
        .context("unparseable star rating")?;

    let seats_available: i64 = field_text(container, &markers.seats_available)?
        .parse()
        .context("unparseable seat count")?;

    Ok(Listing {
        route_name: field_text(container, &markers.route_name)?,
        route_link,
        bus_operator_name: field_text(container, &markers.operator_name)?,
        bus_type: field_text(container, &markers.bus_type)?,
        departure_time: field_text(container, &markers.departure_time)?,
        duration: field_text(container, &markers.duration)?,
        arrival_time: field_text(container, &markers.arrival_time)?,
        star_rating,
        price,
        seats_available,
    })
}

/// First match of `sel` under `container`, text content trimmed.
/// Empty text counts as a failed extraction.
fn field_text(container: ElementRef<'_>, sel: &Selector) -> Result<String> {
    let el = container
        .select(sel)
        .next()
        .context("missing field element")?;
    let text = el.text().collect::<String>().trim().to_string();
    ensure!(!text.is_empty(), "empty field text");
    Ok(text)
}
