use anyhow::{anyhow, Result};
use scraper::Selector;
use serde::{Deserialize, Serialize};

/// CSS selectors locating each piece of listing data on the source page.
///
/// The site's markup is not under our control and drifts over time, so
/// the markers live in one injectable value instead of being scattered
/// through the extraction code. A markup change is a marker edit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMarkers {
    /// One element per listing; every field marker below is resolved
    /// inside it.
    pub container: String,
    /// Anchor carrying the route link in its href.
    pub route_link: String,
    pub route_name: String,
    pub operator_name: String,
    pub bus_type: String,
    pub departure_time: String,
    pub duration: String,
    pub arrival_time: String,
    pub star_rating: String,
    pub price: String,
    pub seats_available: String,
}

impl Default for PageMarkers {
    /// Markers tracking the current redBus listing markup. These WILL
    /// drift with site redesigns; verify against a fresh page capture
    /// before blaming the extraction code for empty runs.
    fn default() -> Self {
        Self {
            container: "ul.bus-items li.row-sec".to_string(),
            route_link: "a".to_string(),
            route_name: ".route".to_string(),
            operator_name: ".travels".to_string(),
            bus_type: ".bus-type".to_string(),
            departure_time: ".dp-time".to_string(),
            duration: ".dur".to_string(),
            arrival_time: ".bp-time".to_string(),
            star_rating: ".rating span".to_string(),
            price: ".fare .f-bold".to_string(),
            seats_available: ".seat-left".to_string(),
        }
    }
}

/// `PageMarkers` with every selector parsed. Built once per collection
/// run; a malformed marker fails the whole run rather than silently
/// dropping every listing.
#[derive(Debug)]
pub(crate) struct CompiledMarkers {
    pub container: Selector,
    pub route_link: Selector,
    pub route_name: Selector,
    pub operator_name: Selector,
    pub bus_type: Selector,
    pub departure_time: Selector,
    pub duration: Selector,
    pub arrival_time: Selector,
    pub star_rating: Selector,
    pub price: Selector,
    pub seats_available: Selector,
}

impl PageMarkers {
    pub(crate) fn compile(&self) -> Result<CompiledMarkers> {
        Ok(CompiledMarkers {
            container: compile_one("container", &self.container)?,
            route_link: compile_one("route_link", &self.route_link)?,
            route_name: compile_one("route_name", &self.route_name)?,
            operator_name: compile_one("operator_name", &self.operator_name)?,
            bus_type: compile_one("bus_type", &self.bus_type)?,
            departure_time: compile_one("departure_time", &self.departure_time)?,
            duration: compile_one("duration", &self.duration)?,
            arrival_time: compile_one("arrival_time", &self.arrival_time)?,
            star_rating: compile_one("star_rating", &self.star_rating)?,
            price: compile_one("price", &self.price)?,
            seats_available: compile_one("seats_available", &self.seats_available)?,
        })
    }
}

fn compile_one(name: &str, css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("Invalid {} marker {:?}: {}", name, css, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_markers_compile() {
        PageMarkers::default().compile().unwrap();
    }

    #[test]
    fn malformed_marker_is_rejected() {
        let markers = PageMarkers {
            price: ":::not-a-selector".to_string(),
            ..PageMarkers::default()
        };
        let err = markers.compile().unwrap_err();
        assert!(err.to_string().contains("price"));
    }
}
