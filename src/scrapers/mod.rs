pub mod browser;
pub mod markers;
pub mod traits;

pub use browser::BrowserCollector;
pub use markers::PageMarkers;
pub use traits::Collector;
