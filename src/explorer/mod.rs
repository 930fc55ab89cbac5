pub mod app;
pub mod filters;

pub use app::run;
