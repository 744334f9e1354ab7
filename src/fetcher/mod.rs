pub mod client;
pub mod traits;

pub use client::ScraperImpl;
pub use traits::Scraper;
