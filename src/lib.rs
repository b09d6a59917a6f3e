// Library interface for coursera_scraper
// This allows tests and external crates to use the scraper components

pub mod browser;
pub mod config;
pub mod error;
pub mod models;
pub mod profiles;
pub mod runner;
pub mod sitemap;
