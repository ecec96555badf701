mod parser;
pub mod scraper;
pub mod types;
pub mod utils;

pub use parser::{ParseError, parse_bracket, parse_pool_play};
pub use scraper::{ScraperError, TournamentScraper};
