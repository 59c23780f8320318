//! Parsers for BT Sport pages and API responses
//!
//! Contains modules for parsing different page and response types.
//! None of them perform I/O.

pub mod catalog;
pub mod epg;
pub mod literal;
pub mod live;
pub mod search;

pub use catalog::{Categories, build_query_fragment, parse_categories, parse_query_fragment};
pub use epg::{localise, parse_epg, parse_timezone};
pub use literal::parse_literal;
pub use live::{parse_cdn_response, parse_saml_response};
pub use search::{VideoResults, page_count, parse_publication_date, parse_search_response};
