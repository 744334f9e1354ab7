pub mod ad_builder;
pub mod details;
pub mod fragment;
pub mod kijiji_parser;

pub use ad_builder::build_ad;
pub use details::parse_ad_details;
pub use fragment::FragmentReader;
pub use kijiji_parser::{KijijiParser, Parser};
