// Core feed rendering exports
pub mod feed;
pub mod gid;
pub mod xml;

pub use feed::{render_feed, render_product, resolve_site_url, FeedError, FeedOptions, RenderedFeed};
pub use gid::{parse_gid, Gid, GidError};
pub use xml::{escape_xml, find_illegal_char, is_valid_tag_name};
