pub mod actions;
pub mod handlers;
pub mod header;
pub mod input_feed;
pub mod results;
pub mod selectors;
pub mod utils;
