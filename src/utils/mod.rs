pub mod app_time;
pub mod slug;
pub mod time_utils;

pub use slug::{resolve_gateway_url, slugify};
pub use time_utils::TimeUtils;
