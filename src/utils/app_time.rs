// src/utils/app_time.rs
// std's Instant panics in the browser, so wasm builds use web_time instead.

use std::time::Duration;

#[cfg(not(target_arch = "wasm32"))]
pub use std::time::Instant as AppInstant;

#[cfg(target_arch = "wasm32")]
pub use web_time::Instant as AppInstant;

pub fn now() -> AppInstant {
    AppInstant::now()
}

/// Time left until `deadline` as seen at `at`; zero once it has passed.
pub fn remaining(deadline: AppInstant, at: AppInstant) -> Duration {
    deadline.saturating_duration_since(at)
}
