//! Rate-limit friendly HTTP for the indexer clients.

use anyhow::{Context, Result, anyhow};
use rand::{Rng, thread_rng};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::SOURCES;

#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    max_retries: u8,
}

impl HttpClient {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(SOURCES.client.timeout_ms))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            max_retries: SOURCES.client.retries,
        })
    }

    /// GET `url` and decode the JSON body, retrying on 429 and transport errors.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str, label: &str) -> Result<T> {
        let response = send_with_backoff(self.client.get(url), label, self.max_retries)
            .await
            .with_context(|| format!("{} request failed", label))?;
        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("{} returned HTTP {}", label, status));
        }
        response
            .json::<T>()
            .await
            .with_context(|| format!("{} returned malformed JSON", label))
    }
}

pub async fn send_with_backoff(
    rb: reqwest::RequestBuilder,
    label: &str,
    max_retries: u8,
) -> Result<reqwest::Response> {
    let mut attempt = 0u8;
    loop {
        let request = rb
            .try_clone()
            .ok_or_else(|| anyhow!("{}: request body cannot be retried", label))?;
        match request.send().await {
            Ok(r) => {
                if r.status().as_u16() == 429 && attempt < max_retries {
                    attempt += 1;
                    let back_ms = backoff_delay_ms(attempt);
                    log::warn!("429 {} retry={} backoff={}ms", label, attempt, back_ms);
                    tokio::time::sleep(Duration::from_millis(back_ms)).await;
                    continue;
                }
                return Ok(r);
            }
            Err(e) => {
                if attempt < max_retries {
                    attempt += 1;
                    let back_ms = backoff_delay_ms(attempt);
                    log::warn!("err {} retry={} backoff={}ms : {}", label, attempt, back_ms, e);
                    tokio::time::sleep(Duration::from_millis(back_ms)).await;
                    continue;
                }
                return Err(e.into());
            }
        }
    }
}

/// Exponential from the configured base (doubling, capped at 2^5) plus up to 250ms jitter.
fn backoff_delay_ms(attempt: u8) -> u64 {
    base_delay_ms(attempt) + thread_rng().gen_range(0..=250)
}

fn base_delay_ms(attempt: u8) -> u64 {
    let exponent = attempt.clamp(1, 6) - 1;
    SOURCES.client.backoff_base_ms.saturating_mul(1u64 << exponent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_then_caps() {
        assert_eq!(base_delay_ms(1), 300);
        assert_eq!(base_delay_ms(2), 600);
        assert_eq!(base_delay_ms(4), 2400);
        assert_eq!(base_delay_ms(6), 9600);
        assert_eq!(base_delay_ms(9), 9600);
        let with_jitter = backoff_delay_ms(1);
        assert!((300..=550).contains(&with_jitter));
    }
}
