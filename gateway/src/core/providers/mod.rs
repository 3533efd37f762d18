//! Plumbing shared by provider adapters

pub mod openai;

use std::time::Duration;

use reqwest::{Client, redirect};

/// Build the pooled HTTP client an adapter keeps for its lifetime.
pub fn build_http_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .pool_max_idle_per_host(4)
        .build()
}

/// Build a client for fetching caller-supplied URLs. Redirects are not
/// followed: the target was validated, a `Location` header was not.
pub fn build_download_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .pool_max_idle_per_host(4)
        .redirect(redirect::Policy::none())
        .build()
}
