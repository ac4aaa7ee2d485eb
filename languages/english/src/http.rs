use std::time::Duration;

/// Shared HTTP client for every outbound lookup. One client keeps one
/// connection pool; the timeout applies to each call.
pub fn build_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .pool_max_idle_per_host(4)
        .pool_idle_timeout(Duration::from_secs(90))
        .timeout(timeout)
        .user_agent(concat!("vocab/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Fresh request nonce
pub fn salt() -> String {
    uuid::Uuid::new_v4().to_string()
}
