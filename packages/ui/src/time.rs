use std::time::Duration;

/// Platform-aware async sleep for UI timers.
pub(crate) async fn sleep_secs(secs: u64) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(Duration::from_secs(secs)).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(Duration::from_secs(secs)).await;
}
