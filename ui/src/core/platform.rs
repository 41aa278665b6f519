//! Platform glue for spawning detached futures off the render path.

#[cfg(target_arch = "wasm32")]
pub fn spawn_future<F>(future: F)
where
    F: std::future::Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn spawn_future<F>(future: F)
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    // Desktop shells run on a tokio runtime.
    tokio::spawn(future);
}
