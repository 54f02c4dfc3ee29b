use std::future::Future;

use lazy_static::lazy_static;
use tokio::runtime::Runtime;

lazy_static! {
    static ref RUNTIME: Runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime should build");
}

/// Drive an HTTP request future to completion for the sequential fetch → write pipeline.
/// The runtime is built on first use and shared by every fetch; callers must not already be
/// inside a tokio runtime.
pub(crate) fn do_sync<T, F: Future<Output = T>>(fut: F) -> T {
    RUNTIME.block_on(fut)
}
