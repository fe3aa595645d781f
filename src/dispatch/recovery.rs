//! Panic containment for tool execution.
//!
//! A panicking handler must not take the caller down with it; the panic is
//! logged and surfaced as an internal error instead.

use futures::FutureExt;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use crate::types::{Error, Result};

/// Await `future`, turning a panic into `Error::Internal`.
pub async fn contain<F, T>(future: F, operation_name: &str) -> Result<T>
where
    F: Future<Output = T>,
{
    match AssertUnwindSafe(future).catch_unwind().await {
        Ok(value) => Ok(value),
        Err(payload) => {
            let panic_msg = extract_panic_message(payload.as_ref());
            tracing::error!(operation = operation_name, panic = %panic_msg, "Recovered from panic");
            Err(Error::internal(format!("panic in {}: {}", operation_name, panic_msg)))
        }
    }
}

fn extract_panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic (no message)".to_string()
    }
}
