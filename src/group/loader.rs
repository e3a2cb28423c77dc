//! Loader capability
//!
//! Computes a value when it is absent from every cache.

use async_trait::async_trait;

// == Loader ==
/// Produces the bytes for a key on a cache miss.
///
/// Errors are returned to the caller of `Group::get` unchanged.
#[async_trait]
pub trait Loader: Send + Sync {
    async fn load(&self, key: &str) -> anyhow::Result<Vec<u8>>;
}

// == Loader Fn ==
/// Adapts a plain closure into a `Loader`.
///
/// ```
/// use std::sync::Arc;
/// use group_cache::group::{Loader, LoaderFn};
///
/// let loader: Arc<dyn Loader> = Arc::new(LoaderFn(|key: &str| -> anyhow::Result<Vec<u8>> {
///     Ok(key.as_bytes().to_vec())
/// }));
/// ```
pub struct LoaderFn<F>(pub F);

#[async_trait]
impl<F> Loader for LoaderFn<F>
where
    F: Fn(&str) -> anyhow::Result<Vec<u8>> + Send + Sync,
{
    async fn load(&self, key: &str) -> anyhow::Result<Vec<u8>> {
        (self.0)(key)
    }
}
