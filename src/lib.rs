//! Group Cache - A distributed read-through cache
//!
//! Values live in named groups. A lookup is served from the node's bounded
//! LRU cache when possible, otherwise from the peer that owns the key on a
//! consistent-hash ring, and finally from the group's loader.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod group;
pub mod models;
pub mod peer;
pub mod ring;

pub use api::AppState;
pub use cache::ByteView;
pub use config::Config;
pub use error::{CacheError, GroupError, PeerError};
pub use group::{Group, GroupRegistry, Loader, LoaderFn, PeerFetcher, PeerPicker};
pub use peer::{HttpFetcher, HttpPool};
pub use ring::HashRing;
