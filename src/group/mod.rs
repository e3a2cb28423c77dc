//! Group Module
//!
//! Named cache namespaces: the collaborator traits a group depends on, the
//! orchestrator resolving a key through cache, peer and loader, and the
//! registry groups are looked up in.

mod loader;
mod orchestrator;
mod peers;
mod registry;
mod stats;

pub use loader::{Loader, LoaderFn};
pub use orchestrator::Group;
pub use peers::{PeerFetcher, PeerPicker};
pub use registry::GroupRegistry;
pub use stats::{GroupStats, GroupStatsSnapshot};
