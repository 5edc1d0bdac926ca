// Service exports
pub mod feed_cache;
pub mod refresh;
pub mod timing;

pub use feed_cache::FeedCache;
pub use refresh::{spawn_refresh_worker, RefreshCommand, RefreshHandle};
pub use timing::{TimingClient, TimingError};
