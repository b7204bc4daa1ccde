//! Configuration section definitions.
//!
//! Each module corresponds to a section in `clippings-feed.toml`:
//!
//! | Module   | TOML Section | Purpose                              |
//! |----------|--------------|--------------------------------------|
//! | `source` | `[source]`   | Directory of clippings               |
//! | `feed`   | `[feed]`     | Feed metadata and output files       |
//! | `serve`  | `[serve]`    | HTTP server and output directory     |
//! | `watch`  | `[watch]`    | Change watcher debounce              |

mod feed;
mod serve;
mod source;
mod watch;

pub use feed::FeedSectionConfig;
pub use serve::ServeConfig;
pub use source::SourceConfig;
pub use watch::WatchConfig;
