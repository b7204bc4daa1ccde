//! Actor Message Definitions
//!
//! ```text
//! FsActor --Regenerate--> GeneratorActor
//! ```

/// Messages to the Generator Actor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorMsg {
    /// Rescan the target and rewrite every output
    Regenerate,
    /// Stop after the current regeneration
    Shutdown,
}
