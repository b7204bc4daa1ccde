//! Actor system for watch mode.
//!
//! Message-passing concurrency between the change watcher and the
//! regeneration worker:
//!
//! ```text
//! notify ──► FsActor ──Regenerate──► GeneratorActor ──► Generator::regenerate
//!           (debounce)               (one at a time)
//! ```
//!
//! # Module Structure
//!
//! - `messages` - Message types for inter-actor communication
//! - `fs` - File system watcher with debouncing
//! - `generator` - Sequential regeneration worker
//! - `coordinator` - Wires up and runs actors

pub mod coordinator;
pub mod fs;
pub mod generator;
pub mod messages;

pub use coordinator::Coordinator;
