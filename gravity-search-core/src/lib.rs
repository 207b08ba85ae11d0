//! Gravity Search core - search history and physics overlay
//!
//! This crate holds everything the gravity search page does that does not
//! need a browser:
//! - the search history manager and its key-value store seam
//! - the rigid-body world that makes page elements fall and bounce
//! - the per-frame sync that maps bodies back onto element styles
//! - configuration and error types
//!
//! The browser bindings live in `gravity-search-wasm`.

pub mod config;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod history;
pub mod overlay;
pub mod physics;
pub mod storage;

pub use config::{ControlIds, PageConfig, PhysicsConfig, TrackedIds};
pub use error::{Error, Result};
pub use frame::{ElementTransform, LoopFlag, StepClock};
pub use geometry::{Rect, Viewport};
pub use history::{HistoryManager, HistoryView, Submission};
pub use overlay::{ElementHost, PhysicsOverlay, TrackedElement};
pub use physics::{BodyKind, BodyState, PhysicsWorld, Wall};
pub use storage::{KeyValueStore, MemoryStore};
