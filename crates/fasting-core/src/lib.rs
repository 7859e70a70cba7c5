//! # Fasting Core Library
//!
//! This library provides the core business logic for tracking intermittent
//! fasts. All operations are available via the standalone CLI binary; any
//! other front end (a home-screen widget, a desktop app) is a thin layer over
//! the same core library.
//!
//! ## Architecture
//!
//! - **Fast Manager**: the fast lifecycle state machine and the single owner of
//!   the "current fast" reference
//! - **Storage**: a repository trait with SQLite and in-memory implementations,
//!   plus TOML-based configuration
//! - **Widget**: a serialized snapshot of the current state and a pure
//!   generator of progress refresh instants derived from it
//! - **History**: month grouping and statistics over completed fasts
//!
//! ## Key Components
//!
//! - [`FastManager`]: start, end, and delete fasts
//! - [`FastRepository`]: storage seam; [`Database`] and [`MemoryRepository`]
//! - [`refresh_schedule`]: widget refresh timestamps
//! - [`Config`]: application configuration management

pub mod error;
pub mod fast;
pub mod history;
pub mod storage;
pub mod widget;

pub use error::{ConfigError, CoreError, StorageError};
pub use fast::{Fast, FastId, FastManager, FastStatus, Mood, TargetInterval};
pub use history::{group_by_month, FastGroup, FastStats};
pub use storage::{data_dir, Config, Database, FastRepository, MemoryRepository};
pub use widget::{
    load_snapshot, refresh_schedule, write_snapshot, FastInfo, ScheduleEntry, WidgetSnapshot,
};
