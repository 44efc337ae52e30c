#![forbid(unsafe_code)]

//! Core domain model for trainlog, a single-session workout log.
//!
//! This crate provides:
//! - Domain types (training sets, change events)
//! - Exercise catalog (favorites and recents)
//! - Session store and the entry form with its validation rules
//! - Suggestion debouncing and change notification
//! - Configuration and logging setup

pub mod types;
pub mod error;
pub mod observer;
pub mod numeric;
pub mod debounce;
pub mod catalog;
pub mod session;
pub mod form;
pub mod training;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::ExerciseCatalog;
pub use session::SessionStore;
pub use form::EntryForm;
pub use training::TrainingSession;
pub use numeric::NumericInput;
pub use debounce::Debouncer;
pub use observer::{Observers, SubscriptionId};
pub use config::Config;
