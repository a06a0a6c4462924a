//! switchkey is a small library to query and switch the keyboard input source of the desktop
//! session: the keyboard layout or input method that text typed by the user goes through.
//!
//! # Usage
//!
//! Everything goes through [`InputSources`], which wraps an [`InputSourceRegistry`]. On supported
//! platforms [`InputSources::new`] picks the native registry:
//!
//! ```no_run
//! use switchkey::InputSources;
//!
//! let sources = InputSources::new()?;
//! let current = sources.current();
//! println!("typing with {} ({})", current.display_name(), current.id());
//!
//! if let Some(us) = sources.lookup("com.apple.keylayout.US") {
//!     sources.activate(&us)?;
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Handles are [`InputSource`]s. They are cheap to clone, compare by identifier, and read their
//! display name and icon from the registry on every call. An identifier the registry doesn't know
//! yields `None`, not an error.
//!
//! Code that should not touch the real session (tests, mostly) injects a registry instead, see
//! [`InputSources::with_registry`] and [`headless::HeadlessRegistry`].
//!
//! # Platform support
//!
//! - **macOS:** Text Input Source Services (Carbon), see [`platform::macos`].
//! - **Windows:** keyboard layouts of the input language list, see [`platform::windows`].
//! - **Everything else:** [`InputSources::new`] returns [`NotSupportedError`]; only the headless
//!   registry is available.
//!
//! # Cargo Features
//!
//! switchkey provides the following Cargo features:
//!
//! * `serde`: Enables serialization/deserialization of [`InputSourceId`] via
//!   [serde](https://crates.io/crates/serde).
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub use switchkey_core::error::{ActivationError, NotSupportedError, OsError};
pub use switchkey_core::icon::{BadIcon, Icon};
pub use switchkey_core::input_source::{InputSource, InputSourceId, InputSourceProvider};
pub use switchkey_core::registry::InputSourceRegistry;

pub use self::input_sources::InputSources;

pub mod headless;
mod input_sources;
pub mod platform;
mod platform_impl;
