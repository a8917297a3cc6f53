// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Function signature hygiene
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Camera choreography and interaction core for an interactive 3D photo
//! wall.
//!
//! Driftwall drives a wall of framed photographs that a virtual camera
//! drifts through autonomously. A viewer hijacks the drift by hovering,
//! clicking, tapping, or arrow-keying into a specific panel; a background
//! worker prefetches the panel's high-resolution image, and the texture
//! swap happens only once camera motion has visibly settled.
//!
//! # Key entry points
//!
//! - [`engine::WallEngine`] - the orchestrating engine (tick loop, command
//!   execution, zoom sessions)
//! - [`camera::Choreographer`] - randomized camera move planning
//! - [`camera::Integrator`] - the exponential-smoothing filter behind all
//!   camera motion
//! - [`panel::PanelRegistry`] - manifest-driven panel collection and wall
//!   layout
//! - [`options::Options`] - runtime configuration (camera, motion tuning,
//!   layout)
//!
//! # Architecture
//!
//! A single logical thread drives the per-frame
//! [`engine::WallEngine::tick`]: advance the live move timeline, feed the
//! two integrators, derive the camera pose, check the velocity settle
//! condition, and drain prefetch responses. High-resolution image fetches
//! run on a background [`prefetch::PrefetchBridge`] thread and are
//! marshaled back onto the tick through an mpsc channel, so no shared
//! state ever needs a lock.
//!
//! Rendering, the real scene graph, and asset loading are external
//! collaborators reached through the narrow [`engine::RenderBackend`] and
//! [`prefetch::ImageFetcher`] seams.

pub mod animation;
pub mod camera;
pub mod engine;
pub mod error;
pub mod interact;
pub mod options;
pub mod panel;
pub mod prefetch;
pub mod scene;
pub mod util;
