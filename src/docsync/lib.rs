//! # Docsync Architecture
//!
//! Docsync is the client side of a document-synchronization protocol: entries
//! (files and folders) identified by unique IDs, versioned, and exchanged with
//! a blob store through signed URLs. The crate is a library first; the
//! `docsync` binary is one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs)                                     │
//! │  - Parses arguments, prints messages and wire payloads      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade, turns user input into selectors             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - mkdir, upload, list, show, delete, blob, sync, config    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Model (model.rs, wire.rs, identity.rs)                     │
//! │  - Entry shapes, constructors, converters, blob envelopes   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The local manifest ([`store`]) sits beside the command layer: it is the
//! client's record of what it has announced to the server.
//!
//! ## The Model Is Total
//!
//! Constructors and converters in [`model`] never fail and never validate.
//! Anything that needs checking (parents that exist, types that match on
//! re-upload, generations that only go forward) is checked in the command
//! layer, before an entry is stored or a payload is produced.
//!
//! ## Module Overview
//!
//! - [`model`]: `Document`, `MetadataDocument` and friends, constructors, converters
//! - [`wire`]: blob storage envelopes and the sync-completed marker
//! - [`identity`]: clock and ID capabilities, timestamp format
//! - [`tree`]: folder hierarchy from a flat entry list
//! - [`index`]: display numbering and entry selectors
//! - [`format`]: human-readable sizes, ages and paths
//! - [`store`]: manifest storage abstraction and implementations
//! - [`commands`]: one module per operation
//! - [`api`]: the facade
//! - [`config`]: client configuration
//! - [`logging`]: `tracing` subscriber setup
//! - [`error`]: error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod identity;
pub mod index;
pub mod logging;
pub mod model;
pub mod store;
pub mod tree;
pub mod wire;
