//! core
//!
//! Core domain types and configuration for Veneer.
//!
//! # Modules
//!
//! - [`types`] - Strong types: Oid, RefName
//! - [`model`] - Immutable entity values built from the object store
//! - [`status`] - Relabeling of raw status path sets
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Schemas are strict and self-describing
//! - Nothing in here talks to the object store

pub mod config;
pub mod model;
pub mod status;
pub mod types;
