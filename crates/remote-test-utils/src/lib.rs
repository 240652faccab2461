//! Shared test utilities for the remote-fs workspace.
//!
//! This crate is a dev-dependency only and is never published.
//!
//! # Modules
//!
//! - [`ssh`]: [`FakeSsh`], a stand-in ssh client that runs the remote
//!   command locally inside a temporary "remote" root

pub mod ssh;

pub use ssh::FakeSsh;
