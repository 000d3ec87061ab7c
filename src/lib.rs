//! acmetool HTTP redirector support library.
//!
//! Command-line glue for the redirector: challenge directory lookup, headless
//! answers for interactive questions, and self-installation as a systemd
//! service. Certificate issuance, state reconciliation and challenge serving
//! live in other crates.

pub mod config;
pub mod install;
pub mod interaction;
pub mod redirector;
pub mod webroot;
