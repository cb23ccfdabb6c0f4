//! # Fabrica Application Library
//!
//! Library surface of the Fabrica binary, exposed so integration tests can
//! exercise the catalog bootstrap and CLI execution paths directly.

pub mod catalog;
pub mod cli;
