//! Domain types and pure rules for the school backend.
//!
//! Nothing in this crate touches the database or the network; the `db` and
//! `api` crates build on these primitives.

pub mod avatar;
pub mod error;
pub mod fanout;
pub mod students;
pub mod types;
pub mod validation;
