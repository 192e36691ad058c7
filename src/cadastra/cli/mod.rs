//! The `cadastra` command-line client.
//!
//! A presentation layer like any other: every command becomes one or more
//! [`Intent`](cadastra::app::Intent)s dispatched to an [`App`](cadastra::app::App),
//! and output is rendered from the resulting snapshot.

pub mod args;
pub mod handlers;
pub mod print;
