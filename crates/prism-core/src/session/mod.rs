//! Saved runs.
//!
//! A [`Session`] records one successful product run (input, output, metrics
//! and diff) under a title and tags. Sessions belong to a
//! [`Scope`](crate::document::Scope) and are only created through an explicit
//! save action.

mod model;
mod repository;

pub use model::{NewSession, SESSION_ID_PREFIX, Session, SessionPatch};
pub use repository::SessionRepository;
