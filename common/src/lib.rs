//! Shared domain logic for the collection forms.
//!
//! Everything in this crate is independent of the browser so it can be
//! exercised by plain `cargo test` on the host:
//!
//! - `model`: serializable records exchanged with the collection backend.
//! - `events`: the typed publish/subscribe channel used for user messages and
//!   domain notifications.
//! - `repository`: the collaborator traits the frontend implements over HTTP.
//! - `upload`: batch image upload with fan-out/join and aggregated reporting.
//! - `sniff`: chunked line reader and first-line CSV header detection.
//! - `form`: the typed collection-creation form, its validation and submission.

pub mod events;
pub mod form;
pub mod model;
pub mod repository;
pub mod sniff;
pub mod upload;

#[cfg(test)]
pub(crate) mod testing;
