//! Shared model and flow logic for the campus bulk CSV import.
//!
//! Everything in this crate is platform independent so the import state
//! machine, the preview table and the wire payloads can be exercised natively.
//! The browser specific pieces (DOM, `fetch`, `localStorage`) live in the
//! frontend crate and plug in through the traits in [`api`].

pub mod api;
pub mod flow;
pub mod model;
