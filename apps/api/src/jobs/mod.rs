//! Job posting CRUD. Thin persistence surface; the scoring core consumes the
//! description and required-skill list.

pub mod handlers;
