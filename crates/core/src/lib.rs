//! Shared domain primitives for the teamup board backend.
//!
//! This crate carries the leaf types every other crate depends on: id and
//! timestamp aliases, the domain error enum, birth-date normalization, and
//! the article field vocabularies.

pub mod article;
pub mod birthdate;
pub mod error;
pub mod types;
