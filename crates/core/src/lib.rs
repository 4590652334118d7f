//! Domain logic for the watchlog catalog.
//!
//! Pure, database-free rules: the static catalog vocabulary, external score
//! normalization, the title lifecycle, and the entry validator that turns an
//! untyped JSON payload into a [`validation::NewTitle`].

pub mod catalog;
pub mod error;
pub mod lifecycle;
pub mod score;
pub mod search;
pub mod types;
pub mod validation;
