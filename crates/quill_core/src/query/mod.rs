//! View query engine for the public blog listing.
//!
//! Pure functions over an already-loaded post collection. Every call
//! re-filters the whole input; there is no index or cache.

pub mod view;
