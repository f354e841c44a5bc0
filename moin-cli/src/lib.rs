//! Support code for the moinconv binary

pub mod store;
