//! Query modules organized by entity

pub mod authors;
pub mod books;
pub mod genres;
