//! Application services layer.

pub mod authors;
pub mod error;
pub mod posts;
pub mod repos;
