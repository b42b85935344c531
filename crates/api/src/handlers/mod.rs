pub mod comics;
pub mod stories;
