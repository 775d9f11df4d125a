pub mod error;
pub mod image;
pub mod post;
