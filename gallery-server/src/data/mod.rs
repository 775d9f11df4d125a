pub mod image_repository;
pub mod post_repository;
