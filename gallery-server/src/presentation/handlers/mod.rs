use crate::application::image_service::ImageService;
use crate::application::post_service::PostService;
use crate::data::image_repository::SqliteImageRepository;
use crate::data::post_repository::SqlitePostRepository;

pub mod auth;
pub mod image;
pub mod post;
pub mod website;

pub type AppPostService = PostService<SqlitePostRepository, SqliteImageRepository>;
pub type AppImageService = ImageService<SqliteImageRepository>;
