pub mod activity;
pub mod admin;
pub mod hero_image;
pub mod project;
pub mod video;
