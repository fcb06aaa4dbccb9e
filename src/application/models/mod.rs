pub mod article;

pub mod gallog;
