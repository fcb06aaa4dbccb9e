pub mod action_service;

pub mod article_service;

pub mod batch;

pub mod gallog_service;
