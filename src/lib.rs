/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Client for the dcinside gallery write protocol.
//!
//! Writing an article is a handshake (verification post answered with cookies
//! and a token), an optional image upload, and a multipart submission whose
//! answer is a script fragment the article address is scraped from. Votes and
//! reports are one-shot json calls, deletes are handshake guarded and can be
//! run as concurrent batches.
//!
//! ```no_run
//! use std::sync::Arc;
//! use dc_client::application::models::article::WriteRequest;
//! use dc_client::application::services::article_service::{ArticleService, ArticleServiceImpl};
//! use dc_client::config::Config;
//! use dc_client::session::interface::Session;
//! use dc_client::transport::http_client::DcHttpClient;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = Arc::new(Config::new());
//! let client = Arc::new(DcHttpClient::new(&config.rest_api)?);
//! let service = ArticleServiceImpl::new(config.clone(), client);
//!
//! let session = Session::from_credentials(&config.credentials);
//! let article = service
//!     .write(&session, WriteRequest::new("programming", "hello", "world"))
//!     .await?;
//! service.delete_articles(&session, &[article]).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;

pub(crate) mod constants;

pub mod error;

pub mod application;

pub mod presentation;

pub mod session;

pub mod transport;

pub mod utils;
