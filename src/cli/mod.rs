//! CLI operation mode handlers.
//!
//! - [`listing`]: Page through the content list
//! - [`article`]: Show one article with its related articles
//! - [`categories`]: List the known categories
//! - [`content_types`]: List the content types in use
//!
//! Output formatting utilities are in [`output`].

pub mod article;
pub mod categories;
pub mod content_types;
pub mod listing;
pub mod output;
