//! UniPA course-catalog search service.
//!
//! The catalog (offertaformativa.unipa.it) is a server-rendered JSF/Seam
//! application. This crate replays its search form submission, session
//! cookie and view-state token included, and exposes the parsed results as
//! a small JSON API.

pub mod cli;
pub mod config;
pub mod logging;
pub mod state;
pub mod unipa;
pub mod web;
