//! Job Ready Program application wizard
//!
//! A terminal wizard that collects an application in five steps, and the
//! HTTP endpoint that turns each submission into two notification emails.

pub mod app;
pub mod application;
pub mod config;
pub mod env_vars;
pub mod logging;
pub mod mailer;
pub mod rest;
pub mod submission;
pub mod ui;
pub mod wizard;
