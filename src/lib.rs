//! PVC Cabinets Haiti submission API library.
//!
//! This library provides the server side of the PVC Cabinets Haiti website:
//! validation of contact and quote submissions, preliminary cost estimates,
//! the five-year PVC vs wood cost projection, HTML notification rendering,
//! and the HTTP handlers that tie them together.
//!
//! # Modules
//!
//! - `api`: HTTP-layer components.
//! - `core`: Domain logic, models and errors.
//! - `integrations`: Outbound mail delivery and submission storage.
//! - `config`: Configuration management.
//! - `db`: Database connection and pool management.
//! - `delivery`: Email sender trait and implementations.
//! - `errors`: Error handling types.
//! - `estimate`: Quote cost estimate.
//! - `formatting`: Currency, label and phone helpers.
//! - `handlers`: HTTP request handlers.
//! - `i18n`: Translation table lookup.
//! - `models`: Request, submission and response types.
//! - `notification`: HTML notification rendering.
//! - `projection`: Five-year cost projection.
//! - `routes`: Router and middleware.
//! - `storage`: Submission store trait and implementations.
//! - `validation`: Submission validation.

pub mod api;
pub mod core;
pub mod integrations;

// Re-export primary modules for shared use in tests and the server binary
pub mod config;
pub mod db;
pub mod delivery;
pub mod errors;
pub mod estimate;
pub mod formatting;
pub mod handlers;
pub mod i18n;
pub mod models;
pub mod notification;
pub mod projection;
pub mod routes;
pub mod storage;
pub mod validation;
