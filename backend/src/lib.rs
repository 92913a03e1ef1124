//! # Flight Dash
//!
//! Data pipeline behind a flight analytics dashboard.
//!
//! A live flight feed is fetched once and held in a single-slot cache. When the
//! feed cannot be reached, a synthetic dataset of plausible flights takes its
//! place. Every dashboard request then filters the cached dataset, derives
//! insight strings and chart tables from the filtered view, and assembles one
//! view payload. The pipeline never fails a request: any internal error yields
//! a degraded payload instead.
//!
//! ## Architecture
//!
//! - [`models`]: Flight records, datasets and time helpers
//! - [`source`]: Live feed adapter, synthetic generator and the fallback wrapper
//! - [`cache`]: Single-slot dataset cache with an explicit refresh policy
//! - [`services`]: Filtering, insights, chart reduction and view assembly
//! - [`routes`]: Serializable view types produced by the services
//! - [`config`]: TOML and environment configuration
//! - [`http`]: Axum-based HTTP server and request handlers
//! - [`api`]: Re-exports of the public DTOs

pub mod api;

pub mod cache;
pub mod config;
pub mod models;

pub mod routes;

pub mod services;
pub mod source;

#[cfg(feature = "http-server")]
pub mod http;
