//! # Pure Data Module - Data Transfer Objects Only
//!
//! ## Responsibilities
//!
//! - Define configuration data structures
//! - Provide TOML → DTO mapping
//!
//! ## Prohibited
//!
//! **No validation logic and no default value calculation.** Missing keys
//! become empty values or `None`; the host decides what they mean.

pub mod app_config;

pub use app_config::AppConfig;
