//! Core business logic for Meridian.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `subsidiary` - Subsidiaries, regions and world-map markers
//! - `financial` - Quarterly financial records and derived metrics
//! - `issue` - Issue tracking: drafts, filters, statistics
//! - `ai` - Prompt construction and response parsing for AI issue drafting
//! - `closing` - Quarterly closing: quarters, schedule grid, achievement rates
//! - `export` - Spreadsheet generation for issues and the closing schedule

pub mod ai;
pub mod closing;
pub mod export;
pub mod financial;
pub mod issue;
pub mod subsidiary;
