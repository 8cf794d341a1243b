//! Expense Engine
//!
//! This crate tracks shared expenses among users and computes what each
//! participant owes under equal, exact and percentage split policies. The
//! splitting core lives in [`splitting`]; the [`api`] module wraps it in an
//! HTTP service backed by a [`store`], token-based [`auth`] and a CSV
//! [`export`] of the balance sheet.

#![warn(missing_docs)]

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod splitting;
pub mod store;
