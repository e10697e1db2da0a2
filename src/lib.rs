//! Pressnote - a small notes and news board
//!
//! This library provides the core functionality for the Pressnote service.

pub mod config;
pub mod db;
pub mod models;
pub mod services;
pub mod web;
