// src/exam/mod.rs

pub mod catalog;
pub mod fallback;
pub mod identifier;
pub mod provider;
pub mod scoring;
pub mod session;
