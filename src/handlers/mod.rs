// src/handlers/mod.rs

pub mod chat;
pub mod exam;
pub mod notifications;
pub mod updates;
