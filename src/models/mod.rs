// src/models/mod.rs

pub mod chat;
pub mod exam;
pub mod exam_record;
pub mod notification;
pub mod question;
pub mod update;
