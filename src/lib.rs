#![forbid(unsafe_code)]

pub mod block;
pub mod cli;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod kv;
pub mod logging;
pub mod media;
pub mod model;
pub mod notify;
pub mod render;
pub mod repository;
pub mod server;
pub mod slug;
pub mod storage;
pub mod users;
