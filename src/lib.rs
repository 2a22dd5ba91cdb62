pub mod api;
pub mod config;
pub mod cookie;
pub mod dirs;
pub mod filelock;
pub mod jwt;
pub mod logs;
pub mod time;
