//! 原生 Web API 封装模块
//!
//! 对浏览器原生 API 的轻量级封装，集中 `web_sys` 的使用点，
//! 减小 WASM 体积。

pub mod route;
pub mod router;
mod storage;

pub use storage::LocalStorage;
