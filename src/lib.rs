//! Surveyflow - 多步问卷投放服务
//!
//! 向访客按顺序投放预定义问卷：逐题作答、允许跳过、完成后生成致谢摘要。
//! 完成状态通过持久化标记按访客记录，已完成的问卷不可重做。

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod observability;
pub mod services;
pub mod storage;
