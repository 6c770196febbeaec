//! 核心数据模型模块
//!
//! 定义 Surveyflow 的核心数据结构：Survey, Question, SurveySession, CompletionMarker。

pub mod marker;
pub mod session;
pub mod survey;

pub use marker::*;
pub use session::*;
pub use survey::*;
