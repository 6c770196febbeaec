//! 作答流程 DTO
//!
//! 定义问卷作答流程相关的请求和响应数据结构。
//! 页面跳转以响应体中的导航字段表达，而不是 HTTP 重定向。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// 开始作答响应
#[derive(Debug, Serialize, Deserialize)]
pub struct BeginSurveyResponse {
    /// 问卷标识
    pub survey_id: String,
    /// "started" 或 "already_done"
    pub status: String,
    /// 新会话的起始题目下标（already_done 时为空）
    pub next_index: Option<usize>,
}

/// 题目载荷
#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionPayload {
    /// 题目下标
    pub index: usize,
    /// 题目总数
    pub total: usize,
    /// 题干文本
    pub prompt: String,
    /// 候选答案
    pub choices: Vec<String>,
}

/// 查看题目响应
#[derive(Debug, Serialize, Deserialize)]
pub struct ShowQuestionResponse {
    /// "question"、"complete" 或 "redirect"
    pub status: String,
    /// 题目内容（仅 question）
    pub question: Option<QuestionPayload>,
    /// 应改道至的题目下标（仅 redirect）
    pub redirect_to: Option<usize>,
    /// 用户可见的警告（仅 redirect）
    pub warning: Option<String>,
}

/// 提交作答请求
#[derive(Debug, Deserialize, Validate, Default)]
#[serde(default)]
pub struct SubmitAnswerRequest {
    /// 选定的答案；缺失或为空是客户端错误
    #[validate(length(min = 1, message = "choice is required"))]
    pub choice: String,
}

/// 提交作答响应
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitAnswerResponse {
    /// 下一题下标
    pub next_index: usize,
}

/// 跳过题目响应
#[derive(Debug, Serialize, Deserialize)]
pub struct SkipQuestionResponse {
    /// "question" 或 "summary"
    pub status: String,
    /// 下一题下标（summary 时为空）
    pub next_index: Option<usize>,
}

/// 摘要条目响应
#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryEntryResponse {
    /// 题干文本
    pub prompt: String,
    /// 访客的选择（跳过时为空）
    pub answer: Option<String>,
    /// 该题是否被跳过
    pub skipped: bool,
}

/// 摘要响应
#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    /// 问卷标识
    pub survey_id: String,
    /// 问卷标题
    pub title: String,
    /// 按题目顺序配对的条目
    pub entries: Vec<SummaryEntryResponse>,
    /// 完成时间
    pub completed_at: DateTime<Utc>,
}
