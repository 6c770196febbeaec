//! 问卷列表 DTO
//!
//! 定义问卷列表相关的响应数据结构。

use serde::{Deserialize, Serialize};

/// 问卷信息响应
#[derive(Debug, Serialize, Deserialize)]
pub struct SurveyInfoResponse {
    /// 问卷标识
    pub survey_id: String,
    /// 问卷标题
    pub title: String,
    /// 填写说明
    pub instructions: String,
    /// 题目总数
    pub question_count: usize,
}

/// 问卷列表响应
///
/// 只包含该访客尚未完成的问卷。
#[derive(Debug, Serialize, Deserialize)]
pub struct SurveyListResponse {
    /// 问卷列表
    pub surveys: Vec<SurveyInfoResponse>,
    /// 总数
    pub total: usize,
}
