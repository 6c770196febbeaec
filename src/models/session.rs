use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 单题作答结果
///
/// 跳过以显式标记记录，而不是空值。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Answer {
    /// 访客选择的答案
    Choice(String),
    /// 显式跳过标记
    Skipped,
}

impl Answer {
    /// 是否为跳过标记
    pub fn is_skipped(&self) -> bool {
        matches!(self, Answer::Skipped)
    }

    /// 取出选项值（跳过时为 None）
    pub fn choice(&self) -> Option<&str> {
        match self {
            Answer::Choice(c) => Some(c),
            Answer::Skipped => None,
        }
    }
}

/// 问卷会话实体
///
/// 一个访客对一份问卷的一次作答过程。作答记录只在当前长度处追加，
/// 不插入、不重排；开始新的一次作答会整体替换旧会话。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveySession {
    /// 本次作答唯一标识
    pub attempt_id: String,

    /// 选定的问卷标识
    pub survey_id: String,

    /// 已给出的作答（有序，含跳过标记）
    pub answers: Vec<Answer>,

    /// 开始时间
    pub started_at: DateTime<Utc>,

    /// 最后活跃时间
    pub last_active_at: DateTime<Utc>,
}

impl SurveySession {
    /// 开始一次新的作答
    pub fn new(survey_id: &str) -> Self {
        let now = Utc::now();
        Self {
            attempt_id: Uuid::new_v4().to_string(),
            survey_id: survey_id.to_string(),
            answers: Vec::new(),
            started_at: now,
            last_active_at: now,
        }
    }

    /// 更新最后活跃时间
    pub fn touch(&mut self) {
        self.last_active_at = Utc::now();
    }

    /// 追加一条作答
    pub fn push_answer(&mut self, answer: Answer) {
        self.answers.push(answer);
        self.touch();
    }

    /// 已作答数量
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// 相对于给定题目总数是否已全部作答
    pub fn is_complete(&self, total_questions: usize) -> bool {
        self.answers.len() == total_questions
    }
}
