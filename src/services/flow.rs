//! 问卷流程服务
//!
//! 问卷作答的状态机：驱动题目推进、跳过处理、完成检测与收尾。
//! 每次作答的状态转移为 `NotStarted -> InProgress(k) -> Complete -> Finalized`，
//! 其中 k 为已作答数量；查看题目是纯观察，不产生状态转移。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::catalog::SurveyCatalog;
use crate::error::{AppError, Result};
use crate::models::session::{Answer, SurveySession};
use crate::models::survey::Question;
use crate::storage::{CompletionMarkerStore, SessionStore};

/// 开始作答的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    /// 访客此前已完成该问卷，不创建会话
    AlreadyDone,
    /// 新会话已建立，从第一题开始
    Started { first_index: usize },
}

/// 查看题目的结果
///
/// 查看是只读观察，任何分支都不改动作答记录。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionView {
    /// 全部题目已作答，应进入摘要
    Complete,
    /// 展示指定下标的题目
    Question {
        index: usize,
        total: usize,
        question: Question,
    },
    /// 请求下标超前于实际进度，带警告改道至正确题目
    Redirect { to: usize, warning: String },
}

/// 作答或跳过之后的去向
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextStep {
    /// 前往指定下标的题目
    Question { index: usize },
    /// 前往摘要
    Summary,
}

/// 摘要条目：题目与对应作答的配对
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryEntry {
    /// 题目
    pub question: Question,
    /// 作答（含跳过标记）
    pub answer: Answer,
}

/// 收尾产出的摘要
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveySummary {
    /// 问卷标识
    pub survey_id: String,
    /// 问卷标题
    pub title: String,
    /// 按题目顺序配对的条目
    pub entries: Vec<SummaryEntry>,
    /// 完成时间
    pub completed_at: DateTime<Utc>,
}

/// 可选问卷列表项
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyListing {
    /// 问卷标识
    pub survey_id: String,
    /// 问卷标题
    pub title: String,
    /// 填写说明
    pub instructions: String,
    /// 题目总数
    pub question_count: usize,
}

/// 问卷流程服务 trait
#[async_trait]
pub trait SurveyFlowService: Send + Sync {
    /// 列出访客尚未完成的问卷
    async fn list_available(&self, visitor_id: &str) -> Result<Vec<SurveyListing>>;

    /// 开始一次作答
    ///
    /// `already_done` 由调用方依据完成标记给出；为 true 时不触碰会话状态。
    async fn start_attempt(
        &self,
        visitor_id: &str,
        survey_id: &str,
        already_done: bool,
    ) -> Result<StartOutcome>;

    /// 查看指定下标的题目（只读）
    async fn show_question(
        &self,
        visitor_id: &str,
        requested_index: usize,
    ) -> Result<QuestionView>;

    /// 提交一题的作答，返回下一题下标
    async fn submit_answer(
        &self,
        visitor_id: &str,
        index: usize,
        choice: &str,
    ) -> Result<NextStep>;

    /// 跳过当前题目
    async fn skip_question(&self, visitor_id: &str) -> Result<NextStep>;

    /// 收尾：配对题目与作答、写入完成标记、产出摘要
    async fn finalize(&self, visitor_id: &str) -> Result<SurveySummary>;
}

/// 问卷流程服务实现
pub struct SurveyFlowServiceImpl {
    catalog: Arc<SurveyCatalog>,
    sessions: Arc<dyn SessionStore>,
    markers: Arc<dyn CompletionMarkerStore>,
}

impl SurveyFlowServiceImpl {
    /// 创建新的服务实例
    pub fn new(
        catalog: Arc<SurveyCatalog>,
        sessions: Arc<dyn SessionStore>,
        markers: Arc<dyn CompletionMarkerStore>,
    ) -> Self {
        Self {
            catalog,
            sessions,
            markers,
        }
    }

    /// 读取会话并解析其指向的问卷；两者缺一都按顺序错误处理
    async fn load_session(&self, visitor_id: &str) -> Result<(SurveySession, usize)> {
        let session = self
            .sessions
            .load(visitor_id)
            .await?
            .ok_or_else(|| AppError::Sequencing("没有进行中的问卷会话，请重新开始".into()))?;

        let total = self
            .catalog
            .get(&session.survey_id)
            .map(|s| s.question_count())
            .ok_or_else(|| {
                AppError::Sequencing(format!("会话指向的问卷已不存在: {}", session.survey_id))
            })?;

        Ok((session, total))
    }
}

#[async_trait]
impl SurveyFlowService for SurveyFlowServiceImpl {
    async fn list_available(&self, visitor_id: &str) -> Result<Vec<SurveyListing>> {
        let done = self.markers.completed_surveys(visitor_id).await?;

        let mut listings: Vec<SurveyListing> = self
            .catalog
            .iter()
            .filter(|(id, _)| !done.iter().any(|d| d.as_str() == *id))
            .map(|(id, survey)| SurveyListing {
                survey_id: id.to_string(),
                title: survey.title.clone(),
                instructions: survey.instructions.clone(),
                question_count: survey.question_count(),
            })
            .collect();
        listings.sort_by(|a, b| a.survey_id.cmp(&b.survey_id));

        Ok(listings)
    }

    async fn start_attempt(
        &self,
        visitor_id: &str,
        survey_id: &str,
        already_done: bool,
    ) -> Result<StartOutcome> {
        if already_done {
            debug!("Visitor {} already completed survey {}", visitor_id, survey_id);
            return Ok(StartOutcome::AlreadyDone);
        }

        if self.catalog.get(survey_id).is_none() {
            return Err(AppError::NotFound(format!("问卷不存在: {}", survey_id)));
        }

        // 整体替换旧会话：新的一次作答从空记录开始
        let session = SurveySession::new(survey_id);
        self.sessions.save(visitor_id, &session).await?;

        info!(
            "Attempt {} started: visitor={}, survey={}",
            session.attempt_id, visitor_id, survey_id
        );
        Ok(StartOutcome::Started { first_index: 0 })
    }

    async fn show_question(
        &self,
        visitor_id: &str,
        requested_index: usize,
    ) -> Result<QuestionView> {
        let (session, total) = self.load_session(visitor_id).await?;
        let answered = session.answered_count();

        // 1. 全部作答完毕 -> 摘要
        if answered == total {
            return Ok(QuestionView::Complete);
        }

        // 2. 回看已作答的题目：幂等展示，不改状态
        // 3. 下标超前于进度：警告并改道至正确题目
        if answered < requested_index {
            warn!(
                "Stale question index {} for visitor {} (progress {})",
                requested_index, visitor_id, answered
            );
            return Ok(QuestionView::Redirect {
                to: answered,
                warning: format!("Invalid question id: {}.", requested_index),
            });
        }

        // 4. requested_index <= answered < total，下标在界内
        let survey = self
            .catalog
            .get(&session.survey_id)
            .ok_or_else(|| AppError::Sequencing("会话指向的问卷已不存在".into()))?;
        let question = survey
            .question(requested_index)
            .ok_or_else(|| AppError::Internal(format!("题目下标越界: {}", requested_index)))?
            .clone();

        Ok(QuestionView::Question {
            index: requested_index,
            total,
            question,
        })
    }

    async fn submit_answer(
        &self,
        visitor_id: &str,
        index: usize,
        choice: &str,
    ) -> Result<NextStep> {
        if choice.is_empty() {
            return Err(AppError::Validation("缺少 choice 字段".into()));
        }

        let (mut session, total) = self.load_session(visitor_id).await?;

        // 守住追加不变量：已完成的会话不再接受作答
        if session.answered_count() >= total {
            return Err(AppError::Sequencing("问卷已全部作答，不能继续提交".into()));
        }

        // 提交的下标只用于计算下一题，不与实际进度核对
        session.push_answer(Answer::Choice(choice.to_string()));
        self.sessions.save(visitor_id, &session).await?;

        debug!(
            "Answer recorded: visitor={}, survey={}, progress={}/{}",
            visitor_id,
            session.survey_id,
            session.answered_count(),
            total
        );
        Ok(NextStep::Question { index: index + 1 })
    }

    async fn skip_question(&self, visitor_id: &str) -> Result<NextStep> {
        let (mut session, total) = self.load_session(visitor_id).await?;

        if session.answered_count() >= total {
            return Err(AppError::Sequencing("问卷已全部作答，不能再跳过".into()));
        }

        session.push_answer(Answer::Skipped);
        self.sessions.save(visitor_id, &session).await?;

        let next_index = session.answered_count();
        debug!(
            "Question skipped: visitor={}, survey={}, progress={}/{}",
            visitor_id, session.survey_id, next_index, total
        );

        if next_index >= total {
            Ok(NextStep::Summary)
        } else {
            Ok(NextStep::Question { index: next_index })
        }
    }

    async fn finalize(&self, visitor_id: &str) -> Result<SurveySummary> {
        let (session, total) = self.load_session(visitor_id).await?;

        if session.answered_count() != total {
            return Err(AppError::Sequencing(format!(
                "问卷尚未作答完毕: {}/{}",
                session.answered_count(),
                total
            )));
        }

        let survey = self
            .catalog
            .get(&session.survey_id)
            .ok_or_else(|| AppError::Sequencing("会话指向的问卷已不存在".into()))?;

        let entries: Vec<SummaryEntry> = survey
            .questions
            .iter()
            .cloned()
            .zip(session.answers.iter().cloned())
            .map(|(question, answer)| SummaryEntry { question, answer })
            .collect();

        // 唯一的持久副作用：写入两年有效期的完成标记
        let marker = self.markers.mark_done(visitor_id, &session.survey_id).await?;

        info!(
            "Attempt {} finalized: visitor={}, survey={}",
            session.attempt_id, visitor_id, session.survey_id
        );
        Ok(SurveySummary {
            survey_id: session.survey_id.clone(),
            title: survey.title.clone(),
            entries,
            completed_at: marker.completed_at,
        })
    }
}

/// 创建问卷流程服务
pub fn create_survey_flow_service(
    catalog: Arc<SurveyCatalog>,
    sessions: Arc<dyn SessionStore>,
    markers: Arc<dyn CompletionMarkerStore>,
) -> Box<dyn SurveyFlowService> {
    Box::new(SurveyFlowServiceImpl::new(catalog, sessions, markers))
}
