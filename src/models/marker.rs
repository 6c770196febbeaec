use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// 完成标记默认有效期（天），两年
pub const DEFAULT_MARKER_TTL_DAYS: i64 = 730;

/// 问卷完成标记
///
/// 按 (访客, 问卷) 记录的持久化事实，在会话之外长期存活。
/// 只在问卷全部作答或跳过后写入一次，本系统不提供清除路径。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionMarker {
    /// 访客标识
    pub visitor_id: String,

    /// 问卷标识
    pub survey_id: String,

    /// 完成时间
    pub completed_at: DateTime<Utc>,

    /// 过期时间
    pub expires_at: DateTime<Utc>,
}

impl CompletionMarker {
    /// 创建新完成标记
    pub fn new(visitor_id: &str, survey_id: &str, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            visitor_id: visitor_id.to_string(),
            survey_id: survey_id.to_string(),
            completed_at: now,
            expires_at: now + ttl,
        }
    }

    /// 标记是否仍然有效
    pub fn is_valid_at(&self, at: DateTime<Utc>) -> bool {
        at < self.expires_at
    }
}
