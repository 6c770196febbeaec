//! 会话存储
//!
//! 按访客标识读写问卷会话。会话是短生命周期状态，
//! 通过空闲 TTL 在读取时惰性过期。

use async_trait::async_trait;
use chrono::{Duration, Utc};
use dashmap::DashMap;

use crate::error::Result;
use crate::models::session::SurveySession;

/// 会话存储 trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// 读取访客当前会话（过期视为不存在）
    async fn load(&self, visitor_id: &str) -> Result<Option<SurveySession>>;

    /// 写入访客当前会话（整体替换）
    async fn save(&self, visitor_id: &str, session: &SurveySession) -> Result<()>;

    /// 删除访客当前会话
    async fn remove(&self, visitor_id: &str) -> Result<bool>;
}

/// 内存会话存储实现
///
/// 会话仅属于单个访客的一次交互过程，进程内保存即可满足需求。
pub struct MemorySessionStore {
    sessions: DashMap<String, SurveySession>,
    idle_ttl: Duration,
}

impl MemorySessionStore {
    /// 创建新的会话存储
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            idle_ttl,
        }
    }

    fn is_expired(&self, session: &SurveySession) -> bool {
        Utc::now() >= session.last_active_at + self.idle_ttl
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, visitor_id: &str) -> Result<Option<SurveySession>> {
        if let Some(entry) = self.sessions.get(visitor_id) {
            if self.is_expired(entry.value()) {
                drop(entry);
                self.sessions.remove(visitor_id);
                return Ok(None);
            }
            return Ok(Some(entry.value().clone()));
        }
        Ok(None)
    }

    async fn save(&self, visitor_id: &str, session: &SurveySession) -> Result<()> {
        self.sessions
            .insert(visitor_id.to_string(), session.clone());
        Ok(())
    }

    async fn remove(&self, visitor_id: &str) -> Result<bool> {
        Ok(self.sessions.remove(visitor_id).is_some())
    }
}
