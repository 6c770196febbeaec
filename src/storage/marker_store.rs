//! 完成标记存储
//!
//! 按 (访客, 问卷) 读写完成标记。标记有效期默认两年，
//! 过期标记在读取时按不存在处理（惰性过期）。

use async_trait::async_trait;
use chrono::{Duration, Utc};
use dashmap::DashMap;

use crate::error::Result;
use crate::models::marker::CompletionMarker;

/// 完成标记存储 trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionMarkerStore: Send + Sync {
    /// 访客是否已完成指定问卷
    async fn is_done(&self, visitor_id: &str, survey_id: &str) -> Result<bool>;

    /// 写入完成标记（只写一次：已有有效标记时原样返回）
    async fn mark_done(&self, visitor_id: &str, survey_id: &str) -> Result<CompletionMarker>;

    /// 访客已完成的问卷标识列表
    async fn completed_surveys(&self, visitor_id: &str) -> Result<Vec<String>>;
}

/// 内存完成标记存储实现
pub struct MemoryCompletionMarkerStore {
    markers: DashMap<(String, String), CompletionMarker>,
    ttl: Duration,
}

impl MemoryCompletionMarkerStore {
    /// 创建新的标记存储
    pub fn new(ttl: Duration) -> Self {
        Self {
            markers: DashMap::new(),
            ttl,
        }
    }
}

#[async_trait]
impl CompletionMarkerStore for MemoryCompletionMarkerStore {
    async fn is_done(&self, visitor_id: &str, survey_id: &str) -> Result<bool> {
        let key = (visitor_id.to_string(), survey_id.to_string());
        match self.markers.get(&key) {
            Some(marker) => Ok(marker.is_valid_at(Utc::now())),
            None => Ok(false),
        }
    }

    async fn mark_done(&self, visitor_id: &str, survey_id: &str) -> Result<CompletionMarker> {
        let key = (visitor_id.to_string(), survey_id.to_string());

        let mut entry = self
            .markers
            .entry(key)
            .or_insert_with(|| CompletionMarker::new(visitor_id, survey_id, self.ttl));

        // 过期标记视为不存在，重新写入
        if !entry.is_valid_at(Utc::now()) {
            *entry = CompletionMarker::new(visitor_id, survey_id, self.ttl);
        }

        Ok(entry.clone())
    }

    async fn completed_surveys(&self, visitor_id: &str) -> Result<Vec<String>> {
        let now = Utc::now();
        let mut ids: Vec<String> = self
            .markers
            .iter()
            .filter(|entry| entry.key().0 == visitor_id && entry.value().is_valid_at(now))
            .map(|entry| entry.key().1.clone())
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }
}
