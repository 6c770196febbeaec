//! 问卷目录模块
//!
//! 提供 survey_id 到问卷的只读注册表。目录在启动时构建，
//! 进程运行期间不再变更；查找失败属于面向用户的 404 类错误。

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::error::{AppError, Result};
use crate::models::survey::{Question, Survey};

/// 内置问卷目录
static BUILTIN: Lazy<SurveyCatalog> = Lazy::new(|| {
    let mut catalog = SurveyCatalog::empty();

    catalog.insert(
        "satisfaction",
        Survey::new(
            "Customer Satisfaction Survey",
            "Please fill out a survey about your experience here.",
            vec![
                Question::new("Have you shopped here before?", &["Yes", "No"]),
                Question::new("Did someone else shop here today?", &["Yes", "No"]),
                Question::new(
                    "On average, how much do you spend a month on frisbees?",
                    &["Less than $10,000", "$10,000 or more"],
                ),
                Question::new("Are you likely to shop here again?", &["Yes", "No"]),
            ],
        ),
    );

    catalog.insert(
        "personality",
        Survey::new(
            "Personality Quiz",
            "Learn more about yourself with our personality quiz!",
            vec![
                Question::new("Do you ever dream about code?", &["Yes", "No"]),
                Question::new("Do you enjoy debugging?", &["Yes", "No"]),
                Question::new("Is Python your favorite language?", &["Yes", "No"]),
                Question::new("Do you prefer centered div's over briefcases of cash?", &["Yes", "No"]),
            ],
        ),
    );

    catalog
});

/// 问卷目录
///
/// 只读注册表：survey_id -> Survey。
#[derive(Debug, Clone, Default)]
pub struct SurveyCatalog {
    surveys: HashMap<String, Survey>,
}

/// 目录文件结构（TOML）
#[derive(Debug, Deserialize)]
struct CatalogFile {
    surveys: HashMap<String, Survey>,
}

impl SurveyCatalog {
    /// 创建空目录
    pub fn empty() -> Self {
        Self {
            surveys: HashMap::new(),
        }
    }

    /// 内置目录（satisfaction 与 personality 两份问卷）
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// 从 TOML 目录文件加载
    pub fn from_file(path: &Path) -> Result<Self> {
        use figment::{
            Figment,
            providers::{Format, Toml},
        };

        let file: CatalogFile = Figment::new().merge(Toml::file(path)).extract()?;

        if file.surveys.is_empty() {
            return Err(AppError::Config(format!(
                "目录文件未定义任何问卷: {}",
                path.display()
            )));
        }

        Ok(Self {
            surveys: file.surveys,
        })
    }

    /// 注册一份问卷（仅用于目录构建阶段）
    pub fn insert(&mut self, survey_id: &str, survey: Survey) {
        self.surveys.insert(survey_id.to_string(), survey);
    }

    /// 按标识查找问卷
    pub fn get(&self, survey_id: &str) -> Option<&Survey> {
        self.surveys.get(survey_id)
    }

    /// 所有问卷标识（字典序，保证输出稳定）
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.surveys.keys().map(|k| k.as_str()).collect();
        ids.sort_unstable();
        ids
    }

    /// 遍历目录
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Survey)> {
        self.surveys.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// 问卷数量
    pub fn len(&self) -> usize {
        self.surveys.len()
    }

    /// 目录是否为空
    pub fn is_empty(&self) -> bool {
        self.surveys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_contents() {
        let catalog = SurveyCatalog::builtin();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.ids(), vec!["personality", "satisfaction"]);

        let satisfaction = catalog.get("satisfaction").unwrap();
        assert_eq!(satisfaction.question_count(), 4);
        assert_eq!(
            satisfaction.questions[0].prompt,
            "Have you shopped here before?"
        );
    }

    #[test]
    fn test_get_unknown_id_is_none() {
        let catalog = SurveyCatalog::builtin();
        assert!(catalog.get("unknown_id").is_none());
    }

    #[test]
    fn test_from_file_missing_path_fails() {
        let result = SurveyCatalog::from_file(Path::new("/nonexistent/catalog.toml"));
        assert!(result.is_err());
    }
}
