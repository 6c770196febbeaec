use serde::{Deserialize, Serialize};

/// 问卷题目
///
/// 不可变；题目由其在所属问卷题目列表中的下标标识。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Question {
    /// 题干文本
    pub prompt: String,
    /// 候选答案（有序）
    pub choices: Vec<String>,
}

impl Question {
    /// 创建新题目
    pub fn new(prompt: &str, choices: &[&str]) -> Self {
        Self {
            prompt: prompt.to_string(),
            choices: choices.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// 问卷实体
///
/// 不可变；题目顺序稳定，定义流程控制器使用的规范下标空间。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Survey {
    /// 问卷标题
    pub title: String,
    /// 填写说明
    pub instructions: String,
    /// 题目列表（有序）
    pub questions: Vec<Question>,
}

impl Survey {
    /// 创建新问卷
    pub fn new(title: &str, instructions: &str, questions: Vec<Question>) -> Self {
        Self {
            title: title.to_string(),
            instructions: instructions.to_string(),
            questions,
        }
    }

    /// 题目总数
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// 按下标获取题目
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }
}
