use serde::{Deserialize, Serialize};

// 参与记录：一个账户在一个任务中的准入状态与提交次数
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Participation {
    pub id: i64,
    pub account_id: i64,
    pub task_id: i64,
    pub admission: bool,
    pub submit_count: i32,
}

/// 参与记录的展示标签，渲染为 `"<账户>" parts in "<任务>"`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParticipationLabel {
    pub account: String,
    pub task: String,
}

impl std::fmt::Display for ParticipationLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\" parts in \"{}\"", self.account, self.task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participation_label() {
        let label = ParticipationLabel {
            account: "kim01".to_string(),
            task: "T1".to_string(),
        };
        assert_eq!(label.to_string(), "\"kim01\" parts in \"T1\"");
    }
}
