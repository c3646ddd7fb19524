use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::media::MediaStore;

// 评分状态：None 未评分，Some(true) 通过，Some(false) 未通过
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PassState {
    Ungraded,
    Passed,
    Failed,
}

impl From<Option<bool>> for PassState {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => PassState::Ungraded,
            Some(true) => PassState::Passed,
            Some(false) => PassState::Failed,
        }
    }
}

impl From<PassState> for Option<bool> {
    fn from(value: PassState) -> Self {
        match value {
            PassState::Ungraded => None,
            PassState::Passed => Some(true),
            PassState::Failed => Some(false),
        }
    }
}

// 行统计信息
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RowStatistics {
    pub total_tuple: Option<i32>,
    pub duplicated_tuple: Option<i32>,
    pub null_ratio: Option<f64>,
}

impl RowStatistics {
    /// 行数非负、重复行不超过总行数、null 比例在 [0, 1] 之内
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.total_tuple.is_some_and(|n| n < 0) || self.duplicated_tuple.is_some_and(|n| n < 0)
        {
            return Err("Tuple counts must not be negative");
        }
        if let (Some(total), Some(duplicated)) = (self.total_tuple, self.duplicated_tuple)
            && duplicated > total
        {
            return Err("Duplicated tuples must not exceed total tuples");
        }
        if self
            .null_ratio
            .is_some_and(|ratio| !(0.0..=1.0).contains(&ratio))
        {
            return Err("Null ratio must be between 0 and 1");
        }
        Ok(())
    }
}

// 解析文件（一次提交）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParsedFile {
    pub id: i64,
    pub submitter_id: i64,
    pub grader_id: Option<i64>,
    pub task_id: i64,
    pub submit_number: Option<i32>,
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
    pub statistics: RowStatistics,
    pub grading_score: Option<i32>,
    pub pass_state: Option<bool>,
    pub grading_end_date: Option<chrono::NaiveDate>,
    pub grade_date: chrono::NaiveDate,
    pub derived_schema_id: i64,
    pub file_original: Option<String>,
    pub file_parsed: Option<String>,
}

impl ParsedFile {
    pub fn pass(&self) -> PassState {
        PassState::from(self.pass_state)
    }

    /// 解析结果文件的绝对路径
    pub fn absolute_path(&self, media: &MediaStore) -> Option<PathBuf> {
        self.file_parsed
            .as_deref()
            .map(|name| media.absolute_path(name))
    }

    /// 所有已存储文件的相对文件名（原始文件在前）
    pub fn stored_files(&self) -> Vec<&str> {
        [self.file_original.as_deref(), self.file_parsed.as_deref()]
            .into_iter()
            .flatten()
            .filter(|name| !name.is_empty())
            .collect()
    }
}

// 展示为解析结果文件的基础文件名
impl std::fmt::Display for ParsedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = self
            .file_parsed
            .as_deref()
            .and_then(|name| Path::new(name).file_name())
            .and_then(|name| name.to_str())
            .unwrap_or_default();
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ParsedFile {
        ParsedFile {
            id: 1,
            submitter_id: 1,
            grader_id: None,
            task_id: 1,
            submit_number: Some(1),
            start_date: None,
            end_date: None,
            statistics: RowStatistics::default(),
            grading_score: None,
            pass_state: None,
            grading_end_date: None,
            grade_date: chrono::NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            derived_schema_id: 1,
            file_original: Some("data_original/raw.csv".to_string()),
            file_parsed: Some("data_parsed/parsed.csv".to_string()),
        }
    }

    #[test]
    fn test_display_is_parsed_base_name() {
        assert_eq!(sample().to_string(), "parsed.csv");

        let mut file = sample();
        file.file_parsed = None;
        assert_eq!(file.to_string(), "");
    }

    #[test]
    fn test_absolute_path() {
        let media = MediaStore::new("/srv/media");
        assert_eq!(
            sample().absolute_path(&media),
            Some(PathBuf::from("/srv/media/data_parsed/parsed.csv"))
        );

        let mut file = sample();
        file.file_parsed = None;
        assert_eq!(file.absolute_path(&media), None);
    }

    #[test]
    fn test_pass_state_tri_value() {
        let mut file = sample();
        assert_eq!(file.pass(), PassState::Ungraded);
        file.pass_state = Some(true);
        assert_eq!(file.pass(), PassState::Passed);
        file.pass_state = Some(false);
        assert_eq!(file.pass(), PassState::Failed);
        assert_eq!(Option::<bool>::from(PassState::Ungraded), None);
    }

    #[test]
    fn test_row_statistics_validation() {
        let mut stats = RowStatistics {
            total_tuple: Some(100),
            duplicated_tuple: Some(3),
            null_ratio: Some(0.25),
        };
        assert!(stats.validate().is_ok());
        stats.duplicated_tuple = Some(101);
        assert!(stats.validate().is_err());
        stats.duplicated_tuple = Some(3);
        stats.null_ratio = Some(1.5);
        assert!(stats.validate().is_err());
        assert!(RowStatistics::default().validate().is_ok());
    }

    #[test]
    fn test_stored_files() {
        assert_eq!(
            sample().stored_files(),
            vec!["data_original/raw.csv", "data_parsed/parsed.csv"]
        );
        let mut file = sample();
        file.file_original = None;
        file.file_parsed = Some(String::new());
        assert!(file.stored_files().is_empty());
    }
}
