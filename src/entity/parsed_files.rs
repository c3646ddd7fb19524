//! 解析文件（提交记录）实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "parsed_files")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub submitter_id: i64,
    pub grader_id: Option<i64>,
    pub task_id: i64,
    pub submit_number: Option<i32>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub total_tuple: Option<i32>,
    pub duplicated_tuple: Option<i32>,
    pub null_ratio: Option<f64>,
    pub grading_score: Option<i32>,
    pub pass_state: Option<bool>,
    pub grading_end_date: Option<Date>,
    pub grade_date: Date,
    pub derived_schema_id: i64,
    pub file_original: Option<String>,
    pub file_parsed: Option<String>,
}

// 提交者与评分者都指向 accounts，因此不为 accounts 实现 Related
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::SubmitterId",
        to = "super::accounts::Column::Id"
    )]
    Submitter,
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::GraderId",
        to = "super::accounts::Column::Id"
    )]
    Grader,
    #[sea_orm(
        belongs_to = "super::tasks::Entity",
        from = "Column::TaskId",
        to = "super::tasks::Column::Id"
    )]
    Task,
    #[sea_orm(
        belongs_to = "super::mapping_infos::Entity",
        from = "Column::DerivedSchemaId",
        to = "super::mapping_infos::Column::Id"
    )]
    DerivedSchema,
}

impl Related<super::tasks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Task.def()
    }
}

impl Related<super::mapping_infos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DerivedSchema.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_parsed_file(self) -> crate::models::parsed_files::entities::ParsedFile {
        use crate::models::parsed_files::entities::{ParsedFile, RowStatistics};

        ParsedFile {
            id: self.id,
            submitter_id: self.submitter_id,
            grader_id: self.grader_id,
            task_id: self.task_id,
            submit_number: self.submit_number,
            start_date: self.start_date,
            end_date: self.end_date,
            statistics: RowStatistics {
                total_tuple: self.total_tuple,
                duplicated_tuple: self.duplicated_tuple,
                null_ratio: self.null_ratio,
            },
            grading_score: self.grading_score,
            pass_state: self.pass_state,
            grading_end_date: self.grading_end_date,
            grade_date: self.grade_date,
            derived_schema_id: self.derived_schema_id,
            file_original: self.file_original,
            file_parsed: self.file_parsed,
        }
    }
}
