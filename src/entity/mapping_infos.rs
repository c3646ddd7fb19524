//! 派生 schema 实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "mapping_infos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub task_id: i64,
    pub derived_schema_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tasks::Entity",
        from = "Column::TaskId",
        to = "super::tasks::Column::Id"
    )]
    Task,
    #[sea_orm(has_many = "super::mapping_pairs::Entity")]
    MappingPairs,
    #[sea_orm(has_many = "super::parsed_files::Entity")]
    ParsedFiles,
}

impl Related<super::tasks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Task.def()
    }
}

impl Related<super::mapping_pairs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MappingPairs.def()
    }
}

impl Related<super::parsed_files::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ParsedFiles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_mapping_info(self) -> crate::models::schemas::entities::MappingInfo {
        crate::models::schemas::entities::MappingInfo {
            id: self.id,
            task_id: self.task_id,
            derived_schema_name: self.derived_schema_name,
        }
    }
}
