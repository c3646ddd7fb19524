//! 任务实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub minimal_upload_frequency: String,
    pub activation_state: bool,
    pub description: String,
    pub original_data_description: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::participations::Entity")]
    Participations,
    #[sea_orm(has_many = "super::schema_attributes::Entity")]
    SchemaAttributes,
    #[sea_orm(has_many = "super::mapping_infos::Entity")]
    MappingInfos,
    #[sea_orm(has_many = "super::parsed_files::Entity")]
    ParsedFiles,
}

impl Related<super::participations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Participations.def()
    }
}

impl Related<super::schema_attributes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SchemaAttributes.def()
    }
}

impl Related<super::mapping_infos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MappingInfos.def()
    }
}

impl Related<super::parsed_files::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ParsedFiles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_task(self) -> crate::models::tasks::entities::Task {
        use crate::models::tasks::entities::Task;

        Task {
            id: self.id,
            name: self.name,
            minimal_upload_frequency: self.minimal_upload_frequency,
            activation_state: self.activation_state,
            description: self.description,
            original_data_description: self.original_data_description,
        }
    }
}
