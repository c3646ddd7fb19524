//! 主 schema 属性实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "schema_attributes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub task_id: i64,
    pub attr: String,
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

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_schema_attribute(self) -> crate::models::schemas::entities::SchemaAttribute {
        crate::models::schemas::entities::SchemaAttribute {
            id: self.id,
            task_id: self.task_id,
            attr: self.attr,
        }
    }
}
