//! 映射对实体：(派生 schema, 主属性) → 原始列名

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "mapping_pairs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub mapping_info_id: i64,
    pub schema_attribute_id: i64,
    pub parsing_column_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::mapping_infos::Entity",
        from = "Column::MappingInfoId",
        to = "super::mapping_infos::Column::Id"
    )]
    MappingInfo,
    #[sea_orm(
        belongs_to = "super::schema_attributes::Entity",
        from = "Column::SchemaAttributeId",
        to = "super::schema_attributes::Column::Id"
    )]
    SchemaAttribute,
}

impl Related<super::mapping_infos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MappingInfo.def()
    }
}

impl Related<super::schema_attributes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SchemaAttribute.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_mapping_pair(self) -> crate::models::schemas::entities::MappingPair {
        crate::models::schemas::entities::MappingPair {
            id: self.id,
            mapping_info_id: self.mapping_info_id,
            schema_attribute_id: self.schema_attribute_id,
            parsing_column_name: self.parsing_column_name,
        }
    }
}
