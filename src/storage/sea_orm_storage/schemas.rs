//! 主 schema / 派生 schema / 映射对存储操作

use super::SeaOrmStorage;
use crate::entity::mapping_infos::{
    ActiveModel as MappingInfoActiveModel, Column as MappingInfoColumn, Entity as MappingInfos,
};
use crate::entity::mapping_pairs::{
    ActiveModel as MappingPairActiveModel, Column as MappingPairColumn, Entity as MappingPairs,
};
use crate::entity::schema_attributes::{
    ActiveModel as SchemaAttributeActiveModel, Column as SchemaAttributeColumn,
    Entity as SchemaAttributes,
};
use crate::errors::{CollectError, Result};
use crate::models::schemas::{
    entities::{MappingInfo, MappingPair, MappingPairLabel, SchemaAttribute},
    requests::{CreateMappingInfoRequest, CreateMappingPairRequest, CreateSchemaAttributeRequest},
};
use crate::utils::validate::{LABEL_MAX, validate_required_text};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建主 schema 属性
    pub async fn create_schema_attribute_impl(
        &self,
        req: CreateSchemaAttributeRequest,
    ) -> Result<SchemaAttribute> {
        validate_required_text("attr", &req.attr, LABEL_MAX).map_err(CollectError::validation)?;

        let model = SchemaAttributeActiveModel {
            task_id: Set(req.task_id),
            attr: Set(req.attr),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CollectError::from_db("创建 schema 属性失败", e))?;

        Ok(result.into_schema_attribute())
    }

    pub async fn get_schema_attribute_by_id_impl(
        &self,
        id: i64,
    ) -> Result<Option<SchemaAttribute>> {
        let result = SchemaAttributes::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CollectError::database_operation(format!("查询 schema 属性失败: {e}")))?;

        Ok(result.map(|m| m.into_schema_attribute()))
    }

    /// 列出任务的主 schema
    pub async fn list_schema_attributes_impl(&self, task_id: i64) -> Result<Vec<SchemaAttribute>> {
        let results = SchemaAttributes::find()
            .filter(SchemaAttributeColumn::TaskId.eq(task_id))
            .order_by_asc(SchemaAttributeColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| CollectError::database_operation(format!("查询 schema 属性失败: {e}")))?;

        Ok(results
            .into_iter()
            .map(|m| m.into_schema_attribute())
            .collect())
    }

    pub async fn rename_schema_attribute_impl(
        &self,
        id: i64,
        attr: &str,
    ) -> Result<Option<SchemaAttribute>> {
        validate_required_text("attr", attr, LABEL_MAX).map_err(CollectError::validation)?;

        let Some(existing) = SchemaAttributes::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CollectError::database_operation(format!("查询 schema 属性失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: SchemaAttributeActiveModel = existing.into();
        model.attr = Set(attr.to_string());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| CollectError::database_operation(format!("更新 schema 属性失败: {e}")))?;

        Ok(Some(result.into_schema_attribute()))
    }

    /// 删除主 schema 属性（级联删除引用它的映射对）
    pub async fn delete_schema_attribute_impl(&self, id: i64) -> Result<bool> {
        let result = SchemaAttributes::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| CollectError::database_operation(format!("删除 schema 属性失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 创建派生 schema
    pub async fn create_mapping_info_impl(
        &self,
        req: CreateMappingInfoRequest,
    ) -> Result<MappingInfo> {
        validate_required_text("derived_schema_name", &req.derived_schema_name, LABEL_MAX)
            .map_err(CollectError::validation)?;

        let model = MappingInfoActiveModel {
            task_id: Set(req.task_id),
            derived_schema_name: Set(req.derived_schema_name),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CollectError::from_db("创建派生 schema 失败", e))?;

        Ok(result.into_mapping_info())
    }

    pub async fn get_mapping_info_by_id_impl(&self, id: i64) -> Result<Option<MappingInfo>> {
        let result = MappingInfos::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CollectError::database_operation(format!("查询派生 schema 失败: {e}")))?;

        Ok(result.map(|m| m.into_mapping_info()))
    }

    pub async fn list_mapping_infos_impl(&self, task_id: i64) -> Result<Vec<MappingInfo>> {
        let results = MappingInfos::find()
            .filter(MappingInfoColumn::TaskId.eq(task_id))
            .order_by_asc(MappingInfoColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| CollectError::database_operation(format!("查询派生 schema 失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_mapping_info()).collect())
    }

    pub async fn rename_mapping_info_impl(
        &self,
        id: i64,
        name: &str,
    ) -> Result<Option<MappingInfo>> {
        validate_required_text("derived_schema_name", name, LABEL_MAX)
            .map_err(CollectError::validation)?;

        let Some(existing) = MappingInfos::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CollectError::database_operation(format!("查询派生 schema 失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: MappingInfoActiveModel = existing.into();
        model.derived_schema_name = Set(name.to_string());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| CollectError::database_operation(format!("更新派生 schema 失败: {e}")))?;

        Ok(Some(result.into_mapping_info()))
    }

    /// 删除派生 schema（级联删除映射对与使用它解析的提交记录）
    pub async fn delete_mapping_info_impl(&self, id: i64) -> Result<bool> {
        let result = MappingInfos::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| CollectError::database_operation(format!("删除派生 schema 失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 创建映射对
    ///
    /// 派生 schema 与主属性必须属于同一个任务。
    pub async fn create_mapping_pair_impl(
        &self,
        req: CreateMappingPairRequest,
    ) -> Result<MappingPair> {
        validate_required_text("parsing_column_name", &req.parsing_column_name, LABEL_MAX)
            .map_err(CollectError::validation)?;

        let info = self
            .get_mapping_info_by_id_impl(req.mapping_info_id)
            .await?
            .ok_or_else(|| {
                CollectError::not_found(format!("派生 schema {} 不存在", req.mapping_info_id))
            })?;
        let attribute = self
            .get_schema_attribute_by_id_impl(req.schema_attribute_id)
            .await?
            .ok_or_else(|| {
                CollectError::not_found(format!("schema 属性 {} 不存在", req.schema_attribute_id))
            })?;

        if info.task_id != attribute.task_id {
            return Err(CollectError::validation(format!(
                "派生 schema '{}' 与属性 '{}' 不属于同一个任务",
                info.derived_schema_name, attribute.attr
            )));
        }

        let model = MappingPairActiveModel {
            mapping_info_id: Set(req.mapping_info_id),
            schema_attribute_id: Set(req.schema_attribute_id),
            parsing_column_name: Set(req.parsing_column_name),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CollectError::from_db("创建映射对失败", e))?;

        Ok(result.into_mapping_pair())
    }

    pub async fn list_mapping_pairs_impl(&self, mapping_info_id: i64) -> Result<Vec<MappingPair>> {
        let results = MappingPairs::find()
            .filter(MappingPairColumn::MappingInfoId.eq(mapping_info_id))
            .order_by_asc(MappingPairColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| CollectError::database_operation(format!("查询映射对失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_mapping_pair()).collect())
    }

    pub async fn delete_mapping_pair_impl(&self, id: i64) -> Result<bool> {
        let result = MappingPairs::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| CollectError::database_operation(format!("删除映射对失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 映射对的结构化标签 {派生 schema: {master, derived}}
    pub async fn get_mapping_pair_label_impl(&self, id: i64) -> Result<Option<MappingPairLabel>> {
        let Some(pair) = MappingPairs::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CollectError::database_operation(format!("查询映射对失败: {e}")))?
        else {
            return Ok(None);
        };

        let mapping = self
            .get_mapping_info_by_id_impl(pair.mapping_info_id)
            .await?
            .map(|info| info.derived_schema_name)
            .unwrap_or_default();
        let master = self
            .get_schema_attribute_by_id_impl(pair.schema_attribute_id)
            .await?
            .map(|attr| attr.attr)
            .unwrap_or_default();

        Ok(Some(MappingPairLabel {
            mapping,
            master,
            derived: pair.parsing_column_name,
        }))
    }
}
