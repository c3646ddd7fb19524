use serde::Deserialize;

// 主 schema 属性创建请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSchemaAttributeRequest {
    pub task_id: i64,
    pub attr: String,
}

// 派生 schema 创建请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMappingInfoRequest {
    pub task_id: i64,
    pub derived_schema_name: String,
}

// 映射对创建请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMappingPairRequest {
    pub mapping_info_id: i64,
    pub schema_attribute_id: i64,
    pub parsing_column_name: String,
}
