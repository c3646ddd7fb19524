use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

// 主 schema 属性（任务的标准列）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SchemaAttribute {
    pub id: i64,
    pub task_id: i64,
    pub attr: String,
}

impl std::fmt::Display for SchemaAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.attr)
    }
}

// 派生 schema：提交者原始文件可使用的另一种列布局
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MappingInfo {
    pub id: i64,
    pub task_id: i64,
    pub derived_schema_name: String,
}

impl std::fmt::Display for MappingInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.derived_schema_name)
    }
}

// 映射对：(派生 schema, 主属性) → 原始文件中的列名
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MappingPair {
    pub id: i64,
    pub mapping_info_id: i64,
    pub schema_attribute_id: i64,
    pub parsing_column_name: String,
}

/// 映射对的结构化标签
///
/// `Display` 输出 `{'<mapping>': {'master': '<attr>', 'derived': '<column>'}}`，
/// 序列化为 `{"<mapping>": {"master": .., "derived": ..}}`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingPairLabel {
    pub mapping: String,
    pub master: String,
    pub derived: String,
}

#[derive(Serialize)]
struct MappingPairSides<'a> {
    master: &'a str,
    derived: &'a str,
}

impl Serialize for MappingPairLabel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(
            &self.mapping,
            &MappingPairSides {
                master: &self.master,
                derived: &self.derived,
            },
        )?;
        map.end()
    }
}

fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

impl std::fmt::Display for MappingPairLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{{}: {{'master': {}, 'derived': {}}}}}",
            quote(&self.mapping),
            quote(&self.master),
            quote(&self.derived)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label() -> MappingPairLabel {
        MappingPairLabel {
            mapping: "legacy".to_string(),
            master: "temperature".to_string(),
            derived: "TEMP_C".to_string(),
        }
    }

    #[test]
    fn test_mapping_pair_label_display() {
        assert_eq!(
            label().to_string(),
            "{'legacy': {'master': 'temperature', 'derived': 'TEMP_C'}}"
        );
    }

    #[test]
    fn test_mapping_pair_label_escapes_quotes() {
        let mut label = label();
        label.derived = "it's".to_string();
        assert!(label.to_string().contains("'it\\'s'"));
    }

    #[test]
    fn test_mapping_pair_label_json() {
        let value = serde_json::to_value(label()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"legacy": {"master": "temperature", "derived": "TEMP_C"}})
        );
    }

    #[test]
    fn test_schema_labels() {
        let attr = SchemaAttribute {
            id: 1,
            task_id: 1,
            attr: "humidity".to_string(),
        };
        let info = MappingInfo {
            id: 1,
            task_id: 1,
            derived_schema_name: "sensor_v2".to_string(),
        };
        assert_eq!(attr.to_string(), "humidity");
        assert_eq!(info.to_string(), "sensor_v2");
    }
}
