//! 业务模型
//!
//! 与 `entity` 中的数据库实体分离，枚举字段在这里是封闭类型。

pub mod accounts;
pub mod parsed_files;
pub mod participations;
pub mod schemas;
pub mod tasks;
pub mod users;
