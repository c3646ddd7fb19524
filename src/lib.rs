//! cssite-collect - 数据收集与评分平台的数据模型
//!
//! 提交者按任务上传原始数据文件，评分者为解析后的结果打分。
//!
//! # 架构
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `media`: 上传文件存储
//! - `models`: 数据模型定义
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务用例（提交、评分、删除）
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod config;
pub mod entity;
pub mod errors;
pub mod media;
pub mod models;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
