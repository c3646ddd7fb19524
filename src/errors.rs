//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

use sea_orm::{DbErr, SqlErr};

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_collect_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum CollectError {
            $($variant(String),)*
        }

        impl CollectError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(CollectError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(CollectError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(CollectError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl CollectError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        CollectError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_collect_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    FileOperation("E004", "File Operation Error"),
    Validation("E005", "Validation Error"),
    NotFound("E006", "Resource Not Found"),
    Conflict("E007", "Resource Conflict"),
    Authorization("E008", "Authorization Error"),
}

impl CollectError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 将数据库错误转换为带上下文的错误
    ///
    /// 唯一约束冲突映射为 `Conflict`，其余映射为 `DatabaseOperation`。
    pub fn from_db(context: &str, err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                CollectError::conflict(format!("{context}: {detail}"))
            }
            _ => CollectError::database_operation(format!("{context}: {err}")),
        }
    }
}

impl fmt::Display for CollectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CollectError {}

// 为常见的错误类型实现 From trait
impl From<DbErr> for CollectError {
    fn from(err: DbErr) -> Self {
        CollectError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for CollectError {
    fn from(err: std::io::Error) -> Self {
        CollectError::FileOperation(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CollectError>;

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ConnectOptions, ConnectionTrait, Database};

    #[test]
    fn test_codes_follow_declaration_order() {
        let errors = [
            CollectError::database_config("url"),
            CollectError::database_connection("pool"),
            CollectError::database_operation("query"),
            CollectError::file_operation("remove"),
            CollectError::validation("score"),
            CollectError::not_found("participation"),
            CollectError::conflict("task name"),
            CollectError::authorization("role"),
        ];
        let codes: Vec<&str> = errors.iter().map(|e| e.code()).collect();
        assert_eq!(
            codes,
            ["E001", "E002", "E003", "E004", "E005", "E006", "E007", "E008"]
        );
    }

    #[test]
    fn test_display_carries_type_and_message() {
        let err = CollectError::authorization("账户 'kim' 的角色 submitter 不能评分");
        assert_eq!(
            err.to_string(),
            "Authorization Error: 账户 'kim' 的角色 submitter 不能评分"
        );
        assert_eq!(err.message(), "账户 'kim' 的角色 submitter 不能评分");
    }

    #[test]
    fn test_io_error_becomes_file_operation() {
        let err: CollectError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only media").into();
        assert!(matches!(err, CollectError::FileOperation(_)));
        assert!(err.message().contains("read-only media"));
    }

    #[test]
    fn test_from_db_generic_error() {
        let err = CollectError::from_db("查询任务失败", DbErr::Custom("boom".into()));
        assert!(matches!(err, CollectError::DatabaseOperation(_)));
        assert!(err.message().starts_with("查询任务失败"));
    }

    #[tokio::test]
    async fn test_from_db_unique_violation_is_conflict() {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).min_connections(1);
        let db = Database::connect(opt).await.unwrap();
        db.execute_unprepared("CREATE TABLE tasks (name TEXT NOT NULL UNIQUE)")
            .await
            .unwrap();
        db.execute_unprepared("INSERT INTO tasks (name) VALUES ('weather')")
            .await
            .unwrap();

        let err = db
            .execute_unprepared("INSERT INTO tasks (name) VALUES ('weather')")
            .await
            .unwrap_err();
        let err = CollectError::from_db("创建任务失败", err);
        assert!(matches!(err, CollectError::Conflict(_)));
        assert!(err.message().starts_with("创建任务失败"));
    }
}
