//! 账户实体

use sea_orm::entity::prelude::*;
use tracing::warn;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub user_id: i64,
    pub name: String,
    pub contact: String,
    pub birth: Option<Date>,
    pub gender: String,
    pub address: String,
    pub role: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(has_many = "super::participations::Entity")]
    Participations,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::participations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Participations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型，username 来自关联的身份记录
//
// 无法识别的性别或角色记录一条警告；角色回退为权限最小的 submitter，不会获得评分权限。
impl Model {
    pub fn into_account(self, username: String) -> crate::models::accounts::entities::Account {
        use crate::models::accounts::entities::{Account, AccountRole, Gender};

        let gender = self.gender.parse::<Gender>().unwrap_or_else(|e| {
            warn!("Account {} has corrupt gender '{}': {}", self.id, self.gender, e);
            Gender::Male
        });
        let role = self.role.parse::<AccountRole>().unwrap_or_else(|e| {
            warn!("Account {} has corrupt role '{}': {}", self.id, self.role, e);
            AccountRole::Submitter
        });

        Account {
            id: self.id,
            user_id: self.user_id,
            username,
            name: self.name,
            contact: self.contact,
            birth: self.birth,
            gender,
            address: self.address,
            role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::accounts::entities::{AccountRole, Gender};

    fn row(gender: &str, role: &str) -> Model {
        Model {
            id: 7,
            user_id: 3,
            name: "Kim".to_string(),
            contact: String::new(),
            birth: None,
            gender: gender.to_string(),
            address: String::new(),
            role: role.to_string(),
        }
    }

    #[test]
    fn test_into_account_parses_stored_enums() {
        let account = row("female", "grader").into_account("kim".to_string());
        assert_eq!(account.gender, Gender::Female);
        assert_eq!(account.role, AccountRole::Grader);
        assert!(account.can_grade());
    }

    #[test]
    fn test_corrupt_role_never_grants_grading() {
        let account = row("unknown", "superuser").into_account("kim".to_string());
        assert_eq!(account.role, AccountRole::Submitter);
        assert_eq!(account.gender, Gender::Male);
        assert!(!account.can_grade());
    }
}
