use serde::{Deserialize, Serialize};

// 账户角色
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    Submitter,     // 提交者
    Grader,        // 评分者
    Administrator, // 管理员
}

impl AccountRole {
    pub const SUBMITTER: &'static str = "submitter";
    pub const GRADER: &'static str = "grader";
    pub const ADMINISTRATOR: &'static str = "administrator";

    pub fn grader_roles() -> &'static [&'static AccountRole] {
        &[&Self::Grader, &Self::Administrator]
    }
    pub fn all_roles() -> &'static [&'static AccountRole] {
        &[&Self::Submitter, &Self::Grader, &Self::Administrator]
    }
}

impl<'de> Deserialize<'de> for AccountRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<AccountRole>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的账户角色: '{s}'. 支持的角色: submitter, grader, administrator"
            ))
        })
    }
}

impl std::fmt::Display for AccountRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountRole::Submitter => write!(f, "{}", AccountRole::SUBMITTER),
            AccountRole::Grader => write!(f, "{}", AccountRole::GRADER),
            AccountRole::Administrator => write!(f, "{}", AccountRole::ADMINISTRATOR),
        }
    }
}

impl std::str::FromStr for AccountRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            AccountRole::SUBMITTER => Ok(AccountRole::Submitter),
            AccountRole::GRADER => Ok(AccountRole::Grader),
            AccountRole::ADMINISTRATOR => Ok(AccountRole::Administrator),
            _ => Err(format!("Invalid account role: {s}")),
        }
    }
}

// 性别
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl<'de> Deserialize<'de> for Gender {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Gender>().map_err(|_| {
            serde::de::Error::custom(format!("无效的性别: '{s}'. 支持: male, female"))
        })
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
        }
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            _ => Err(format!("Invalid gender: {s}")),
        }
    }
}

// 账户实体
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub id: i64,
    pub user_id: i64,
    pub username: String, // 关联身份的用户名，仅用于展示
    pub name: String,
    pub contact: String,
    pub birth: Option<chrono::NaiveDate>,
    pub gender: Gender,
    pub address: String,
    pub role: AccountRole,
}

impl Account {
    /// 是否可以评分
    pub fn can_grade(&self) -> bool {
        AccountRole::grader_roles()
            .iter()
            .any(|role| **role == self.role)
    }
}

impl std::fmt::Display for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip_through_string() {
        for role in AccountRole::all_roles() {
            let parsed: AccountRole = role.to_string().parse().unwrap();
            assert_eq!(parsed, **role);
        }
        assert!("reviewer".parse::<AccountRole>().is_err());
    }

    #[test]
    fn test_role_deserialize_rejects_unknown() {
        let ok: AccountRole = serde_json::from_str("\"grader\"").unwrap();
        assert_eq!(ok, AccountRole::Grader);
        assert!(serde_json::from_str::<AccountRole>("\"owner\"").is_err());
    }

    #[test]
    fn test_gender_parse() {
        assert_eq!("female".parse::<Gender>().unwrap(), Gender::Female);
        assert!("other".parse::<Gender>().is_err());
    }

    #[test]
    fn test_can_grade_and_label() {
        let mut account = Account {
            id: 1,
            user_id: 1,
            username: "kim01".to_string(),
            name: "Kim".to_string(),
            contact: "010-0000-0000".to_string(),
            birth: None,
            gender: Gender::Male,
            address: "Seoul".to_string(),
            role: AccountRole::Submitter,
        };
        assert!(!account.can_grade());
        account.role = AccountRole::Grader;
        assert!(account.can_grade());
        account.role = AccountRole::Administrator;
        assert!(account.can_grade());
        assert_eq!(account.to_string(), "kim01");
    }
}
