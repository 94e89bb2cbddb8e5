//! 操作员一覧（users.json）
//!
//! 読み込めない場合はデモ用の操作员に差し替える。

use crate::error::{StocktakeError, Result};
use serde::Deserialize;
use std::path::Path;
use stocktake_common::Operator;

/// users.json の1行
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEntry {
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub store_name: String,
}

impl UserEntry {
    fn new(username: &str, password: &str, store_name: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            store_name: store_name.to_string(),
        }
    }

    pub fn operator(&self) -> Operator {
        Operator {
            username: self.username.clone(),
            store_name: self.store_name.clone(),
        }
    }
}

/// デモ用の操作员
pub fn default_users() -> Vec<UserEntry> {
    vec![
        UserEntry::new("wdk_user", "123", "宝珠奶酪（五道口店）"),
        UserEntry::new("xzm_user", "123", "OMEGA酸奶（西直门店）"),
    ]
}

/// users.json を読み込み（失敗時はデモ用）
pub async fn fetch_users(path: Option<&Path>) -> Vec<UserEntry> {
    let Some(path) = path else {
        tracing::info!("no users file configured, using built-in users");
        return default_users();
    };

    match read_users(path).await {
        Ok(users) => users,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to load users, using built-in users");
            default_users()
        }
    }
}

async fn read_users(path: &Path) -> Result<Vec<UserEntry>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| StocktakeError::SourceUnavailable(format!("{}: {}", path.display(), e)))?;
    let users: Vec<UserEntry> = serde_json::from_str(&content)?;
    Ok(users)
}

/// 用户名とパスワードが両方一致する操作员
pub fn authenticate(users: &[UserEntry], username: &str, password: &str) -> Result<Operator> {
    users
        .iter()
        .find(|u| u.username == username && u.password == password)
        .map(UserEntry::operator)
        .ok_or(StocktakeError::Authentication)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticate() {
        let users = default_users();
        let operator = authenticate(&users, "wdk_user", "123").expect("ログイン失敗");
        assert_eq!(operator.store_name, "宝珠奶酪（五道口店）");

        assert!(matches!(
            authenticate(&users, "wdk_user", "124"),
            Err(StocktakeError::Authentication)
        ));
        assert!(authenticate(&users, "nobody", "123").is_err());
    }

    #[test]
    fn test_user_entry_deserialize() {
        let json = r#"[{"username": "a", "password": "p", "storeName": "店A"}]"#;
        let users: Vec<UserEntry> = serde_json::from_str(json).expect("パース失敗");
        assert_eq!(users[0].store_name, "店A");
        assert_eq!(users[0].operator().username, "a");
    }
}
