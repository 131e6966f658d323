use serde::{Deserialize, Serialize};

/// The user reference nested inside reports, comments and notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: i64,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_avatar_url: Option<String>,
}

impl UserRef {
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.clone(),
            _ => self.username.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_falls_back_to_username() {
        let user = UserRef {
            id: 1,
            username: "mlee".to_string(),
            email: None,
            first_name: None,
            last_name: None,
            profile_avatar_url: None,
        };
        assert_eq!(user.display_name(), "mlee");

        let named = UserRef {
            first_name: Some("Morgan".to_string()),
            last_name: Some("Lee".to_string()),
            ..user
        };
        assert_eq!(named.display_name(), "Morgan Lee");
    }
}
