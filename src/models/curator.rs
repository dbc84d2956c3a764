use serde::{Deserialize, Serialize};

pub const CURATOR_ROLE: &str = "curator";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuratorIdentity {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl CuratorIdentity {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            roles: vec![CURATOR_ROLE.to_string()],
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r.eq_ignore_ascii_case(role))
    }
}
