use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    Stack,
    Requisites,
    Company,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    #[serde(alias = "value", alias = "name")]
    pub label: String,
}

impl SelectOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match JsonValue::deserialize(deserializer)? {
        JsonValue::String(id) => Ok(id),
        JsonValue::Number(id) => Ok(id.to_string()),
        other => Err(de::Error::custom(format!(
            "option id must be a string or a number, got {}",
            other
        ))),
    }
}

#[derive(Debug, Clone, Default)]
pub struct OptionCatalog {
    stack: Vec<SelectOption>,
    requisites: Vec<SelectOption>,
    companies: Vec<SelectOption>,
}

impl OptionCatalog {
    pub fn get(&self, kind: OptionKind) -> &[SelectOption] {
        match kind {
            OptionKind::Stack => &self.stack,
            OptionKind::Requisites => &self.requisites,
            OptionKind::Company => &self.companies,
        }
    }

    pub fn replace(&mut self, kind: OptionKind, options: Vec<SelectOption>) {
        match kind {
            OptionKind::Stack => self.stack = options,
            OptionKind::Requisites => self.requisites = options,
            OptionKind::Company => self.companies = options,
        }
    }

    pub fn label_of(&self, kind: OptionKind, id: &str) -> Option<&str> {
        self.get(kind)
            .iter()
            .find(|option| option.id == id)
            .map(|option| option.label.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_provider_shapes() {
        let options: Vec<SelectOption> = serde_json::from_str(
            r#"[{"id": 3, "name": "Acme"}, {"id": "pcd", "value": "Pessoa com Deficiência"}, {"id": "go", "label": "Go"}]"#,
        )
        .unwrap();

        assert_eq!(options[0], SelectOption::new("3", "Acme"));
        assert_eq!(options[1], SelectOption::new("pcd", "Pessoa com Deficiência"));
        assert_eq!(options[2], SelectOption::new("go", "Go"));
    }

    #[test]
    fn rejects_non_scalar_ids() {
        let parsed = serde_json::from_str::<SelectOption>(r#"{"id": [1], "label": "x"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn label_lookup_is_per_kind() {
        let mut catalog = OptionCatalog::default();
        catalog.replace(OptionKind::Company, vec![SelectOption::new("3", "Acme")]);

        assert_eq!(catalog.label_of(OptionKind::Company, "3"), Some("Acme"));
        assert_eq!(catalog.label_of(OptionKind::Stack, "3"), None);
    }
}
