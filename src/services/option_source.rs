use async_trait::async_trait;
use reqwest::Client;
use tracing::{info, instrument};

use crate::error::Result;
use crate::models::select_option::SelectOption;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OptionSource: Send + Sync {
    async fn fetch_options(&self) -> Result<Vec<SelectOption>>;
}

#[derive(Clone)]
pub struct HttpOptionSource {
    client: Client,
    url: String,
}

impl HttpOptionSource {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl OptionSource for HttpOptionSource {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch_options(&self) -> Result<Vec<SelectOption>> {
        let body = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let options: Vec<SelectOption> = serde_json::from_str(&body)?;
        info!(count = options.len(), "Fetched select options");
        Ok(options)
    }
}

#[derive(Debug, Clone, Default)]
pub struct StaticOptionSource {
    options: Vec<SelectOption>,
}

impl StaticOptionSource {
    pub fn new(options: Vec<SelectOption>) -> Self {
        Self { options }
    }

    pub fn requisites() -> Self {
        Self::new(vec![
            SelectOption::new("pcd", "Pessoa com Deficiência"),
            SelectOption::new("mulher", "Mulher"),
            SelectOption::new("estagio", "Estágio"),
            SelectOption::new("negro", "Negro"),
        ])
    }

    pub fn stack() -> Self {
        Self::new(vec![
            SelectOption::new("javascript", "JavaScript"),
            SelectOption::new("react", "React"),
            SelectOption::new("vue", "Vue"),
            SelectOption::new("php", "PHP"),
            SelectOption::new("elixir", "Elixir"),
            SelectOption::new("ruby", "Ruby"),
            SelectOption::new("laravel", "Laravel"),
        ])
    }
}

#[async_trait]
impl OptionSource for StaticOptionSource {
    async fn fetch_options(&self) -> Result<Vec<SelectOption>> {
        Ok(self.options.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_sources_return_their_lists() {
        let requisites = StaticOptionSource::requisites().fetch_options().await.unwrap();
        assert_eq!(requisites.len(), 4);
        assert_eq!(requisites[0].id, "pcd");

        let stack = StaticOptionSource::stack().fetch_options().await.unwrap();
        assert!(stack.iter().any(|o| o.id == "elixir" && o.label == "Elixir"));
    }
}
