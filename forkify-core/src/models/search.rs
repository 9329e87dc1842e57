use crate::api::{RecipeApi, RecipeSummary};
use crate::error::NetworkError;

/// One search submission and the results it produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Search {
    pub query: String,
    pub result: Vec<RecipeSummary>,
}

impl Search {
    pub fn new(query: &str) -> Self {
        Self {
            query: query.to_string(),
            result: Vec::new(),
        }
    }

    /// Run the query against the API and store the results.
    ///
    /// On failure the previous results are left untouched.
    pub async fn get_results(&mut self, api: &RecipeApi) -> Result<(), NetworkError> {
        self.result = api.search(&self.query).await?;
        Ok(())
    }
}
