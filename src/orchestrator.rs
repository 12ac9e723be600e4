use std::sync::Arc;

use crate::fallback::fallback_recipe;
use crate::generation::RecipeGenerator;
use crate::prompt_builder::build_recipe_prompt;
use crate::recipe_schema::{Recipe, RecipeRequest, RecipeResponse, RequestError};
use crate::response_interpreter::{interpret_recipes, InterpretError};

/// Why the model path was abandoned for the offline recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    NoCredential,
    CallFailed,
    NoValidRecipes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeSource {
    Model,
    Fallback(FallbackReason),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub response: RecipeResponse,
    pub source: RecipeSource,
}

/// Runs one request from validation to response. Once validation passes the
/// caller always gets at least one recipe.
#[derive(Debug, Clone, Default)]
pub struct RecipeAnalyzer {
    generator: Option<Arc<dyn RecipeGenerator>>,
}

impl RecipeAnalyzer {
    pub fn new(generator: Option<Arc<dyn RecipeGenerator>>) -> Self {
        Self { generator }
    }

    /// Analyzer with no model credential; every request gets the fallback recipe.
    pub fn offline() -> Self {
        Self::default()
    }

    pub fn ai_enabled(&self) -> bool {
        self.generator.is_some()
    }

    pub async fn analyze(&self, request: &RecipeRequest) -> Result<Analysis, RequestError> {
        request.validate()?;
        let ingredient_names = request.ingredient_names();
        tracing::info!(ingredients = ?ingredient_names, "Analyzing recipe request");

        let (recipes, source) = match self.generate(request, &ingredient_names).await {
            Ok(recipes) => (recipes, RecipeSource::Model),
            Err(reason) => {
                tracing::warn!(?reason, "Using fallback recipe");
                (
                    vec![fallback_recipe(&ingredient_names)],
                    RecipeSource::Fallback(reason),
                )
            }
        };

        tracing::info!(count = recipes.len(), "Successfully generated recipes");
        let message = summary_message(recipes.len(), &ingredient_names);
        Ok(Analysis {
            response: RecipeResponse { recipes, message },
            source,
        })
    }

    async fn generate(
        &self,
        request: &RecipeRequest,
        ingredient_names: &[String],
    ) -> Result<Vec<Recipe>, FallbackReason> {
        let Some(generator) = &self.generator else {
            return Err(FallbackReason::NoCredential);
        };

        let prompt = build_recipe_prompt(
            ingredient_names,
            &request.dietary_restrictions,
            request.cuisine(),
        );
        tracing::info!(
            model = generator.model_name(),
            ingredients = ingredient_names.len(),
            "Requesting recipes from model"
        );

        let raw = generator.generate(&prompt).await.map_err(|e| {
            tracing::error!(error = %e, "AI generation failed");
            FallbackReason::CallFailed
        })?;

        interpret_recipes(&raw).map_err(|e| {
            tracing::error!(error = %e, "AI response unusable");
            match e {
                // Undecodable text counts as a failed call.
                InterpretError::Malformed(_) => FallbackReason::CallFailed,
                InterpretError::NoValidRecipes { .. } => FallbackReason::NoValidRecipes,
            }
        })
    }
}

pub fn summary_message(recipe_count: usize, ingredient_names: &[String]) -> String {
    format!(
        "Generated {} recipe{} using your ingredients: {}!",
        recipe_count,
        if recipe_count == 1 { "" } else { "s" },
        ingredient_names.join(", ")
    )
}
