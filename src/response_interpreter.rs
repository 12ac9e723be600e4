use serde_json::Value;
use thiserror::Error;

use crate::recipe_schema::Recipe;

#[derive(Debug, Error)]
pub enum InterpretError {
    #[error("Invalid JSON response from AI: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("AI response contained no valid recipes ({rejected} rejected)")]
    NoValidRecipes { rejected: usize },
}

/// Drops a surrounding Markdown code fence, if the model added one.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    if !trimmed.ends_with("```") {
        return trimmed;
    }
    let inner = if let Some(rest) = trimmed.strip_prefix("```json") {
        rest
    } else if let Some(rest) = trimmed.strip_prefix("```") {
        rest
    } else {
        return trimmed;
    };
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

/// Decodes model output and keeps every recipe that validates.
///
/// Invalid entries are dropped as they are, never repaired. A missing or
/// non-array `recipes` key counts as an empty batch.
pub fn interpret_recipes(raw: &str) -> Result<Vec<Recipe>, InterpretError> {
    let payload = strip_code_fence(raw);
    let decoded: Value = serde_json::from_str(payload).map_err(|e| {
        tracing::error!(error = %e, raw = %raw, "Failed to parse JSON response");
        InterpretError::Malformed(e)
    })?;

    let candidates = decoded
        .get("recipes")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let mut recipes = Vec::with_capacity(candidates.len());
    let mut rejected = 0;
    for (index, candidate) in candidates.iter().enumerate() {
        match Recipe::from_value(candidate) {
            Ok(recipe) => recipes.push(recipe),
            Err(errors) => {
                rejected += 1;
                tracing::warn!(index, %errors, "Failed to parse recipe, dropping it");
            }
        }
    }

    if recipes.is_empty() {
        return Err(InterpretError::NoValidRecipes { rejected });
    }
    Ok(recipes)
}
