use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub const DEFAULT_SERVINGS: u32 = 4;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub name: String,
    #[serde(default)]
    pub quantity: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RecipeRequest {
    pub ingredients: Vec<Ingredient>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub dietary_restrictions: Vec<String>,
    #[serde(default)]
    pub cuisine_preference: Option<String>,
}

/// Request preconditions checked before any generation work starts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("No ingredients provided")]
    EmptyIngredients,
    #[error("Ingredient at position {index} has an empty name")]
    BlankIngredientName { index: usize },
}

impl RecipeRequest {
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.ingredients.is_empty() {
            return Err(RequestError::EmptyIngredients);
        }
        if let Some(index) = self
            .ingredients
            .iter()
            .position(|ingredient| ingredient.name.trim().is_empty())
        {
            return Err(RequestError::BlankIngredientName { index });
        }
        Ok(())
    }

    /// Names in request order, untouched.
    pub fn ingredient_names(&self) -> Vec<String> {
        self.ingredients
            .iter()
            .map(|ingredient| ingredient.name.clone())
            .collect()
    }

    pub fn cuisine(&self) -> Option<&str> {
        self.cuisine_preference
            .as_deref()
            .map(str::trim)
            .filter(|cuisine| !cuisine.is_empty())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct NutritionInfo {
    pub calories: u32,
    pub protein: String,
    pub carbs: String,
    pub fat: Option<String>,
    pub fiber: Option<String>,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub name: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    #[serde(rename = "cookingTime")]
    pub cooking_time: String,
    pub difficulty: String,
    pub servings: u32,
    pub nutrition: NutritionInfo,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct RecipeResponse {
    pub recipes: Vec<Recipe>,
    pub message: String,
}

/// One offending field. Nested fields use dotted paths, list items use `[i]`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{} validation error(s): {}", .0.len(), join_errors(.0))]
pub struct ValidationErrors(pub Vec<ValidationError>);

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn fields(&self) -> Vec<&str> {
        self.0.iter().map(|error| error.field.as_str()).collect()
    }
}

/// Walks one JSON object and records a `ValidationError` per bad field
/// instead of stopping at the first.
struct FieldReader<'v, 'e> {
    object: &'v Map<String, Value>,
    prefix: String,
    errors: &'e mut Vec<ValidationError>,
}

impl<'v> FieldReader<'v, '_> {
    fn path(&self, key: &str) -> String {
        if self.prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.prefix, key)
        }
    }

    fn fail(&mut self, field: String, reason: impl Into<String>) {
        self.errors.push(ValidationError {
            field,
            reason: reason.into(),
        });
    }

    fn present(&self, key: &str) -> Option<&'v Value> {
        self.object.get(key).filter(|value| !value.is_null())
    }

    fn required(&mut self, key: &str) -> Option<&'v Value> {
        let value = self.present(key);
        if value.is_none() {
            let field = self.path(key);
            self.fail(field, "field required");
        }
        value
    }

    fn required_string(&mut self, key: &str) -> Option<String> {
        let value = self.required(key)?;
        self.expect_string(key, value)
    }

    fn optional_string(&mut self, key: &str) -> Option<String> {
        let value = self.present(key)?;
        self.expect_string(key, value)
    }

    fn expect_string(&mut self, key: &str, value: &Value) -> Option<String> {
        match value.as_str() {
            Some(text) => Some(text.to_string()),
            None => {
                let field = self.path(key);
                self.fail(field, "expected a string");
                None
            }
        }
    }

    fn required_string_list(&mut self, key: &str) -> Option<Vec<String>> {
        let value = self.required(key)?;
        let Some(items) = value.as_array() else {
            let field = self.path(key);
            self.fail(field, "expected a list of strings");
            return None;
        };

        let mut strings = Vec::with_capacity(items.len());
        let mut ok = true;
        for (index, item) in items.iter().enumerate() {
            match item.as_str() {
                Some(text) => strings.push(text.to_string()),
                None => {
                    let field = format!("{}[{}]", self.path(key), index);
                    self.fail(field, "expected a string");
                    ok = false;
                }
            }
        }
        ok.then_some(strings)
    }

    fn required_count(&mut self, key: &str) -> Option<u32> {
        let value = self.required(key)?;
        self.expect_count(key, value)
    }

    fn count_or(&mut self, key: &str, default: u32) -> Option<u32> {
        match self.present(key) {
            Some(value) => self.expect_count(key, value),
            None => Some(default),
        }
    }

    fn expect_count(&mut self, key: &str, value: &Value) -> Option<u32> {
        let parsed = match value {
            Value::Number(number) => number
                .as_u64()
                .or_else(|| {
                    number
                        .as_f64()
                        .filter(|float| float.fract() == 0.0 && *float >= 0.0)
                        .map(|float| float as u64)
                })
                .ok_or(if number.as_f64().is_some_and(|float| float < 0.0) {
                    "must be a non-negative integer"
                } else {
                    "expected an integer"
                }),
            // Models often quote numbers; accept them the way they read.
            Value::String(text) => match text.trim().parse::<u64>() {
                Ok(count) => Ok(count),
                Err(_) if text.trim().parse::<i64>().is_ok() => {
                    Err("must be a non-negative integer")
                }
                Err(_) => Err("expected an integer"),
            },
            _ => Err("expected an integer"),
        };

        match parsed.and_then(|count| u32::try_from(count).map_err(|_| "integer out of range")) {
            Ok(count) => Some(count),
            Err(reason) => {
                let field = self.path(key);
                self.fail(field, reason);
                None
            }
        }
    }
}

fn as_object<'a>(
    value: &'a Value,
    field: &str,
    errors: &mut Vec<ValidationError>,
) -> Option<&'a Map<String, Value>> {
    let object = value.as_object();
    if object.is_none() {
        errors.push(ValidationError {
            field: field.to_string(),
            reason: "expected an object".to_string(),
        });
    }
    object
}

impl NutritionInfo {
    pub fn from_value(value: &Value) -> Result<Self, ValidationErrors> {
        let mut errors = Vec::new();
        match Self::read(value, "", &mut errors) {
            Some(nutrition) if errors.is_empty() => Ok(nutrition),
            _ => Err(ValidationErrors(errors)),
        }
    }

    fn read(value: &Value, prefix: &str, errors: &mut Vec<ValidationError>) -> Option<Self> {
        let object = as_object(value, if prefix.is_empty() { "nutrition" } else { prefix }, errors)?;
        let mut reader = FieldReader {
            object,
            prefix: prefix.to_string(),
            errors,
        };

        let calories = reader.required_count("calories");
        let protein = reader.required_string("protein");
        let carbs = reader.required_string("carbs");
        let fat = reader.optional_string("fat");
        let fiber = reader.optional_string("fiber");

        Some(Self {
            calories: calories?,
            protein: protein?,
            carbs: carbs?,
            fat,
            fiber,
        })
    }
}

impl Recipe {
    /// Strict construction from untrusted JSON. Every bad field is reported.
    pub fn from_value(value: &Value) -> Result<Self, ValidationErrors> {
        let mut errors = Vec::new();
        let Some(object) = as_object(value, "recipe", &mut errors) else {
            return Err(ValidationErrors(errors));
        };

        let mut reader = FieldReader {
            object,
            prefix: String::new(),
            errors: &mut errors,
        };
        let name = reader.required_string("name");
        let ingredients = reader.required_string_list("ingredients");
        let instructions = reader.required_string_list("instructions");
        let cooking_time = reader.required_string("cookingTime");
        let difficulty = reader.required_string("difficulty");
        let servings = reader.count_or("servings", DEFAULT_SERVINGS);
        let nutrition = reader
            .required("nutrition")
            .and_then(|nutrition| NutritionInfo::read(nutrition, "nutrition", &mut errors));

        match (name, ingredients, instructions, cooking_time, difficulty, servings, nutrition) {
            (
                Some(name),
                Some(ingredients),
                Some(instructions),
                Some(cooking_time),
                Some(difficulty),
                Some(servings),
                Some(nutrition),
            ) if errors.is_empty() => Ok(Self {
                name,
                ingredients,
                instructions,
                cooking_time,
                difficulty,
                servings,
                nutrition,
            }),
            _ => Err(ValidationErrors(errors)),
        }
    }
}
