use crate::recipe_schema::{NutritionInfo, Recipe, DEFAULT_SERVINGS};

const FALLBACK_INSTRUCTIONS: [&str; 6] = [
    "Prepare and clean all ingredients",
    "Heat oil in a large pan over medium heat",
    "Add ingredients in order of cooking time needed",
    "Season with salt, pepper, and your favorite spices",
    "Cook until tender and flavors are well combined",
    "Serve hot and enjoy!",
];

/// Offline recipe used whenever the model path yields nothing.
///
/// Named after the first two ingredients; the rest of the recipe is a fixed
/// pan-cooking template with a fixed nutrition estimate.
pub fn fallback_recipe(ingredient_names: &[String]) -> Recipe {
    let headline = ingredient_names
        .iter()
        .take(2)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" & ");

    Recipe {
        name: format!("Simple {} Dish", headline),
        ingredients: ingredient_names.to_vec(),
        instructions: FALLBACK_INSTRUCTIONS.iter().map(|step| step.to_string()).collect(),
        cooking_time: "25 minutes".to_string(),
        difficulty: "Easy".to_string(),
        servings: DEFAULT_SERVINGS,
        nutrition: NutritionInfo {
            calories: 320,
            protein: "12g".to_string(),
            carbs: "35g".to_string(),
            fat: Some("8g".to_string()),
            fiber: Some("5g".to_string()),
        },
    }
}
