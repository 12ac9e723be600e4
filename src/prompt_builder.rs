/// System instruction sent ahead of every recipe prompt.
pub const RECIPE_SYSTEM_PROMPT: &str =
    "You are a professional chef and nutritionist who responds only with valid JSON.";

const OUTPUT_CONTRACT: &str = r#"

IMPORTANT: Respond with ONLY a valid JSON object in this exact format:

{
  "recipes": [
    {
      "name": "Recipe Name",
      "ingredients": ["ingredient1", "ingredient2", "ingredient3"],
      "instructions": ["Step 1: Do this...", "Step 2: Do that...", "Step 3: Finish with..."],
      "cookingTime": "X minutes",
      "difficulty": "Easy/Medium/Hard",
      "servings": 4,
      "nutrition": {
        "calories": 450,
        "protein": "12g",
        "carbs": "60g",
        "fat": "15g",
        "fiber": "3g"
      }
    }
  ]
}

Do not include any text before or after the JSON. Make sure the JSON is valid and properly formatted.
"#;

/// Builds the user prompt for a recipe request.
///
/// Ingredient names are listed verbatim and in order. The dietary clause is
/// only added for a non-empty restriction list (duplicates collapsed), the
/// cuisine clause only when a preference is given. The prompt always ends
/// with the JSON contract the response interpreter relies on.
pub fn build_recipe_prompt(
    ingredients: &[String],
    dietary_restrictions: &[String],
    cuisine_preference: Option<&str>,
) -> String {
    let mut prompt = format!(
        "
You are a professional chef and nutritionist. Generate 2-3 delicious recipe suggestions using the following ingredients: {}.

Requirements:
- Use as many of the provided ingredients as possible
- Each recipe should be practical and achievable
- Include estimated cooking time and difficulty level (Easy/Medium/Hard)
- Provide realistic nutritional information per serving
- Instructions should be clear and step-by-step
",
        ingredients.join(", ")
    );

    let restrictions = unique_in_order(dietary_restrictions);
    if !restrictions.is_empty() {
        prompt.push_str(&format!(
            "\n- Consider these dietary restrictions: {}",
            restrictions.join(", ")
        ));
    }

    if let Some(cuisine) = cuisine_preference {
        prompt.push_str(&format!("\n- Prefer {} cuisine style", cuisine));
    }

    prompt.push_str(OUTPUT_CONTRACT);
    prompt
}

fn unique_in_order(values: &[String]) -> Vec<&str> {
    let mut seen = Vec::with_capacity(values.len());
    for value in values {
        if !seen.contains(&value.as_str()) {
            seen.push(value.as_str());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn lists_ingredients_verbatim_in_order() {
        let prompt = build_recipe_prompt(&names(&["Chicken thighs", "basmati rice", "lime"]), &[], None);
        assert!(prompt.contains("following ingredients: Chicken thighs, basmati rice, lime."));
    }

    #[test]
    fn identical_inputs_give_identical_prompts() {
        let ingredients = names(&["tofu", "broccoli"]);
        let restrictions = names(&["vegan"]);
        let first = build_recipe_prompt(&ingredients, &restrictions, Some("Thai"));
        let second = build_recipe_prompt(&ingredients, &restrictions, Some("Thai"));
        assert_eq!(first, second);
    }

    #[test]
    fn optional_clauses_only_when_given() {
        let ingredients = names(&["egg"]);

        let bare = build_recipe_prompt(&ingredients, &[], None);
        assert!(!bare.contains("dietary restrictions"));
        assert!(!bare.contains("cuisine style"));

        let full = build_recipe_prompt(&ingredients, &names(&["vegetarian", "gluten-free"]), Some("Italian"));
        assert!(full.contains("- Consider these dietary restrictions: vegetarian, gluten-free"));
        assert!(full.contains("- Prefer Italian cuisine style"));
    }

    #[test]
    fn duplicate_restrictions_collapse() {
        let prompt = build_recipe_prompt(
            &names(&["egg"]),
            &names(&["vegan", "nut-free", "vegan"]),
            None,
        );
        assert!(prompt.contains("restrictions: vegan, nut-free\n"));
    }

    #[test]
    fn ends_with_json_only_contract() {
        let prompt = build_recipe_prompt(&names(&["egg"]), &[], None);
        assert!(prompt.contains("\"recipes\": ["));
        assert!(prompt.contains("\"cookingTime\": \"X minutes\""));
        assert!(prompt.trim_end().ends_with("Make sure the JSON is valid and properly formatted."));
        assert!(prompt.contains("Do not include any text before or after the JSON."));
    }
}
