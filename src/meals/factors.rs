//! Canonical per-ingredient footprint factors.
//!
//! One factor row per ingredient: carbon (kg CO2e), water (liters) and
//! calories for a typical serving. Lookup is a case-insensitive substring
//! match so "grilled chicken breast" resolves to the "chicken" row.
//! Unmatched ingredients fall back to a fixed default. This is a deliberate
//! approximation for quick logging, not a nutrition database.

/// Footprint factors for one canonical ingredient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IngredientFactor {
    /// Canonical lowercase ingredient name
    pub name: &'static str,
    /// Carbon footprint in kg CO2e per serving
    pub carbon_kg: f64,
    /// Water usage in liters per serving
    pub water_l: f64,
    /// Calories per serving
    pub calories: u32,
}

/// Fallback factor for ingredients with no table entry.
pub const DEFAULT_FACTOR: IngredientFactor = IngredientFactor {
    name: "default",
    carbon_kg: 0.5,
    water_l: 200.0,
    calories: 100,
};

/// The canonical factor table, high-impact animal products first.
pub static INGREDIENT_FACTORS: &[IngredientFactor] = &[
    IngredientFactor { name: "beef", carbon_kg: 6.75, water_l: 3850.0, calories: 250 },
    IngredientFactor { name: "lamb", carbon_kg: 6.1, water_l: 2600.0, calories: 294 },
    IngredientFactor { name: "cheese", carbon_kg: 3.4, water_l: 795.0, calories: 402 },
    IngredientFactor { name: "pork", carbon_kg: 3.0, water_l: 1500.0, calories: 242 },
    IngredientFactor { name: "chicken", carbon_kg: 1.7, water_l: 1075.0, calories: 239 },
    IngredientFactor { name: "salmon", carbon_kg: 1.5, water_l: 490.0, calories: 208 },
    IngredientFactor { name: "fish", carbon_kg: 1.3, water_l: 450.0, calories: 206 },
    IngredientFactor { name: "shrimp", carbon_kg: 2.9, water_l: 430.0, calories: 99 },
    IngredientFactor { name: "egg", carbon_kg: 1.2, water_l: 825.0, calories: 155 },
    IngredientFactor { name: "butter", carbon_kg: 2.3, water_l: 1390.0, calories: 717 },
    IngredientFactor { name: "chocolate", carbon_kg: 4.75, water_l: 4300.0, calories: 546 },
    IngredientFactor { name: "coffee", carbon_kg: 4.1, water_l: 4725.0, calories: 2 },
    IngredientFactor { name: "milk", carbon_kg: 0.8, water_l: 250.0, calories: 42 },
    IngredientFactor { name: "yogurt", carbon_kg: 0.55, water_l: 250.0, calories: 59 },
    IngredientFactor { name: "rice", carbon_kg: 1.0, water_l: 625.0, calories: 130 },
    IngredientFactor { name: "pasta", carbon_kg: 0.4, water_l: 465.0, calories: 131 },
    IngredientFactor { name: "bread", carbon_kg: 0.35, water_l: 400.0, calories: 265 },
    IngredientFactor { name: "oat", carbon_kg: 0.4, water_l: 605.0, calories: 389 },
    IngredientFactor { name: "quinoa", carbon_kg: 0.45, water_l: 1125.0, calories: 368 },
    IngredientFactor { name: "tofu", carbon_kg: 0.5, water_l: 75.0, calories: 76 },
    IngredientFactor { name: "lentil", carbon_kg: 0.2, water_l: 315.0, calories: 116 },
    IngredientFactor { name: "bean", carbon_kg: 0.2, water_l: 450.0, calories: 127 },
    IngredientFactor { name: "chickpea", carbon_kg: 0.2, water_l: 1010.0, calories: 164 },
    IngredientFactor { name: "nut", carbon_kg: 0.1, water_l: 2265.0, calories: 607 },
    IngredientFactor { name: "avocado", carbon_kg: 0.3, water_l: 495.0, calories: 160 },
    IngredientFactor { name: "potato", carbon_kg: 0.1, water_l: 75.0, calories: 77 },
    IngredientFactor { name: "tomato", carbon_kg: 0.35, water_l: 55.0, calories: 18 },
    IngredientFactor { name: "onion", carbon_kg: 0.1, water_l: 70.0, calories: 40 },
    IngredientFactor { name: "carrot", carbon_kg: 0.1, water_l: 50.0, calories: 41 },
    IngredientFactor { name: "broccoli", carbon_kg: 0.1, water_l: 70.0, calories: 34 },
    IngredientFactor { name: "spinach", carbon_kg: 0.1, water_l: 90.0, calories: 23 },
    IngredientFactor { name: "lettuce", carbon_kg: 0.1, water_l: 60.0, calories: 15 },
    IngredientFactor { name: "cucumber", carbon_kg: 0.1, water_l: 85.0, calories: 16 },
    IngredientFactor { name: "pepper", carbon_kg: 0.15, water_l: 80.0, calories: 31 },
    IngredientFactor { name: "mushroom", carbon_kg: 0.15, water_l: 70.0, calories: 22 },
    IngredientFactor { name: "apple", carbon_kg: 0.1, water_l: 205.0, calories: 52 },
    IngredientFactor { name: "banana", carbon_kg: 0.2, water_l: 200.0, calories: 89 },
    IngredientFactor { name: "orange", carbon_kg: 0.1, water_l: 140.0, calories: 47 },
    IngredientFactor { name: "berr", carbon_kg: 0.25, water_l: 115.0, calories: 57 },
];

/// Resolve an ingredient name to its factor row.
///
/// The entered name and the canonical names match in either direction, so
/// both "chicken thigh" and "chick" resolve to the chicken row. The first
/// table hit wins; unmatched names get [`DEFAULT_FACTOR`].
pub fn lookup(ingredient: &str) -> &'static IngredientFactor {
    let needle = ingredient.trim().to_lowercase();
    if needle.is_empty() {
        return &DEFAULT_FACTOR;
    }

    INGREDIENT_FACTORS
        .iter()
        .find(|f| needle.contains(f.name) || f.name.contains(needle.as_str()))
        .unwrap_or(&DEFAULT_FACTOR)
}

/// Sum footprint factors over a list of ingredient names.
pub fn footprint_of(ingredients: &[String]) -> (f64, f64, u32) {
    ingredients.iter().fold((0.0, 0.0, 0u32), |(c, w, cal), name| {
        let factor = lookup(name);
        (c + factor.carbon_kg, w + factor.water_l, cal + factor.calories)
    })
}
