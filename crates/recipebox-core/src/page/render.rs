use std::sync::Arc;

use tracing::debug;

use super::{Document, Element};
use crate::error::RenderError;
use crate::models::Recipe;

/// Tag name of the display element for one recipe
pub const RECIPE_CARD_TAG: &str = "recipe-card";

/// Append one recipe card per recipe to the document's `<main>` element.
///
/// Cards are appended in input order and share the caller's `Arc`s. `None`
/// or an empty slice leaves the document untouched. Rendering the same
/// collection twice appends duplicates. Returns the number of cards added.
pub fn render(
    document: &mut Document,
    recipes: Option<&[Arc<Recipe>]>,
) -> Result<usize, RenderError> {
    let recipes = match recipes {
        Some(recipes) if !recipes.is_empty() => recipes,
        _ => return Ok(0),
    };

    let main = document.main_mut().ok_or(RenderError::MissingMain)?;
    for recipe in recipes {
        let mut card = Element::new(RECIPE_CARD_TAG);
        card.set_data(Arc::clone(recipe));
        main.append(card);
    }

    debug!(count = recipes.len(), "Appended recipe cards");
    Ok(recipes.len())
}
