//! The ordered list of recipe document locations.

/// Recipe documents loaded on a cold start, in display order.
pub const RECIPE_URLS: [&str; 6] = [
    "https://adarsh249.github.io/Lab8-Starter/recipes/1_50-thanksgiving-side-dishes.json",
    "https://adarsh249.github.io/Lab8-Starter/recipes/2_roasting-turkey-breast-with-stuffing.json",
    "https://adarsh249.github.io/Lab8-Starter/recipes/3_moms-cornbread-stuffing.json",
    "https://adarsh249.github.io/Lab8-Starter/recipes/4_50-indulgent-thanksgiving-side-dishes-for-any-holiday-gathering.json",
    "https://adarsh249.github.io/Lab8-Starter/recipes/5_healthy-thanksgiving-recipe-crockpot-turkey-breast.json",
    "https://adarsh249.github.io/Lab8-Starter/recipes/6_one-pot-thanksgiving-dinner.json",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeSources {
    urls: Vec<String>,
}

impl RecipeSources {
    pub fn new<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            urls: urls.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.urls.iter().map(String::as_str)
    }
}

impl Default for RecipeSources {
    fn default() -> Self {
        Self::new(RECIPE_URLS)
    }
}
