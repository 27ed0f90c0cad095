//! The page model.
//!
//! A [`Document`] holds a tree of [`Element`]s with a single `<main>`
//! region that recipe cards are appended to. Cards carry their recipe as a
//! shared `data` payload, so the element holds the very object the loader
//! produced rather than a copy of it.

pub mod lifecycle;
pub mod render;

use std::sync::Arc;

use askama::Template;

use crate::error::RenderError;
use crate::models::Recipe;

pub use lifecycle::{LoadSignal, PageLifecycle, ReadyState};
pub use render::{render, RECIPE_CARD_TAG};

#[derive(Debug, Clone)]
pub struct Element {
    tag: String,
    data: Option<Arc<Recipe>>,
    children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            data: None,
            children: Vec::new(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn data(&self) -> Option<&Arc<Recipe>> {
        self.data.as_ref()
    }

    pub fn set_data(&mut self, data: Arc<Recipe>) {
        self.data = Some(data);
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn append(&mut self, child: Element) {
        self.children.push(child);
    }

    fn find_mut(&mut self, tag: &str) -> Option<&mut Element> {
        if self.tag == tag {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(tag))
    }

    fn find(&self, tag: &str) -> Option<&Element> {
        if self.tag == tag {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(tag))
    }

    fn to_html(&self) -> Result<String, RenderError> {
        let data = self
            .data
            .as_ref()
            .map(|recipe| serde_json::to_string(recipe.as_ref()))
            .transpose()?;

        let inner = self
            .children
            .iter()
            .map(Element::to_html)
            .collect::<Result<String, _>>()?;

        let template = ElementTemplate {
            tag: &self.tag,
            data,
            inner,
        };
        Ok(template.render()?)
    }
}

#[derive(Template)]
#[template(
    source = r#"<{{ tag }}{% if let Some(data) = data %} data-recipe="{{ data }}"{% endif %}>{{ inner|safe }}</{{ tag }}>"#,
    ext = "html"
)]
struct ElementTemplate<'a> {
    tag: &'a str,
    data: Option<String>,
    inner: String,
}

#[derive(Template)]
#[template(
    source = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>{{ title }}</title>
  </head>
  <body>
    {{ body|safe }}
  </body>
</html>
"#,
    ext = "html"
)]
struct PageTemplate<'a> {
    title: &'a str,
    body: String,
}

#[derive(Debug, Clone)]
pub struct Document {
    title: String,
    body: Vec<Element>,
}

impl Document {
    /// A page with an empty `<main>` region
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_body(title, vec![Element::new("main")])
    }

    pub fn with_body(title: impl Into<String>, body: Vec<Element>) -> Self {
        Self {
            title: title.into(),
            body,
        }
    }

    /// The first `<main>` element in document order
    pub fn main(&self) -> Option<&Element> {
        self.body.iter().find_map(|el| el.find("main"))
    }

    pub fn main_mut(&mut self) -> Option<&mut Element> {
        self.body.iter_mut().find_map(|el| el.find_mut("main"))
    }

    pub fn to_html(&self) -> Result<String, RenderError> {
        let body = self
            .body
            .iter()
            .map(Element::to_html)
            .collect::<Result<String, _>>()?;

        let template = PageTemplate {
            title: &self.title,
            body,
        };
        Ok(template.render()?)
    }
}
