//! Data models for recipe records.

mod recipe;

pub use recipe::Recipe;
