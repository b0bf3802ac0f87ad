//! Document-wide default style, used when an edit has no text to wrap.

use crate::edits::combine_attributes;
use notemark_parser::StyleAttribute;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArticleStyle {
    pub font: Option<String>,
    pub font_size: Option<u32>,
    pub color: Option<String>,
    pub background_color: Option<String>,
}

impl ArticleStyle {
    pub fn from_attributes(attributes: &[StyleAttribute]) -> Self {
        let mut style = Self::default();
        // Later entries overwrite earlier ones, so feed them in reverse to
        // keep the first per category.
        for attribute in attributes.iter().rev() {
            style.set(attribute.clone());
        }
        style
    }

    fn set(&mut self, attribute: StyleAttribute) {
        match attribute {
            StyleAttribute::Font(name) => self.font = Some(name),
            StyleAttribute::FontSize(size) => self.font_size = Some(size),
            StyleAttribute::Color(key) => self.color = Some(key),
            StyleAttribute::BackgroundColor(key) => self.background_color = Some(key),
        }
    }

    /// New attributes win per category
    pub fn merge(&self, attributes: &[StyleAttribute]) -> Self {
        Self::from_attributes(&combine_attributes(attributes, &self.attributes()))
    }

    /// Set attributes in category order
    pub fn attributes(&self) -> Vec<StyleAttribute> {
        let mut attributes = Vec::new();
        if let Some(font) = &self.font {
            attributes.push(StyleAttribute::Font(font.clone()));
        }
        if let Some(size) = self.font_size {
            attributes.push(StyleAttribute::FontSize(size));
        }
        if let Some(color) = &self.color {
            attributes.push(StyleAttribute::Color(color.clone()));
        }
        if let Some(background) = &self.background_color {
            attributes.push(StyleAttribute::BackgroundColor(background.clone()));
        }
        attributes
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
