use crate::article_style::ArticleStyle;
use crate::errors::EditorError;
use crate::history::DEFAULT_UNDO_DEPTH;
use serde::{Deserialize, Serialize};

/// Editor settings, usually read from `notemark.config.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Snapshots kept for undo
    #[serde(default = "default_undo_depth")]
    pub undo_depth: usize,

    /// Initial document-wide style
    #[serde(default)]
    pub article_style: ArticleStyle,
}

fn default_undo_depth() -> usize {
    DEFAULT_UNDO_DEPTH
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            undo_depth: default_undo_depth(),
            article_style: ArticleStyle::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "undoDepth": 10,
            "articleStyle": { "font": "Georgia", "fontSize": 16 }
        }"#;

        let config = EditorConfig::from_json(json).unwrap();
        assert_eq!(config.undo_depth, 10);
        assert_eq!(config.article_style.font.as_deref(), Some("Georgia"));
        assert_eq!(config.article_style.font_size, Some(16));
        assert_eq!(config.article_style.color, None);
    }

    #[test]
    fn test_default_config() {
        let config = EditorConfig::from_json("{}").unwrap();
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.undo_depth, 5);
        assert!(config.article_style.is_empty());
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            EditorConfig::from_json(r#"{ "undoDepth": "many" }"#),
            Err(EditorError::Config(_))
        ));
    }
}
