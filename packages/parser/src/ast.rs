use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Four byte offsets locating one annotation occurrence in raw text.
///
/// ```text
/// [ nuits ]  {style| color: red}
/// ^        ^ ^                  ^
/// |        | style_start        style_stop
/// |        body_stop
/// body_start
/// ```
///
/// Invariant: `body_start < body_stop <= style_start < style_stop`.
/// Ordering is by `body_start` first, so a sorted map of bounds is
/// also sorted by document position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Bounds {
    pub body_start: usize,
    pub body_stop: usize,
    pub style_start: usize,
    pub style_stop: usize,
}

impl Bounds {
    pub fn new(body_start: usize, body_stop: usize, style_start: usize, style_stop: usize) -> Self {
        Self {
            body_start,
            body_stop,
            style_start,
            style_stop,
        }
    }

    /// `[body]` including brackets
    pub fn body(&self) -> Range<usize> {
        self.body_start..self.body_stop
    }

    /// `{kind| attrs}` including braces
    pub fn clause(&self) -> Range<usize> {
        self.style_start..self.style_stop
    }

    /// The whole annotation, body through clause
    pub fn whole(&self) -> Range<usize> {
        self.body_start..self.style_stop
    }

    /// Text between the brackets
    pub fn inner_body(&self) -> Range<usize> {
        self.body_start + 1..self.body_stop - 1
    }

    /// Shift every offset by `by` (line-relative → document-relative)
    pub fn offset(self, by: usize) -> Self {
        Self {
            body_start: self.body_start + by,
            body_stop: self.body_stop + by,
            style_start: self.style_start + by,
            style_stop: self.style_stop + by,
        }
    }

    pub fn is_well_formed(&self) -> bool {
        self.body_start < self.body_stop
            && self.body_stop <= self.style_start
            && self.style_start < self.style_stop
    }
}

/// One parsed piece of a line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Annotation {
    /// Literal run with no annotation
    Plain { text: String },

    /// `[body]{style| ...}`
    Styled {
        body: String,
        attributes: Vec<StyleAttribute>,
    },

    /// `[description]{image| src: ..., align: ...}`
    Image {
        description: String,
        source: String,
        alignment: Alignment,
    },
}

impl Annotation {
    pub fn plain(text: impl Into<String>) -> Self {
        Annotation::Plain { text: text.into() }
    }

    pub fn is_plain(&self) -> bool {
        matches!(self, Annotation::Plain { .. })
    }

    /// The editable text: plain text, styled body or image description
    pub fn body(&self) -> &str {
        match self {
            Annotation::Plain { text } => text,
            Annotation::Styled { body, .. } => body,
            Annotation::Image { description, .. } => description,
        }
    }
}

/// Keyword between `{` and `|`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationKind {
    Style,
    Image,
}

impl AnnotationKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            AnnotationKind::Style => "style",
            AnnotationKind::Image => "image",
        }
    }
}

/// A single entry of a style clause
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "category", content = "value", rename_all = "camelCase")]
pub enum StyleAttribute {
    Font(String),
    FontSize(u32),
    Color(String),
    BackgroundColor(String),
}

impl StyleAttribute {
    pub fn category(&self) -> AttributeCategory {
        match self {
            StyleAttribute::Font(_) => AttributeCategory::Font,
            StyleAttribute::FontSize(_) => AttributeCategory::FontSize,
            StyleAttribute::Color(_) => AttributeCategory::Color,
            StyleAttribute::BackgroundColor(_) => AttributeCategory::BackgroundColor,
        }
    }
}

impl fmt::Display for StyleAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleAttribute::Font(name) => write!(f, "{}: {}", AttributeCategory::Font.keyword(), name),
            StyleAttribute::FontSize(size) => {
                write!(f, "{}: {}", AttributeCategory::FontSize.keyword(), size)
            }
            StyleAttribute::Color(key) => write!(f, "{}: {}", AttributeCategory::Color.keyword(), key),
            StyleAttribute::BackgroundColor(key) => {
                write!(f, "{}: {}", AttributeCategory::BackgroundColor.keyword(), key)
            }
        }
    }
}

/// At most one attribute per category survives any edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AttributeCategory {
    Font,
    FontSize,
    Color,
    BackgroundColor,
}

impl AttributeCategory {
    pub const ALL: [AttributeCategory; 4] = [
        AttributeCategory::Font,
        AttributeCategory::FontSize,
        AttributeCategory::Color,
        AttributeCategory::BackgroundColor,
    ];

    pub fn keyword(&self) -> &'static str {
        match self {
            AttributeCategory::Font => "font",
            AttributeCategory::FontSize => "size",
            AttributeCategory::Color => "color",
            AttributeCategory::BackgroundColor => "background color",
        }
    }
}

/// Image placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Right,
    #[default]
    Center,
}

impl Alignment {
    pub fn keyword(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Right => "right",
            Alignment::Center => "center",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "left" => Some(Alignment::Left),
            "right" => Some(Alignment::Right),
            "center" => Some(Alignment::Center),
            _ => None,
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// One item of scanner output, borrowing its source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment<'src> {
    pub annotation: Annotation,
    /// Byte range covered by this segment
    pub span: Range<usize>,
    /// Exactly the source text under `span`
    pub raw: &'src str,
    /// Present for every non-plain segment
    pub bounds: Option<Bounds>,
}

impl<'src> Segment<'src> {
    pub fn is_plain(&self) -> bool {
        self.bounds.is_none()
    }
}
