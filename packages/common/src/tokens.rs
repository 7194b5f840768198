//! Design tokens
//!
//! A token is a named design value (a paint or a type style) that component specs
//! reference by id, e.g. `color.red` or `type.body`. Specs never embed token values;
//! renderers look them up through a [`TokenResolver`].

use crate::error::CommonError;
use crate::result::CommonResult;
use crate::Color;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// Complete text style applied as a unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyStyle {
    pub font_family: String,
    pub font_style: String,
    pub font_size: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
}

/// Concrete value a token resolves to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ResolvedStyle {
    Paint { color: Color },
    Typography(TypographyStyle),
}

impl ResolvedStyle {
    pub fn as_paint(&self) -> Option<Color> {
        match self {
            ResolvedStyle::Paint { color } => Some(*color),
            ResolvedStyle::Typography(_) => None,
        }
    }

    pub fn as_typography(&self) -> Option<&TypographyStyle> {
        match self {
            ResolvedStyle::Typography(style) => Some(style),
            ResolvedStyle::Paint { .. } => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ResolvedStyle::Paint { .. } => "paint",
            ResolvedStyle::Typography(_) => "typography",
        }
    }
}

/// Looks up token ids
pub trait TokenResolver {
    fn resolve(&self, id: &str) -> Option<ResolvedStyle>;
}

impl<F> TokenResolver for F
where
    F: Fn(&str) -> Option<ResolvedStyle>,
{
    fn resolve(&self, id: &str) -> Option<ResolvedStyle> {
        self(id)
    }
}

/// Flat, ordered collection of tokens keyed by dotted id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenSet {
    tokens: BTreeMap<String, ResolvedStyle>,
}

impl TokenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, style: ResolvedStyle) {
        self.tokens.insert(id.into(), style);
    }

    pub fn with_token(mut self, id: impl Into<String>, style: ResolvedStyle) -> Self {
        self.insert(id, style);
        self
    }

    pub fn get(&self, id: &str) -> Option<&ResolvedStyle> {
        self.tokens.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.tokens.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Parse a tokens document.
    ///
    /// Groups nest and flatten into dotted ids: `{"color": {"red": {...}}}` defines
    /// `color.red`. Any object carrying a string `type` field is a token; keys starting with
    /// `$` are metadata and skipped.
    pub fn from_json(source: &str) -> CommonResult<Self> {
        let root: Value = serde_json::from_str(source)?;
        let mut set = TokenSet::new();

        match &root {
            Value::Object(_) => collect_tokens(&root, &mut Vec::new(), &mut set)?,
            _ => return Err(CommonError::invalid_token("<root>", "expected an object")),
        }

        Ok(set)
    }

    /// Load a tokens document from disk
    pub fn load(path: &Path) -> CommonResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

impl TokenResolver for TokenSet {
    fn resolve(&self, id: &str) -> Option<ResolvedStyle> {
        self.tokens.get(id).cloned()
    }
}

fn collect_tokens(value: &Value, path: &mut Vec<String>, set: &mut TokenSet) -> CommonResult<()> {
    let Value::Object(entries) = value else {
        return Err(CommonError::invalid_token(
            path.join("."),
            "expected a token or a token group",
        ));
    };

    if matches!(entries.get("type"), Some(Value::String(_))) {
        if path.is_empty() {
            return Err(CommonError::invalid_token("<root>", "root must be a token group"));
        }
        let style: ResolvedStyle = serde_json::from_value(value.clone())
            .map_err(|e| CommonError::invalid_token(path.join("."), e.to_string()))?;
        set.insert(path.join("."), style);
        return Ok(());
    }

    for (key, child) in entries {
        if key.starts_with('$') {
            continue;
        }
        path.push(key.clone());
        collect_tokens(child, path, set)?;
        path.pop();
    }

    Ok(())
}
