//! Local prompt templates with `{variable}` placeholders

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

use crate::error::{CoreError, Result};

/// One set of values for a template's variables
pub type Bindings = BTreeMap<String, String>;

pub const DEFAULT_PROMPT_NAME: &str = "movie-critic";
pub const DEFAULT_TEMPLATE: &str = "Compare the movies {movie1} and {movie2}.";
pub const DEFAULT_MODEL: &str = "gemini-1.5-pro-002";
pub const DEFAULT_SYSTEM_INSTRUCTION: &str = "You are a movie critic. Answer in a short sentence.";

/// A named prompt with placeholders, the variable sets to fill them with,
/// and the model it is meant for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptTemplate {
    pub name: String,
    pub template: String,
    #[serde(default)]
    pub variables: Vec<Bindings>,
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<String>,
}

impl Default for PromptTemplate {
    /// The movie critic prompt with two variable sets
    fn default() -> Self {
        Self {
            name: DEFAULT_PROMPT_NAME.to_string(),
            template: DEFAULT_TEMPLATE.to_string(),
            variables: vec![
                bindings([("movie1", "The Lion King"), ("movie2", "Frozen")]),
                bindings([("movie1", "Inception"), ("movie2", "Interstellar")]),
            ],
            model: DEFAULT_MODEL.to_string(),
            system_instruction: Some(DEFAULT_SYSTEM_INSTRUCTION.to_string()),
        }
    }
}

/// Build a [`Bindings`] map from pairs
pub fn bindings<I, K, V>(pairs: I) -> Bindings
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Parse `k=v,k=v` into bindings
pub fn parse_bindings(s: &str) -> Result<Bindings> {
    s.split(',')
        .filter(|pair| !pair.trim().is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                CoreError::validation(format!("expected key=value, got '{}'", pair.trim()))
            })?;
            let key = key.trim();
            if key.is_empty() {
                return Err(CoreError::validation(format!(
                    "missing variable name in '{}'",
                    pair.trim()
                )));
            }
            Ok((key.to_string(), value.trim().to_string()))
        })
        .collect()
}

/// The text produced by [`PromptTemplate::assemble`]
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledPrompt {
    pub text: String,
    /// Replacements made per variable, in template order
    pub replacements: Vec<(String, usize)>,
}

enum Segment<'a> {
    Literal(&'a str),
    Placeholder(&'a str),
}

/// Split on `{identifier}`; braces around anything else stay literal
fn segments(template: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) if is_identifier(&after[..close]) => {
                if open > 0 {
                    out.push(Segment::Literal(&rest[..open]));
                }
                out.push(Segment::Placeholder(&after[..close]));
                rest = &after[close + 1..];
            }
            _ => {
                out.push(Segment::Literal(&rest[..=open]));
                rest = after;
            }
        }
    }
    if !rest.is_empty() {
        out.push(Segment::Literal(rest));
    }
    out
}

fn is_identifier(s: &str) -> bool {
    s.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
        && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl PromptTemplate {
    pub fn new(
        name: impl Into<String>,
        template: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            template: template.into(),
            variables: Vec::new(),
            model: model.into(),
            system_instruction: None,
        }
    }

    #[must_use]
    pub fn with_variables(mut self, bindings: Bindings) -> Self {
        self.variables.push(bindings);
        self
    }

    #[must_use]
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    /// Distinct placeholder names, in first-appearance order
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for segment in segments(&self.template) {
            if let Segment::Placeholder(name) = segment
                && !names.contains(&name)
            {
                names.push(name);
            }
        }
        names
    }

    /// Check the template and every variable set without assembling
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::validation("prompt name must not be empty"));
        }
        if self.template.trim().is_empty() {
            return Err(CoreError::validation("prompt template must not be empty"));
        }
        if self.model.trim().is_empty() || self.model.contains('/') {
            return Err(CoreError::validation(format!(
                "model must be a bare model id, got '{}'",
                self.model
            )));
        }
        for bindings in &self.variables {
            self.assemble_quiet(bindings)?;
        }
        Ok(())
    }

    /// Replace every `{name}` with its bound value
    ///
    /// A placeholder without a binding is an error; bindings the template
    /// does not use are ignored.
    pub fn assemble(&self, bindings: &Bindings) -> Result<AssembledPrompt> {
        let assembled = self.assemble_quiet(bindings)?;
        if !assembled.replacements.is_empty() {
            let summary = assembled
                .replacements
                .iter()
                .map(|(name, count)| format!("{} instances of variable {}", count, name))
                .collect::<Vec<_>>()
                .join(", ");
            info!("Assembled prompt replacing: {}", summary);
        }
        Ok(assembled)
    }

    fn assemble_quiet(&self, bindings: &Bindings) -> Result<AssembledPrompt> {
        let mut text = String::with_capacity(self.template.len());
        let mut replacements: Vec<(String, usize)> = Vec::new();

        for segment in segments(&self.template) {
            match segment {
                Segment::Literal(s) => text.push_str(s),
                Segment::Placeholder(name) => {
                    let value = bindings.get(name).ok_or_else(|| {
                        CoreError::validation(format!(
                            "prompt '{}' has no value for variable '{}'",
                            self.name, name
                        ))
                    })?;
                    text.push_str(value);
                    match replacements.iter_mut().find(|(n, _)| n == name) {
                        Some((_, count)) => *count += 1,
                        None => replacements.push((name.to_string(), 1)),
                    }
                }
            }
        }

        Ok(AssembledPrompt { text, replacements })
    }
}
