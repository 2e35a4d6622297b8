//! Script parsing.
//!
//! A script is plain text where every non-empty line becomes one scene.
//! Lines are trimmed; blank lines are ignored; order is preserved.

use std::fmt;

use scriptreel_common::error::ReelError;
use serde::{Deserialize, Serialize};

/// A trimmed, non-empty line of script text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ScriptLine(String);

impl ScriptLine {
    /// Build a line from raw text. Returns `None` if nothing remains after trimming.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of whitespace-separated words (at least 1).
    pub fn word_count(&self) -> usize {
        self.0.split_whitespace().count().max(1)
    }
}

impl fmt::Display for ScriptLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ScriptLine {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<ScriptLine> for String {
    fn from(line: ScriptLine) -> Self {
        line.0
    }
}

impl TryFrom<String> for ScriptLine {
    type Error = ScriptError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value).ok_or(ScriptError::BlankLine)
    }
}

/// An ordered, non-empty sequence of script lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    lines: Vec<ScriptLine>,
}

impl Script {
    /// Parse script text into lines. Fails when no non-empty line remains.
    pub fn parse(text: &str) -> Result<Self, ScriptError> {
        let lines: Vec<ScriptLine> = text.lines().filter_map(ScriptLine::new).collect();
        if lines.is_empty() {
            return Err(ScriptError::Empty);
        }
        Ok(Self { lines })
    }

    pub fn lines(&self) -> &[ScriptLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScriptLine> {
        self.lines.iter()
    }
}

/// Errors raised while validating script input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error("Script has no non-empty lines.")]
    Empty,

    #[error("Script line is blank after trimming")]
    BlankLine,
}

impl From<ScriptError> for ReelError {
    fn from(err: ScriptError) -> Self {
        ReelError::script(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_and_skips_blank_lines() {
        let script = Script::parse("  Hello  \n\n\t\nWorld\r\n   Goodbye").unwrap();
        let lines: Vec<&str> = script.iter().map(ScriptLine::as_str).collect();
        assert_eq!(lines, vec!["Hello", "World", "Goodbye"]);
    }

    #[test]
    fn test_parse_rejects_whitespace_only_script() {
        assert_eq!(Script::parse(""), Err(ScriptError::Empty));
        assert_eq!(Script::parse("   \n\n \t "), Err(ScriptError::Empty));
    }

    #[test]
    fn test_empty_error_is_validation_failure() {
        let err: ReelError = ScriptError::Empty.into();
        assert!(err.is_validation());
    }

    #[test]
    fn test_word_count_has_floor_of_one() {
        let line = ScriptLine::new("one two  three").unwrap();
        assert_eq!(line.word_count(), 3);
        let line = ScriptLine::new("—").unwrap();
        assert_eq!(line.word_count(), 1);
    }

    #[test]
    fn test_script_line_deserialization_rejects_blank() {
        let ok: ScriptLine = serde_json::from_str("\" padded \"").unwrap();
        assert_eq!(ok.as_str(), "padded");
        assert!(serde_json::from_str::<ScriptLine>("\"   \"").is_err());
    }

    proptest::proptest! {
        #[test]
        fn prop_parsed_lines_are_trimmed_and_ordered(raw in proptest::collection::vec("[ a-z\t]{0,12}", 0..12)) {
            let text = raw.join("\n");
            let expected: Vec<String> = raw
                .iter()
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty())
                .collect();

            match Script::parse(&text) {
                Ok(script) => {
                    let got: Vec<String> = script.iter().map(|l| l.to_string()).collect();
                    proptest::prop_assert_eq!(got, expected);
                }
                Err(err) => {
                    proptest::prop_assert_eq!(err, ScriptError::Empty);
                    proptest::prop_assert!(expected.is_empty());
                }
            }
        }
    }
}
