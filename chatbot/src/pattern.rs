//! Whole-word keyword matching.

use regex::Regex;

/// A keyword or phrase matched as whole words inside normalized text.
///
/// The source text is trimmed and lowercased on construction so that it
/// lines up with [`normalize`](crate::normalize)d input. Matching uses
/// Unicode word boundaries: `cat` matches "my cat sneezes" and "cat!" but
/// not "catastrophe" or "bobcat".
#[derive(Debug, Clone)]
pub struct WordPattern {
    text: String,
    re: Regex,
}

impl WordPattern {
    /// Compile a pattern. Regex metacharacters in `text` are matched literally.
    pub fn new(text: &str) -> Result<Self, regex::Error> {
        let text = text.trim().to_lowercase();
        let re = Regex::new(&format!(r"\b{}\b", regex::escape(&text)))?;
        Ok(Self { text, re })
    }

    /// The normalized pattern text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether the pattern occurs as whole words anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.re.is_match(text)
    }
}

impl PartialEq for WordPattern {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for WordPattern {}
