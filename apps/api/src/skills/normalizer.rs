//! Skill Normalizer — display form plus a case-folded comparison key.

use serde::{Serialize, Serializer};

/// A single skill as extracted from a document.
///
/// `display` is the trimmed source text, kept for reporting.
/// `key` is `display` lower-cased and is what matching compares.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Skill {
    display: String,
    key: String,
}

impl Skill {
    /// Returns `None` when `raw` is empty after trimming.
    pub fn new(raw: &str) -> Option<Self> {
        let display = raw.trim();
        if display.is_empty() {
            return None;
        }
        Some(Self {
            display: display.to_string(),
            key: display.to_lowercase(),
        })
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Serialize for Skill {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.display)
    }
}

/// Canonicalizes a raw skill string. Pure and idempotent.
pub fn normalize(raw: &str) -> Option<Skill> {
    Skill::new(raw)
}

/// Ordered skills, insertion order = extraction order. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SkillList(Vec<Skill>);

impl SkillList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizes every raw string, dropping the ones that are blank.
    pub fn from_raw<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        raw.into_iter().filter_map(|s| normalize(s.as_ref())).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Skill> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn displays(&self) -> Vec<&str> {
        self.0.iter().map(Skill::display).collect()
    }
}

impl FromIterator<Skill> for SkillList {
    fn from_iter<T: IntoIterator<Item = Skill>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a SkillList {
    type Item = &'a Skill;
    type IntoIter = std::slice::Iter<'a, Skill>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Title used as the roadmap key and prompt subject: trimmed, every `.`
/// removed, first letter of each alphabetic run upper-cased and the rest
/// lower-cased ("node.js" → "Nodejs", "SQL" → "Sql", "3d modeling" →
/// "3D Modeling").
pub fn canonical_title(raw: &str) -> String {
    let mut title = String::with_capacity(raw.len());
    let mut in_word = false;
    for c in raw.trim().chars().filter(|c| *c != '.') {
        if c.is_alphabetic() {
            if in_word {
                title.extend(c.to_lowercase());
            } else {
                title.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            title.push(c);
            in_word = false;
        }
    }
    title
}
