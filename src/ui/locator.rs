//! Role-based element selection over a page snapshot.
//!
//! Mirrors how the site is described to a screen reader: an ARIA role,
//! optionally narrowed by accessible name, heading level and contained text.
//! A locator without `nth` is strict and refuses to pick between several
//! matches.

use std::fmt;

use crate::error::{QaError, Result};
use crate::ports::browser::ElementInfo;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameMatch {
    /// Whole accessible name, whitespace-normalised, case-sensitive.
    Exact(String),
    /// Case-insensitive substring.
    Contains(String),
    /// Case-insensitive substring of any alternative.
    AnyOf(Vec<String>),
}

impl NameMatch {
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Exact(expected) => normalize(name) == normalize(expected),
            Self::Contains(needle) => contains_ci(name, needle),
            Self::AnyOf(needles) => needles.iter().any(|n| contains_ci(name, n)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nth {
    First,
    Index(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    role: String,
    name: Option<NameMatch>,
    level: Option<u8>,
    has_text: Option<String>,
    nth: Option<Nth>,
}

impl Locator {
    pub fn role(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            name: None,
            level: None,
            has_text: None,
            nth: None,
        }
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(NameMatch::Contains(name.into()));
        self
    }

    #[must_use]
    pub fn exact_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(NameMatch::Exact(name.into()));
        self
    }

    #[must_use]
    pub fn name_any_of(mut self, names: &[&str]) -> Self {
        self.name = Some(NameMatch::AnyOf(
            names.iter().map(|n| (*n).to_string()).collect(),
        ));
        self
    }

    #[must_use]
    pub fn level(mut self, level: u8) -> Self {
        self.level = Some(level);
        self
    }

    #[must_use]
    pub fn has_text(mut self, text: impl Into<String>) -> Self {
        self.has_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn first(mut self) -> Self {
        self.nth = Some(Nth::First);
        self
    }

    #[must_use]
    pub fn nth(mut self, index: usize) -> Self {
        self.nth = Some(Nth::Index(index));
        self
    }

    pub fn matches(&self, element: &ElementInfo) -> bool {
        if !element.role.eq_ignore_ascii_case(&self.role) {
            return false;
        }
        if let Some(level) = self.level
            && element.level != Some(level)
        {
            return false;
        }
        if let Some(ref name) = self.name
            && !name.matches(&element.name)
        {
            return false;
        }
        if let Some(ref text) = self.has_text
            && !contains_ci(&element.text, text)
        {
            return false;
        }
        true
    }

    /// Every matching element, ignoring `nth`.
    pub fn select<'a>(&self, elements: &'a [ElementInfo]) -> Vec<&'a ElementInfo> {
        elements.iter().filter(|e| self.matches(e)).collect()
    }

    /// The single element this locator points at, if any.
    pub fn resolve<'a>(&self, elements: &'a [ElementInfo]) -> Result<Option<&'a ElementInfo>> {
        let matches = self.select(elements);
        let picked = match self.nth {
            Some(Nth::First) => matches.first().copied(),
            Some(Nth::Index(i)) => matches.get(i).copied(),
            None if matches.len() > 1 => {
                return Err(QaError::Expectation {
                    reason: format!(
                        "strict mode violation: {} resolved to {} elements",
                        self,
                        matches.len()
                    ),
                });
            }
            None => matches.first().copied(),
        };
        Ok(picked)
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "role={}", self.role)?;
        if let Some(level) = self.level {
            write!(f, "[level={level}]")?;
        }
        match self.name {
            Some(NameMatch::Exact(ref n)) => write!(f, "[name=\"{n}\"]")?,
            Some(NameMatch::Contains(ref n)) => write!(f, "[name~=\"{n}\"]")?,
            Some(NameMatch::AnyOf(ref ns)) => write!(f, "[name~=/{}/i]", ns.join("|"))?,
            None => {}
        }
        if let Some(ref text) = self.has_text {
            write!(f, " >> has-text=\"{text}\"")?;
        }
        match self.nth {
            Some(Nth::First) => write!(f, " >> first"),
            Some(Nth::Index(i)) => write!(f, " >> nth={i}"),
            None => Ok(()),
        }
    }
}

fn normalize(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    normalize(haystack)
        .to_lowercase()
        .contains(&normalize(needle).to_lowercase())
}
