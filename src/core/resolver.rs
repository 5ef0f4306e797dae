use crate::core::normalize::normalize;
use std::collections::HashSet;
use std::fmt;

/// Which menu entry a crop should activate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuTarget {
    /// Menu item whose normalized text equals this normalized crop name.
    Exact(String),
    /// Shared produce category; matches any item whose normalized text
    /// contains the label.
    CatchAll(String),
}

impl MenuTarget {
    /// `item_text` must already be normalized.
    pub fn matches(&self, item_text: &str) -> bool {
        match self {
            MenuTarget::Exact(name) => item_text == name,
            MenuTarget::CatchAll(label) => item_text.contains(label.as_str()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            MenuTarget::Exact(name) | MenuTarget::CatchAll(name) => name,
        }
    }
}

impl fmt::Display for MenuTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuTarget::Exact(name) => write!(f, "'{}'", name),
            MenuTarget::CatchAll(label) => write!(f, "'{}' (catch-all)", label),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CategoryResolver {
    produce_aliases: HashSet<String>,
    catch_all: String,
}

impl CategoryResolver {
    pub fn new<I, S>(produce_aliases: I, catch_all: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            produce_aliases: produce_aliases
                .into_iter()
                .map(|alias| normalize(alias.as_ref()))
                .collect(),
            catch_all: normalize(catch_all),
        }
    }

    pub fn resolve(&self, crop: &str) -> MenuTarget {
        let normalized = normalize(crop);
        if self.produce_aliases.contains(&normalized) {
            MenuTarget::CatchAll(self.catch_all.clone())
        } else {
            MenuTarget::Exact(normalized)
        }
    }

    pub fn plan<'a>(&self, crops: &'a [String]) -> Vec<(&'a str, MenuTarget)> {
        crops
            .iter()
            .map(|crop| (crop.as_str(), self.resolve(crop)))
            .collect()
    }
}
