//! Categories
//!
//! The three fixed triage buckets and a map holding one value per bucket.

use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TriageError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Legitimate,
    Uncategorized,
    Malicious,
}

impl Category {
    /// Display order, left to right
    pub const ALL: [Category; 3] = [Category::Legitimate, Category::Uncategorized, Category::Malicious];

    /// DOM id of the category container and value of `data-auto-move-*` attributes
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Legitimate => "legitimate",
            Category::Uncategorized => "uncategorized",
            Category::Malicious => "malicious",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Category::Legitimate => "Legitimate",
            Category::Uncategorized => "Uncategorized",
            Category::Malicious => "Malicious",
        }
    }

    /// Button glyph used for "move to this category"
    pub fn marker(&self) -> &'static str {
        match self {
            Category::Legitimate => "🟢",
            Category::Uncategorized => "⚪",
            Category::Malicious => "🔴",
        }
    }

    fn slot(self) -> usize {
        match self {
            Category::Legitimate => 0,
            Category::Uncategorized => 1,
            Category::Malicious => 2,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = TriageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "legitimate" => Ok(Category::Legitimate),
            "uncategorized" => Ok(Category::Uncategorized),
            "malicious" => Ok(Category::Malicious),
            other => Err(TriageError::UnknownCategory(other.to_string())),
        }
    }
}

/// Exactly one `T` per category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryMap<T> {
    slots: [T; 3],
}

impl<T> CategoryMap<T> {
    pub fn from_fn(mut f: impl FnMut(Category) -> T) -> Self {
        Self {
            slots: Category::ALL.map(|c| f(c)),
        }
    }

    pub fn try_from_fn<E>(mut f: impl FnMut(Category) -> Result<T, E>) -> Result<Self, E> {
        Ok(Self {
            slots: [
                f(Category::Legitimate)?,
                f(Category::Uncategorized)?,
                f(Category::Malicious)?,
            ],
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &T)> {
        Category::ALL.into_iter().zip(self.slots.iter())
    }

    pub fn map<U>(self, mut f: impl FnMut(Category, T) -> U) -> CategoryMap<U> {
        let [l, u, m] = self.slots;
        CategoryMap {
            slots: [
                f(Category::Legitimate, l),
                f(Category::Uncategorized, u),
                f(Category::Malicious, m),
            ],
        }
    }

    /// Mutable access to two distinct categories at once
    pub fn pair_mut(&mut self, a: Category, b: Category) -> Option<(&mut T, &mut T)> {
        if a == b {
            return None;
        }
        let [l, u, m] = &mut self.slots;
        let mut refs = [Some(l), Some(u), Some(m)];
        let first = refs[a.slot()].take()?;
        let second = refs[b.slot()].take()?;
        Some((first, second))
    }
}

impl<T> Index<Category> for CategoryMap<T> {
    type Output = T;

    fn index(&self, category: Category) -> &T {
        &self.slots[category.slot()]
    }
}

impl<T> IndexMut<Category> for CategoryMap<T> {
    fn index_mut(&mut self, category: Category) -> &mut T {
        &mut self.slots[category.slot()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip_names() {
        for c in Category::ALL {
            assert_eq!(c.as_str().parse::<Category>().unwrap(), c);
        }
        assert_eq!(
            "spam".parse::<Category>(),
            Err(TriageError::UnknownCategory("spam".to_string()))
        );
    }

    #[test]
    fn test_pair_mut_distinct() {
        let mut map = CategoryMap::from_fn(|c| c.as_str().len());
        let (a, b) = map.pair_mut(Category::Malicious, Category::Legitimate).unwrap();
        *a = 1;
        *b = 2;
        assert_eq!(map[Category::Malicious], 1);
        assert_eq!(map[Category::Legitimate], 2);
        assert!(map.pair_mut(Category::Uncategorized, Category::Uncategorized).is_none());
    }
}
