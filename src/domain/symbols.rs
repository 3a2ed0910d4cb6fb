//! Built-in catalogue of common dream symbols
//!
//! A small static reference users can browse offline. [`filter`] matches a
//! case-insensitive query against title and meaning, optionally narrowed to
//! one [`SymbolCategory`].

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::error::SymbolCategoryError;

/// Highest popularity rating a symbol can carry
pub const MAX_POPULARITY: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolCategory {
    Nature,
    Animals,
    Objects,
}

impl SymbolCategory {
    pub const ALL: [SymbolCategory; 3] = [Self::Nature, Self::Animals, Self::Objects];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Nature => "Nature",
            Self::Animals => "Animals",
            Self::Objects => "Objects",
        }
    }
}

impl fmt::Display for SymbolCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category selection for browsing; `All` disables the category check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(SymbolCategory),
}

impl CategoryFilter {
    pub fn matches(&self, category: SymbolCategory) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = SymbolCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        SymbolCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(input))
            .map(Self::Only)
            .ok_or_else(|| SymbolCategoryError {
                input: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibrarySymbol {
    pub id: &'static str,
    pub glyph: &'static str,
    pub title: &'static str,
    pub category: SymbolCategory,
    pub meaning: &'static str,
    pub popularity: u8,
}

pub static CATALOGUE: &[LibrarySymbol] = &[
    LibrarySymbol {
        id: "1",
        glyph: "🌙",
        title: "Moon",
        category: SymbolCategory::Nature,
        meaning: "Represents intuition, femininity, and the subconscious mind. A full moon suggests completion, while a new moon indicates new beginnings.",
        popularity: 5,
    },
    LibrarySymbol {
        id: "2",
        glyph: "🌊",
        title: "Water",
        category: SymbolCategory::Nature,
        meaning: "Symbolizes emotions, purification, and the flow of life. Clear water represents peace, while turbulent water suggests emotional turmoil.",
        popularity: 5,
    },
    LibrarySymbol {
        id: "3",
        glyph: "🦋",
        title: "Butterfly",
        category: SymbolCategory::Animals,
        meaning: "Represents transformation, rebirth, and personal growth. Often indicates a period of positive change in your life.",
        popularity: 4,
    },
    LibrarySymbol {
        id: "4",
        glyph: "🏠",
        title: "House",
        category: SymbolCategory::Objects,
        meaning: "Symbolizes the self, family, and security. Different rooms may represent different aspects of your personality.",
        popularity: 4,
    },
    LibrarySymbol {
        id: "5",
        glyph: "🕊️",
        title: "Bird",
        category: SymbolCategory::Animals,
        meaning: "Represents freedom, spirituality, and higher perspective. Flying birds suggest liberation from constraints.",
        popularity: 4,
    },
    LibrarySymbol {
        id: "6",
        glyph: "🌸",
        title: "Flowers",
        category: SymbolCategory::Nature,
        meaning: "Symbolize beauty, growth, and fleeting moments. Different flowers have specific meanings related to love and emotions.",
        popularity: 3,
    },
];

/// Symbols whose title or meaning contains `query` (case-insensitive) and
/// whose category passes `category`. An empty query matches everything.
/// Catalogue order is preserved.
pub fn filter(query: &str, category: CategoryFilter) -> Vec<&'static LibrarySymbol> {
    let needle = query.trim().to_lowercase();
    CATALOGUE
        .iter()
        .filter(|s| category.matches(s.category))
        .filter(|s| {
            needle.is_empty()
                || s.title.to_lowercase().contains(&needle)
                || s.meaning.to_lowercase().contains(&needle)
        })
        .collect()
}
