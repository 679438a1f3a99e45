// Member visibility
//
// Each visibility carries an integer rank, the keyword that spells it in source,
// and the single-character glyph used in diagram labels.

use serde::{Deserialize, Serialize};

use crate::error::PdgError;

/// Visibility levels for class members
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
    Protected,
    /// Package-private: no keyword in source
    Package,
}

impl Visibility {
    pub const ALL: [Visibility; 4] = [
        Visibility::Public,
        Visibility::Private,
        Visibility::Protected,
        Visibility::Package,
    ];

    /// The most restrictive visibility, forced onto enum constructors
    pub const MINIMAL: Visibility = Visibility::Private;

    pub fn rank(self) -> i32 {
        match self {
            Visibility::Public => 0,
            Visibility::Private => 1,
            Visibility::Protected => 2,
            Visibility::Package => 3,
        }
    }

    /// Keyword spelling; package visibility has none
    pub fn keyword(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
            Visibility::Protected => "protected",
            Visibility::Package => "",
        }
    }

    /// Glyph used in UML member labels
    pub fn glyph(self) -> char {
        match self {
            Visibility::Public => '+',
            Visibility::Private => '-',
            Visibility::Protected => '#',
            Visibility::Package => '?',
        }
    }

    /// Map a leading source keyword to a visibility; anything else is package-private
    pub fn from_keyword(word: &str) -> Self {
        match word {
            "public" => Visibility::Public,
            "private" => Visibility::Private,
            "protected" => Visibility::Protected,
            _ => Visibility::Package,
        }
    }
}

impl TryFrom<i32> for Visibility {
    type Error = PdgError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Visibility::ALL
            .into_iter()
            .find(|vis| vis.rank() == code)
            .ok_or(PdgError::InvalidVisibility(code))
    }
}

impl From<Visibility> for i32 {
    fn from(vis: Visibility) -> Self {
        vis.rank()
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.keyword())
    }
}
