//! Static content for the home and guidance screens

use serde::Serialize;

/// A deity shown on the home screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Deity {
    pub id: &'static str,
    pub name: &'static str,
    pub subtitle: &'static str,
}

pub const DEITIES: &[Deity] = &[
    Deity {
        id: "d1",
        name: "Shiva",
        subtitle: "The Destroyer",
    },
    Deity {
        id: "d2",
        name: "Ganesha",
        subtitle: "Remover of Obstacles",
    },
    Deity {
        id: "d3",
        name: "Lakshmi",
        subtitle: "Goddess of Wealth",
    },
    Deity {
        id: "d4",
        name: "Saraswati",
        subtitle: "Goddess of Knowledge",
    },
    Deity {
        id: "d5",
        name: "Hanuman",
        subtitle: "Devotion & Strength",
    },
];

/// Starter questions offered on an empty guidance screen
pub const SUGGESTIONS: &[&str] = &[
    "How to handle anger?",
    "How to focus in life?",
    "Advice for failure",
    "Detachment meaning",
];

/// Case-insensitive substring match on name or subtitle, catalog order kept.
/// A blank query returns everything.
pub fn search(query: &str) -> Vec<Deity> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return DEITIES.to_vec();
    }
    DEITIES
        .iter()
        .filter(|d| {
            d.name.to_lowercase().contains(&needle) || d.subtitle.to_lowercase().contains(&needle)
        })
        .copied()
        .collect()
}

/// Featured card: first entry of the filtered list
pub fn featured(results: &[Deity]) -> Option<&Deity> {
    results.first()
}
