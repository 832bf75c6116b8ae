//! The font catalog served to the preview client.
//!
//! The catalog is seeded once at startup into an immutable snapshot and
//! shared behind an `Arc`. Nothing mutates it afterwards, so readers need no
//! locking.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize, Serializer};

/// Broad style grouping shown as a badge on each card.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontCategory {
    #[serde(rename = "Sans-serif")]
    SansSerif,
    #[serde(rename = "Serif")]
    Serif,
    #[serde(rename = "Monospace")]
    Monospace,
    #[serde(rename = "Display")]
    Display,
}

impl FontCategory {
    pub const ALL: [FontCategory; 4] = [
        FontCategory::SansSerif,
        FontCategory::Serif,
        FontCategory::Monospace,
        FontCategory::Display,
    ];

    /// Display label, identical to the serialized form.
    pub fn label(self) -> &'static str {
        match self {
            FontCategory::SansSerif => "Sans-serif",
            FontCategory::Serif => "Serif",
            FontCategory::Monospace => "Monospace",
            FontCategory::Display => "Display",
        }
    }
}

impl fmt::Display for FontCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FontCategory {
    type Err = String;

    /// Accepts the labels case-insensitively plus the client's short aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sans-serif" | "sans" | "sansserif" => Ok(FontCategory::SansSerif),
            "serif" => Ok(FontCategory::Serif),
            "monospace" | "mono" => Ok(FontCategory::Monospace),
            "display" => Ok(FontCategory::Display),
            other => Err(format!(
                "unknown font category '{other}' (expected sans-serif, serif, mono, or display)"
            )),
        }
    }
}

/// One catalog entry.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FontRecord {
    pub id: u32,
    pub name: String,
    /// CSS `font-family` value the client loads.
    pub family: String,
    pub category: FontCategory,
}

const SEED: &[(&str, FontCategory)] = &[
    ("Inter", FontCategory::SansSerif),
    ("Roboto", FontCategory::SansSerif),
    ("Open Sans", FontCategory::SansSerif),
    ("Montserrat", FontCategory::SansSerif),
    ("DM Sans", FontCategory::SansSerif),
    ("Plus Jakarta Sans", FontCategory::SansSerif),
    ("Outfit", FontCategory::SansSerif),
    ("IBM Plex Sans", FontCategory::SansSerif),
    ("Geist", FontCategory::SansSerif),
    ("Playfair Display", FontCategory::Serif),
    ("Lora", FontCategory::Serif),
    ("Merriweather", FontCategory::Serif),
    ("Libre Baskerville", FontCategory::Serif),
    ("Source Serif 4", FontCategory::Serif),
    ("Fira Code", FontCategory::Monospace),
    ("Roboto Mono", FontCategory::Monospace),
    ("JetBrains Mono", FontCategory::Monospace),
    ("Space Mono", FontCategory::Monospace),
    ("Source Code Pro", FontCategory::Monospace),
    ("IBM Plex Mono", FontCategory::Monospace),
    ("Geist Mono", FontCategory::Monospace),
    ("Architects Daughter", FontCategory::Display),
    ("Oxanium", FontCategory::Display),
    ("Space Grotesk", FontCategory::Display),
];

/// Client-side style filter: optional category plus a name search.
#[derive(Debug, Clone, Default)]
pub struct FontQuery {
    /// `None` matches every category.
    pub category: Option<FontCategory>,
    /// Case-insensitive substring of the font name. Empty matches all.
    pub search: String,
}

impl FontQuery {
    /// Build a query from the client's raw filter values, where `"all"`
    /// (or an empty string) means no category filter.
    pub fn parse(category: &str, search: impl Into<String>) -> Result<Self, String> {
        let category = match category.trim() {
            "" => None,
            c if c.eq_ignore_ascii_case("all") => None,
            c => Some(c.parse()?),
        };
        Ok(Self {
            category,
            search: search.into(),
        })
    }

    pub fn matches(&self, font: &FontRecord) -> bool {
        let category_ok = self.category.is_none_or(|c| c == font.category);
        category_ok
            && font
                .name
                .to_lowercase()
                .contains(&self.search.to_lowercase())
    }
}

/// Immutable snapshot of the font catalog.
#[derive(Debug, Clone)]
pub struct FontCatalog {
    fonts: Arc<[FontRecord]>,
}

impl FontCatalog {
    /// Build the catalog from the built-in seed list. Ids start at 1 and
    /// follow seed order.
    pub fn seeded() -> Self {
        let fonts: Vec<FontRecord> = SEED
            .iter()
            .zip(1u32..)
            .map(|(&(name, category), id)| FontRecord {
                id,
                name: name.to_string(),
                family: name.to_string(),
                category,
            })
            .collect();
        Self::from_records(fonts)
    }

    /// Wrap an existing record list.
    pub fn from_records(fonts: Vec<FontRecord>) -> Self {
        Self {
            fonts: fonts.into(),
        }
    }

    /// Every record, in seed order.
    pub fn fonts(&self) -> &[FontRecord] {
        &self.fonts
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&FontRecord> {
        self.fonts.iter().find(|f| f.id == id)
    }

    /// Records matching `query`, in catalog order.
    pub fn query<'a>(&'a self, query: &'a FontQuery) -> impl Iterator<Item = &'a FontRecord> {
        self.fonts.iter().filter(move |f| query.matches(f))
    }

    /// Number of records per category, in [`FontCategory::ALL`] order.
    pub fn category_counts(&self) -> Vec<(FontCategory, usize)> {
        FontCategory::ALL
            .iter()
            .map(|&c| (c, self.fonts.iter().filter(|f| f.category == c).count()))
            .collect()
    }
}

impl Default for FontCatalog {
    fn default() -> Self {
        Self::seeded()
    }
}

/// Serializes as the bare record array, straight from the shared snapshot.
impl Serialize for FontCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.fonts.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_serializes_as_record_array() {
        let catalog = FontCatalog::seeded();
        let json = serde_json::to_value(&catalog).unwrap();
        let records = json.as_array().unwrap();
        assert_eq!(records.len(), 24);
        assert_eq!(records[23]["name"], "Space Grotesk");
        assert_eq!(records[23]["category"], "Display");
        assert_eq!(json, serde_json::to_value(catalog.fonts()).unwrap());
    }

    #[test]
    fn clones_share_one_snapshot() {
        let catalog = FontCatalog::seeded();
        let copy = catalog.clone();
        assert!(std::ptr::eq(catalog.fonts(), copy.fonts()));
    }

    #[test]
    fn seeded_catalog_has_sequential_ids() {
        let catalog = FontCatalog::seeded();
        assert_eq!(catalog.len(), 24);
        for (i, font) in catalog.fonts().iter().enumerate() {
            assert_eq!(font.id as usize, i + 1);
            assert_eq!(font.name, font.family);
        }
        assert_eq!(catalog.fonts()[0].name, "Inter");
        assert_eq!(catalog.fonts()[23].name, "Space Grotesk");
    }

    #[test]
    fn category_counts_match_seed() {
        let counts = FontCatalog::seeded().category_counts();
        assert_eq!(
            counts,
            vec![
                (FontCategory::SansSerif, 9),
                (FontCategory::Serif, 5),
                (FontCategory::Monospace, 7),
                (FontCategory::Display, 3),
            ]
        );
    }

    #[test]
    fn get_by_id() {
        let catalog = FontCatalog::seeded();
        assert_eq!(catalog.get(15).map(|f| f.name.as_str()), Some("Fira Code"));
        assert!(catalog.get(0).is_none());
        assert!(catalog.get(25).is_none());
    }

    #[test]
    fn record_serializes_with_category_label() {
        let catalog = FontCatalog::seeded();
        let json = serde_json::to_value(&catalog.fonts()[0]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "name": "Inter",
                "family": "Inter",
                "category": "Sans-serif",
            })
        );
    }

    #[test]
    fn category_parses_aliases() {
        assert_eq!("mono".parse(), Ok(FontCategory::Monospace));
        assert_eq!("Monospace".parse(), Ok(FontCategory::Monospace));
        assert_eq!("SANS-SERIF".parse(), Ok(FontCategory::SansSerif));
        assert_eq!("display".parse(), Ok(FontCategory::Display));
        assert!("cursive".parse::<FontCategory>().is_err());
    }

    #[test]
    fn query_filters_by_category_and_search() {
        let catalog = FontCatalog::seeded();

        let mono = FontQuery::parse("mono", "").unwrap();
        assert_eq!(catalog.query(&mono).count(), 7);

        let plex = FontQuery::parse("all", "plex").unwrap();
        let names: Vec<&str> = catalog.query(&plex).map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["IBM Plex Sans", "IBM Plex Mono"]);

        let plex_mono = FontQuery::parse("mono", "PLEX").unwrap();
        let names: Vec<&str> = catalog
            .query(&plex_mono)
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["IBM Plex Mono"]);
    }

    #[test]
    fn empty_query_matches_everything() {
        let catalog = FontCatalog::seeded();
        let all = FontQuery::default();
        assert_eq!(catalog.query(&all).count(), catalog.len());
    }

    #[test]
    fn unknown_category_rejected() {
        assert!(FontQuery::parse("fantasy", "").is_err());
    }
}
