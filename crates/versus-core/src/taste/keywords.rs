//! Theme to keyword expansion used to source new candidate items.
//!
//! The scorer only builds the query; running it against the content provider
//! is up to the caller.

use versus_types::item::Submotivation;
use versus_types::taste::{AffinityReport, ContentQuery};

/// Default number of themes a content query is built from.
pub const DEFAULT_THEMES: usize = 3;

/// Search synonyms for each submotivation theme.
pub const THEME_KEYWORDS: &[(&str, &[&str])] = &[
    ("discovery", &["discovery", "exploration", "tinker", "experiment"]),
    (
        "design",
        &["world building", "customization", "character creation", "design", "art"],
    ),
    ("challenge", &["challenge", "challenging", "difficult", "tough"]),
    (
        "competition",
        &["competition", "competitive", "tournament", "esports", "competing"],
    ),
    (
        "destruction",
        &["destruction", "chaos", "mayhem", "explosions", "explosives"],
    ),
    ("strategy", &["strategy", "planning", "decision-making", "tactical"]),
    (
        "story",
        &["adventure", "fable", "storyline", "plot twist", "narrative"],
    ),
    ("fantasy", &["fantasy", "immersion", "sandbox", "open world"]),
    (
        "completion",
        &["completion", "achievement", "collecting", "fulfillment"],
    ),
    (
        "excitement",
        &["excitement", "exciting", "fast paced", "adrenaline", "energetic"],
    ),
    (
        "community",
        &["community", "social", "socializing", "collaboration", "multiplayer"],
    ),
    (
        "power",
        &["leveling up", "grinding", "arpg - action rpg", "hack and slash", "magic"],
    ),
];

/// Synonyms for `theme`, if it is a known theme.
pub fn keywords_for(theme: &Submotivation) -> Option<&'static [&'static str]> {
    THEME_KEYWORDS
        .iter()
        .find(|(name, _)| *name == theme.as_str())
        .map(|(_, keywords)| *keywords)
}

/// Build a keyword query from the strongest known themes in `report`.
///
/// Themes are taken by percentage descending (ties keep report order),
/// skipping tags without a keyword mapping, up to `max_themes`. Keywords are
/// the union of those themes' synonyms, deduplicated in theme order.
pub fn build_content_query(report: &AffinityReport<Submotivation>, max_themes: usize) -> ContentQuery {
    let mut ranked: Vec<_> = report.percentages.iter().collect();
    ranked.sort_by(|a, b| b.percentage.cmp(&a.percentage));

    let mut query = ContentQuery::default();
    for affinity in ranked {
        if query.themes.len() >= max_themes {
            break;
        }
        if query.themes.contains(&affinity.tag) {
            continue;
        }
        let Some(keywords) = keywords_for(&affinity.tag) else {
            continue;
        };
        query.themes.push(affinity.tag.clone());
        for keyword in keywords {
            if !query.keywords.iter().any(|k| k == keyword) {
                query.keywords.push((*keyword).to_string());
            }
        }
    }

    query
}
