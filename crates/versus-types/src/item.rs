use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{ExternalId, ItemId};

/// Base URL for cover art served by the content catalog's image CDN.
pub const COVER_IMAGE_BASE: &str = "https://images.igdb.com/igdb/image/upload/t_720p";

macro_rules! tag_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Normalize (trim + lowercase) and wrap a tag. Blank tags are rejected.
            pub fn new(raw: &str) -> Result<Self, String> {
                let normalized = raw.trim().to_lowercase();
                if normalized.is_empty() {
                    return Err(format!("{} cannot be blank", stringify!($name)));
                }
                Ok(Self(normalized))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = String;

            fn try_from(raw: String) -> Result<Self, Self::Error> {
                Self::new(&raw)
            }
        }

        impl From<$name> for String {
            fn from(tag: $name) -> Self {
                tag.0
            }
        }
    };
}

tag_type!(
    /// Coarse taste tag attached to a catalog item (e.g. "story", "power").
    Motivation
);

tag_type!(
    /// Fine-grained taste tag attached to a catalog item (e.g. "discovery").
    Submotivation
);

/// A catalog item ("game") that can be shown in a pairwise choice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    /// Id in the remote catalog; unique across items.
    pub external_id: ExternalId,
    pub name: String,
    pub slug: String,
    pub summary: Option<String>,
    /// Motivation tags, unique, in catalog order.
    pub tags: Vec<Motivation>,
    /// Submotivation tags, unique, in catalog order.
    pub sub_tags: Vec<Submotivation>,
    /// Precomputed related items, most related first. Supplied by the catalog
    /// and kept verbatim, duplicates included.
    pub related_ids: Vec<ExternalId>,
    pub cover_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Collapse duplicate tags, keeping first occurrences.
    ///
    /// `related_ids` is left exactly as supplied: repeated ids weigh more in
    /// the similarity tally.
    pub fn normalized(mut self) -> Self {
        self.tags = unique(self.tags);
        self.sub_tags = unique(self.sub_tags);
        self
    }

    pub fn summary(&self) -> ItemSummary {
        ItemSummary {
            id: self.id,
            external_id: self.external_id,
            name: self.name.clone(),
            cover_url: self.cover_url.clone(),
        }
    }
}

/// Compact item view embedded in history and top-choice listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSummary {
    pub id: ItemId,
    pub external_id: ExternalId,
    pub name: String,
    pub cover_url: Option<String>,
}

/// Item-shaped record returned by the remote content provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub external_id: ExternalId,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub tags: Vec<Motivation>,
    #[serde(default)]
    pub sub_tags: Vec<Submotivation>,
    #[serde(default)]
    pub related_ids: Vec<ExternalId>,
    /// Image id on the catalog CDN; expanded into a cover URL on import.
    #[serde(default)]
    pub cover_image_id: Option<String>,
}

impl CatalogEntry {
    /// Build a new local item from this catalog record.
    pub fn into_item(self) -> Item {
        let now = Utc::now();
        let slug = self
            .slug
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| slugify(&self.name));
        let cover_url = self.cover_image_id.as_deref().map(cover_url);

        Item {
            id: ItemId::new(),
            external_id: self.external_id,
            name: self.name,
            slug,
            summary: self.summary,
            tags: self.tags,
            sub_tags: self.sub_tags,
            related_ids: self.related_ids,
            cover_url,
            created_at: now,
            updated_at: now,
        }
        .normalized()
    }
}

/// Expand a CDN image id into a full cover URL.
pub fn cover_url(image_id: &str) -> String {
    format!("{COVER_IMAGE_BASE}/{image_id}.jpg")
}

/// Generate a URL-safe slug from a display name.
///
/// ```
/// use versus_types::item::slugify;
///
/// assert_eq!(slugify("Super Mario 64"), "super-mario-64");
/// assert_eq!(slugify("The Legend of Zelda: A Link"), "the-legend-of-zelda-a-link");
/// ```
pub fn slugify(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut prev_was_hyphen = true;
    for c in name.to_lowercase().chars() {
        if c.is_alphanumeric() {
            result.push(c);
            prev_was_hyphen = false;
        } else if !prev_was_hyphen {
            result.push('-');
            prev_was_hyphen = true;
        }
    }
    if result.ends_with('-') {
        result.pop();
    }
    result
}

/// Remove duplicates while keeping the first occurrence of each value.
pub fn unique<T: PartialEq>(values: Vec<T>) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(values.len());
    for v in values {
        if !out.contains(&v) {
            out.push(v);
        }
    }
    out
}
