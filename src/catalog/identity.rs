use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Catalog-wide unique slug for an item (e.g., `testimonial-card`).
///
/// Only lowercase ASCII letters, digits, and `-` are accepted, which also
/// keeps ids safe to join onto filesystem paths.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
#[serde(transparent)]
pub struct ItemId(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("ID must be lowercase with hyphens (^[a-z0-9-]+$), got '{0}'")]
pub struct InvalidItemId(pub String);

impl ItemId {
    pub fn parse(raw: &str) -> Result<Self, InvalidItemId> {
        if is_valid_id(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(InvalidItemId(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_valid_id(raw: &str) -> bool {
    !raw.is_empty()
        && raw
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        ItemId::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Error for string values outside one of the closed catalog enums.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// Kind of catalog entry. Each kind lives under its own category directory.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Component,
    Section,
    Template,
}

impl ItemType {
    /// Scan order used by the indexer.
    pub const ALL: [ItemType; 3] = [ItemType::Component, ItemType::Section, ItemType::Template];

    pub fn as_str(self) -> &'static str {
        match self {
            ItemType::Component => "component",
            ItemType::Section => "section",
            ItemType::Template => "template",
        }
    }

    /// Category directory name under the items root.
    pub fn dir_name(self) -> &'static str {
        match self {
            ItemType::Component => "components",
            ItemType::Section => "sections",
            ItemType::Template => "templates",
        }
    }

    pub fn from_dir_name(name: &str) -> Option<Self> {
        ItemType::ALL
            .into_iter()
            .find(|item_type| item_type.dir_name() == name)
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ItemType::ALL
            .into_iter()
            .find(|item_type| item_type.as_str() == value)
            .ok_or_else(|| UnknownVariant {
                kind: "type",
                value: value.to_string(),
                expected: "component, section, template",
            })
    }
}

/// Publication state of an item.
#[derive(
    Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    #[default]
    Draft,
    Ready,
    Deprecated,
}

impl ItemStatus {
    pub const ALL: [ItemStatus; 3] = [ItemStatus::Draft, ItemStatus::Ready, ItemStatus::Deprecated];

    pub fn as_str(self) -> &'static str {
        match self {
            ItemStatus::Draft => "draft",
            ItemStatus::Ready => "ready",
            ItemStatus::Deprecated => "deprecated",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ItemStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| UnknownVariant {
                kind: "status",
                value: value.to_string(),
                expected: "draft, ready, deprecated",
            })
    }
}
