//! Menu record and editable field set
//!
//! [`MenuRecord`] is the raw persisted shape returned by the hosted backend.
//! [`MenuFields`] is the normalized editable field set the draft engine works
//! on; a draft and its server snapshot are both `MenuFields`. [`MenuPayload`]
//! is the full field set submitted on save, with pending assets resolved to
//! URLs.

use super::hours::WeekHours;
use super::service::ServiceTag;
use crate::util::slugify;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;

/// Fallback colors applied when a record has none
pub const DEFAULT_BACKGROUND_COLOR: &str = "#FFFFFF";
pub const DEFAULT_TITLE_COLOR: &str = "#1F2937";
pub const DEFAULT_DETAILS_COLOR: &str = "#6B7280";

/// A selected-but-not-yet-uploaded asset awaiting upload during save
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocalAsset {
    /// Original file name, used for the storage path hint
    pub file_name: String,
    /// Where the picked file lives on this device
    pub path: PathBuf,
}

/// Banner/logo field state.
///
/// Explicit tri-state: a `Pending` value is always a change relative to any
/// server value; there is no filename matching against remote URLs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetField {
    /// No asset (absent, or removed by the owner)
    #[default]
    Empty,
    /// Stable URL already persisted on the server
    Remote { url: String },
    /// Local file picked by the owner, uploaded during save
    Pending { asset: LocalAsset },
}

impl AssetField {
    pub fn from_url(url: Option<String>) -> Self {
        match url {
            Some(url) if !url.is_empty() => Self::Remote { url },
            _ => Self::Empty,
        }
    }

    pub fn pending(file_name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Pending {
            asset: LocalAsset {
                file_name: file_name.into(),
                path: path.into(),
            },
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }

    pub fn as_remote_url(&self) -> Option<&str> {
        match self {
            Self::Remote { url } => Some(url),
            _ => None,
        }
    }
}

/// Key of a tracked editable field
///
/// The canonical ordering of changed-field sets is the sorted order of the
/// string names below.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    BackgroundColor,
    Banner,
    Description,
    DetailsColor,
    Hours,
    Logo,
    Services,
    Slug,
    Title,
    TitleColor,
}

impl FieldKey {
    /// All tracked keys, in canonical (sorted-by-name) order
    pub const ALL: [FieldKey; 10] = [
        FieldKey::BackgroundColor,
        FieldKey::Banner,
        FieldKey::Description,
        FieldKey::DetailsColor,
        FieldKey::Hours,
        FieldKey::Logo,
        FieldKey::Services,
        FieldKey::Slug,
        FieldKey::Title,
        FieldKey::TitleColor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BackgroundColor => "background_color",
            Self::Banner => "banner",
            Self::Description => "description",
            Self::DetailsColor => "details_color",
            Self::Hours => "hours",
            Self::Logo => "logo",
            Self::Services => "services",
            Self::Slug => "slug",
            Self::Title => "title",
            Self::TitleColor => "title_color",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw menu record as persisted by the hosted backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuRecord {
    /// Record id; `None` for an owner who has not saved a menu yet
    pub id: Option<String>,
    /// Owning actor id
    pub owner: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub background_color: Option<String>,
    pub title_color: Option<String>,
    pub details_color: Option<String>,
    pub banner_url: Option<String>,
    pub logo_url: Option<String>,
    pub slug: Option<String>,
    #[serde(default)]
    pub services: Vec<ServiceTag>,
    /// Raw hours value, legacy or current shape (see [`WeekHours::normalize`])
    #[serde(default)]
    pub hours: Value,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

/// Normalized editable field set
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuFields {
    pub title: String,
    pub description: String,
    pub background_color: String,
    pub title_color: String,
    pub details_color: String,
    pub banner: AssetField,
    pub logo: AssetField,
    pub slug: String,
    pub services: Vec<ServiceTag>,
    pub hours: WeekHours,
}

impl Default for MenuFields {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
            title_color: DEFAULT_TITLE_COLOR.to_string(),
            details_color: DEFAULT_DETAILS_COLOR.to_string(),
            banner: AssetField::Empty,
            logo: AssetField::Empty,
            slug: String::new(),
            services: Vec::new(),
            hours: WeekHours::closed(),
        }
    }
}

impl MenuFields {
    /// Map a raw record into the normalized field set.
    ///
    /// Nullable display fields default to fixed fallbacks, a missing slug
    /// defaults to the slugified title, hours normalize to the per-day shape.
    pub fn from_record(record: &MenuRecord) -> Self {
        let title = record.title.clone().unwrap_or_default();
        let slug = match record.slug.as_deref() {
            Some(slug) if !slug.is_empty() => slug.to_string(),
            _ => slugify(&title),
        };
        Self {
            slug,
            description: record.description.clone().unwrap_or_default(),
            background_color: record
                .background_color
                .clone()
                .unwrap_or_else(|| DEFAULT_BACKGROUND_COLOR.to_string()),
            title_color: record
                .title_color
                .clone()
                .unwrap_or_else(|| DEFAULT_TITLE_COLOR.to_string()),
            details_color: record
                .details_color
                .clone()
                .unwrap_or_else(|| DEFAULT_DETAILS_COLOR.to_string()),
            banner: AssetField::from_url(record.banner_url.clone()),
            logo: AssetField::from_url(record.logo_url.clone()),
            services: record.services.clone(),
            hours: WeekHours::normalize(&record.hours),
            title,
        }
    }

    /// Serialize the field set into a key -> JSON value map for diffing
    pub fn to_value_map(&self) -> serde_json::Map<String, Value> {
        let mut map = serde_json::Map::new();
        for key in FieldKey::ALL {
            map.insert(key.as_str().to_string(), self.field_value(key));
        }
        map
    }

    /// JSON value of a single field
    pub fn field_value(&self, key: FieldKey) -> Value {
        let to_value = |v: Result<Value, serde_json::Error>| v.unwrap_or(Value::Null);
        match key {
            FieldKey::Title => Value::String(self.title.clone()),
            FieldKey::Description => Value::String(self.description.clone()),
            FieldKey::BackgroundColor => Value::String(self.background_color.clone()),
            FieldKey::TitleColor => Value::String(self.title_color.clone()),
            FieldKey::DetailsColor => Value::String(self.details_color.clone()),
            FieldKey::Banner => to_value(serde_json::to_value(&self.banner)),
            FieldKey::Logo => to_value(serde_json::to_value(&self.logo)),
            FieldKey::Slug => Value::String(self.slug.clone()),
            FieldKey::Services => to_value(serde_json::to_value(&self.services)),
            FieldKey::Hours => to_value(serde_json::to_value(&self.hours)),
        }
    }

    /// Copy a single field from `other` into `self` (selective revert)
    pub fn copy_field_from(&mut self, other: &Self, key: FieldKey) {
        match key {
            FieldKey::Title => self.title = other.title.clone(),
            FieldKey::Description => self.description = other.description.clone(),
            FieldKey::BackgroundColor => {
                self.background_color = other.background_color.clone()
            }
            FieldKey::TitleColor => self.title_color = other.title_color.clone(),
            FieldKey::DetailsColor => self.details_color = other.details_color.clone(),
            FieldKey::Banner => self.banner = other.banner.clone(),
            FieldKey::Logo => self.logo = other.logo.clone(),
            FieldKey::Slug => self.slug = other.slug.clone(),
            FieldKey::Services => self.services = other.services.clone(),
            FieldKey::Hours => self.hours = other.hours.clone(),
        }
    }
}

/// Full field set submitted on save (create or update)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuPayload {
    pub title: String,
    pub description: String,
    pub background_color: String,
    pub title_color: String,
    pub details_color: String,
    /// Resolved banner URL; `None` persists asset removal
    pub banner_url: Option<String>,
    /// Resolved logo URL; `None` persists asset removal
    pub logo_url: Option<String>,
    pub slug: String,
    pub services: Vec<ServiceTag>,
    pub hours: WeekHours,
    pub updated_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::hours::WeekDay;
    use serde_json::json;

    #[test]
    fn test_field_key_order_is_sorted() {
        let names: Vec<&str> = FieldKey::ALL.iter().map(|k| k.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_from_record_defaults() {
        let record = MenuRecord {
            owner: "owner-1".to_string(),
            title: Some("La Bella Pizza".to_string()),
            ..Default::default()
        };
        let fields = MenuFields::from_record(&record);
        assert_eq!(fields.title, "La Bella Pizza");
        assert_eq!(fields.slug, "la-bella-pizza");
        assert_eq!(fields.background_color, DEFAULT_BACKGROUND_COLOR);
        assert_eq!(fields.banner, AssetField::Empty);
        assert_eq!(fields.hours, WeekHours::closed());
    }

    #[test]
    fn test_from_record_keeps_explicit_values() {
        let record = MenuRecord {
            owner: "owner-1".to_string(),
            title: Some("Cafe".to_string()),
            slug: Some("my-cafe".to_string()),
            background_color: Some("#000000".to_string()),
            banner_url: Some("https://cdn.example/banner.webp".to_string()),
            hours: json!({"MONDAY": "09:00-18:00"}),
            ..Default::default()
        };
        let fields = MenuFields::from_record(&record);
        assert_eq!(fields.slug, "my-cafe");
        assert_eq!(fields.background_color, "#000000");
        assert_eq!(
            fields.banner.as_remote_url(),
            Some("https://cdn.example/banner.webp")
        );
        assert_eq!(fields.hours.get(WeekDay::Monday), Some("09:00-18:00"));
    }

    #[test]
    fn test_copy_field_is_precise() {
        let mut draft = MenuFields {
            title: "B".to_string(),
            description: "changed".to_string(),
            ..Default::default()
        };
        let snapshot = MenuFields {
            title: "A".to_string(),
            ..Default::default()
        };
        draft.copy_field_from(&snapshot, FieldKey::Title);
        assert_eq!(draft.title, "A");
        // other edits untouched
        assert_eq!(draft.description, "changed");
    }

    #[test]
    fn test_asset_field_states() {
        assert_eq!(AssetField::from_url(None), AssetField::Empty);
        assert_eq!(AssetField::from_url(Some(String::new())), AssetField::Empty);
        let remote = AssetField::from_url(Some("https://x/y.png".to_string()));
        assert_eq!(remote.as_remote_url(), Some("https://x/y.png"));
        assert!(!remote.is_pending());
        assert!(AssetField::pending("y.png", "/tmp/y.png").is_pending());
    }

    #[test]
    fn test_asset_field_serde_tagged() {
        let json = serde_json::to_string(&AssetField::Empty).unwrap();
        assert_eq!(json, r#"{"state":"EMPTY"}"#);
        let json =
            serde_json::to_string(&AssetField::from_url(Some("u".to_string()))).unwrap();
        assert!(json.contains("\"state\":\"REMOTE\""));
    }

    #[test]
    fn test_value_map_covers_all_keys() {
        let map = MenuFields::default().to_value_map();
        assert_eq!(map.len(), FieldKey::ALL.len());
        for key in FieldKey::ALL {
            assert!(map.contains_key(key.as_str()), "missing {key}");
        }
    }
}
