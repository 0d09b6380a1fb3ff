//! View state owned by the presentation layer.
//!
//! Every change produces a new snapshot; the projection is recomputed from
//! whichever snapshot is current.

use serde::{Deserialize, Serialize};

/// Sortable member columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Name,
    RealName,
    Email,
    IsAdmin,
    IsBot,
    Updated,
    Deleted,
}

impl SortKey {
    pub const ALL: [SortKey; 7] = [
        SortKey::Name,
        SortKey::RealName,
        SortKey::Email,
        SortKey::IsAdmin,
        SortKey::IsBot,
        SortKey::Updated,
        SortKey::Deleted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::RealName => "real_name",
            SortKey::Email => "email",
            SortKey::IsAdmin => "is_admin",
            SortKey::IsBot => "is_bot",
            SortKey::Updated => "updated",
            SortKey::Deleted => "deleted",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Immutable snapshot of sort and filter settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub sort_key: SortKey,
    pub direction: SortDirection,
    pub show_only_deleted: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            sort_key: SortKey::Name,
            direction: SortDirection::Ascending,
            show_only_deleted: false,
        }
    }
}

impl ViewState {
    /// Same key flips direction; a new key starts ascending.
    #[must_use]
    pub fn toggle_sort(self, key: SortKey) -> Self {
        if self.sort_key == key {
            Self {
                direction: self.direction.flipped(),
                ..self
            }
        } else {
            Self {
                sort_key: key,
                direction: SortDirection::Ascending,
                ..self
            }
        }
    }

    #[must_use]
    pub fn with_show_only_deleted(self, show_only_deleted: bool) -> Self {
        Self {
            show_only_deleted,
            ..self
        }
    }

    /// Column header marker for `key` under this view.
    pub fn sort_indicator(&self, key: SortKey) -> &'static str {
        if self.sort_key != key {
            return "↕";
        }
        match self.direction {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }
}

/// Request body for changing the deleted-only filter.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFilterRequest {
    pub show_only_deleted: bool,
}
