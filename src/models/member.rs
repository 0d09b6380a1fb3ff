//! Workspace member model matching the upstream `users.list` payload.

use serde::{Deserialize, Deserializer, Serialize};

/// Nested profile block. Fields here take precedence over top-level duplicates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub real_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_72: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// A single workspace user's directory entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub real_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<MemberProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_bot: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_deleted: Option<bool>,
    /// Epoch seconds. Independent of `is_deleted`.
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub deleted: Option<i64>,
    /// Epoch seconds of the last profile change; absent means never updated.
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tz: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tz_label: Option<String>,
}

impl Member {
    /// Minimal record with only identity fields set.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            real_name: None,
            display_name: None,
            profile: None,
            is_admin: None,
            is_bot: None,
            is_deleted: None,
            deleted: None,
            updated: None,
            tz: None,
            tz_label: None,
        }
    }

    fn profile_field(&self, pick: fn(&MemberProfile) -> Option<&String>) -> Option<&str> {
        self.profile
            .as_ref()
            .and_then(pick)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Real name resolved profile first, then top level.
    pub fn effective_real_name(&self) -> Option<&str> {
        self.profile_field(|p| p.real_name.as_ref()).or_else(|| {
            self.real_name
                .as_deref()
                .filter(|s| !s.is_empty())
        })
    }

    /// Email lives only in the profile block.
    pub fn effective_email(&self) -> Option<&str> {
        self.profile_field(|p| p.email.as_ref())
    }

    pub fn effective_title(&self) -> Option<&str> {
        self.profile_field(|p| p.title.as_ref())
    }

    pub fn avatar_url(&self) -> Option<&str> {
        self.profile_field(|p| p.image_72.as_ref())
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin.unwrap_or(false)
    }

    pub fn is_bot(&self) -> bool {
        self.is_bot.unwrap_or(false)
    }

    /// Hard-deleted accounts, dropped by the directory client.
    pub fn is_hard_deleted(&self) -> bool {
        self.is_deleted.unwrap_or(false)
    }

    /// Either deletion marker counts for the "show only deleted" filter.
    pub fn is_marked_deleted(&self) -> bool {
        self.is_hard_deleted() || self.deleted_at() != 0
    }

    pub fn deleted_at(&self) -> i64 {
        self.deleted.unwrap_or(0)
    }

    pub fn updated_at(&self) -> i64 {
        self.updated.unwrap_or(0)
    }
}

/// Envelope returned by the upstream `users.list` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryEnvelope {
    pub ok: bool,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Int(i64),
    Float(f64),
    Flag(bool),
}

/// Fractions round away from zero so a non-zero value never decodes as 0.
fn round_away_from_zero(secs: f64) -> i64 {
    (secs.signum() * secs.abs().ceil()) as i64
}

/// Accepts integer, float, boolean or null timestamps.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawTimestamp>::deserialize(deserializer)?;
    Ok(raw.map(|value| match value {
        RawTimestamp::Int(secs) => secs,
        RawTimestamp::Float(secs) => round_away_from_zero(secs),
        RawTimestamp::Flag(true) => 1,
        RawTimestamp::Flag(false) => 0,
    }))
}
