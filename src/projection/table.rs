//! Display rows for the member table.

use chrono::DateTime;
use serde::Serialize;

use super::project;
use crate::models::{Member, SortKey, ViewState};

const PLACEHOLDER: &str = "-";
const AVATAR_FALLBACK_BASE: &str = "https://picsum.photos/72/72?random=";

/// One rendered table row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRow {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub real_name: String,
    pub email: String,
    pub title: String,
    pub admin: &'static str,
    pub bot: &'static str,
    pub updated: String,
}

impl MemberRow {
    pub fn from_member(member: &Member) -> Self {
        Self {
            id: member.id.clone(),
            name: member.name.clone(),
            avatar: member
                .avatar_url()
                .map(str::to_string)
                .unwrap_or_else(|| format!("{}{}", AVATAR_FALLBACK_BASE, member.id)),
            real_name: or_placeholder(member.effective_real_name()),
            email: or_placeholder(member.effective_email()),
            title: or_placeholder(member.effective_title()),
            admin: yes_no(member.is_admin()),
            bot: yes_no(member.is_bot()),
            updated: format_updated(member.updated_at()),
        }
    }
}

/// Header state for one sortable column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSort {
    pub key: SortKey,
    pub indicator: &'static str,
}

/// Everything the table renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    pub view: ViewState,
    pub rows: Vec<MemberRow>,
    /// Rows after filtering.
    pub shown: usize,
    /// Records in the snapshot before filtering.
    pub total: usize,
    pub columns: Vec<ColumnSort>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<&'static str>,
}

/// Project `records` and render the result as table rows.
pub fn build_table(records: &[Member], view: &ViewState) -> TableView {
    let rows: Vec<MemberRow> = project(records, view)
        .iter()
        .map(MemberRow::from_member)
        .collect();

    let empty_message = rows.is_empty().then_some(if view.show_only_deleted {
        "No deleted users found"
    } else {
        "No users found"
    });

    TableView {
        view: *view,
        shown: rows.len(),
        total: records.len(),
        rows,
        columns: SortKey::ALL
            .into_iter()
            .map(|key| ColumnSort {
                key,
                indicator: view.sort_indicator(key),
            })
            .collect(),
        empty_message,
    }
}

fn or_placeholder(value: Option<&str>) -> String {
    value.unwrap_or(PLACEHOLDER).to_string()
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// UTC calendar date, or "Never" for a zero timestamp.
fn format_updated(secs: i64) -> String {
    if secs == 0 {
        return "Never".to_string();
    }
    DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "Never".to_string())
}
