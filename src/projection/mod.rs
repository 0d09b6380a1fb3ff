//! Filter and sort projection over a fetched member snapshot.
//!
//! [`project`] is a pure function of its inputs: it never mutates the source
//! collection and identical inputs always produce a value-equal output.

mod table;

pub use table::*;

use std::cmp::Ordering;

use crate::models::{Member, SortDirection, SortKey, ViewState};

/// Derive the displayed ordering of `records` under `view`.
pub fn project(records: &[Member], view: &ViewState) -> Vec<Member> {
    let mut projected: Vec<Member> = records
        .iter()
        .filter(|member| !view.show_only_deleted || member.is_marked_deleted())
        .cloned()
        .collect();

    // `sort_by` is stable, so ties keep their input order in both directions.
    projected.sort_by(|a, b| {
        let ordering = compare_by(view.sort_key, a, b);
        match view.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });

    projected
}

/// Ascending comparator for a single sort key.
pub fn compare_by(key: SortKey, a: &Member, b: &Member) -> Ordering {
    match key {
        SortKey::Name => collate(&a.name, &b.name),
        SortKey::RealName => collate(
            a.effective_real_name().unwrap_or_default(),
            b.effective_real_name().unwrap_or_default(),
        ),
        SortKey::Email => collate(
            a.effective_email().unwrap_or_default(),
            b.effective_email().unwrap_or_default(),
        ),
        SortKey::IsAdmin => a.is_admin().cmp(&b.is_admin()),
        SortKey::IsBot => a.is_bot().cmp(&b.is_bot()),
        SortKey::Updated => a.updated_at().cmp(&b.updated_at()),
        SortKey::Deleted => a.deleted_at().cmp(&b.deleted_at()),
    }
}

/// Pinned string collation: case-insensitive over the Unicode lowercase
/// expansion, ties broken by raw code point order.
pub fn collate(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: &str, name: &str, updated: Option<i64>) -> Member {
        Member {
            updated,
            ..Member::new(id, name)
        }
    }

    fn ids(members: &[Member]) -> Vec<&str> {
        members.iter().map(|m| m.id.as_str()).collect()
    }

    fn view(sort_key: SortKey, direction: SortDirection, show_only_deleted: bool) -> ViewState {
        ViewState {
            sort_key,
            direction,
            show_only_deleted,
        }
    }

    fn bob_and_alice() -> Vec<Member> {
        vec![
            member("1", "Bob", Some(100)),
            member("2", "Alice", Some(200)),
        ]
    }

    #[test]
    fn test_sort_by_name_ascending() {
        let out = project(
            &bob_and_alice(),
            &view(SortKey::Name, SortDirection::Ascending, false),
        );
        assert_eq!(ids(&out), vec!["2", "1"]);
    }

    #[test]
    fn test_sort_by_updated_descending() {
        let out = project(
            &bob_and_alice(),
            &view(SortKey::Updated, SortDirection::Descending, false),
        );
        assert_eq!(ids(&out), vec!["2", "1"]);
    }

    #[test]
    fn test_unfiltered_keeps_every_record() {
        let records = vec![
            member("a", "zed", None),
            Member {
                is_deleted: Some(true),
                ..Member::new("b", "amy")
            },
            Member {
                deleted: Some(1690000000),
                ..Member::new("c", "kim")
            },
        ];
        let out = project(&records, &ViewState::default());

        assert_eq!(out.len(), records.len());
        let mut got = ids(&out);
        got.sort_unstable();
        assert_eq!(got, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_show_only_deleted_checks_both_markers() {
        let records = vec![
            member("live", "a", None),
            Member {
                is_deleted: Some(true),
                ..Member::new("flag", "b")
            },
            Member {
                deleted: Some(1690000000),
                ..Member::new("stamp", "c")
            },
            Member {
                deleted: Some(0),
                is_deleted: Some(false),
                ..Member::new("zero", "d")
            },
        ];
        let out = project(
            &records,
            &view(SortKey::Name, SortDirection::Ascending, true),
        );
        assert_eq!(ids(&out), vec!["flag", "stamp"]);
    }

    #[test]
    fn test_filter_does_not_touch_source() {
        let records = bob_and_alice();
        let before = records.clone();
        let _ = project(&records, &view(SortKey::Name, SortDirection::Descending, true));
        assert_eq!(records, before);
    }

    #[test]
    fn test_projection_is_idempotent() {
        let records = vec![
            member("1", "carol", Some(5)),
            member("2", "Bob", Some(5)),
            member("3", "alice", None),
            member("4", "bob", Some(1)),
        ];
        for key in SortKey::ALL {
            for direction in [SortDirection::Ascending, SortDirection::Descending] {
                let v = view(key, direction, false);
                let once = project(&records, &v);
                let twice = project(&once, &v);
                assert_eq!(once, twice, "key {:?} direction {:?}", key, direction);
            }
        }
    }

    #[test]
    fn test_descending_is_reverse_for_tie_free_data() {
        let records = vec![
            member("1", "delta", Some(40)),
            member("2", "alpha", Some(10)),
            member("3", "charlie", Some(30)),
            member("4", "bravo", Some(20)),
        ];
        for key in [SortKey::Name, SortKey::Updated] {
            let mut asc = project(&records, &view(key, SortDirection::Ascending, false));
            asc.reverse();
            let desc = project(&records, &view(key, SortDirection::Descending, false));
            assert_eq!(ids(&asc), ids(&desc));
        }
    }

    #[test]
    fn test_ties_keep_input_order_in_both_directions() {
        let records = vec![
            Member {
                is_admin: Some(true),
                ..Member::new("a1", "x")
            },
            Member::new("u1", "y"),
            Member {
                is_admin: Some(true),
                ..Member::new("a2", "z")
            },
            Member {
                is_admin: Some(false),
                ..Member::new("u2", "w")
            },
        ];

        let asc = project(&records, &view(SortKey::IsAdmin, SortDirection::Ascending, false));
        assert_eq!(ids(&asc), vec!["u1", "u2", "a1", "a2"]);

        let desc = project(&records, &view(SortKey::IsAdmin, SortDirection::Descending, false));
        assert_eq!(ids(&desc), vec!["a1", "a2", "u1", "u2"]);
    }

    #[test]
    fn test_missing_values_use_defaults() {
        let records = vec![
            member("stamped", "a", Some(50)),
            member("never", "b", None),
            Member {
                profile: Some(crate::models::MemberProfile {
                    email: Some("a@example.com".to_string()),
                    ..Default::default()
                }),
                ..Member::new("mail", "c")
            },
        ];

        let by_updated = project(&records, &view(SortKey::Updated, SortDirection::Ascending, false));
        assert_eq!(ids(&by_updated), vec!["never", "mail", "stamped"]);

        let by_email = project(&records, &view(SortKey::Email, SortDirection::Ascending, false));
        assert_eq!(ids(&by_email), vec!["stamped", "never", "mail"]);
    }

    #[test]
    fn test_real_name_sort_uses_profile_precedence() {
        let records = vec![
            Member {
                real_name: Some("Aaron".to_string()),
                profile: Some(crate::models::MemberProfile {
                    real_name: Some("Zoe".to_string()),
                    ..Default::default()
                }),
                ..Member::new("1", "n1")
            },
            Member {
                real_name: Some("Mia".to_string()),
                ..Member::new("2", "n2")
            },
        ];
        let out = project(&records, &view(SortKey::RealName, SortDirection::Ascending, false));
        assert_eq!(ids(&out), vec!["2", "1"]);
    }

    #[test]
    fn test_sort_by_deleted_treats_missing_as_zero() {
        let records = vec![
            Member {
                deleted: Some(300),
                ..Member::new("late", "a")
            },
            Member::new("never", "b"),
            Member {
                deleted: Some(100),
                ..Member::new("early", "c")
            },
        ];

        let asc = project(&records, &view(SortKey::Deleted, SortDirection::Ascending, false));
        assert_eq!(ids(&asc), vec!["never", "early", "late"]);

        let desc = project(&records, &view(SortKey::Deleted, SortDirection::Descending, false));
        assert_eq!(ids(&desc), vec!["late", "early", "never"]);
    }

    #[test]
    fn test_sort_by_is_bot_puts_humans_first() {
        let records = vec![
            Member {
                is_bot: Some(true),
                ..Member::new("bot", "a")
            },
            Member::new("human", "b"),
            Member {
                is_bot: Some(false),
                ..Member::new("person", "c")
            },
        ];

        let asc = project(&records, &view(SortKey::IsBot, SortDirection::Ascending, false));
        assert_eq!(ids(&asc), vec!["human", "person", "bot"]);

        let desc = project(&records, &view(SortKey::IsBot, SortDirection::Descending, false));
        assert_eq!(ids(&desc), vec!["bot", "human", "person"]);
    }

    #[test]
    fn test_string_keys_descending() {
        let with_profile = |id: &str, real_name: Option<&str>, email: Option<&str>| Member {
            profile: Some(crate::models::MemberProfile {
                real_name: real_name.map(str::to_string),
                email: email.map(str::to_string),
                ..Default::default()
            }),
            ..Member::new(id, id)
        };
        let records = vec![
            with_profile("1", Some("bravo"), Some("b@example.com")),
            with_profile("2", None, None),
            with_profile("3", Some("Charlie"), Some("c@example.com")),
            with_profile("4", Some("alpha"), Some("a@example.com")),
        ];

        let by_real_name =
            project(&records, &view(SortKey::RealName, SortDirection::Descending, false));
        assert_eq!(ids(&by_real_name), vec!["3", "1", "4", "2"]);

        let by_email = project(&records, &view(SortKey::Email, SortDirection::Descending, false));
        assert_eq!(ids(&by_email), vec!["3", "1", "4", "2"]);
    }

    #[test]
    fn test_collation_is_case_insensitive_first() {
        assert_eq!(collate("alice", "Bob"), Ordering::Less);
        assert_eq!(collate("Émile", "émile"), Ordering::Less);
        assert_eq!(collate("", "a"), Ordering::Less);
        assert_eq!(collate("same", "same"), Ordering::Equal);
    }
}
