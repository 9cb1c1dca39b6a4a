use super::{FieldSetter, Rules, camel_case, map};
use crate::mapper::rule::{Row, Rule};
use crate::{Record, record};
use serde_json::{Value, json};

// ═══════════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════════

/// Seconds since the Unix epoch for a `YYYY-MM-DD` date at midnight UTC.
fn to_epoch(date: &str) -> i64 {
    let mut parts = date.splitn(3, '-').map(|p| p.parse::<i64>().unwrap());
    let (y, m, d) = (
        parts.next().unwrap(),
        parts.next().unwrap(),
        parts.next().unwrap(),
    );
    let y = if m <= 2 { y - 1 } else { y };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let doy = (153 * (if m > 2 { m - 3 } else { m + 9 }) + 2) / 5 + d - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    (era * 146097 + doe - 719468) * 86400
}

#[derive(Default)]
struct Article {
    id: Option<i64>,
    right_level: Option<String>,
    description: Option<String>,
    content: Option<String>,
    level: Option<String>,
    date: Option<i64>,
}

impl FieldSetter<Value> for Article {
    fn set_field(&mut self, field: &str, value: Value) -> bool {
        match field {
            "id" => self.id = value.as_i64(),
            "rightLevel" => self.right_level = value.as_str().map(str::to_string),
            "description" => self.description = value.as_str().map(str::to_string),
            "content" => self.content = value.as_str().map(str::to_string),
            "level" => self.level = value.as_str().map(str::to_string),
            "date" => self.date = value.as_i64(),
            _ => return false,
        }
        true
    }
}

/// Destination that records every setter call, in order.
#[derive(Default)]
struct CallLog {
    calls: Vec<(String, String)>,
}

impl FieldSetter<String> for CallLog {
    fn set_field(&mut self, field: &str, value: String) -> bool {
        self.calls.push((field.to_string(), value));
        true
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Full mapping scenario
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_map_article() {
    let source: Record<Value> = record! {
        "id" => json!(1),
        // no setter on the destination for userId
        "userId" => json!(12),
        // underscore names fall back to camel case
        "right_level" => json!("bar"),
        "title" => json!("foo"),
        "content" => json!("bar"),
        "rating" => json!("a-rating"),
        "date" => json!("2014-09-06"),
    };

    let rules = Rules::new()
        .rename("title", "description")
        .rule("content", Rule::new("content"))
        .rule("rating", Rule::constant("level", json!("no-rating")))
        .rule(
            "date",
            Rule::transform("date", |value: &Value, _row: &Row<Value>| {
                let date = value.as_str().expect("date is a string");
                assert_eq!(date, "2014-09-06");
                json!(to_epoch(date))
            }),
        );

    let mut article = Article::default();
    map(&source, &mut article, &rules);

    assert_eq!(article.id, Some(1));
    assert_eq!(article.right_level.as_deref(), Some("bar"));
    assert_eq!(article.description.as_deref(), Some("foo"));
    assert_eq!(article.content.as_deref(), Some("bar"));
    // the constant overrides the source value "a-rating"
    assert_eq!(article.level.as_deref(), Some("no-rating"));
    assert_eq!(article.date, Some(1_409_961_600));
}

// ═══════════════════════════════════════════════════════════════════════
// Resolution details
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_unlisted_keys_pass_through_by_convention() {
    let source: Record<String> = record! {
        "name" => "Alice".to_string(),
        "home_town" => "Berlin".to_string(),
    };

    let mut log = CallLog::default();
    map(&source, &mut log, &Rules::new());

    assert_eq!(
        log.calls,
        vec![
            ("name".to_string(), "Alice".to_string()),
            ("homeTown".to_string(), "Berlin".to_string()),
        ]
    );
}

#[test]
fn test_rule_lookup_uses_original_key() {
    // The camel-cased form is only the setter-name fallback; the rule table
    // is consulted under the key as stored.
    let source: Record<String> = record! {
        "right_level" => "admin".to_string(),
    };

    let rules = Rules::new().rename("right_level", "clearance");
    let mut log = CallLog::default();
    map(&source, &mut log, &rules);

    assert_eq!(
        log.calls,
        vec![("clearance".to_string(), "admin".to_string())]
    );
}

#[test]
fn test_call_order_follows_insertion_order() {
    let source: Record<String> = record! {
        "c" => "3".to_string(),
        "a" => "1".to_string(),
        "b" => "2".to_string(),
    };

    let mut log = CallLog::default();
    map(&source, &mut log, &Rules::new());

    let fields: Vec<_> = log.calls.iter().map(|(f, _)| f.as_str()).collect();
    assert_eq!(fields, vec!["c", "a", "b"]);
}

#[test]
fn test_null_entries_are_not_mapped() {
    let mut source: Record<String> = Record::new();
    source.put("name", "Alice".to_string());
    source.put("gap", None);

    let mut log = CallLog::default();
    map(&source, &mut log, &Rules::new());

    assert_eq!(log.calls.len(), 1);
    assert_eq!(log.calls[0].0, "name");
}

#[test]
fn test_missing_setter_is_skipped_silently() {
    let source: Record<Value> = record! {
        "id" => json!(7),
        "unknown_field" => json!("ignored"),
    };

    let mut article = Article::default();
    map(&source, &mut article, &Rules::new());

    assert_eq!(article.id, Some(7));
    assert_eq!(article.description, None);
}

#[test]
fn test_transform_reads_other_row_fields() {
    let source: Record<String> = record! {
        "first" => "Ada".to_string(),
        "last" => "Lovelace".to_string(),
    };

    let rules = Rules::new().rule(
        "first",
        Rule::transform("fullName", |value: &String, row: &Row<String>| {
            format!("{} {}", value, row["last"])
        }),
    );

    let mut log = CallLog::default();
    map(&source, &mut log, &rules);

    assert_eq!(log.calls[0], ("fullName".to_string(), "Ada Lovelace".to_string()));
    assert_eq!(log.calls[1], ("last".to_string(), "Lovelace".to_string()));
}

// ═══════════════════════════════════════════════════════════════════════
// Rule
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_rule_passthrough() {
    let rule: Rule<i64> = Rule::new("target");
    assert_eq!(rule.target(), "target");
    assert_eq!(rule.resolve(&5, &Row::new()), 5);
}

#[test]
fn test_rule_constant_ignores_source_value() {
    let rule = Rule::constant("target", 42);
    assert_eq!(rule.resolve(&5, &Row::new()), 42);
}

#[test]
fn test_rule_transform() {
    let rule = Rule::transform("target", |value: &i64, _row: &Row<i64>| value * 2);
    assert_eq!(rule.resolve(&5, &Row::new()), 10);
}

// ═══════════════════════════════════════════════════════════════════════
// Key normalization
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_camel_case() {
    assert_eq!(camel_case("right_level"), "rightLevel");
    assert_eq!(camel_case("a_b_c"), "aBC");
    assert_eq!(camel_case("already_camel_case"), "alreadyCamelCase");
}

#[test]
fn test_camel_case_leaves_plain_keys_alone() {
    assert_eq!(camel_case("userId"), "userId");
    assert_eq!(camel_case("id"), "id");
}

#[test]
fn test_camel_case_skips_empty_segments() {
    assert_eq!(camel_case("a__b"), "aB");
    assert_eq!(camel_case("_leading"), "leading");
}
