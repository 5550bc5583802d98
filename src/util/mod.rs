use crate::models::ContentItem;

const DAY_MS: f64 = 1000.0 * 60.0 * 60.0 * 24.0;

pub(crate) fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Relative label for a timestamp, or `None` once it is more than a week away
/// in either direction (callers then show a locale date).
pub(crate) fn relative_date_label(then_ms: f64, now_ms: f64) -> Option<String> {
    if !then_ms.is_finite() || !now_ms.is_finite() {
        return None;
    }

    let diff = now_ms - then_ms;
    let days = (diff.abs() / DAY_MS).ceil() as i64;

    if diff >= 0.0 {
        match days {
            0 | 1 => Some("Today".to_string()),
            2 => Some("Yesterday".to_string()),
            3..=7 => Some(format!("{} days ago", days - 1)),
            _ => None,
        }
    } else {
        match days {
            0 | 1 => Some("Tomorrow".to_string()),
            2..=7 => Some(format!("In {days} days")),
            _ => None,
        }
    }
}

/// Human date for a server timestamp (`2024-05-01T10:00:00Z` or `2024-05-01`).
pub(crate) fn format_date(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }

    let date = js_sys::Date::new(&raw.into());
    let then = date.get_time();
    if then.is_nan() {
        return raw.to_string();
    }

    relative_date_label(then, now_ms()).unwrap_or_else(|| {
        date.to_locale_date_string("default", &wasm_bindgen::JsValue::UNDEFINED)
            .into()
    })
}

/// Client-side narrowing of the item grid. Case-insensitive match on title,
/// content and tags; a blank query keeps everything.
pub(crate) fn filter_items(items: &[ContentItem], query: &str) -> Vec<ContentItem> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return items.to_vec();
    }

    let hit = |field: Option<&str>| {
        field
            .map(|s| s.to_lowercase().contains(&needle))
            .unwrap_or(false)
    };

    items
        .iter()
        .filter(|item| {
            hit(Some(&item.title)) || hit(item.content.as_deref()) || hit(item.tags.as_deref())
        })
        .cloned()
        .collect()
}

/// Only schemes that cannot execute script are rendered as anchors.
pub(crate) fn is_safe_href(url: &str) -> bool {
    let lower = url.trim().to_ascii_lowercase();
    ["http://", "https://", "mailto:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContentType;

    const NOW: f64 = 1_700_000_000_000.0;

    fn item(id: i64, title: &str, content: Option<&str>, tags: Option<&str>) -> ContentItem {
        ContentItem {
            id,
            title: title.to_string(),
            content_type: ContentType::Note,
            content: content.map(str::to_string),
            created_at: None,
            updated_at: None,
            is_starred: false,
            category: None,
            priority: None,
            due_date: None,
            is_completed: false,
            url: None,
            language: None,
            file: None,
            tags: tags.map(str::to_string),
        }
    }

    #[test]
    fn test_relative_date_label_past() {
        assert_eq!(relative_date_label(NOW, NOW).as_deref(), Some("Today"));
        assert_eq!(relative_date_label(NOW - 3600_000.0, NOW).as_deref(), Some("Today"));
        assert_eq!(
            relative_date_label(NOW - DAY_MS - 1.0, NOW).as_deref(),
            Some("Yesterday")
        );
        assert_eq!(
            relative_date_label(NOW - 4.5 * DAY_MS, NOW).as_deref(),
            Some("4 days ago")
        );
        assert_eq!(relative_date_label(NOW - 30.0 * DAY_MS, NOW), None);
    }

    #[test]
    fn test_relative_date_label_future() {
        assert_eq!(
            relative_date_label(NOW + 3600_000.0, NOW).as_deref(),
            Some("Tomorrow")
        );
        assert_eq!(
            relative_date_label(NOW + 2.5 * DAY_MS, NOW).as_deref(),
            Some("In 3 days")
        );
        assert_eq!(relative_date_label(NOW + 9.0 * DAY_MS, NOW), None);
    }

    #[test]
    fn test_relative_date_label_rejects_nan() {
        assert_eq!(relative_date_label(f64::NAN, NOW), None);
    }

    #[test]
    fn test_filter_items_matches_title_content_tags() {
        let items = vec![
            item(1, "Quarterly report", None, None),
            item(2, "Shopping", Some("buy REPORT paper"), None),
            item(3, "Ideas", None, Some("work,report")),
            item(4, "Unrelated", Some("nothing here"), Some("misc")),
        ];

        let ids: Vec<i64> = filter_items(&items, "  Report ").iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        assert_eq!(filter_items(&items, "").len(), 4);
        assert!(filter_items(&items, "zzz").is_empty());
    }

    #[test]
    fn test_is_safe_href() {
        assert!(is_safe_href("https://example.com"));
        assert!(is_safe_href("HTTP://EXAMPLE.COM"));
        assert!(is_safe_href("mailto:a@b.c"));
        assert!(!is_safe_href("javascript:alert(1)"));
        assert!(!is_safe_href(" data:text/html,<script>"));
    }
}
