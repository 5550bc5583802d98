use crate::api::CreateItemRequest;
use crate::models::{Category, ContentType, Priority};

/// Which type-specific block of the add-item form is shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ExtraFields {
    None,
    Task,
    Link,
    Code,
}

pub(crate) fn extra_fields(content_type: ContentType) -> ExtraFields {
    match content_type {
        ContentType::Task => ExtraFields::Task,
        ContentType::Link => ExtraFields::Link,
        ContentType::Code => ExtraFields::Code,
        ContentType::Note | ContentType::Document => ExtraFields::None,
    }
}

/// Raw values of the add-item form as typed.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct ItemDraft {
    pub content_type: ContentType,
    pub title: String,
    pub content: String,
    pub category: Category,
    pub priority: Priority,
    pub due_date: String,
    pub url: String,
    pub language: String,
    pub tags: String,
    pub is_starred: bool,
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

impl ItemDraft {
    /// Serialize only what the selected type shows; hidden inputs keep their
    /// values while the user flips types but are never sent.
    pub fn to_request(&self) -> CreateItemRequest {
        let extra = extra_fields(self.content_type);

        CreateItemRequest {
            title: self.title.trim().to_string(),
            content_type: self.content_type,
            category: self.category,
            is_starred: self.is_starred,
            content: non_empty(&self.content),
            priority: (extra == ExtraFields::Task).then_some(self.priority),
            due_date: (extra == ExtraFields::Task)
                .then(|| non_empty(&self.due_date))
                .flatten(),
            url: (extra == ExtraFields::Link)
                .then(|| non_empty(&self.url))
                .flatten(),
            language: (extra == ExtraFields::Code)
                .then(|| non_empty(&self.language))
                .flatten(),
            tags: non_empty(&self.tags),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(content_type: ContentType) -> ItemDraft {
        ItemDraft {
            content_type,
            title: "  Title  ".to_string(),
            content: "body".to_string(),
            category: Category::Work,
            priority: Priority::High,
            due_date: "2024-06-01".to_string(),
            url: "https://example.com".to_string(),
            language: "rust".to_string(),
            tags: " ".to_string(),
            is_starred: true,
        }
    }

    #[test]
    fn test_task_sends_priority_and_due_date_only() {
        let req = filled(ContentType::Task).to_request();
        assert_eq!(req.title, "Title");
        assert_eq!(req.priority, Some(Priority::High));
        assert_eq!(req.due_date.as_deref(), Some("2024-06-01"));
        assert!(req.url.is_none());
        assert!(req.language.is_none());
        assert!(req.tags.is_none());
        assert!(req.is_starred);
    }

    #[test]
    fn test_link_and_code_send_their_own_field() {
        let link = filled(ContentType::Link).to_request();
        assert_eq!(link.url.as_deref(), Some("https://example.com"));
        assert!(link.priority.is_none());

        let code = filled(ContentType::Code).to_request();
        assert_eq!(code.language.as_deref(), Some("rust"));
        assert!(code.url.is_none());
    }

    #[test]
    fn test_note_drops_hidden_fields() {
        let note = filled(ContentType::Note).to_request();
        assert!(note.priority.is_none());
        assert!(note.due_date.is_none());
        assert!(note.url.is_none());
        assert!(note.language.is_none());
        assert_eq!(note.content.as_deref(), Some("body"));
    }

    #[test]
    fn test_empty_task_due_date_is_omitted() {
        let mut draft = filled(ContentType::Task);
        draft.due_date = String::new();
        assert!(draft.to_request().due_date.is_none());
    }
}
