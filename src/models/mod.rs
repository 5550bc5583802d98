use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

/// Template views store `""` for an unset choice; treat that, and any value
/// we do not know, as absent instead of failing the whole payload.
fn lenient_choice<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw: Option<String> = Option::deserialize(d)?;
    Ok(raw.and_then(|s| s.trim().to_ascii_lowercase().parse().ok()))
}

/// `null` decodes to the type's default.
fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

#[derive(
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Default,
    Display,
    AsRefStr,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub(crate) enum ContentType {
    #[default]
    Note,
    Task,
    Link,
    Code,
    Document,
}

impl ContentType {
    pub const ALL: [ContentType; 5] = [
        ContentType::Note,
        ContentType::Task,
        ContentType::Link,
        ContentType::Code,
        ContentType::Document,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ContentType::Note => "Note",
            ContentType::Task => "Task",
            ContentType::Link => "Link",
            ContentType::Code => "Code Snippet",
            ContentType::Document => "Document",
        }
    }
}

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default, Display, AsRefStr, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub(crate) enum Category {
    Work,
    #[default]
    Personal,
}

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default, Display, AsRefStr, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub(crate) enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// One record owned by the signed-in user.
///
/// Only `id`, `title` and `content_type` are required; everything else is
/// optional so older rows and partial payloads still decode.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct ContentItem {
    pub id: i64,
    pub title: String,
    pub content_type: ContentType,

    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_starred: bool,

    #[serde(default, deserialize_with = "lenient_choice")]
    pub category: Option<Category>,

    // task
    #[serde(default, deserialize_with = "lenient_choice")]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_completed: bool,

    // link
    #[serde(default)]
    pub url: Option<String>,

    // code
    #[serde(default)]
    pub language: Option<String>,

    // document
    #[serde(default)]
    pub file: Option<String>,

    #[serde(default)]
    pub tags: Option<String>,
}

impl ContentItem {
    /// Last path segment of the uploaded document, if any.
    pub fn file_name(&self) -> Option<&str> {
        let file = self.file.as_deref()?.trim();
        if file.is_empty() {
            return None;
        }
        let file = file.split(['?', '#']).next().unwrap_or(file);
        file.rsplit('/').find(|s| !s.is_empty())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub(crate) struct DashboardStats {
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_items: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub completed_tasks: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub starred_items: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pending_tasks: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recent_items: Vec<ContentItem>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct CurrentUser {
    #[serde(default)]
    pub id: Option<i64>,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}
