//! Content records served by the content API.
//!
//! # Design
//! Shapes are owned by the backend; these structs accept what it sends
//! (camelCase keys, optional text fields, numeric or string ids) and
//! canonicalise the few fields that arrive in more than one form, so page
//! code never inspects JSON types.

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Backend identifiers are integers on some tables and uuids on others.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentId::Number(n) => write!(f, "{n}"),
            ContentId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfo {
    #[serde(default)]
    pub about_us: Option<String>,
    #[serde(default)]
    pub vision: Option<String>,
    #[serde(default)]
    pub mission: Option<String>,
    #[serde(default)]
    pub values: Option<String>,
    #[serde(default)]
    pub history: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: ContentId,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ContentId,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    /// Gallery images. The backend sends either a JSON array or a string
    /// holding an encoded array.
    #[serde(default, deserialize_with = "deserialize_images")]
    pub images: Vec<String>,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct News {
    pub id: ContentId,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

impl News {
    /// Calendar date of `published_at` (`YYYY-MM-DD`), if it has one.
    pub fn published_date(&self) -> Option<&str> {
        let raw = self.published_at.as_deref()?;
        raw.get(..10).filter(|d| d.as_bytes().get(4) == Some(&b'-'))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: ContentId,
    pub name: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    pub id: ContentId,
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

/// Payload posted to `/contact`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("name is required")]
    MissingName,
    #[error("an email address or phone number is required")]
    MissingContact,
    #[error("message is required")]
    MissingMessage,
}

impl ContactMessage {
    pub fn validate(&self) -> Result<(), ContactError> {
        if is_blank(Some(&self.name)) {
            return Err(ContactError::MissingName);
        }
        if is_blank(self.email.as_deref()) && is_blank(self.phone.as_deref()) {
            return Err(ContactError::MissingContact);
        }
        if is_blank(Some(&self.message)) {
            return Err(ContactError::MissingMessage);
        }
        Ok(())
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// A route identifier for a detail lookup.
///
/// Any character is allowed; request builders percent-encode it as a single
/// path segment. Only values that cannot name a resource are refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slug(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlugError {
    #[error("slug is empty")]
    Empty,
    #[error("slug {0:?} is a dot segment")]
    DotSegment(String),
}

impl Slug {
    pub fn parse(raw: &str) -> Result<Self, SlugError> {
        match raw {
            "" => Err(SlugError::Empty),
            "." | ".." => Err(SlugError::DotSegment(raw.to_string())),
            _ => Ok(Self(raw.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ImagesField {
    List(Vec<String>),
    Encoded(String),
}

fn deserialize_images<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<ImagesField>::deserialize(deserializer)? {
        None => Ok(Vec::new()),
        Some(ImagesField::List(images)) => Ok(images),
        Some(ImagesField::Encoded(raw)) if raw.trim().is_empty() => Ok(Vec::new()),
        Some(ImagesField::Encoded(raw)) => serde_json::from_str::<Option<Vec<String>>>(&raw)
            .map(Option::unwrap_or_default)
            .map_err(|e| D::Error::custom(format!("images is not an encoded list: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project_with(images: serde_json::Value) -> Result<Project, serde_json::Error> {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "title": "Office tower",
            "slug": "office-tower",
            "images": images,
        }))
    }

    #[test]
    fn images_accepts_encoded_string() {
        let project = project_with(serde_json::json!(r#"["a.jpg","b.jpg"]"#)).unwrap();
        assert_eq!(project.images, vec!["a.jpg", "b.jpg"]);
    }

    #[test]
    fn images_accepts_sequence() {
        let project = project_with(serde_json::json!(["a.jpg", "b.jpg"])).unwrap();
        assert_eq!(project.images, vec!["a.jpg", "b.jpg"]);
    }

    #[test]
    fn images_null_or_blank_is_empty() {
        assert!(project_with(serde_json::Value::Null).unwrap().images.is_empty());
        assert!(project_with(serde_json::json!("")).unwrap().images.is_empty());
    }

    #[test]
    fn images_missing_is_empty() {
        let project: Project =
            serde_json::from_str(r#"{"id":"p-1","title":"T","slug":"t"}"#).unwrap();
        assert!(project.images.is_empty());
        assert_eq!(project.id, ContentId::Text("p-1".to_string()));
    }

    #[test]
    fn images_garbage_string_is_rejected() {
        assert!(project_with(serde_json::json!("a.jpg, b.jpg")).is_err());
    }

    #[test]
    fn company_info_reads_camel_case() {
        let info: CompanyInfo =
            serde_json::from_str(r#"{"aboutUs":"We build.","vision":null}"#).unwrap();
        assert_eq!(info.about_us.as_deref(), Some("We build."));
        assert!(info.vision.is_none());
    }

    #[test]
    fn published_date_takes_calendar_part() {
        let news: News = serde_json::from_str(
            r#"{"id":3,"title":"Opening","slug":"opening","publishedAt":"2024-05-01T08:00:00.000Z"}"#,
        )
        .unwrap();
        assert_eq!(news.published_date(), Some("2024-05-01"));
    }

    #[test]
    fn slug_refuses_only_unaddressable_values() {
        assert_eq!(Slug::parse(""), Err(SlugError::Empty));
        assert_eq!(Slug::parse("."), Err(SlugError::DotSegment(".".to_string())));
        assert_eq!(Slug::parse(".."), Err(SlugError::DotSegment("..".to_string())));
    }

    #[test]
    fn slug_keeps_any_other_text() {
        for raw in ["c++-fitout", "o'brien (2024)", "ghost page", "барилга-1", "...", "a/b"] {
            assert_eq!(Slug::parse(raw).unwrap().as_str(), raw);
        }
        assert!(Slug::parse(&"x".repeat(500)).is_ok());
    }

    #[test]
    fn contact_requires_name_channel_and_message() {
        let mut msg = ContactMessage {
            name: "Bold".to_string(),
            email: Some("bold@example.mn".to_string()),
            message: "Hello".to_string(),
            ..Default::default()
        };
        assert!(msg.validate().is_ok());

        msg.email = None;
        assert_eq!(msg.validate(), Err(ContactError::MissingContact));

        msg.phone = Some("99112233".to_string());
        msg.message = "  ".to_string();
        assert_eq!(msg.validate(), Err(ContactError::MissingMessage));
    }

    #[test]
    fn contact_omits_absent_fields() {
        let msg = ContactMessage {
            name: "Bold".to_string(),
            phone: Some("99112233".to_string()),
            message: "Hi".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "Bold", "phone": "99112233", "message": "Hi"})
        );
    }
}
