use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Icon used when a project is created without one
pub const DEFAULT_ICON: &str = "fas://cog";

/// Icon schemes accepted in `<scheme>://<identifier>`
const ICON_SCHEMES: &[&str] = &["fa", "fas", "far", "fab", "fal"];

/// Project attribute a validation message is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Id,
    Name,
    Description,
    Icon,
    Directory,
    Template,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Name => "name",
            Field::Description => "description",
            Field::Icon => "icon",
            Field::Directory => "directory",
            Field::Template => "template",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-field validation messages, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for `field`; a field that already failed keeps its first message
    pub fn add(&mut self, field: Field, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn single(field: Field, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// `Ok(())` when nothing failed, otherwise the collected errors
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{field} {message}")?;
            first = false;
        }
        Ok(())
    }
}

pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// `<scheme>://<identifier>` with a known scheme and a `[A-Za-z0-9_-]+` identifier
pub fn is_valid_icon(icon: &str) -> bool {
    let Some((scheme, identifier)) = icon.split_once("://") else {
        return false;
    };
    ICON_SCHEMES.contains(&scheme)
        && !identifier.is_empty()
        && identifier
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// An id doubles as a directory basename, so it must be one plain path component
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && !id.starts_with('.')
        && !id.chars().any(|c| c == '/' || c == '\\' || c.is_control())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_format() {
        assert!(is_valid_icon("fas://arrow-right"));
        assert!(is_valid_icon("fab://github"));
        assert!(is_valid_icon("fa://cog_2"));
        assert!(is_valid_icon(DEFAULT_ICON));

        assert!(!is_valid_icon("invalid_format"));
        assert!(!is_valid_icon("fas://"));
        assert!(!is_valid_icon("png://arrow"));
        assert!(!is_valid_icon("fas://arrow right"));
        assert!(!is_valid_icon("fas://../../etc"));
    }

    #[test]
    fn id_format() {
        assert!(is_valid_id("4f1c2d3e-0000-4000-8000-000000000000"));
        assert!(is_valid_id("my_project"));

        assert!(!is_valid_id(""));
        assert!(!is_valid_id("."));
        assert!(!is_valid_id(".."));
        assert!(!is_valid_id(".hidden"));
        assert!(!is_valid_id("a/b"));
    }

    #[test]
    fn one_message_per_field() {
        let mut errors = FieldErrors::new();
        errors.add(Field::Name, "can't be blank");
        errors.add(Field::Name, "is too short");
        errors.add(Field::Icon, "is invalid");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get(Field::Name), Some("can't be blank"));
        assert_eq!(errors.to_string(), "name can't be blank, icon is invalid");
    }

    #[test]
    fn serializes_as_field_keyed_object() {
        let errors = FieldErrors::single(Field::Template, "does not exist");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, serde_json::json!({ "template": "does not exist" }));
    }
}
