use chrono::{SecondsFormat, Utc};
use serde::{Serialize, Serializer, ser::SerializeMap};

/// Field name to value, in document order. A repeated name keeps its first
/// position and takes the later value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormEntries {
    entries: Vec<(String, String)>,
}

impl FormEntries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl Serialize for FormEntries {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Receives the captured entries of a submit. Nothing in this crate sends
/// them anywhere.
pub trait SubmissionSink {
    fn deliver(&mut self, entries: &FormEntries);
}

pub struct LogSink;

impl SubmissionSink for LogSink {
    fn deliver(&mut self, entries: &FormEntries) {
        if entries.is_empty() {
            log::warn!("[submit] nothing captured");
            return;
        }
        let rendered = serde_json::to_string(entries)
            .unwrap_or_else(|error| format!("<unserializable entries: {error}>"));
        log::info!(
            "[submit] captured {} fields at {}: {rendered}",
            entries.len(),
            Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_document_order() {
        let mut entries = FormEntries::new();
        entries.insert("name", "Ana");
        entries.insert("email", "a@b.com");
        entries.insert("experience", "5");

        let keys: Vec<&str> = entries.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, ["name", "email", "experience"]);
    }

    #[test]
    fn repeated_name_takes_last_value() {
        let mut entries = FormEntries::new();
        entries.insert("name", "Ana");
        entries.insert("email", "a@b.com");
        entries.insert("name", "Eva");

        assert_eq!(entries.len(), 2);
        assert_eq!(entries.get("name"), Some("Eva"));
        assert_eq!(entries.iter().next(), Some(("name", "Eva")));
    }

    #[test]
    fn serializes_as_json_object() {
        let mut entries = FormEntries::new();
        entries.insert("name", "Ana");
        entries.insert("email", "a@b.com");

        assert_eq!(
            serde_json::to_string(&entries).unwrap(),
            r#"{"name":"Ana","email":"a@b.com"}"#
        );
    }
}
