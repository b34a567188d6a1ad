//! The ordered key/value store behind every upload request.

use bytes::Bytes;

use super::multipart::{MultipartBody, MultipartSink};
use super::value::{Entry, FieldValue};

/// Ordered multi-valued form data.
///
/// Keys keep their first-insertion position. Appending to an existing key
/// never moves it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormPayload {
    entries: Vec<(String, Entry)>,
}

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    /// Append a value under `key`.
    ///
    /// A new key gets a single entry; a second append turns it into a list
    /// of `[old, new]`; further appends push.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        let key = key.into();
        let value = value.into();
        match self.position(&key) {
            Some(pos) => self.entries[pos].1.push(value),
            None => self.entries.push((key, Entry::Single(value))),
        }
    }

    /// Append file bytes under `key` with the given file name, typed as
    /// `application/octet-stream`. Use [`FieldValue::typed_file`] for others.
    pub fn append_file(
        &mut self,
        key: impl Into<String>,
        data: impl Into<Bytes>,
        filename: impl Into<String>,
    ) {
        self.append(key, FieldValue::file(data, filename));
    }

    /// Remove a whole key, or one element of a list entry.
    ///
    /// With `index`, only list entries qualify: a single entry, a missing
    /// key or an out-of-range index all return `false`. Emptying a list
    /// leaves an empty list behind.
    pub fn remove(&mut self, key: &str, index: Option<usize>) -> bool {
        let Some(pos) = self.position(key) else {
            return false;
        };

        match index {
            None => {
                self.entries.remove(pos);
                true
            }
            Some(index) => match &mut self.entries[pos].1 {
                Entry::Multiple(values) if index < values.len() => {
                    values.remove(index);
                    true
                }
                _ => false,
            },
        }
    }

    /// Transform every value in place.
    ///
    /// Single entries are replaced by `callback(value, key)` and dropped when
    /// it returns `None`. List entries are transformed as a batch under the
    /// parent key: each element goes through the callback with the list's
    /// key, and elements mapped to `None` are removed from the list.
    pub fn filter<F>(&mut self, mut callback: F)
    where
        F: FnMut(FieldValue, &str) -> Option<FieldValue>,
    {
        let entries = std::mem::take(&mut self.entries);
        for (key, entry) in entries {
            let entry = match entry {
                Entry::Single(value) => match callback(value, &key) {
                    Some(value) => Entry::Single(value),
                    None => continue,
                },
                Entry::Multiple(values) => Entry::Multiple(
                    values
                        .into_iter()
                        .filter_map(|value| callback(value, &key))
                        .collect(),
                ),
            };
            self.entries.push((key, entry));
        }
    }

    /// The entry stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.position(key).map(|pos| &self.entries[pos].1)
    }

    /// The element at `index` of a list entry. Single entries have no
    /// indexed elements.
    pub fn get_element(&self, key: &str, index: usize) -> Option<&FieldValue> {
        match self.get(key)? {
            Entry::Multiple(values) => values.get(index),
            Entry::Single(_) => None,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Replace the whole payload with `data`, appending pair by pair.
    pub fn hydrate<I, K, V>(&mut self, data: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.clear();
        self.extend(data);
    }

    /// Render into ordered multipart parts.
    pub fn render(&self) -> MultipartBody {
        let mut body = MultipartBody::default();
        self.render_into(&mut body);
        body
    }

    /// Drive any multipart builder with the payload's parts, in key order
    /// and then push order.
    pub fn render_into<S: MultipartSink + ?Sized>(&self, sink: &mut S) {
        for (key, entry) in &self.entries {
            for value in entry.values() {
                match value {
                    FieldValue::Text(text) => sink.append_text(key, text),
                    FieldValue::File {
                        data,
                        filename,
                        mime_type,
                    } => sink.append_file(key, data, filename, mime_type),
                }
            }
        }
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }
}

impl<K, V> Extend<(K, V)> for FormPayload
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.append(key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for FormPayload
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut payload = FormPayload::new();
        payload.extend(iter);
        payload
    }
}
