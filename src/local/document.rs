// ABOUTME: Document - splits an agent or skill document into a header map and a body.
// ABOUTME: The header is a "key: value" block fenced by "---" delimiters at the top.

use std::collections::HashMap;

const DELIMITER: &str = "---";

/// A parsed document: header fields plus the body text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    header: HashMap<String, String>,
    body: String,
}

impl Document {
    /// Parse document text.
    ///
    /// The text must start with `---`; the next `---` closes the header. When
    /// either delimiter is missing the whole text is the body and the header
    /// is empty.
    pub fn parse(text: &str) -> Self {
        let Some(rest) = text.strip_prefix(DELIMITER) else {
            return Self::body_only(text);
        };
        let Some(end) = rest.find(DELIMITER) else {
            return Self::body_only(text);
        };

        Self {
            header: parse_header(rest[..end].trim()),
            body: rest[end + DELIMITER.len()..].trim().to_string(),
        }
    }

    fn body_only(text: &str) -> Self {
        Self {
            header: HashMap::new(),
            body: text.to_string(),
        }
    }

    /// A header value, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.header.get(key).map(String::as_str)
    }

    /// A comma-separated header value as an ordered list.
    ///
    /// Returns `None` when the key is absent or the list has no entries.
    pub fn list(&self, key: &str) -> Option<Vec<String>> {
        self.get(key).map(split_list).filter(|items| !items.is_empty())
    }

    pub fn header(&self) -> &HashMap<String, String> {
        &self.header
    }

    /// Text after the header, trimmed.
    pub fn body(&self) -> &str {
        &self.body
    }
}

fn parse_header(section: &str) -> HashMap<String, String> {
    section
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let (key, value) = line.split_once(':')?;
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            Some((key.to_string(), unquote(value.trim()).to_string()))
        })
        .collect()
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Split a comma-separated value, trimming entries and dropping empty ones.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
