//! YAML header extraction and decoding for Mies.
//!
//! Markdown pages start with a header block delimited by `---` lines:
//!
//! ```text
//! ---
//! title: Hello
//! isIndex: false
//! template: post
//! ---
//! # Body
//! ```
//!
//! [`extract_header_text`] returns the text between the delimiters and
//! [`decode_header`] turns YAML text into a typed record. Decoding ignores the
//! letter case of field names: every mapping key is lowercased before serde
//! sees it, so target records declare their field names in lowercase
//! (`#[serde(rename = "isindex")]`).
//!
//! Config files are decoded with [`decode_header`] directly, since the whole
//! file is YAML.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_yaml::value::TaggedValue;
use serde_yaml::{Mapping, Value};

/// Prefix that marks a header delimiter line.
pub const DELIMITER: &str = "---";

/// Error returned when extracting or decoding a header.
#[derive(Debug, thiserror::Error)]
pub enum HeaderError {
    /// The file does not open with a delimiter, or the block is never closed.
    #[error("Markdown file missing a header block: {}", file.display())]
    Missing { file: PathBuf },

    /// The header text is not valid YAML.
    #[error("Error while parsing YAML header for {}", file.display())]
    Parse {
        file: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The YAML is valid but does not fit the target record.
    #[error("Error recognizing header variables for {}", file.display())]
    Schema {
        file: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl HeaderError {
    /// File the error refers to.
    #[must_use]
    pub fn file(&self) -> &Path {
        match self {
            Self::Missing { file } | Self::Parse { file, .. } | Self::Schema { file, .. } => file,
        }
    }
}

/// Extract the header block from `content` and decode it into `T`.
pub fn extract_header<T: DeserializeOwned>(file: &Path, content: &str) -> Result<T, HeaderError> {
    let text = extract_header_text(file, content)?;
    decode_header(file, &text)
}

/// Return the text between the first two delimiter lines of `content`.
///
/// Whitespace-only lines are skipped entirely, both while looking for the
/// delimiters and in the returned text. The first remaining line must be a
/// delimiter. Each returned line is terminated by `\n`.
pub fn extract_header_text(file: &Path, content: &str) -> Result<String, HeaderError> {
    let mut lines = content
        .split(['\r', '\n'])
        .filter(|line| !line.trim().is_empty());

    if lines.next().is_some_and(is_delimiter) {
        let mut header = String::new();
        for line in lines {
            if is_delimiter(line) {
                return Ok(header);
            }
            header.push_str(line);
            header.push('\n');
        }
    }

    Err(HeaderError::Missing {
        file: file.to_path_buf(),
    })
}

/// Return the part of `content` that follows its header block.
///
/// Uses the same delimiter rules as [`extract_header_text`]. Content without
/// a complete header block is returned unchanged.
#[must_use]
pub fn strip_header(content: &str) -> &str {
    let mut offset = 0;
    let mut opened = false;

    for chunk in content.split_inclusive(['\r', '\n']) {
        offset += chunk.len();
        let line = chunk.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            continue;
        }
        if !is_delimiter(line) {
            if opened {
                continue;
            }
            return content;
        }
        if opened {
            let body = &content[offset..];
            // `\r\n` after the closing delimiter is one line break
            if chunk.ends_with('\r') {
                return body.strip_prefix('\n').unwrap_or(body);
            }
            return body;
        }
        opened = true;
    }

    content
}

/// Decode YAML text into `T`, matching field names case-insensitively.
pub fn decode_header<T: DeserializeOwned>(file: &Path, yaml: &str) -> Result<T, HeaderError> {
    let value: Value = serde_yaml::from_str(yaml).map_err(|source| HeaderError::Parse {
        file: file.to_path_buf(),
        source,
    })?;

    let schema_error = |source| HeaderError::Schema {
        file: file.to_path_buf(),
        source,
    };

    let value = canonicalize_keys(value).map_err(schema_error)?;
    serde_yaml::from_value(value).map_err(schema_error)
}

fn is_delimiter(line: &str) -> bool {
    line.starts_with(DELIMITER)
}

/// Lowercase every string key of every mapping in `value`.
///
/// Keys that collide once lowercased (`Title` and `title`) are rejected.
fn canonicalize_keys(value: Value) -> Result<Value, serde_yaml::Error> {
    match value {
        Value::Mapping(mapping) => {
            let mut canonical = Mapping::with_capacity(mapping.len());
            for (key, value) in mapping {
                let key = match key {
                    Value::String(name) => Value::String(name.to_lowercase()),
                    other => other,
                };
                if canonical.contains_key(&key) {
                    return Err(<serde_yaml::Error as serde::de::Error>::custom(format!(
                        "duplicate field `{}`",
                        display_key(&key)
                    )));
                }
                canonical.insert(key, canonicalize_keys(value)?);
            }
            Ok(Value::Mapping(canonical))
        }
        Value::Sequence(items) => items
            .into_iter()
            .map(canonicalize_keys)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Sequence),
        Value::Tagged(tagged) => {
            let TaggedValue { tag, value } = *tagged;
            Ok(Value::Tagged(Box::new(TaggedValue {
                tag,
                value: canonicalize_keys(value)?,
            })))
        }
        other => Ok(other),
    }
}

fn display_key(key: &Value) -> String {
    match key {
        Value::String(name) => name.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_owned())
            .unwrap_or_default(),
    }
}
