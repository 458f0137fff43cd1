//! Front-matter parsing

use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::{Mapping, Value};
use std::collections::HashMap;

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            // "rust, mdx" is as common as a YAML list
            Ok(value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect())
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Search-engine overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Seo {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "string_or_vec", skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

/// Front-matter data from an essay, review or project
#[derive(Debug, Clone, Default, Serialize)]
pub struct FrontMatter {
    pub title: Option<String>,
    #[serde(rename = "createAt", skip_serializing_if = "Option::is_none")]
    pub create_at: Option<String>,
    /// Older files use `date` instead of `createAt`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(rename = "updateAt", skip_serializing_if = "Option::is_none")]
    pub update_at: Option<String>,
    pub cover: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    pub seo: Option<Seo>,
    pub tag: Option<String>,
    /// Discriminator such as `essay` or `review`
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub year: Option<i32>,
    pub unlist: bool,
    pub summary: Option<String>,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> (Self, &str) {
        let content = content.trim_start_matches('\u{feff}').trim_start();

        if content.starts_with("---") {
            return Self::parse_yaml(content);
        }

        (FrontMatter::default(), content)
    }

    fn parse_yaml(content: &str) -> (Self, &str) {
        let rest = &content[3..];
        let rest = rest.trim_start_matches([' ', '\t']);
        let rest = match rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n')) {
            Some(rest) => rest,
            // `----` or `--- text` is not a delimiter line
            None => return (FrontMatter::default(), content),
        };

        let Some((yaml_content, remaining)) = split_closing_delimiter(rest) else {
            return (FrontMatter::default(), content);
        };

        if yaml_content.trim().is_empty() {
            return (FrontMatter::default(), remaining);
        }

        // A thematic break followed by prose is not front-matter
        if !has_yaml_structure(yaml_content) {
            return (FrontMatter::default(), content);
        }

        match serde_yaml::from_str::<Mapping>(yaml_content) {
            Ok(mapping) => (Self::from_mapping(mapping), remaining),
            Err(e) => {
                tracing::warn!("Failed to parse YAML front-matter, treating as content: {}", e);
                (FrontMatter::default(), content)
            }
        }
    }

    /// Pull known keys one by one. A value of the wrong shape drops that
    /// field only; unknown keys land in `extra`.
    fn from_mapping(mut map: Mapping) -> Self {
        let mut fm = FrontMatter {
            title: take(&mut map, "title", scalar_string),
            create_at: take(&mut map, "createAt", scalar_string),
            date: take(&mut map, "date", scalar_string),
            update_at: take(&mut map, "updateAt", scalar_string),
            cover: take(&mut map, "cover", scalar_string),
            keywords: take(&mut map, "keywords", |v| string_or_vec(v).ok())
                .unwrap_or_default(),
            seo: take(&mut map, "seo", |v| serde_yaml::from_value::<Seo>(v).ok()),
            tag: take(&mut map, "tag", scalar_string),
            kind: take(&mut map, "type", scalar_string),
            year: take(&mut map, "year", string_or_int),
            unlist: take(&mut map, "unlist", truthy).unwrap_or(false),
            summary: take(&mut map, "summary", scalar_string),
            extra: HashMap::new(),
        };

        for (key, value) in map {
            if let Value::String(key) = key {
                fm.extra.insert(key, value);
            }
        }
        fm
    }

    /// Raw creation date, whichever key the author used
    pub fn created_raw(&self) -> Option<&str> {
        self.create_at.as_deref().or(self.date.as_deref())
    }

    /// SEO keywords win over plain keywords
    pub fn effective_keywords(&self) -> &[String] {
        match &self.seo {
            Some(seo) if !seo.keywords.is_empty() => &seo.keywords,
            _ => &self.keywords,
        }
    }
}

/// Remove `key` and convert it. Null means absent; a value `convert`
/// rejects is logged and treated as absent.
fn take<T>(map: &mut Mapping, key: &str, convert: impl FnOnce(Value) -> Option<T>) -> Option<T> {
    let value = map.remove(key)?;
    if value.is_null() {
        return None;
    }
    let shown = format!("{:?}", value);
    let converted = convert(value);
    if converted.is_none() {
        tracing::warn!("Ignoring front-matter field `{}` with unexpected value {}", key, shown);
    }
    converted
}

/// Strings, plus numbers and booleans written without quotes
fn scalar_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// `2021`, `"2021"`, or a range such as `2021-2023` (first year wins)
fn string_or_int(value: Value) -> Option<i32> {
    match value {
        Value::Number(n) => n.as_i64().and_then(|y| i32::try_from(y).ok()),
        Value::String(s) => {
            let s = s.trim();
            let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
            s[..end].parse().ok()
        }
        _ => None,
    }
}

/// Booleans, with quoted or numeric flags read the way authors mean them
fn truthy(value: Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(b),
        Value::Number(n) => Some(n.as_f64().map_or(true, |f| f != 0.0)),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "" | "false" | "no" | "off" | "0" => Some(false),
            _ => Some(true),
        },
        _ => None,
    }
}

/// Find the closing `---` line; returns (yaml, body)
fn split_closing_delimiter(rest: &str) -> Option<(&str, &str)> {
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((yaml, body.trim_start_matches(['\n', '\r'])));
        }
        offset += line.len();
    }
    None
}

/// Valid front-matter has at least one `key: value` line whose key is a
/// plain identifier and not a URL scheme.
fn has_yaml_structure(yaml: &str) -> bool {
    yaml.lines().any(|line| {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return false;
        }
        let Some(colon_pos) = trimmed.find(':') else {
            return false;
        };
        let key = &trimmed[..colon_pos];
        let is_valid_key = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            && !matches!(key, "http" | "https" | "ftp");
        if !is_valid_key {
            return false;
        }
        let after = &trimmed[colon_pos + 1..];
        after.is_empty() || after.starts_with(' ')
    })
}
