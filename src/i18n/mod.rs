//! Locale model and negotiation
//!
//! Every document in the content store belongs to exactly one of the
//! locales configured for the site. The first configured locale directory
//! that contains a slug is the canonical one when a lookup is not scoped to
//! a locale.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ContentError, Result};

/// A supported locale code such as `en` or `zh`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Locale {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The fixed, ordered set of locales a site supports
#[derive(Debug, Clone)]
pub struct LocaleSet {
    locales: Vec<Locale>,
    default: Locale,
}

impl LocaleSet {
    /// Build the set from configured codes. The default must be one of them.
    pub fn new<S: AsRef<str>>(codes: &[S], default: &str) -> Result<Self> {
        let mut locales: Vec<Locale> = Vec::new();
        for code in codes {
            let code = code.as_ref().trim();
            if code.is_empty() || code.contains(['/', '\\']) {
                return Err(ContentError::Config(format!(
                    "invalid locale code `{}`",
                    code
                )));
            }
            let locale = Locale(code.to_string());
            if !locales.contains(&locale) {
                locales.push(locale);
            }
        }

        let default = locales
            .iter()
            .find(|l| l.as_str() == default)
            .cloned()
            .ok_or_else(|| {
                ContentError::Config(format!(
                    "default locale `{}` is not in the locale list",
                    default
                ))
            })?;

        Ok(Self { locales, default })
    }

    /// Resolve a code to a supported locale
    pub fn parse(&self, code: &str) -> Result<Locale> {
        self.get(code)
            .cloned()
            .ok_or_else(|| ContentError::UnsupportedLocale(code.to_string()))
    }

    pub fn get(&self, code: &str) -> Option<&Locale> {
        self.locales.iter().find(|l| l.as_str() == code)
    }

    pub fn default_locale(&self) -> &Locale {
        &self.default
    }

    /// Locales in their configured order
    pub fn iter(&self) -> impl Iterator<Item = &Locale> {
        self.locales.iter()
    }

    /// Pick the best supported locale for an `Accept-Language` header
    pub fn negotiate(&self, accept_language: &str) -> Locale {
        let mut ranges: Vec<(&str, f32)> = accept_language
            .split(',')
            .filter_map(|part| {
                let mut pieces = part.split(';');
                let tag = pieces.next()?.trim();
                if tag.is_empty() {
                    return None;
                }
                let q = pieces
                    .filter_map(|p| p.trim().strip_prefix("q="))
                    .find_map(|q| q.trim().parse::<f32>().ok())
                    .unwrap_or(1.0);
                Some((tag, q))
            })
            .filter(|(_, q)| *q > 0.0)
            .collect();

        // stable: equal weights keep header order
        ranges.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        for (tag, _) in ranges {
            if tag == "*" {
                return self.default.clone();
            }
            if let Some(locale) = self.match_tag(tag) {
                return locale.clone();
            }
        }

        self.default.clone()
    }

    fn match_tag(&self, tag: &str) -> Option<&Locale> {
        let tag = tag.to_ascii_lowercase();
        if let Some(exact) = self
            .locales
            .iter()
            .find(|l| l.as_str().to_ascii_lowercase() == tag)
        {
            return Some(exact);
        }

        let primary = tag.split('-').next().unwrap_or(&tag);
        self.locales.iter().find(|l| {
            let code = l.as_str().to_ascii_lowercase();
            code == primary || code.split('-').next() == Some(primary)
        })
    }
}
