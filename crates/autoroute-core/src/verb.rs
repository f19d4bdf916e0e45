//! HTTP verb inference from method-name prefixes.
//!
//! Method names are matched against an ordered map of verb → recognized
//! prefixes:
//! - `GetList*`, `GetAll*`, `Search*`, `Query*`, `Fetch*`, `Find*`, `Get*` → GET
//! - `Create*`, `Insert*`, `Save*`, `Post*`, `Add*` → POST
//! - `Update*`, `Edit*`, `Put*` → PUT
//! - `Delete*`, `Remove*` → DELETE
//! - `Patch*` → PATCH
//!
//! Anything else falls back to POST.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConventionError, Result};
use crate::naming::starts_with_ignore_case;

/// HTTP method of a resolved endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpVerb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl HttpVerb {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpVerb::Get => "GET",
            HttpVerb::Post => "POST",
            HttpVerb::Put => "PUT",
            HttpVerb::Patch => "PATCH",
            HttpVerb::Delete => "DELETE",
            HttpVerb::Head => "HEAD",
            HttpVerb::Options => "OPTIONS",
        }
    }

    /// Whether parameter binding is left entirely to the host for this verb.
    ///
    /// GET and HEAD requests carry no body, so the host's query/route
    /// inference already does the right thing.
    pub fn uses_host_binding(&self) -> bool {
        matches!(self, HttpVerb::Get | HttpVerb::Head)
    }

    /// Convert into the framework-agnostic [`http::Method`].
    pub fn to_method(&self) -> http::Method {
        match self {
            HttpVerb::Get => http::Method::GET,
            HttpVerb::Post => http::Method::POST,
            HttpVerb::Put => http::Method::PUT,
            HttpVerb::Patch => http::Method::PATCH,
            HttpVerb::Delete => http::Method::DELETE,
            HttpVerb::Head => http::Method::HEAD,
            HttpVerb::Options => http::Method::OPTIONS,
        }
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpVerb {
    type Err = ConventionError;

    /// Parse from string (case-insensitive)
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpVerb::Get),
            "POST" => Ok(HttpVerb::Post),
            "PUT" => Ok(HttpVerb::Put),
            "PATCH" => Ok(HttpVerb::Patch),
            "DELETE" => Ok(HttpVerb::Delete),
            "HEAD" => Ok(HttpVerb::Head),
            "OPTIONS" => Ok(HttpVerb::Options),
            _ => Err(ConventionError::UnknownVerb {
                verb: s.to_string(),
            }),
        }
    }
}

impl From<HttpVerb> for http::Method {
    fn from(verb: HttpVerb) -> Self {
        verb.to_method()
    }
}

/// Ordered mapping of verb → recognized method-name prefixes.
///
/// Prefixes within one verb are kept sorted by descending length, so the most
/// specific prefix is tried first (`GetList` before `Get`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerbPrefixMap {
    entries: Vec<(HttpVerb, Vec<String>)>,
}

impl Default for VerbPrefixMap {
    fn default() -> Self {
        let mut map = Self::empty();
        map.add_if_absent(
            HttpVerb::Get,
            ["GetList", "GetAll", "Get", "Query", "Search", "Find", "Fetch"],
        );
        map.add_if_absent(
            HttpVerb::Post,
            ["Create", "Save", "Insert", "Add", "Post"],
        );
        map.add_if_absent(HttpVerb::Put, ["Put", "Update", "Edit"]);
        map.add_if_absent(HttpVerb::Delete, ["Delete", "Remove"]);
        map.add_if_absent(HttpVerb::Patch, ["Patch"]);
        map
    }
}

impl VerbPrefixMap {
    /// A map with no verbs. Every method then resolves to POST.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add prefixes for `verb`, skipping any already present (case-insensitive).
    ///
    /// Unknown verbs are appended after the existing ones, keeping the
    /// configured verb order stable. The verb's prefix list is re-sorted by
    /// descending length afterwards.
    pub fn add_if_absent<I, S>(&mut self, verb: HttpVerb, prefixes: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let index = match self.entries.iter().position(|(v, _)| *v == verb) {
            Some(index) => index,
            None => {
                self.entries.push((verb, Vec::new()));
                self.entries.len() - 1
            }
        };

        let list = &mut self.entries[index].1;
        for prefix in prefixes {
            let prefix = prefix.into();
            if !list.iter().any(|p| p.eq_ignore_ascii_case(&prefix)) {
                list.push(prefix);
            }
        }
        // Stable: equal-length prefixes keep insertion order.
        list.sort_by(|a, b| b.len().cmp(&a.len()));
        self
    }

    /// Prefixes registered for `verb`, longest first.
    pub fn prefixes(&self, verb: HttpVerb) -> &[String] {
        self.entries
            .iter()
            .find(|(v, _)| *v == verb)
            .map(|(_, p)| p.as_slice())
            .unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (HttpVerb, &[String])> {
        self.entries.iter().map(|(v, p)| (*v, p.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|(_, p)| p.is_empty())
    }

    /// Find the verb owning the longest prefix of `method_name`.
    ///
    /// Ties between verbs go to the one configured first.
    pub fn match_prefix(&self, method_name: &str) -> Option<(HttpVerb, &str)> {
        let mut best: Option<(HttpVerb, &str)> = None;
        for (verb, prefixes) in &self.entries {
            // Lists are sorted longest-first, so the first hit is this verb's best.
            let Some(prefix) = prefixes
                .iter()
                .find(|p| starts_with_ignore_case(method_name, p))
            else {
                continue;
            };
            if best.is_none_or(|(_, current)| prefix.len() > current.len()) {
                best = Some((*verb, prefix.as_str()));
            }
        }
        best
    }
}

/// Resolve the HTTP verb for a method.
///
/// The first explicit verb wins outright. Otherwise the name is matched against
/// `map`, and unmatched names default to POST.
pub fn resolve_verb(map: &VerbPrefixMap, method_name: &str, explicit: &[HttpVerb]) -> HttpVerb {
    if let Some(verb) = explicit.first() {
        return *verb;
    }
    map.match_prefix(method_name)
        .map(|(verb, _)| verb)
        .unwrap_or(HttpVerb::Post)
}
