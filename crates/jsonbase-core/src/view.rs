//! Request-scoped view specifications: which fields to include and which
//! relationships to traverse.

use indexmap::{IndexMap, IndexSet};
use serde::Deserialize;
use serde_json::Value as Json;

/// A normalized view specification.
///
/// `only` restricts the candidate fields when set. `exclude` always wins.
/// `follow` names relationships to traverse, and `context` holds the nested
/// view specification for each traversed relationship, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct View {
    pub only: Option<IndexSet<String>>,
    pub exclude: IndexSet<String>,
    pub follow: IndexSet<String>,
    pub context: IndexMap<String, Json>,
}

/// A directive value: one name or a list of names. Anything else is
/// ignored.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Names {
    One(String),
    Many(Vec<String>),
    #[allow(dead_code)]
    Other(Json),
}

impl Names {
    /// Parses one directive value. `None` for anything that is not a name or
    /// a list of names.
    fn parse(src: &Json) -> Option<IndexSet<String>> {
        match Names::deserialize(src).ok()? {
            Names::One(name) => Some(IndexSet::from([name])),
            Names::Many(names) => Some(names.into_iter().collect()),
            Names::Other(_) => None,
        }
    }
}

impl View {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a view specification.
    ///
    /// Recognizes `only`, `exclude` and `follow` (or their `_`-prefixed
    /// spellings), each either a single name or a list of names. Every other
    /// key is kept in `context`. Both spellings of a directive merge. Never
    /// fails: a malformed directive is skipped on its own, and non-object
    /// input places no restriction.
    pub fn parse(src: &Json) -> View {
        let Json::Object(entries) = src else {
            return View::default();
        };

        let mut view = View::default();

        for (key, value) in entries {
            match key.as_str() {
                "only" | "_only" => {
                    if let Some(names) = Names::parse(value) {
                        view.only.get_or_insert_with(IndexSet::new).extend(names);
                    }
                }
                "exclude" | "_exclude" => {
                    view.exclude.extend(Names::parse(value).unwrap_or_default());
                }
                "follow" | "_follow" => {
                    view.follow.extend(Names::parse(value).unwrap_or_default());
                }
                _ => {
                    view.context.insert(key.clone(), value.clone());
                }
            }
        }

        view
    }

    pub fn only<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.only = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn follow<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.follow.extend(names.into_iter().map(Into::into));
        self
    }

    /// Sets the nested view specification for one relationship.
    pub fn context(mut self, name: impl Into<String>, nested: Json) -> Self {
        self.context.insert(name.into(), nested);
        self
    }

    /// True if the relationship was opted into through `only`, `follow` or a
    /// `context` entry.
    pub fn opts_in(&self, name: &str) -> bool {
        self.only.as_ref().is_some_and(|only| only.contains(name))
            || self.follow.contains(name)
            || self.context.contains_key(name)
    }

    /// True if the relationship should be traversed and inlined, rather than
    /// referenced.
    pub fn follows(&self, name: &str) -> bool {
        self.follow.contains(name) || self.context.contains_key(name)
    }

    /// Applies the default-closed relationship policy.
    ///
    /// Every relationship in `relationships` that is not already excluded and
    /// was not opted into is added to `exclude`. Names that do not belong to
    /// the schema are left alone, whichever list they appear in. Resolving an
    /// already resolved view changes nothing.
    pub fn resolve<'a>(&self, relationships: impl IntoIterator<Item = &'a str>) -> View {
        let mut resolved = self.clone();

        for name in relationships {
            if !resolved.exclude.contains(name) && !self.opts_in(name) {
                resolved.exclude.insert(name.to_string());
            }
        }

        resolved
    }

    /// The only/exclude gate for one field.
    ///
    /// Followed and contexted names are candidates even when `only` is set.
    pub fn includes(&self, name: &str) -> bool {
        if self.exclude.contains(name) {
            return false;
        }

        match &self.only {
            Some(only) => only.contains(name) || self.follows(name),
            None => true,
        }
    }

    /// The view specification for a traversed relationship, parsed from
    /// `context[name]`. Missing entries yield an unrestricted view.
    pub fn nested(&self, name: &str) -> View {
        self.context.get(name).map(View::parse).unwrap_or_default()
    }
}

impl From<&Json> for View {
    fn from(src: &Json) -> Self {
        View::parse(src)
    }
}
