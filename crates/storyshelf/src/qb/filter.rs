//! Filter and ordering clauses in the REST query grammar.

use std::fmt;

/// One serialized `column=operator.value` constraint.
///
/// Clauses are kept in their serialized form and split into a query pair on
/// the first `=` when the request is built, so values may themselves contain
/// `=`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter(String);

impl Filter {
    /// `column=eq.value`
    pub fn eq(column: &str, value: impl fmt::Display) -> Self {
        Self(format!("{column}=eq.{value}"))
    }

    /// `column=ilike.pattern` (case-insensitive, `%` wildcards)
    pub fn ilike(column: &str, pattern: &str) -> Self {
        Self(format!("{column}=ilike.{pattern}"))
    }

    /// `or=(raw)` where `raw` is a comma-separated list of `column.op.value` terms.
    pub fn or(raw: &str) -> Self {
        Self(format!("or=({raw})"))
    }

    /// The clause as written, e.g. `slug=eq.x`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split into `(key, value)` on the first `=`.
    pub fn split(&self) -> (&str, &str) {
        self.0.split_once('=').unwrap_or((self.0.as_str(), ""))
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Build the raw term list for a multi-column `ilike` disjunction.
///
/// `or_ilike(&["title", "content"], "%fox%")` yields
/// `title.ilike.%fox%,content.ilike.%fox%`, ready for [`Filter::or`].
pub fn or_ilike(columns: &[&str], pattern: &str) -> String {
    columns
        .iter()
        .map(|col| format!("{col}.ilike.{pattern}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// The single sort clause of a descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

impl Order {
    pub fn new(column: &str, ascending: bool) -> Self {
        Self {
            column: column.to_string(),
            ascending,
        }
    }

    pub fn asc(column: &str) -> Self {
        Self::new(column, true)
    }

    pub fn desc(column: &str) -> Self {
        Self::new(column, false)
    }

    /// `asc` or `desc`
    pub fn direction(&self) -> &'static str {
        if self.ascending { "asc" } else { "desc" }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.column, self.direction())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eq_clause_grammar() {
        assert_eq!(Filter::eq("slug", "x").as_str(), "slug=eq.x");
        assert_eq!(Filter::eq("published", true).as_str(), "published=eq.true");
        assert_eq!(Filter::eq("likes_count", 3).as_str(), "likes_count=eq.3");
    }

    #[test]
    fn ilike_and_or_clauses() {
        assert_eq!(Filter::ilike("title", "%fox%").as_str(), "title=ilike.%fox%");
        assert_eq!(
            Filter::or("title.ilike.%a%,content.ilike.%a%").as_str(),
            "or=(title.ilike.%a%,content.ilike.%a%)"
        );
    }

    #[test]
    fn split_on_first_equals_only() {
        let f = Filter::eq("note", "a=b");
        assert_eq!(f.split(), ("note", "eq.a=b"));
    }

    #[test]
    fn or_ilike_joins_terms() {
        assert_eq!(
            or_ilike(&["title", "description"], "%x%"),
            "title.ilike.%x%,description.ilike.%x%"
        );
    }

    #[test]
    fn order_display() {
        assert_eq!(Order::asc("story_date").to_string(), "story_date.asc");
        assert_eq!(Order::desc("created_at").to_string(), "created_at.desc");
    }
}
