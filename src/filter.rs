use crate::ssm_parameters::{last_segment, Result, SsmParameter, SsmParamsError};

/// Which side of a parameter a filter inspects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterTarget {
    /// The parameter value.
    Value,
    /// The variable name, i.e. the last path segment.
    Variable,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchMode {
    Exact,
    Contains,
}

/// A filter over fetched parameters. At most one is active per invocation;
/// asking for both a value and a variable filter is rejected up front.
#[derive(Clone, Debug)]
pub struct ParamFilter {
    target: FilterTarget,
    literal: String,
    mode: MatchMode,
}

impl ParamFilter {
    pub fn new(target: FilterTarget, literal: impl Into<String>, mode: MatchMode) -> Self {
        ParamFilter {
            target,
            literal: literal.into(),
            mode,
        }
    }

    /// Build the filter configured on the command line, if any.
    pub fn from_flags(
        value: Option<&str>,
        variable: Option<&str>,
        contains: bool,
    ) -> Result<Option<ParamFilter>> {
        let mode = if contains {
            MatchMode::Contains
        } else {
            MatchMode::Exact
        };
        match (value, variable) {
            (Some(_), Some(_)) => Err(SsmParamsError::ConflictingFilters),
            (Some(literal), None) => Ok(Some(ParamFilter::new(FilterTarget::Value, literal, mode))),
            (None, Some(literal)) => {
                Ok(Some(ParamFilter::new(FilterTarget::Variable, literal, mode)))
            }
            (None, None) => Ok(None),
        }
    }

    pub fn matches(&self, parameter: &SsmParameter) -> bool {
        let candidate = match self.target {
            FilterTarget::Value => parameter.value.as_str(),
            FilterTarget::Variable => last_segment(&parameter.name),
        };
        match self.mode {
            MatchMode::Exact => candidate == self.literal,
            MatchMode::Contains => candidate.contains(&self.literal),
        }
    }
}

/// No filter matches everything (exact-name queries run unfiltered).
pub fn matches(parameter: &SsmParameter, filter: Option<&ParamFilter>) -> bool {
    filter.map_or(true, |f| f.matches(parameter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ssm_parameters::ParameterKind;

    fn parameter(name: &str, value: &str) -> SsmParameter {
        SsmParameter {
            name: name.to_string(),
            value: value.to_string(),
            kind: ParameterKind::String,
        }
    }

    #[test]
    fn no_filter_matches_everything() {
        assert!(matches(&parameter("/a/b/c", "whatever"), None));
    }

    #[test]
    fn exact_value_never_matches_substring() {
        let filter = ParamFilter::new(FilterTarget::Value, "host1", MatchMode::Exact);
        assert!(filter.matches(&parameter("/a/b/c", "host1")));
        assert!(!filter.matches(&parameter("/a/b/c", "host10")));
        assert!(!filter.matches(&parameter("/a/b/c", "ahost1")));
    }

    #[test]
    fn contains_value_matches_substring() {
        let filter = ParamFilter::new(FilterTarget::Value, "ost", MatchMode::Contains);
        assert!(filter.matches(&parameter("/a/b/c", "host1")));
        assert!(!filter.matches(&parameter("/a/b/c", "db1")));
    }

    #[test]
    fn empty_contains_literal_matches_everything() {
        let filter = ParamFilter::new(FilterTarget::Value, "", MatchMode::Contains);
        assert!(filter.matches(&parameter("/a/b/c", "")));
        assert!(filter.matches(&parameter("/a/b/c", "anything")));
    }

    #[test]
    fn variable_filter_sees_only_the_last_segment() {
        let exact = ParamFilter::new(FilterTarget::Variable, "DB_HOST", MatchMode::Exact);
        assert!(exact.matches(&parameter("/app/env/DB_HOST", "host1")));
        assert!(!exact.matches(&parameter("/app/DB_HOST/other", "host1")));

        let contains = ParamFilter::new(FilterTarget::Variable, "DB", MatchMode::Contains);
        assert!(contains.matches(&parameter("/app/env/DB_PORT", "5432")));
        assert!(!contains.matches(&parameter("/app/env/API_KEY", "DB")));
    }

    #[test]
    fn variable_filter_on_name_without_slash() {
        let filter = ParamFilter::new(FilterTarget::Variable, "plain", MatchMode::Exact);
        assert!(filter.matches(&parameter("plain", "v")));
    }

    #[test]
    fn both_flags_are_rejected() {
        let result = ParamFilter::from_flags(Some("v"), Some("n"), false);
        assert!(result.is_err());
    }

    #[test]
    fn from_flags_picks_the_configured_target() {
        let filter = ParamFilter::from_flags(Some("v"), None, true).unwrap().unwrap();
        assert!(filter.matches(&parameter("/a/b", "has v inside")));

        let filter = ParamFilter::from_flags(None, Some("b"), false).unwrap().unwrap();
        assert!(filter.matches(&parameter("/a/b", "x")));

        assert!(ParamFilter::from_flags(None, None, false).unwrap().is_none());
    }
}
