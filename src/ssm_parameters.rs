use std::fmt;
use std::str::FromStr;

use failure::Fail;

pub type Result<T> = std::result::Result<T, SsmParamsError>;

/// The three value types the parameter store knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterKind {
    String,
    StringList,
    SecureString,
}

impl ParameterKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ParameterKind::String => "String",
            ParameterKind::StringList => "StringList",
            ParameterKind::SecureString => "SecureString",
        }
    }

    /// Parse the type string as the remote store spells it.
    pub fn from_remote(raw: &str) -> Result<Self> {
        match raw {
            "String" => Ok(ParameterKind::String),
            "StringList" => Ok(ParameterKind::StringList),
            "SecureString" => Ok(ParameterKind::SecureString),
            _ => Err(SsmParamsError::UnknownKind {
                raw: raw.to_string(),
            }),
        }
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Command line spellings: string, stringlist, secret.
impl FromStr for ParameterKind {
    type Err = SsmParamsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "string" => Ok(ParameterKind::String),
            "stringlist" => Ok(ParameterKind::StringList),
            "secret" | "securestring" => Ok(ParameterKind::SecureString),
            _ => Err(SsmParamsError::UnknownKind { raw: s.to_string() }),
        }
    }
}

/// One parameter as fetched from the store.
#[derive(Clone, Debug, PartialEq)]
pub struct SsmParameter {
    pub name: String,
    pub value: String,
    pub kind: ParameterKind,
}

/// Batch request for complete parameter names.
#[derive(Debug)]
pub struct NamesQuery {
    pub names: Vec<String>,
    pub with_decryption: bool,
}

/// Recursive request for every parameter under a hierarchy path.
#[derive(Debug)]
pub struct PathQuery {
    pub path: String,
    pub recursive: bool,
    pub with_decryption: bool,
}

/// Response to a `NamesQuery`. Names the store did not know come back in
/// `invalid_names` instead of erroring the whole call.
#[derive(Clone, Debug, Default)]
pub struct NamedBatch {
    pub parameters: Vec<SsmParameter>,
    pub invalid_names: Vec<String>,
}

/// One page of a `PathQuery`; `next_token` chains to the following page.
#[derive(Clone, Debug, Default)]
pub struct PathPage {
    pub parameters: Vec<SsmParameter>,
    pub next_token: Option<String>,
}

/// A single write to the store.
#[derive(Debug)]
pub struct PutRequest {
    pub name: String,
    pub value: String,
    pub kind: ParameterKind,
    pub description: Option<String>,
    pub overwrite: bool,
}

/// Last `/`-delimited segment of a parameter name. A name without `/` is
/// its own last segment.
pub fn last_segment(full_path: &str) -> &str {
    match full_path.rfind('/') {
        Some(idx) => &full_path[idx + 1..],
        None => full_path,
    }
}

/// Split a full parameter name into (hierarchy prefix, variable name).
/// The prefix keeps its trailing `/`; a name without `/` has an empty
/// prefix, so prefix + name always reassembles the input.
pub fn split_path(full_path: &str) -> (&str, &str) {
    match full_path.rfind('/') {
        Some(idx) => (&full_path[..=idx], &full_path[idx + 1..]),
        None => ("", full_path),
    }
}

#[derive(Debug, Fail)]
pub enum SsmParamsError {
    #[fail(display = "SSM request failed: {}", reason)]
    Request { reason: String },
    #[fail(display = "could not resolve AWS credentials: {}", reason)]
    Credentials { reason: String },
    #[fail(display = "invalid region: {}", reason)]
    Region { reason: String },
    #[fail(
        display = "unknown parameter type \"{}\" (expected string, stringlist or secret)",
        raw
    )]
    UnknownKind { raw: String },
    #[fail(display = "parameters not found: {}", names)]
    NotFound { names: String },
    #[fail(display = "--value and --variable are mutually exclusive")]
    ConflictingFilters,
    #[fail(display = "{}", message)]
    Usage { message: String },
    #[fail(display = "could not read {}: {}", path, reason)]
    FileRead { path: String, reason: String },
    #[fail(display = "could not write {}: {}", path, reason)]
    FileWrite { path: String, reason: String },
    #[fail(display = "malformed import file {}: {}", path, reason)]
    MalformedImport { path: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_segment_of_hierarchy() {
        assert_eq!(last_segment("/a/b/c"), "c");
        assert_eq!(last_segment("/vars/envs1/param1"), "param1");
    }

    #[test]
    fn last_segment_without_slash() {
        assert_eq!(last_segment("noslash"), "noslash");
    }

    #[test]
    fn last_segment_of_trailing_slash() {
        assert_eq!(last_segment("/a/b/"), "");
    }

    #[test]
    fn split_keeps_trailing_separator_on_prefix() {
        assert_eq!(split_path("/a/b/c"), ("/a/b/", "c"));
    }

    #[test]
    fn split_without_slash_has_empty_prefix() {
        assert_eq!(split_path("noslash"), ("", "noslash"));
    }

    #[test]
    fn split_reassembles_to_input() {
        for name in &["/a/b/c", "/x", "plain", "/a/b/"] {
            let (path, var) = split_path(name);
            assert_eq!(format!("{}{}", path, var), *name);
        }
    }

    #[test]
    fn kind_parses_cli_spellings() {
        assert_eq!(
            "string".parse::<ParameterKind>().unwrap(),
            ParameterKind::String
        );
        assert_eq!(
            "stringList".parse::<ParameterKind>().unwrap(),
            ParameterKind::StringList
        );
        assert_eq!(
            "secret".parse::<ParameterKind>().unwrap(),
            ParameterKind::SecureString
        );
    }

    #[test]
    fn kind_rejects_unknown_spelling() {
        assert!("text".parse::<ParameterKind>().is_err());
    }

    #[test]
    fn kind_round_trips_remote_spelling() {
        for kind in &[
            ParameterKind::String,
            ParameterKind::StringList,
            ParameterKind::SecureString,
        ] {
            assert_eq!(ParameterKind::from_remote(kind.as_str()).unwrap(), *kind);
        }
        assert!(ParameterKind::from_remote("Secret").is_err());
    }
}
