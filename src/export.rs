use std::fs;
use std::path::Path;

use crate::ssm_parameters::{split_path, ParameterKind, Result, SsmParameter, SsmParamsError};

/// One entry of the JSON transfer format shared by `get --json` and
/// `add --json`. `path` keeps its trailing `/`, so `path + name` is the
/// complete parameter name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportEntry {
    #[serde(rename = "Path")]
    pub path: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Value")]
    pub value: String,
    #[serde(rename = "Type")]
    pub kind: ParameterKind,
}

impl ExportEntry {
    /// Rebuild the complete parameter name from the exported split.
    pub fn full_name(&self) -> String {
        format!("{}{}", self.path, self.name)
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ExportFile {
    #[serde(rename = "Parameters")]
    parameters: Vec<ExportEntry>,
}

/// Collects every matched parameter across the queries of one invocation.
/// Owned by the command orchestrator and written out once, at the end.
#[derive(Debug, Default)]
pub struct Aggregate {
    file: ExportFile,
}

impl Aggregate {
    pub fn new() -> Self {
        Aggregate::default()
    }

    pub fn push(&mut self, parameter: &SsmParameter) {
        let (path, name) = split_path(&parameter.name);
        self.file.parameters.push(ExportEntry {
            path: path.to_string(),
            name: name.to_string(),
            value: parameter.value.clone(),
            kind: parameter.kind,
        });
    }

    pub fn len(&self) -> usize {
        self.file.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.file.parameters.is_empty()
    }

    pub fn entries(&self) -> &[ExportEntry] {
        &self.file.parameters
    }

    /// Serialize everything collected so far to `target`, replacing any
    /// previous file.
    pub fn write_json(&self, target: &Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(&self.file).map_err(|e| SsmParamsError::FileWrite {
                path: target.display().to_string(),
                reason: e.to_string(),
            })?;
        fs::write(target, content).map_err(|e| SsmParamsError::FileWrite {
            path: target.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(())
    }
}

/// Read a transfer file for bulk import.
pub fn read_import_file(source: &Path) -> Result<Vec<ExportEntry>> {
    let content = fs::read_to_string(source).map_err(|e| SsmParamsError::FileRead {
        path: source.display().to_string(),
        reason: e.to_string(),
    })?;
    let file: ExportFile =
        serde_json::from_str(&content).map_err(|e| SsmParamsError::MalformedImport {
            path: source.display().to_string(),
            reason: e.to_string(),
        })?;
    Ok(file.parameters)
}
