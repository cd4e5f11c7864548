use std::fmt;

use rusoto_core::credential::ProfileProvider;
use rusoto_core::{HttpClient, Region};
use rusoto_ssm::{
    DescribeParametersRequest, GetParametersByPathRequest, GetParametersRequest,
    ParameterStringFilter, PutParameterRequest, Ssm, SsmClient,
};

use crate::ssm_parameters::{
    NamedBatch, NamesQuery, ParameterKind, PathPage, PathQuery, PutRequest, Result, SsmParameter,
    SsmParamsError,
};

/// The read operations the retrieval engine needs from the store.
/// Implemented for the live SSM client below and by in-memory fakes in
/// tests.
pub trait ParameterStore {
    /// Fetch a batch of parameters by complete name. One call, no paging.
    fn get_parameters(&self, query: &NamesQuery) -> Result<NamedBatch>;

    /// Fetch one page of a hierarchy query; `token` continues a previous
    /// page.
    fn get_parameters_by_path(&self, query: &PathQuery, token: Option<String>) -> Result<PathPage>;

    /// ARN of the user who last modified `name`, if the store reports one.
    fn last_modified_user(&self, name: &str) -> Result<Option<String>>;
}

pub struct SsmOps {
    region: String,
    ssm_client: SsmClient,
}

impl fmt::Debug for SsmOps {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{ region: {} }}", self.region)
    }
}

impl SsmOps {
    /// Build a client for the given profile/region; both fall back to the
    /// usual AWS environment resolution when absent.
    pub fn new(profile: Option<&str>, region: Option<&str>) -> Result<Self> {
        let region = match region {
            Some(name) => name.parse::<Region>().map_err(|e| SsmParamsError::Region {
                reason: e.to_string(),
            })?,
            None => Region::default(),
        };

        let ssm_client = match profile {
            Some(profile) => {
                let mut provider =
                    ProfileProvider::new().map_err(|e| SsmParamsError::Credentials {
                        reason: e.to_string(),
                    })?;
                provider.set_profile(profile);
                let dispatcher = HttpClient::new().map_err(|e| SsmParamsError::Request {
                    reason: e.to_string(),
                })?;
                SsmClient::new_with(dispatcher, provider, region.clone())
            }
            None => SsmClient::new(region.clone()),
        };

        Ok(SsmOps {
            region: region.name().to_string(),
            ssm_client,
        })
    }

    pub fn put_parameter(&self, req: &PutRequest) -> Result<()> {
        let input = PutParameterRequest {
            name: req.name.clone(),
            value: req.value.clone(),
            type_: req.kind.as_str().to_string(),
            description: req.description.clone(),
            overwrite: Some(req.overwrite),
            ..Default::default()
        };
        self.ssm_client
            .put_parameter(input)
            .sync()
            .map_err(|e| SsmParamsError::Request {
                reason: e.to_string(),
            })?;
        Ok(())
    }
}

impl ParameterStore for SsmOps {
    fn get_parameters(&self, query: &NamesQuery) -> Result<NamedBatch> {
        let input = GetParametersRequest {
            names: query.names.clone(),
            with_decryption: Some(query.with_decryption),
        };
        let output = self
            .ssm_client
            .get_parameters(input)
            .sync()
            .map_err(|e| SsmParamsError::Request {
                reason: e.to_string(),
            })?;

        let mut batch = NamedBatch {
            parameters: Vec::new(),
            invalid_names: output.invalid_parameters.unwrap_or_default(),
        };
        for parameter in output.parameters.unwrap_or_default() {
            batch.parameters.push(convert_parameter(parameter)?);
        }
        Ok(batch)
    }

    fn get_parameters_by_path(&self, query: &PathQuery, token: Option<String>) -> Result<PathPage> {
        let input = GetParametersByPathRequest {
            path: query.path.clone(),
            recursive: Some(query.recursive),
            with_decryption: Some(query.with_decryption),
            next_token: token,
            ..Default::default()
        };
        let output = self
            .ssm_client
            .get_parameters_by_path(input)
            .sync()
            .map_err(|e| SsmParamsError::Request {
                reason: e.to_string(),
            })?;

        let mut page = PathPage {
            parameters: Vec::new(),
            next_token: output.next_token,
        };
        for parameter in output.parameters.unwrap_or_default() {
            page.parameters.push(convert_parameter(parameter)?);
        }
        Ok(page)
    }

    fn last_modified_user(&self, name: &str) -> Result<Option<String>> {
        let input = DescribeParametersRequest {
            parameter_filters: Some(vec![ParameterStringFilter {
                key: "Name".to_string(),
                option: None,
                values: Some(vec![name.to_string()]),
            }]),
            ..Default::default()
        };
        let output = self
            .ssm_client
            .describe_parameters(input)
            .sync()
            .map_err(|e| SsmParamsError::Request {
                reason: e.to_string(),
            })?;

        Ok(output
            .parameters
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|meta| meta.last_modified_user))
    }
}

fn convert_parameter(parameter: rusoto_ssm::Parameter) -> Result<SsmParameter> {
    let kind = match parameter.type_ {
        Some(raw) => ParameterKind::from_remote(&raw)?,
        None => ParameterKind::String,
    };
    Ok(SsmParameter {
        name: parameter.name.unwrap_or_default(),
        value: parameter.value.unwrap_or_default(),
        kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_remote_parameter() {
        let remote = rusoto_ssm::Parameter {
            name: Some("/app/env/DB_HOST".to_string()),
            type_: Some("String".to_string()),
            value: Some("host1".to_string()),
            ..Default::default()
        };
        let parameter = convert_parameter(remote).unwrap();
        assert_eq!(parameter.name, "/app/env/DB_HOST");
        assert_eq!(parameter.value, "host1");
        assert_eq!(parameter.kind, ParameterKind::String);
    }

    #[test]
    fn rejects_unknown_remote_type() {
        let remote = rusoto_ssm::Parameter {
            name: Some("/app/env/DB_HOST".to_string()),
            type_: Some("Text".to_string()),
            value: Some("host1".to_string()),
            ..Default::default()
        };
        assert!(convert_parameter(remote).is_err());
    }
}
