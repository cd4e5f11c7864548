use std::path::PathBuf;
use structopt::StructOpt;

use crate::ssm_parameters::ParameterKind;

#[derive(StructOpt, Debug)]
#[structopt(
    name = "ssm_params",
    about = "AWS Parameter Store CLI - add and retrieve SSM parameters, with filtering, decryption and JSON import/export."
)]
pub struct Opt {
    /// AWS Profile from the shared config/credentials files
    #[structopt(long = "profile")]
    pub profile: Option<String>,
    /// AWS Region
    #[structopt(short = "r", long = "region")]
    pub region: Option<String>,
    /// Quiet Mode => no progress indicator
    #[structopt(short = "q", long = "quiet")]
    pub quiet: bool,
    #[structopt(subcommand)]
    pub cmd: Command,
}

#[derive(StructOpt, Debug)]
pub enum Command {
    /// Get Parameters by exact name, hierarchy path or filter
    #[structopt(name = "get", visible_alias = "g")]
    Get(GetOpts),
    /// Add one Parameter, or bulk-import a JSON file
    #[structopt(name = "add", visible_alias = "a")]
    Add(AddOpts),
}

#[derive(StructOpt, Debug)]
pub struct GetOpts {
    /// Complete Parameter name(s), fetched in one batch call
    #[structopt(short = "n", long = "name", number_of_values = 1)]
    pub names: Vec<String>,
    /// Hierarchy path prefix, fetched recursively
    #[structopt(short = "p", long = "path")]
    pub path: Option<String>,
    /// Only print Parameters whose value matches
    #[structopt(short = "v", long = "value")]
    pub value: Option<String>,
    /// Only print Parameters whose variable name (last path segment) matches
    #[structopt(long = "variable")]
    pub variable: Option<String>,
    /// Substring match instead of exact match for --value/--variable
    #[structopt(short = "c", long = "contains")]
    pub contains: bool,
    /// Print the full hierarchy path instead of the variable name
    #[structopt(short = "f", long = "show-path")]
    pub show_path: bool,
    /// Decrypt SecureString values
    #[structopt(short = "d", long = "decrypt")]
    pub decrypt: bool,
    /// Also print who last modified each Parameter (exact names only)
    #[structopt(short = "u", long = "last-user")]
    pub last_user: bool,
    /// Write the matched Parameters to this JSON file
    #[structopt(short = "j", long = "json", parse(from_os_str))]
    pub json: Option<PathBuf>,
}

#[derive(StructOpt, Debug)]
pub struct AddOpts {
    /// Complete Parameter name (hierarchy + variable)
    #[structopt(short = "n", long = "name")]
    pub name: Option<String>,
    /// Parameter value
    #[structopt(short = "v", long = "value")]
    pub value: Option<String>,
    /// Parameter type [string, stringlist, secret]
    #[structopt(short = "t", long = "type", parse(try_from_str))]
    pub kind: Option<ParameterKind>,
    /// Parameter description
    #[structopt(short = "D", long = "description")]
    pub description: Option<String>,
    /// Overwrite an existing value
    #[structopt(short = "o", long = "overwrite")]
    pub overwrite: bool,
    /// Bulk-import Parameters from this JSON file
    #[structopt(short = "j", long = "json", parse(from_os_str))]
    pub json: Option<PathBuf>,
}
