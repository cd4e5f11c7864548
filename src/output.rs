use console::style;

use crate::progress::Indicator;
use crate::ssm_parameters::{last_segment, SsmParameter};

/// Name printed for a parameter: the full hierarchy path, or just the
/// variable name.
pub fn display_name(parameter: &SsmParameter, show_path: bool) -> &str {
    if show_path {
        &parameter.name
    } else {
        last_segment(&parameter.name)
    }
}

/// Prints matched parameters as `name=value` lines on stdout, keeping the
/// progress indicator off the line while printing.
pub struct Printer<'a> {
    indicator: &'a Indicator,
}

impl<'a> Printer<'a> {
    pub fn new(indicator: &'a Indicator) -> Self {
        Printer { indicator }
    }

    pub fn emit(&self, name: &str, value: &str, last_user: Option<&str>) {
        let line = match last_user {
            Some(user) => format!(
                "{}{} {}",
                style(format!("{}=", name)).blue(),
                value,
                style(user).yellow()
            ),
            None => format!("{}{}", style(format!("{}=", name)).blue(), value),
        };
        self.indicator.suspend(|| println!("{}", line));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ssm_parameters::ParameterKind;

    #[test]
    fn projects_short_name_or_full_path() {
        let parameter = SsmParameter {
            name: "/app/env/DB_HOST".to_string(),
            value: "host1".to_string(),
            kind: ParameterKind::String,
        };
        assert_eq!(display_name(&parameter, false), "DB_HOST");
        assert_eq!(display_name(&parameter, true), "/app/env/DB_HOST");
    }

    #[test]
    fn name_without_slash_projects_to_itself() {
        let parameter = SsmParameter {
            name: "plain".to_string(),
            value: "v".to_string(),
            kind: ParameterKind::String,
        };
        assert_eq!(display_name(&parameter, false), "plain");
        assert_eq!(display_name(&parameter, true), "plain");
    }
}
