use std::path::PathBuf;

use tracing::{debug, warn};

use crate::args::GetOpts;
use crate::export::Aggregate;
use crate::filter::{self, ParamFilter};
use crate::output::{display_name, Printer};
use crate::progress::Indicator;
use crate::ssm_ops::ParameterStore;
use crate::ssm_parameters::{
    NamesQuery, PathQuery, Result, SsmParameter, SsmParamsError,
};

/// GetParameters takes at most this many names per call; more is a usage
/// error rather than a silent chunked fetch.
const MAX_NAMES_PER_CALL: usize = 10;

/// Everything one `get` invocation will do, validated up front and
/// immutable afterwards.
#[derive(Debug)]
pub struct GetPlan {
    pub path_query: Option<PathQuery>,
    pub names_query: Option<NamesQuery>,
    pub filter: Option<ParamFilter>,
    pub show_path: bool,
    pub last_user: bool,
    pub export: Option<PathBuf>,
}

impl GetPlan {
    pub fn from_opts(opts: GetOpts) -> Result<GetPlan> {
        let filter =
            ParamFilter::from_flags(opts.value.as_deref(), opts.variable.as_deref(), opts.contains)?;

        // A filter without an explicit hierarchy searches from the root.
        let path = match opts.path {
            Some(path) => Some(path),
            None if filter.is_some() => Some("/".to_string()),
            None => None,
        };
        let path_query = path.map(|path| PathQuery {
            path,
            recursive: true,
            with_decryption: opts.decrypt,
        });

        if opts.names.len() > MAX_NAMES_PER_CALL {
            return Err(SsmParamsError::Usage {
                message: format!(
                    "at most {} names per invocation (got {})",
                    MAX_NAMES_PER_CALL,
                    opts.names.len()
                ),
            });
        }
        let names_query = if opts.names.is_empty() {
            None
        } else {
            Some(NamesQuery {
                names: opts.names,
                with_decryption: opts.decrypt,
            })
        };

        Ok(GetPlan {
            path_query,
            names_query,
            filter,
            show_path: opts.show_path,
            last_user: opts.last_user,
            export: opts.json,
        })
    }

    /// True when the invocation asked for nothing at all.
    pub fn is_empty(&self) -> bool {
        self.path_query.is_none() && self.names_query.is_none()
    }
}

/// Drain every query in the plan, printing matches as they arrive and
/// collecting them for export. The export file is written once, at the
/// end, covering all queries of the invocation.
pub fn run(plan: &GetPlan, store: &dyn ParameterStore, indicator: &Indicator) -> Result<Aggregate> {
    let printer = Printer::new(indicator);
    let mut results = Aggregate::new();

    if let Some(query) = &plan.path_query {
        fetch_by_path(store, query, plan, &printer, indicator, &mut results)?;
    }
    if let Some(query) = &plan.names_query {
        fetch_by_names(store, query, plan, &printer, indicator, &mut results)?;
    }

    if let Some(target) = &plan.export {
        results.write_json(target)?;
        debug!("wrote {} entries to {}", results.len(), target.display());
    }

    Ok(results)
}

/// Fetch pages for `query` until the store stops returning a continuation
/// token, pushing every page through the filter and output path.
fn fetch_by_path(
    store: &dyn ParameterStore,
    query: &PathQuery,
    plan: &GetPlan,
    printer: &Printer,
    indicator: &Indicator,
    results: &mut Aggregate,
) -> Result<()> {
    let mut token: Option<String> = None;
    let mut pages = 0u32;
    loop {
        let page = store.get_parameters_by_path(query, token.take())?;
        pages += 1;
        for parameter in &page.parameters {
            indicator.set_message(parameter.name.clone());
            if filter::matches(parameter, plan.filter.as_ref()) {
                emit(parameter, plan, printer, None, results);
            }
        }
        match page.next_token {
            Some(next) => token = Some(next),
            None => break,
        }
    }
    debug!("path query {} drained after {} pages", query.path, pages);
    Ok(())
}

/// One batch call, no pagination. Missing names are surfaced: fatal when
/// nothing resolved, a warning otherwise.
fn fetch_by_names(
    store: &dyn ParameterStore,
    query: &NamesQuery,
    plan: &GetPlan,
    printer: &Printer,
    indicator: &Indicator,
    results: &mut Aggregate,
) -> Result<()> {
    let batch = store.get_parameters(query)?;

    if !batch.invalid_names.is_empty() {
        if batch.parameters.is_empty() {
            return Err(SsmParamsError::NotFound {
                names: batch.invalid_names.join(", "),
            });
        }
        warn!("not found: {}", batch.invalid_names.join(", "));
    }

    for parameter in &batch.parameters {
        indicator.set_message(parameter.name.clone());
        let last_user = if plan.last_user {
            store.last_modified_user(&parameter.name)?
        } else {
            None
        };
        emit(parameter, plan, printer, last_user, results);
    }
    Ok(())
}

fn emit(
    parameter: &SsmParameter,
    plan: &GetPlan,
    printer: &Printer,
    last_user: Option<String>,
    results: &mut Aggregate,
) {
    let name = display_name(parameter, plan.show_path);
    printer.emit(name, &parameter.value, last_user.as_deref());
    results.push(parameter);
}
