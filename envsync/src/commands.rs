use crate::cli::{ApiCommand, ListArgs};
use crate::errors::CliError;
use crate::output::{Table, display_value, render_outcome, render_pager, render_report};
use client::types::{AppStatus, Application, AuditLogPage, EnvironmentVariable, ImportTarget};
use client::{ApiClient, VariableStore};
use importer::{ImportExecutor, ImportOutcome};
use listing::records::{
    AppSortKey, AuditSortKey, VariableKind, VariableSortKey, parse_app_status,
    parse_variable_kind,
};
use listing::{
    Categorized, FilterAction, FilterState, Searchable, SortOrder, Sortable, StatusFilter,
    filter_sort, paginate,
};
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Reads the file at `path`, or stdin when `path` is `-`.
pub fn read_input(path: &Path) -> Result<String, CliError> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }

    Ok(std::fs::read_to_string(path)?)
}

/// Returns false when any line is invalid.
pub fn check(path: &Path) -> Result<bool, CliError> {
    let report = importer::parse(&read_input(path)?);
    print!("{}", render_report(&report));
    Ok(report.is_clean())
}

pub async fn dispatch(client: Arc<ApiClient>, command: ApiCommand) -> Result<bool, CliError> {
    match command {
        ApiCommand::Import {
            file,
            app,
            env_type,
            dry_run,
        } => {
            let text = read_input(&file)?;
            let target = ImportTarget::new(app, env_type);
            let run = import(client, &target, &text, dry_run).await?;
            print!("{}", run.preview);
            match &run.outcome {
                Some(outcome) => print!("{}", render_outcome(outcome)),
                None if !dry_run => println!("Nothing to import"),
                None => {}
            }
            Ok(run.success)
        }
        ApiCommand::Apps { status, sort, list } => {
            let status = parse_app_status(&status)?;
            let state = list_state(&list, sort, SortOrder::Asc, status);
            let apps = client.list_applications().await?;
            print!("{}", render_apps(&apps, &state));
            Ok(true)
        }
        ApiCommand::Vars {
            app,
            env_type,
            kind,
            sort,
            reveal,
            list,
        } => {
            let kind = parse_variable_kind(&kind)?;
            let state = list_state(&list, sort, SortOrder::Asc, kind);
            let variables = client.list_variables(&app, &env_type).await?;
            print!("{}", render_variables(&variables, &state, reveal));
            Ok(true)
        }
        ApiCommand::AuditLogs {
            event_type,
            sort,
            list,
        } => {
            let state = list_state(&list, sort, SortOrder::Desc, event_type);
            let page = client
                .list_audit_logs(state.page, state.page_size)
                .await?;
            print!("{}", render_audit_logs(&page, &state));
            Ok(true)
        }
    }
}

pub struct ImportRun {
    pub preview: String,
    /// `None` when nothing was sent
    pub outcome: Option<ImportOutcome>,
    /// False when the command should exit non-zero
    pub success: bool,
}

/// Parses `text` against the target's current keys and, unless `dry_run`,
/// imports the valid records. The preview is returned even when no record
/// is valid.
pub async fn import(
    store: Arc<dyn VariableStore>,
    target: &ImportTarget,
    text: &str,
    dry_run: bool,
) -> Result<ImportRun, CliError> {
    let executor = ImportExecutor::new(store);
    let report = executor.prepare(target, text).await?;
    let preview = render_report(&report);

    if dry_run {
        tracing::info!(valid = report.valid_count(), "Dry run, nothing imported");
        return Ok(ImportRun {
            preview,
            outcome: None,
            success: report.is_clean(),
        });
    }

    if report.valid_count() == 0 {
        tracing::warn!(invalid = report.invalid_count(), "No valid variables to import");
        return Ok(ImportRun {
            preview,
            outcome: None,
            success: false,
        });
    }

    let outcome = executor.execute(target, &report).await?;
    Ok(ImportRun {
        preview,
        success: outcome.failed.is_empty(),
        outcome: Some(outcome),
    })
}

/// Folds command line options into a list view state, the same way the
/// console applies user input.
fn list_state<K: Copy, S>(
    args: &ListArgs,
    sort_by: K,
    default_order: SortOrder,
    status: Option<S>,
) -> FilterState<K, S> {
    let search = args.search.clone().unwrap_or_default();
    let status = status.map_or(StatusFilter::All, StatusFilter::Only);

    let mut state = FilterState::new(sort_by, default_order)
        .reduce(FilterAction::SetSearch(search.clone()))
        .reduce(FilterAction::SearchSettled(search))
        .reduce(FilterAction::SetStatus(status));
    if args.reverse {
        state = state.reduce(FilterAction::ToggleOrder);
    }

    state
        .reduce(FilterAction::SetPageSize(args.page_size))
        .reduce(FilterAction::SetPage(args.page))
}

fn render_list<T, F>(
    records: &[T],
    state: &FilterState<T::Key, T::Category>,
    headers: Vec<&'static str>,
    row: F,
) -> String
where
    T: Searchable + Sortable + Categorized,
    T::Category: Clone,
    F: Fn(&T) -> Vec<String>,
{
    let filtered = filter_sort(records, &state.query());
    if filtered.is_empty() {
        return if state.is_filtered() {
            "No results match the current filters\n".to_string()
        } else {
            "Nothing here yet\n".to_string()
        };
    }

    let pager = state.pager(filtered.len());
    let mut table = Table::new(headers);
    for record in paginate(&filtered, &pager) {
        table.push(row(*record));
    }

    format!("{table}\n{}\n", render_pager(&pager))
}

fn render_apps(apps: &[Application], state: &FilterState<AppSortKey, AppStatus>) -> String {
    render_list(apps, state, vec!["ID", "NAME", "STATUS", "UPDATED"], |app| {
        vec![
            app.id.clone(),
            app.name.clone(),
            match app.status {
                AppStatus::Active => "active".to_string(),
                AppStatus::Archived => "archived".to_string(),
            },
            app.updated_at.format(DATE_FORMAT).to_string(),
        ]
    })
}

fn render_variables(
    variables: &[EnvironmentVariable],
    state: &FilterState<VariableSortKey, VariableKind>,
    reveal: bool,
) -> String {
    render_list(variables, state, vec!["KEY", "VALUE", "UPDATED"], |var| {
        vec![
            var.key.clone(),
            display_value(&var.value, var.sensitive, reveal).to_string(),
            var.updated_at.format(DATE_FORMAT).to_string(),
        ]
    })
}

/// The page was already cut by the server, so search and sort apply to it
/// alone and the pager uses the server's total.
fn render_audit_logs(
    page: &AuditLogPage,
    state: &FilterState<AuditSortKey, String>,
) -> String {
    let logs = filter_sort(&page.items, &state.query());
    let pager = state.pager(page.total);

    let mut table = Table::new(vec!["TIME", "EVENT", "USER", "MESSAGE"]);
    for log in logs {
        table.push(vec![
            log.created_at.format(DATE_FORMAT).to_string(),
            log.event_type.clone(),
            log.user_id.clone().unwrap_or_else(|| "-".into()),
            log.message.clone(),
        ]);
    }

    if table.is_empty() {
        return format!("No audit logs\n{}\n", render_pager(&pager));
    }
    format!("{table}\n{}\n", render_pager(&pager))
}
