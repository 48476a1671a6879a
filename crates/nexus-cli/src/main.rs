// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod print;
mod runtime;

use anyhow::{Context, Result, anyhow, bail};
use config::Config;
use nexus_app::table::Pagination;
use nexus_app::{AppState, SidebarState, StatusFilter, TabKind};
use nexus_data::Store;
use print::{PrintOptions, SortSpec};
use runtime::StoreRuntime;
use std::env;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use time::OffsetDateTime;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `nexus --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;

    let log_path = logging::resolve_log_path(config.log_path())?;
    if options.check_only {
        return Ok(());
    }
    logging::init(config.log_level(), &log_path)?;
    log::info!(
        "starting {} with config {}",
        nexus_data::APP_NAME,
        options.config_path.display()
    );

    let now = OffsetDateTime::now_utc();
    let store = Store::demo(now);
    if let Some(print) = &options.print {
        print!("{}", print::render_page(&store, print, config.page_size(), now)?);
        return Ok(());
    }

    let mut state = AppState {
        active_tab: config.start_page(),
        sidebar: if config.sidebar_collapsed() {
            SidebarState::Collapsed
        } else {
            SidebarState::Expanded
        },
        master_data_expanded: config.start_page().is_master_data(),
        ..AppState::default()
    };
    let mut runtime = StoreRuntime::new(store);
    let result = nexus_tui::run_app(&mut state, &mut runtime, Pagination::new(config.page_size()));
    match &result {
        Ok(()) => log::info!("exited cleanly"),
        Err(error) => log::error!("console failed: {error:#}"),
    }
    result
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
    print: Option<PrintOptions>,
}

/// Flags that only mean something next to `--print`.
#[derive(Debug, Default)]
struct PrintFlags {
    status: Option<StatusFilter>,
    search: Option<String>,
    sort: Option<SortSpec>,
    page: Option<NonZeroUsize>,
    page_size: Option<NonZeroUsize>,
    json: bool,
}

impl PrintFlags {
    fn first_set(&self) -> Option<&'static str> {
        [
            (self.status.is_some(), "--status"),
            (self.search.is_some(), "--search"),
            (self.sort.is_some(), "--sort"),
            (self.page.is_some(), "--page"),
            (self.page_size.is_some(), "--page-size"),
            (self.json, "--json"),
        ]
        .into_iter()
        .find_map(|(set, flag)| set.then_some(flag))
    }

    fn into_options(self, tab: TabKind) -> PrintOptions {
        let mut options = PrintOptions::new(tab);
        options.status = self.status.unwrap_or_default();
        options.search = self.search.unwrap_or_default();
        options.sort = self.sort;
        options.page = self.page;
        options.page_size = self.page_size;
        options.json = self.json;
        options
    }
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        print_config_path: false,
        print_example: false,
        check_only: false,
        show_help: false,
        print: None,
    };
    let mut print_tab = None;
    let mut flags = PrintFlags::default();

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        let mut value = |what: &str| {
            iter.next()
                .map(|value| value.as_ref().to_owned())
                .ok_or_else(|| anyhow!("{} requires {what}", arg.as_ref()))
        };
        match arg.as_ref() {
            "--config" => {
                options.config_path = PathBuf::from(value("a file path")?);
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--print" => {
                let page = value("a page name")?;
                print_tab = Some(parse_page(&page)?);
            }
            "--status" => {
                let raw = value("a sub-tab name")?;
                flags.status = Some(StatusFilter::parse(&raw.to_lowercase()).ok_or_else(
                    || anyhow!("unknown sub-tab {raw:?}; use all, active, pending or inactive"),
                )?);
            }
            "--search" => {
                flags.search = Some(value("a search term")?);
            }
            "--sort" => {
                flags.sort = Some(SortSpec::parse(&value("a column name")?)?);
            }
            "--page" => {
                flags.page = Some(parse_positive("--page", &value("a page number")?)?);
            }
            "--page-size" => {
                flags.page_size = Some(parse_positive("--page-size", &value("a row count")?)?);
            }
            "--json" => {
                flags.json = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    match print_tab {
        Some(tab) => options.print = Some(flags.into_options(tab)),
        None => {
            if let Some(flag) = flags.first_set() {
                bail!("{flag} only applies together with --print <page>");
            }
        }
    }
    Ok(options)
}

fn parse_page(raw: &str) -> Result<TabKind> {
    TabKind::parse(raw).ok_or_else(|| {
        let pages = TabKind::ALL
            .iter()
            .map(|tab| tab.label())
            .collect::<Vec<_>>()
            .join(", ");
        anyhow!("unknown page {raw:?}; use one of {pages}")
    })
}

fn parse_positive(flag: &str, raw: &str) -> Result<NonZeroUsize> {
    raw.parse::<NonZeroUsize>()
        .map_err(|_| anyhow!("{flag} must be a positive whole number, got {raw:?}"))
}

fn print_help() {
    println!("nexus (Office Nexus console)");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a v1 config template");
    println!("  --check                  Validate config and log settings, then exit");
    println!("  --print <page>           Print one page of demo data and exit");
    println!("    --status <sub-tab>     all, active, pending or inactive");
    println!("    --search <term>        Case-insensitive search across the rows");
    println!("    --sort <column>[:desc] Sort by a sortable column");
    println!("    --page <n>             1-based page number (enables paging)");
    println!("    --page-size <n>        Rows per page (enables paging)");
    println!("    --json                 Emit JSON instead of aligned text");
    println!("  --help                   Show this help");
}

#[cfg(test)]
mod tests {
    use super::{CliOptions, parse_cli_args};
    use crate::print::{PrintOptions, SortSpec};
    use anyhow::Result;
    use nexus_app::{StatusFilter, TabKind};
    use std::num::NonZeroUsize;
    use std::path::PathBuf;

    fn default_options_path() -> PathBuf {
        PathBuf::from("/tmp/nexus-config.toml")
    }

    #[test]
    fn parse_cli_args_defaults_to_provided_config_path() -> Result<()> {
        let options = parse_cli_args(Vec::<String>::new(), default_options_path())?;
        assert_eq!(
            options,
            CliOptions {
                config_path: default_options_path(),
                print_config_path: false,
                print_example: false,
                check_only: false,
                show_help: false,
                print: None,
            }
        );
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_config_path_override() -> Result<()> {
        let options = parse_cli_args(
            vec!["--config", "/custom/config.toml"],
            default_options_path(),
        )?;
        assert_eq!(options.config_path, PathBuf::from("/custom/config.toml"));
        Ok(())
    }

    #[test]
    fn parse_cli_args_errors_for_missing_config_value() {
        let error = parse_cli_args(vec!["--config"], default_options_path())
            .expect_err("missing config value should fail");
        assert!(error.to_string().contains("--config requires a file path"));
    }

    #[test]
    fn parse_cli_args_errors_for_unknown_argument() {
        let error = parse_cli_args(vec!["--wat"], default_options_path())
            .expect_err("unknown arg should fail");
        let message = error.to_string();
        assert!(message.contains("unknown argument"));
        assert!(message.contains("--help"));
    }

    #[test]
    fn parse_cli_args_sets_print_and_check_flags() -> Result<()> {
        let options = parse_cli_args(
            vec!["--print-config-path", "--print-example-config", "--check"],
            default_options_path(),
        )?;
        assert!(options.print_config_path);
        assert!(options.print_example);
        assert!(options.check_only);
        assert!(!options.show_help);
        assert_eq!(options.print, None);
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_help_flag_for_long_and_short_variants() -> Result<()> {
        let long = parse_cli_args(vec!["--help"], default_options_path())?;
        assert!(long.show_help);

        let short = parse_cli_args(vec!["-h"], default_options_path())?;
        assert!(short.show_help);
        Ok(())
    }

    #[test]
    fn parse_cli_args_collects_print_options() -> Result<()> {
        let options = parse_cli_args(
            vec![
                "--search", "user 1", "--print", "Users", "--status", "Active", "--sort",
                "name:desc", "--page", "2", "--page-size", "20", "--json",
            ],
            default_options_path(),
        )?;
        assert_eq!(
            options.print,
            Some(PrintOptions {
                tab: TabKind::Users,
                status: StatusFilter::Active,
                search: "user 1".to_owned(),
                sort: Some(SortSpec {
                    column: "name".to_owned(),
                    descending: true,
                }),
                page: NonZeroUsize::new(2),
                page_size: NonZeroUsize::new(20),
                json: true,
            })
        );
        Ok(())
    }

    #[test]
    fn parse_cli_args_rejects_print_flags_without_page() {
        let error = parse_cli_args(vec!["--json"], default_options_path())
            .expect_err("--json alone should fail");
        assert!(error.to_string().contains("--json only applies together with --print"));
    }

    #[test]
    fn parse_cli_args_rejects_bad_print_values() {
        let error = parse_cli_args(vec!["--print", "settings"], default_options_path())
            .expect_err("unknown page should fail");
        assert!(error.to_string().contains("dashboard, users, roles"));

        let error = parse_cli_args(vec!["--print", "users", "--page", "0"], default_options_path())
            .expect_err("page zero should fail");
        assert!(error.to_string().contains("--page must be a positive whole number"));

        let error = parse_cli_args(vec!["--print"], default_options_path())
            .expect_err("missing page should fail");
        assert!(error.to_string().contains("--print requires a page name"));
    }
}
