// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Non-interactive rendering of one page for `--print`.

use crate::runtime::tab_snapshot;
use anyhow::{Context, Result, bail};
use nexus_app::table::{Pagination, TableState, TableStatus};
use nexus_app::{StatusFilter, TabKind};
use nexus_data::Store;
use nexus_tui::{
    ActivityEntry, Announcement, LATEST_UPDATES, RECENT_ACTIVITY_LIMIT, StatCard, build_page,
    dashboard_cards, recent_activity, render_plain, select_sort_by_id, sortable_column_ids,
};
use serde::Serialize;
use std::num::NonZeroUsize;
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub column: String,
    pub descending: bool,
}

impl SortSpec {
    /// `name` or `name:desc` (`:asc` is accepted and is the default).
    pub fn parse(raw: &str) -> Result<Self> {
        let (column, direction) = match raw.split_once(':') {
            Some((column, direction)) => (column, Some(direction)),
            None => (raw, None),
        };
        if column.is_empty() {
            bail!("--sort needs a column name, got {raw:?}");
        }
        let descending = match direction {
            None | Some("asc") => false,
            Some("desc") => true,
            Some(other) => bail!("unknown sort direction {other:?}; use asc or desc"),
        };
        Ok(Self {
            column: column.to_owned(),
            descending,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintOptions {
    pub tab: TabKind,
    pub status: StatusFilter,
    pub search: String,
    pub sort: Option<SortSpec>,
    /// 1-based, as typed.
    pub page: Option<NonZeroUsize>,
    pub page_size: Option<NonZeroUsize>,
    pub json: bool,
}

impl PrintOptions {
    pub fn new(tab: TabKind) -> Self {
        Self {
            tab,
            status: StatusFilter::All,
            search: String::new(),
            sort: None,
            page: None,
            page_size: None,
            json: false,
        }
    }

    /// Paged only when asked; a bare `--print` lists every matching row.
    fn pagination(&self, default_size: NonZeroUsize) -> Option<Pagination> {
        if self.page.is_none() && self.page_size.is_none() {
            return None;
        }
        let mut pagination = Pagination::new(self.page_size.unwrap_or(default_size));
        pagination.page_index = self.page.map_or(0, |page| page.get() - 1);
        Some(pagination)
    }
}

pub fn render_page(
    store: &Store,
    options: &PrintOptions,
    default_page_size: NonZeroUsize,
    now: OffsetDateTime,
) -> Result<String> {
    if options.status != StatusFilter::All
        && !options.tab.status_filters().contains(&options.status)
    {
        bail!(
            "the {} page has no {:?} sub-tab",
            options.tab.label(),
            options.status.label()
        );
    }

    let Some(snapshot) = tab_snapshot(store, options.tab, options.status) else {
        return render_dashboard(store, options.json, now);
    };

    let mut state = TableState::default();
    state.set_search(options.search.as_str());
    if let Some(sort) = &options.sort {
        let mut status = select_sort_by_id(options.tab, &mut state, &sort.column);
        if sort.descending && status != TableStatus::SortUnavailable {
            status = select_sort_by_id(options.tab, &mut state, &sort.column);
        }
        if status == TableStatus::SortUnavailable {
            bail!(
                "cannot sort {} by {:?}; sortable columns: {}",
                options.tab.label(),
                sort.column,
                sortable_column_ids(options.tab).join(", ")
            );
        }
    }

    let page = build_page(&snapshot, &state, options.pagination(default_page_size));
    log::info!(
        "printed {} rows of {} ({} matched)",
        page.row_count(),
        options.tab.label(),
        page.pager.filtered_len
    );
    if options.json {
        return serde_json::to_string_pretty(&page).context("encode page as JSON");
    }
    Ok(render_plain(&page))
}

#[derive(Debug, Serialize)]
struct DashboardView {
    cards: Vec<StatCard>,
    recent_activity: Vec<ActivityEntry>,
    latest_updates: &'static [Announcement],
}

fn render_dashboard(store: &Store, json: bool, now: OffsetDateTime) -> Result<String> {
    let view = DashboardView {
        cards: dashboard_cards(&store.dashboard_counts()),
        recent_activity: recent_activity(&store.recent_logins(RECENT_ACTIVITY_LIMIT), now),
        latest_updates: &LATEST_UPDATES,
    };
    if json {
        return serde_json::to_string_pretty(&view).context("encode dashboard as JSON");
    }

    let mut out = String::new();
    for card in &view.cards {
        out.push_str(&format!("{}: {}\n", card.title, card.value));
    }
    out.push_str("\nRecent User Activity\n");
    for entry in &view.recent_activity {
        out.push_str(&format!("  {} ({})\n", entry.summary, entry.when));
    }
    out.push_str("\nLatest Updates\n");
    for update in view.latest_updates {
        out.push_str(&format!("  {} ({}): {}\n", update.title, update.when, update.body));
    }
    Ok(out)
}
