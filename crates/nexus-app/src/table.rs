// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Derived-view computation for tabular pages.
//!
//! A [`DataTable`] borrows the caller's records and column descriptors for a
//! single render and turns them into a filtered, sorted, paginated
//! [`TableView`]. Nothing here owns data: the only state that survives a
//! render is the [`TableState`] of one table instance and the caller-owned
//! [`Pagination`].

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::num::NonZeroUsize;

use crate::model::SortDirection;
use crate::record::{FieldValue, Record};

pub const PAGE_SIZE_OPTIONS: [usize; 5] = [10, 20, 30, 40, 50];
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(PAGE_SIZE_OPTIONS[0]) {
    Some(size) => size,
    None => NonZeroUsize::MIN,
};
pub const EMPTY_PLACEHOLDER: &str = "No data found";

const PAGE_WINDOW: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub enum Tone {
    #[default]
    Plain,
    Muted,
    Accent,
    Success,
    Warning,
}

/// Renderable content of one table cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub text: String,
    pub tone: Tone,
}

impl Cell {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Plain,
        }
    }

    pub fn toned(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

/// Column descriptor supplied fresh by the caller on every render.
pub struct Column<'a, R> {
    pub id: &'static str,
    pub header: &'static str,
    pub sortable: bool,
    pub filterable: bool,
    projection: Box<dyn Fn(&R) -> Cell + 'a>,
}

impl<'a, R> Column<'a, R> {
    pub fn new(
        id: &'static str,
        header: &'static str,
        projection: impl Fn(&R) -> Cell + 'a,
    ) -> Self {
        Self {
            id,
            header,
            sortable: false,
            filterable: false,
            projection: Box::new(projection),
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    pub fn cell(&self, record: &R) -> Cell {
        (self.projection)(record)
    }
}

impl<R> fmt::Debug for Column<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .field("filterable", &self.filterable)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortState {
    pub column: &'static str,
    pub direction: SortDirection,
}

/// Identity of the collection a table is currently showing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DatasetKey(String);

impl DatasetKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }
}

/// Transient view state owned by one table instance.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableState {
    dataset: Option<DatasetKey>,
    search: String,
    sort: Option<SortState>,
    pub selected_row: usize,
    pub selected_col: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableStatus {
    SortUnavailable,
    SortAsc(&'static str),
    SortDesc(&'static str),
    SortCleared,
}

impl TableStatus {
    pub fn message(&self) -> String {
        match self {
            Self::SortUnavailable => "sort unavailable".to_owned(),
            Self::SortAsc(column) => format!("sort {column} asc"),
            Self::SortDesc(column) => format!("sort {column} desc"),
            Self::SortCleared => "sort cleared".to_owned(),
        }
    }
}

/// Notifications for the owner of the table. Page events are requests: the
/// caller decides whether and when to apply them to its [`Pagination`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    SearchChanged(String),
    PageChangeRequested(usize),
    PageSizeChangeRequested(NonZeroUsize),
}

impl TableState {
    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> Option<SortState> {
        self.sort
    }

    /// Resets search, sort and cursor when `key` names a different dataset.
    /// Returns whether a reset happened.
    pub fn sync_dataset(&mut self, key: DatasetKey) -> bool {
        if self.dataset.as_ref() == Some(&key) {
            return false;
        }
        *self = Self {
            dataset: Some(key),
            ..Self::default()
        };
        true
    }

    /// Sort selection cycle: a new column starts ascending, the active
    /// column flips direction.
    pub fn select_sort_column<R>(&mut self, columns: &[Column<'_, R>], id: &str) -> TableStatus {
        let Some(column) = columns.iter().find(|column| column.id == id) else {
            return TableStatus::SortUnavailable;
        };
        if !column.sortable {
            return TableStatus::SortUnavailable;
        }

        let direction = match self.sort {
            Some(sort) if sort.column == column.id => sort.direction.toggled(),
            _ => SortDirection::Asc,
        };
        self.sort = Some(SortState {
            column: column.id,
            direction,
        });
        match direction {
            SortDirection::Asc => TableStatus::SortAsc(column.header),
            SortDirection::Desc => TableStatus::SortDesc(column.header),
        }
    }

    pub fn clear_sort(&mut self) -> TableStatus {
        self.sort = None;
        TableStatus::SortCleared
    }

    pub fn set_search(&mut self, term: impl Into<String>) -> Vec<TableEvent> {
        let term = term.into();
        if term == self.search {
            return Vec::new();
        }
        self.search = term;
        self.selected_row = 0;
        vec![
            TableEvent::SearchChanged(self.search.clone()),
            TableEvent::PageChangeRequested(0),
        ]
    }

    pub fn push_search_char(&mut self, value: char) -> Vec<TableEvent> {
        let mut term = self.search.clone();
        term.push(value);
        self.set_search(term)
    }

    pub fn pop_search_char(&mut self) -> Vec<TableEvent> {
        let mut term = self.search.clone();
        term.pop();
        self.set_search(term)
    }

    pub fn clear_search(&mut self) -> Vec<TableEvent> {
        self.set_search(String::new())
    }

    pub fn move_row(&mut self, delta: isize, row_count: usize) {
        if row_count == 0 {
            self.selected_row = 0;
            return;
        }
        let next = if delta.is_negative() {
            self.selected_row.saturating_sub(delta.unsigned_abs())
        } else {
            self.selected_row.saturating_add(delta as usize)
        };
        self.selected_row = next.min(row_count - 1);
    }

    pub fn move_col(&mut self, delta: isize, column_count: usize) {
        if column_count == 0 {
            self.selected_col = 0;
            return;
        }
        let next = if delta.is_negative() {
            self.selected_col.saturating_sub(delta.unsigned_abs())
        } else {
            self.selected_col.saturating_add(delta as usize)
        };
        self.selected_col = next.min(column_count - 1);
    }

    pub fn clamp_cursor(&mut self, row_count: usize, column_count: usize) {
        self.selected_row = self.selected_row.min(row_count.saturating_sub(1));
        self.selected_col = self.selected_col.min(column_count.saturating_sub(1));
    }
}

/// Caller-owned page position. The engine reads it and answers with
/// [`TableEvent`] requests; it never writes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page_index: usize,
    pub page_size: NonZeroUsize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    pub const fn new(page_size: NonZeroUsize) -> Self {
        Self {
            page_index: 0,
            page_size,
        }
    }

    /// Applies a page notification. Returns whether anything changed.
    pub fn apply(&mut self, event: &TableEvent) -> bool {
        match event {
            TableEvent::PageChangeRequested(index) if *index != self.page_index => {
                self.page_index = *index;
                true
            }
            TableEvent::PageSizeChangeRequested(size) if *size != self.page_size => {
                self.page_size = *size;
                true
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageCommand {
    Next,
    Prev,
    First,
    Last,
    Goto(usize),
    SetSize(NonZeroUsize),
    GrowSize,
    ShrinkSize,
}

/// The "showing x to y of z" line under a paginated table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageSummary {
    pub first: usize,
    pub last: usize,
    pub total: usize,
}

impl fmt::Display for PageSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Showing {} to {} of {} results",
            self.first, self.last, self.total
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderCell {
    pub id: &'static str,
    pub header: &'static str,
    pub sortable: bool,
    pub sort: Option<SortDirection>,
}

impl HeaderCell {
    pub fn label(&self) -> String {
        match self.sort {
            Some(direction) => format!("{} {}", self.header, direction.arrow()),
            None => self.header.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TableBody {
    Rows(Vec<Vec<Cell>>),
    Empty { message: &'static str, span: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedTable {
    pub headers: Vec<HeaderCell>,
    pub body: TableBody,
}

impl RenderedTable {
    pub fn row_count(&self) -> usize {
        match &self.body {
            TableBody::Rows(rows) => rows.len(),
            TableBody::Empty { .. } => 0,
        }
    }
}

/// Records and columns for one render, plus the caller's pagination.
pub struct DataTable<'a, R> {
    records: &'a [R],
    columns: Vec<Column<'a, R>>,
    pagination: Option<Pagination>,
}

impl<'a, R: Record> DataTable<'a, R> {
    pub fn new(records: &'a [R], columns: Vec<Column<'a, R>>) -> Self {
        Self {
            records,
            columns,
            pagination: None,
        }
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub fn columns(&self) -> &[Column<'a, R>] {
        &self.columns
    }

    pub fn pagination(&self) -> Option<Pagination> {
        self.pagination
    }

    /// Sort selection by column position, as driven by a header cursor.
    pub fn select_sort_at(&self, state: &mut TableState, index: usize) -> TableStatus {
        match self.columns.get(index) {
            Some(column) => state.select_sort_column(&self.columns, column.id),
            None => TableStatus::SortUnavailable,
        }
    }

    /// Filter, sort, then slice.
    pub fn view(&self, state: &TableState) -> TableView<'a, R> {
        let mut rows = filter_records(self.records, &self.columns, state.search());
        if let Some(sort) = state.sort() {
            sort_records(&mut rows, &sort);
        }
        let filtered_len = rows.len();

        let pager = match self.pagination {
            Some(pagination) => {
                let count = page_count(filtered_len, pagination.page_size);
                Pager {
                    filtered_len,
                    page_index: clamp_page_index(pagination.page_index, count),
                    page_count: count,
                    page_size: Some(pagination.page_size),
                    requested_page: pagination.page_index,
                }
            }
            None => Pager {
                filtered_len,
                page_index: 0,
                page_count: usize::from(filtered_len > 0),
                page_size: None,
                requested_page: 0,
            },
        };
        if let Some(size) = pager.page_size {
            rows = paginate(&rows, pager.page_index, size).to_vec();
        }

        TableView {
            rows,
            total_len: self.records.len(),
            pager,
            sort: state.sort(),
        }
    }

    pub fn render(&self, state: &TableState) -> RenderedTable {
        self.render_view(&self.view(state))
    }

    /// Invokes every projection for every visible record; nothing is cached.
    pub fn render_view(&self, view: &TableView<'a, R>) -> RenderedTable {
        let headers = self
            .columns
            .iter()
            .map(|column| HeaderCell {
                id: column.id,
                header: column.header,
                sortable: column.sortable,
                sort: view
                    .sort
                    .filter(|sort| sort.column == column.id)
                    .map(|sort| sort.direction),
            })
            .collect();

        let body = if view.rows.is_empty() {
            TableBody::Empty {
                message: EMPTY_PLACEHOLDER,
                span: self.columns.len(),
            }
        } else {
            TableBody::Rows(
                view.rows
                    .iter()
                    .map(|record| {
                        self.columns
                            .iter()
                            .map(|column| column.cell(record))
                            .collect()
                    })
                    .collect(),
            )
        };

        RenderedTable { headers, body }
    }
}

/// Result of one filter → sort → paginate pass.
#[derive(Debug)]
pub struct TableView<'a, R> {
    rows: Vec<&'a R>,
    pub total_len: usize,
    pub pager: Pager,
    sort: Option<SortState>,
}

impl<'a, R> TableView<'a, R> {
    pub fn rows(&self) -> &[&'a R] {
        &self.rows
    }

    pub fn sort(&self) -> Option<SortState> {
        self.sort
    }
}

/// Page position of one computed view. Detached from the rows so callers
/// that erase the record type can still drive navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pager {
    pub filtered_len: usize,
    pub page_index: usize,
    pub page_count: usize,
    pub page_size: Option<NonZeroUsize>,
    requested_page: usize,
}

impl Pager {
    pub fn is_paginated(&self) -> bool {
        self.page_size.is_some()
    }

    /// A correction for the caller when its page index fell outside the
    /// page count computed for the current filter.
    pub fn resync_event(&self) -> Option<TableEvent> {
        (self.is_paginated() && self.requested_page != self.page_index)
            .then_some(TableEvent::PageChangeRequested(self.page_index))
    }

    pub fn summary(&self) -> PageSummary {
        if self.filtered_len == 0 {
            return PageSummary {
                first: 0,
                last: 0,
                total: 0,
            };
        }
        let size = self
            .page_size
            .map(NonZeroUsize::get)
            .unwrap_or(self.filtered_len);
        PageSummary {
            first: self.page_index * size + 1,
            last: ((self.page_index + 1) * size).min(self.filtered_len),
            total: self.filtered_len,
        }
    }

    pub fn window(&self) -> Vec<usize> {
        page_window(self.page_index, self.page_count)
    }

    pub fn can_go_prev(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.page_index + 1 < self.page_count
    }

    /// Translates page navigation into notifications. Unpaginated views and
    /// moves that would not change anything produce no events.
    pub fn request(&self, command: PageCommand) -> Vec<TableEvent> {
        let Some(size) = self.page_size else {
            return Vec::new();
        };

        let target = match command {
            PageCommand::Next => self.can_go_next().then(|| self.page_index + 1),
            PageCommand::Prev => self.can_go_prev().then(|| self.page_index - 1),
            PageCommand::First => Some(0),
            PageCommand::Last => Some(self.page_count.saturating_sub(1)),
            PageCommand::Goto(index) => (index < self.page_count).then_some(index),
            PageCommand::SetSize(next) => return self.resize(size, next),
            PageCommand::GrowSize => {
                return match next_page_size(size) {
                    Some(next) => self.resize(size, next),
                    None => Vec::new(),
                };
            }
            PageCommand::ShrinkSize => {
                return match prev_page_size(size) {
                    Some(next) => self.resize(size, next),
                    None => Vec::new(),
                };
            }
        };

        match target {
            Some(index) if index != self.page_index => {
                vec![TableEvent::PageChangeRequested(index)]
            }
            _ => Vec::new(),
        }
    }

    fn resize(&self, current: NonZeroUsize, next: NonZeroUsize) -> Vec<TableEvent> {
        if current == next {
            return Vec::new();
        }
        // Keep the first row of the current page on screen.
        let first_row = self.page_index * current.get();
        vec![
            TableEvent::PageSizeChangeRequested(next),
            TableEvent::PageChangeRequested(first_row / next.get()),
        ]
    }
}

/// Whole-record, case-insensitive substring search. When any column is
/// flagged filterable, only the fields those columns name are searched.
pub fn filter_records<'r, R: Record>(
    records: &'r [R],
    columns: &[Column<'_, R>],
    term: &str,
) -> Vec<&'r R> {
    if term.is_empty() {
        return records.iter().collect();
    }

    let needle = term.to_lowercase();
    let scoped = columns
        .iter()
        .filter(|column| column.filterable)
        .map(|column| column.id)
        .collect::<Vec<_>>();

    records
        .iter()
        .filter(|record| {
            let values = if scoped.is_empty() {
                record.field_values()
            } else {
                scoped.iter().filter_map(|id| record.field(id)).collect()
            };
            values
                .iter()
                .filter_map(FieldValue::search_text)
                .any(|text| text.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Stable sort on the field named by the sort column. Missing and null
/// values go last in either direction.
pub fn sort_records<R: Record>(rows: &mut [&R], sort: &SortState) {
    rows.sort_by(|left, right| {
        let left = left.field(sort.column).unwrap_or(FieldValue::Null);
        let right = right.field(sort.column).unwrap_or(FieldValue::Null);
        match (left.is_null(), right.is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => match sort.direction {
                SortDirection::Asc => left.compare(&right),
                SortDirection::Desc => left.compare(&right).reverse(),
            },
        }
    });
}

pub fn page_count(len: usize, page_size: NonZeroUsize) -> usize {
    len.div_ceil(page_size.get())
}

pub fn clamp_page_index(index: usize, page_count: usize) -> usize {
    index.min(page_count.saturating_sub(1))
}

/// The `[index * size, (index + 1) * size)` slice, truncated at the end.
pub fn paginate<T>(rows: &[T], page_index: usize, page_size: NonZeroUsize) -> &[T] {
    let start = page_index.saturating_mul(page_size.get()).min(rows.len());
    let end = start.saturating_add(page_size.get()).min(rows.len());
    &rows[start..end]
}

/// Up to five page numbers around `page_index`, pinned to either end.
pub fn page_window(page_index: usize, page_count: usize) -> Vec<usize> {
    let width = page_count.min(PAGE_WINDOW);
    let start = if page_index < 2 {
        0
    } else if page_index + 3 > page_count {
        page_count.saturating_sub(PAGE_WINDOW)
    } else {
        page_index - 2
    };
    (start..start + width).filter(|page| *page < page_count).collect()
}

fn next_page_size(current: NonZeroUsize) -> Option<NonZeroUsize> {
    PAGE_SIZE_OPTIONS
        .into_iter()
        .find(|size| *size > current.get())
        .and_then(NonZeroUsize::new)
}

fn prev_page_size(current: NonZeroUsize) -> Option<NonZeroUsize> {
    PAGE_SIZE_OPTIONS
        .into_iter()
        .rev()
        .find(|size| *size < current.get())
        .and_then(NonZeroUsize::new)
}
