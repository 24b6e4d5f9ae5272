//! Dashboard renderer
//!
//! Owns all UI state plus the remote data and preference stores. Fetch
//! results arrive on the store's channel and are drained between frames, so
//! every state change happens on the event loop thread.

use std::io;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use adboard_runtime::{FetchOutcome, PreferenceStore, RemoteDataStore, ReportApi};
use adboard_types::{DateRange, FilterState, SortSpec};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Layout},
};

use crate::presentation::components::{
    ColumnPickerAction, ColumnPickerComponent, DateRangeAction, DateRangeComponent,
    ReportTableComponent, TableAction,
};
use crate::presentation::view_models::{ReportViewModel, StatusBarViewModel};
use crate::presentation::views::tui::StatusBarView;

/// Which part of the screen receives plain keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Table,
    DateRange,
}

pub struct TuiRenderer<A: ReportApi> {
    store: RemoteDataStore<A>,
    outcomes: Receiver<FetchOutcome>,
    preferences: PreferenceStore,
    sort: SortSpec,
    filter: FilterState,

    focus: Focus,
    table: ReportTableComponent,
    dates: DateRangeComponent,
    picker: ColumnPickerComponent,

    report: ReportViewModel,
    status: StatusBarViewModel,
    should_quit: bool,
}

impl<A: ReportApi> TuiRenderer<A> {
    /// Build the renderer and issue the initial load for `range`
    pub fn new(
        mut store: RemoteDataStore<A>,
        outcomes: Receiver<FetchOutcome>,
        range: DateRange,
    ) -> Self {
        store.load(range);

        let preferences = PreferenceStore::new();
        let snapshot = store.snapshot();
        let report = ReportViewModel::build(
            snapshot.range,
            snapshot.rows(),
            snapshot.apps(),
            &preferences.current(),
            &FilterState::default(),
            &SortSpec::unsorted(),
        );
        let status = StatusBarViewModel::from_snapshot(&snapshot, report.rows.len());

        Self {
            store,
            outcomes,
            preferences,
            sort: SortSpec::unsorted(),
            filter: FilterState::default(),
            focus: Focus::Table,
            table: ReportTableComponent::new(),
            dates: DateRangeComponent::new(range),
            picker: ColumnPickerComponent::new(),
            report,
            status,
            should_quit: false,
        }
    }

    pub fn report(&self) -> &ReportViewModel {
        &self.report
    }

    pub fn status(&self) -> &StatusBarViewModel {
        &self.status
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn store(&self) -> &RemoteDataStore<A> {
        &self.store
    }

    pub fn dates(&self) -> &DateRangeComponent {
        &self.dates
    }

    pub fn is_quitting(&self) -> bool {
        self.should_quit
    }

    pub fn run(mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if event::poll(Duration::from_millis(100))?
                && let Event::Key(key) = event::read()?
            {
                self.handle_key_event(key);
            }

            self.poll_outcomes();

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Apply finished fetches; true if anything changed
    pub fn poll_outcomes(&mut self) -> bool {
        if self.store.drain(&self.outcomes) == 0 {
            return false;
        }
        self.refresh();
        true
    }

    /// Rebuild the table and status bar from current inputs
    fn refresh(&mut self) {
        let snapshot = self.store.snapshot();
        self.report = ReportViewModel::build(
            snapshot.range,
            snapshot.rows(),
            snapshot.apps(),
            &self.preferences.current(),
            &self.filter,
            &self.sort,
        );
        self.status = StatusBarViewModel::from_snapshot(&snapshot, self.report.rows.len());
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        // Overlays first, most blocking on top
        if self.dates.is_blocking() {
            self.dates.handle_input(key);
            return;
        }

        if self.picker.is_open() {
            match self.picker.handle_input(key) {
                Some(ColumnPickerAction::Apply(preference)) => {
                    self.preferences.commit(preference);
                    self.refresh();
                }
                Some(ColumnPickerAction::Reset) => {
                    self.preferences.reset();
                    self.refresh();
                }
                None => {}
            }
            return;
        }

        if self.table.is_popup_open() {
            self.handle_table_input(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('c') => {
                self.picker.open(&self.preferences.current());
                return;
            }
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Focus::Table => Focus::DateRange,
                    Focus::DateRange => Focus::Table,
                };
                return;
            }
            _ => {}
        }

        match self.focus {
            Focus::Table => self.handle_table_input(key),
            Focus::DateRange => {
                if let Some(DateRangeAction::Load(range)) = self.dates.handle_input(key) {
                    self.store.load(range);
                    self.refresh();
                }
            }
        }
    }

    fn handle_table_input(&mut self, key: KeyEvent) {
        if let Some(TableAction { sort, filter }) = self.table.handle_input(key, &self.report) {
            self.sort = sort;
            if let Some(filter) = filter {
                self.filter = filter;
            }
            self.refresh();
        }
    }

    pub fn render(&mut self, f: &mut Frame) {
        let [dates_area, table_area, status_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .areas(f.area());

        self.dates.render(f, dates_area, self.focus == Focus::DateRange);
        self.table.render(f, table_area, &self.report, self.focus == Focus::Table);
        f.render_widget(StatusBarView::new(&self.status), status_area);

        let full = f.area();
        self.table.render_popup(f, full);
        self.picker.render(f, full);
        self.dates.render_modal(f, full);
    }
}
