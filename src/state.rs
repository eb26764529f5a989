use std::path::Path;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::data::cache::TableCache;
use crate::data::filter::FilterParams;
use crate::data::loader::{Loaded, Source};
use crate::data::view::DashboardView;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    NameTrends,
    DatasetOverview,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: AppConfig,

    /// Load results for this session, keyed by source.
    pub cache: TableCache,

    /// Source currently displayed.
    pub source: Source,

    /// Loaded data (None when the last load failed).
    pub loaded: Option<Arc<Loaded>>,

    /// Fatal load message; when set, nothing downstream is computed.
    pub load_error: Option<String>,

    /// Current sidebar selection.
    pub params: FilterParams,

    /// Derived views for `params` (cached until the selection changes).
    pub view: Option<DashboardView>,

    /// Selection `view` was computed for.
    view_params: Option<FilterParams>,

    pub tab: Tab,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let mut state = Self {
            source: config.source.clone(),
            params: config.initial_params(u64::MAX),
            config,
            cache: TableCache::new(),
            loaded: None,
            load_error: None,
            view: None,
            view_params: None,
            tab: Tab::default(),
            status_message: None,
        };
        state.load_current();
        state
    }

    /// Load (or fetch from cache) the current source and reset the sidebar.
    pub fn load_current(&mut self) {
        self.view = None;
        self.view_params = None;

        match self.cache.get_or_load(&self.source) {
            Ok(loaded) => {
                self.params = self.config.initial_params(loaded.table.max_births());
                self.load_error = None;
                self.status_message = None;
                self.loaded = Some(loaded);
                self.refresh_view();
            }
            Err(e) => {
                self.loaded = None;
                self.load_error = Some(e.to_string());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    pub fn open_source(&mut self, source: Source) {
        self.source = source;
        self.load_current();
    }

    pub fn open_path(&mut self, path: &Path) {
        self.open_source(Source::from_path(path));
    }

    /// Drop the cached table for the current source and read it again.
    pub fn reload(&mut self) {
        self.cache.invalidate(&self.source);
        self.load_current();
    }

    /// Recompute derived views if the selection changed since last time.
    pub fn refresh_view(&mut self) {
        let Some(loaded) = &self.loaded else {
            return;
        };
        if self.view.is_some() && self.view_params.as_ref() == Some(&self.params) {
            return;
        }
        self.view = Some(DashboardView::compute(&loaded.table, &self.params));
        self.view_params = Some(self.params.clone());
    }

    /// Upper bound for the range sliders.
    pub fn max_births(&self) -> u64 {
        self.loaded
            .as_ref()
            .map(|l| l.table.max_births())
            .unwrap_or(0)
    }

    /// Human-readable per-file failures from a directory load.
    pub fn skipped_files(&self) -> Vec<String> {
        self.loaded
            .as_ref()
            .map(|l| l.skipped.iter().map(|f| f.to_string()).collect())
            .unwrap_or_default()
    }
}
