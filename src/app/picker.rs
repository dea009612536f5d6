use super::coordinator::{NavEvent, NavOutcome, SelectionCoordinator};
use crate::config::Config;
use crate::model::dir_size::{self, DirSize};
use crate::model::filesystem::FileSystem;
use crate::services::clipboard::Clipboard;
use crate::services::download::{self, DownloadHandle, DownloadOutcome, DownloadRequest, Downloader, HttpDownloader};
use crate::services::opener::{FolderOpener, SystemOpener};
use crate::view::controls::text_input::TextInputLayout;
use crate::view::controls::TextInputState;
use crate::view::file_tree::{node, DirectoryTreeAdapter, DirectoryTreeView};
use crate::view::theme::Theme;
use ratatui::layout::Rect;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Which surface receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Tree,
    List,
    Path,
    Url,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Tree => Focus::List,
            Focus::List => Focus::Path,
            Focus::Path => Focus::Url,
            Focus::Url => Focus::Tree,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Tree => Focus::Url,
            Focus::List => Focus::Tree,
            Focus::Path => Focus::List,
            Focus::Url => Focus::Path,
        }
    }
}

/// One line of feedback shown in the status bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// Screen areas from the last render, for mouse hit testing
#[derive(Debug, Clone, Copy, Default)]
pub(super) struct AppLayout {
    pub tree: Rect,
    pub list: Rect,
    pub path: TextInputLayout,
    pub url: TextInputLayout,
}

/// A click remembered for double-click detection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct LastClick {
    pub focus: Focus,
    pub row: usize,
    pub at: Instant,
}

/// The picker: navigation surfaces, URL field, download and status
pub struct App {
    pub(super) config: Config,
    pub(super) theme: Theme,
    pub(super) fs: Arc<dyn FileSystem>,
    pub(super) nav: SelectionCoordinator,
    pub(super) url_field: TextInputState,
    pub(super) focus: Focus,
    pub(super) status: Option<StatusMessage>,
    pub(super) clipboard: Clipboard,
    pub(super) downloader: Arc<dyn Downloader>,
    pub(super) opener: Arc<dyn FolderOpener>,
    pub(super) pending_download: Option<DownloadHandle>,
    pub(super) last_download: Option<(DownloadOutcome, DirSize)>,
    pub(super) layout: AppLayout,
    pub(super) last_click: Option<LastClick>,
    pub(super) chosen: Option<String>,
    pub(super) should_quit: bool,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("focus", &self.focus)
            .field("current_path", &self.nav.current_path())
            .field("url", &self.url_field.value())
            .field("status", &self.status)
            .field("downloading", &self.pending_download.is_some())
            .field("should_quit", &self.should_quit)
            .finish()
    }
}

impl App {
    /// Build the picker over `roots`. Nothing is selected until
    /// [`App::start_at`] is called.
    pub fn new(config: Config, fs: Arc<dyn FileSystem>, roots: Vec<String>) -> Self {
        let adapter = DirectoryTreeAdapter::new(fs.clone(), roots);
        let nav = SelectionCoordinator::new(DirectoryTreeView::new(adapter));
        let url_field =
            TextInputState::new("URL").with_placeholder(config.download.url_placeholder.as_str());
        let downloader = Arc::new(HttpDownloader::new(
            Duration::from_secs(config.download.timeout_secs),
            &config.download.user_agent,
        ));

        let mut app = Self {
            theme: Theme::from_name(&config.theme),
            config,
            fs,
            nav,
            url_field,
            focus: Focus::Tree,
            status: None,
            clipboard: Clipboard::new(),
            downloader,
            opener: Arc::new(SystemOpener),
            pending_download: None,
            last_download: None,
            layout: AppLayout::default(),
            last_click: None,
            chosen: None,
            should_quit: false,
        };
        app.set_focus(Focus::Tree);
        app
    }

    pub fn with_downloader(mut self, downloader: Arc<dyn Downloader>) -> Self {
        self.downloader = downloader;
        self
    }

    pub fn with_opener(mut self, opener: Arc<dyn FolderOpener>) -> Self {
        self.opener = opener;
        self
    }

    pub fn with_clipboard(mut self, clipboard: Clipboard) -> Self {
        self.clipboard = clipboard;
        self
    }

    /// Prefill the URL field
    pub fn set_url(&mut self, url: &str) {
        self.url_field.set_value(url);
    }

    /// Select and reveal `dir` in the tree
    pub fn start_at(&mut self, dir: &Path) {
        let dir = dir.to_string_lossy().into_owned();
        let outcome = self.nav.start_at(&dir);
        self.apply_outcome(outcome);
    }

    pub fn navigation(&self) -> &SelectionCoordinator {
        &self.nav
    }

    pub fn url(&self) -> &str {
        self.url_field.value()
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The file chosen by activating it in the list
    pub fn chosen(&self) -> Option<&str> {
        self.chosen.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn is_downloading(&self) -> bool {
        self.pending_download.is_some()
    }

    /// The last finished download and the size of its directory
    pub fn last_download(&self) -> Option<&(DownloadOutcome, DirSize)> {
        self.last_download.as_ref()
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.nav.path_field_mut().set_focused(focus == Focus::Path);
        self.url_field.set_focused(focus == Focus::Url);
    }

    pub(super) fn set_status(&mut self, status: StatusMessage) {
        if status.is_error {
            tracing::warn!("{}", status.text);
        } else {
            tracing::info!("{}", status.text);
        }
        self.status = Some(status);
    }

    pub(super) fn navigate(&mut self, event: NavEvent) {
        let outcome = self.nav.handle(event);
        self.apply_outcome(outcome);
    }

    pub(super) fn apply_outcome(&mut self, outcome: NavOutcome) {
        match outcome {
            NavOutcome::Settled => {}
            NavOutcome::Chosen(path) => {
                self.chosen = Some(path);
                self.should_quit = true;
            }
            NavOutcome::Unresolved(path) => {
                self.set_status(StatusMessage::error(format!("Cannot find {} in the tree", path)));
            }
        }
    }

    /// Insert text delivered by a bracketed paste
    pub fn paste_text(&mut self, text: &str) {
        match self.focus {
            Focus::Path => self.nav.path_field_mut().insert_str(text),
            _ => self.url_field.insert_str(text.trim()),
        }
    }

    /// Replace the URL with the clipboard contents
    pub fn paste_url(&mut self) {
        match self.clipboard.paste() {
            Ok(text) => {
                self.url_field.set_value(text);
                self.set_status(StatusMessage::info("Pasted URL from clipboard"));
            }
            Err(e) => self.set_status(StatusMessage::error(format!("Paste failed: {}", e))),
        }
    }

    /// Start downloading the URL into the directory in the path field
    pub fn start_download(&mut self) {
        if self.pending_download.is_some() {
            self.set_status(StatusMessage::error("A download is already running"));
            return;
        }

        let request = DownloadRequest {
            url: self.url_field.value().trim().to_string(),
            dir: PathBuf::from(self.nav.path_field().value()),
        };
        match download::spawn(self.downloader.clone(), request) {
            Ok(handle) => {
                let text = format!(
                    "Downloading {} into {}",
                    handle.request().url,
                    handle.request().dir.display()
                );
                self.pending_download = Some(handle);
                self.set_status(StatusMessage::info(text));
            }
            Err(e) => self.set_status(StatusMessage::error(format!("Download not started: {}", e))),
        }
    }

    /// Poll background work. Returns true when something changed on screen.
    pub fn process_async_messages(&mut self) -> bool {
        let Some(result) = self.pending_download.as_ref().and_then(|h| h.try_recv()) else {
            return false;
        };
        self.pending_download = None;
        self.finish_download(result);
        true
    }

    /// Block until the running download reports (headless use and tests)
    pub fn wait_for_download(&mut self) {
        if let Some(handle) = self.pending_download.take() {
            let result = handle.wait();
            self.finish_download(result);
        }
    }

    fn finish_download(&mut self, result: download::DownloadResult) {
        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => {
                self.set_status(StatusMessage::error(format!("Download failed: {}", e)));
                return;
            }
        };

        let size = dir_size::total_size(&outcome.dir);
        let text = format!(
            "Saved {} ({}); {} now holds {}",
            outcome.file.display(),
            dir_size::format_size(outcome.bytes_written),
            outcome.dir.display(),
            size
        );
        let status = if size.is_complete() {
            StatusMessage::info(text)
        } else {
            StatusMessage::error(text)
        };
        self.set_status(status);

        // Show the new file if its directory is on screen
        let dir = outcome.dir.to_string_lossy().into_owned();
        if let Some(selected) = self.nav.tree().get_selected().map(str::to_string) {
            if node::same_path(&selected, &dir) {
                self.navigate(NavEvent::TreeSelected(selected));
            }
        }
        self.last_download = Some((outcome, size));
    }

    /// Open the path field's directory (the parent when it names a file)
    pub fn open_folder(&mut self) {
        let text = self.nav.path_field().value().to_string();
        if text.is_empty() {
            self.set_status(StatusMessage::error("No folder selected"));
            return;
        }

        let path = PathBuf::from(&text);
        let dir = if self.fs.is_dir(&path).unwrap_or(false) {
            path
        } else {
            match path.parent() {
                Some(parent) => parent.to_path_buf(),
                None => path,
            }
        };

        match self.opener.open_folder(&dir) {
            Ok(()) => self.set_status(StatusMessage::info(format!("Opened {}", dir.display()))),
            Err(e) => self.set_status(StatusMessage::error(format!(
                "Cannot open {}: {}",
                dir.display(),
                e
            ))),
        }
    }

    pub(super) fn double_click_window(&self) -> Duration {
        Duration::from_millis(self.config.mouse.double_click_ms)
    }
}
