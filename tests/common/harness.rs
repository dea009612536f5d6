// Picker test harness: a real App over a fixture tree, rendered to a TestBackend

use super::fixtures::TestFixture;
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use paraload::app::App;
use paraload::config::Config;
use paraload::model::filesystem::StdFileSystem;
use paraload::services::clipboard::Clipboard;
use paraload::services::download::{
    file_name_from_url, DownloadError, DownloadOutcome, DownloadRequest, DownloadResult,
    Downloader,
};
use paraload::services::opener::FolderOpener;
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Writes a fixed body instead of talking to the network
pub struct FakeDownloader {
    pub body: Vec<u8>,
    pub fail: bool,
}

impl FakeDownloader {
    pub fn new(body: &[u8]) -> Self {
        Self {
            body: body.to_vec(),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            body: Vec::new(),
            fail: true,
        }
    }
}

impl Downloader for FakeDownloader {
    fn download(&self, request: &DownloadRequest) -> DownloadResult {
        if self.fail {
            return Err(DownloadError::Http("503 Service Unavailable".to_string()));
        }
        let file = request.dir.join(file_name_from_url(&request.url));
        std::fs::write(&file, &self.body)?;
        Ok(DownloadOutcome {
            url: request.url.clone(),
            file,
            dir: request.dir.clone(),
            bytes_written: self.body.len() as u64,
        })
    }
}

/// Remembers which folders were opened
#[derive(Default)]
pub struct RecordingOpener {
    pub opened: Mutex<Vec<PathBuf>>,
    pub fail: bool,
}

impl FolderOpener for RecordingOpener {
    fn open_folder(&self, path: &Path) -> io::Result<()> {
        if self.fail {
            return Err(io::Error::other("no file manager"));
        }
        self.opened.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}

/// Collaborators swapped into the picker under test
pub struct HarnessOptions {
    pub downloader: FakeDownloader,
    pub clipboard: Clipboard,
    pub opener_fails: bool,
    pub config: Config,
}

impl Default for HarnessOptions {
    fn default() -> Self {
        Self {
            downloader: FakeDownloader::new(b"downloaded bytes"),
            clipboard: Clipboard::with_fixed_text("https://example.com/files/report"),
            opener_fails: false,
            config: Config::default(),
        }
    }
}

pub struct PickerTestHarness {
    pub fixture: TestFixture,
    pub opener: Arc<RecordingOpener>,
    app: App,
    terminal: Terminal<TestBackend>,
}

impl PickerTestHarness {
    /// Picker over the standard fixture, started at its root
    pub fn new(width: u16, height: u16) -> io::Result<Self> {
        Self::with_options(TestFixture::standard()?, HarnessOptions::default(), width, height)
    }

    pub fn with_options(
        fixture: TestFixture,
        options: HarnessOptions,
        width: u16,
        height: u16,
    ) -> io::Result<Self> {
        let opener = Arc::new(RecordingOpener {
            opened: Mutex::new(Vec::new()),
            fail: options.opener_fails,
        });
        let mut app = App::new(
            options.config,
            Arc::new(StdFileSystem),
            vec![fixture.root_string()],
        )
        .with_downloader(Arc::new(options.downloader))
        .with_opener(opener.clone())
        .with_clipboard(options.clipboard);
        app.start_at(&fixture.root);

        let terminal = Terminal::new(TestBackend::new(width, height))?;
        Ok(Self {
            fixture,
            opener,
            app,
            terminal,
        })
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    pub fn render(&mut self) -> io::Result<()> {
        let app = &mut self.app;
        self.terminal.draw(|frame| app.render(frame))?;
        Ok(())
    }

    pub fn send_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        self.app.handle_key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        });
    }

    pub fn press(&mut self, code: KeyCode) {
        self.send_key(code, KeyModifiers::NONE);
    }

    pub fn ctrl(&mut self, c: char) {
        self.send_key(KeyCode::Char(c), KeyModifiers::CONTROL);
    }

    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.press(KeyCode::Char(c));
        }
    }

    /// Left click at a screen cell with an explicit clock
    pub fn click_at(&mut self, col: u16, row: u16, now: Instant) -> bool {
        self.app.handle_mouse_at(
            MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column: col,
                row,
                modifiers: KeyModifiers::NONE,
            },
            now,
        )
    }

    pub fn scroll_at(&mut self, col: u16, row: u16, down: bool) -> bool {
        let kind = if down {
            MouseEventKind::ScrollDown
        } else {
            MouseEventKind::ScrollUp
        };
        self.app.handle_mouse(MouseEvent {
            kind,
            column: col,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    /// The rendered screen, one line per terminal row
    pub fn screen_to_string(&self) -> String {
        let buffer = self.terminal.backend().buffer();
        let area = buffer.area;
        let mut lines = Vec::with_capacity(area.height as usize);
        for y in 0..area.height {
            let mut line = String::new();
            for x in 0..area.width {
                line.push_str(buffer[(x, y)].symbol());
            }
            lines.push(line.trim_end().to_string());
        }
        lines.join("\n")
    }

    pub fn screen_row(&self, y: u16) -> String {
        self.screen_to_string()
            .lines()
            .nth(y as usize)
            .unwrap_or("")
            .to_string()
    }

    /// Screen row that contains `text`, if any
    pub fn find_row(&self, text: &str) -> Option<u16> {
        self.screen_to_string()
            .lines()
            .position(|line| line.contains(text))
            .map(|y| y as u16)
    }

    pub fn assert_screen_contains(&self, text: &str) {
        let screen = self.screen_to_string();
        assert!(
            screen.contains(text),
            "Expected screen to contain {:?}\nScreen:\n{}",
            text,
            screen
        );
    }

    pub fn assert_screen_not_contains(&self, text: &str) {
        let screen = self.screen_to_string();
        assert!(
            !screen.contains(text),
            "Expected screen not to contain {:?}\nScreen:\n{}",
            text,
            screen
        );
    }
}
