use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};

use crate::audio::Chime;
use crate::panels::{KeyHandleResult, TasksPanel};
use crate::storage::{JsonStore, StorageError, TASKS_KEY, WIDTH_KEY};
use crate::task_list::TaskList;
use crate::ui::clamp_width;

/// Width used when nothing usable is stored
pub const DEFAULT_WIDTH: u16 = 48;
/// Columns added or removed per resize keypress
const WIDTH_STEP: u16 = 2;

pub struct App {
    pub should_quit: bool,
    pub tasks: TaskList,
    pub panel: TasksPanel,
    pub help_visible: bool,
    pub error: Option<String>,
    store: JsonStore,
    chime: Option<Chime>,
    requested_width: u16,
    rendered_width: u16,
    terminal_width: u16,
}

impl App {
    pub fn new(store: JsonStore, placeholder: &'static str, chime: Option<Chime>) -> Self {
        let tasks = restore_tasks(&store);
        let requested_width = store
            .get(WIDTH_KEY)
            .and_then(|raw| raw.trim().parse::<u16>().ok())
            .filter(|width| *width > 0)
            .unwrap_or(DEFAULT_WIDTH);

        tracing::info!(
            filled = tasks.filled_count(),
            width = requested_width,
            "widget restored"
        );

        Self {
            should_quit: false,
            tasks,
            panel: TasksPanel::new(placeholder),
            help_visible: false,
            error: None,
            store,
            chime,
            requested_width,
            rendered_width: requested_width,
            terminal_width: requested_width,
        }
    }

    pub fn rendered_width(&self) -> u16 {
        self.rendered_width
    }

    /// Observe the terminal width after a resize (or at startup).
    pub fn on_resize(&mut self, terminal_width: u16) {
        self.terminal_width = terminal_width;
        self.rendered_width = clamp_width(self.requested_width, terminal_width);
        tracing::debug!(
            terminal_width,
            rendered_width = self.rendered_width,
            "widget resized"
        );
    }

    pub fn report_error(&mut self, message: String) {
        tracing::error!(error = message.as_str(), "reported to user");
        self.error = Some(message);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Any key dismisses the error overlay
        if self.error.take().is_some() {
            return;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => {
                self.should_quit = true;
                return;
            }
            KeyCode::F(1) => {
                self.help_visible = !self.help_visible;
                return;
            }
            KeyCode::Esc if self.help_visible => {
                self.help_visible = false;
                return;
            }
            KeyCode::Left if ctrl => {
                self.resize_by(-i32::from(WIDTH_STEP));
                return;
            }
            KeyCode::Right if ctrl => {
                self.resize_by(i32::from(WIDTH_STEP));
                return;
            }
            _ => {}
        }

        if self.help_visible {
            return;
        }

        let result = self.panel.handle_key(key, &mut self.tasks);
        if result == KeyHandleResult::Ignored && key.code == KeyCode::Esc {
            self.should_quit = true;
            return;
        }
        self.apply(result);
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.error.is_some() || self.help_visible {
            return;
        }
        let result = self.panel.handle_mouse(mouse, &mut self.tasks);
        self.apply(result);
    }

    /// Persist the rendered width. Called once when the app exits.
    pub fn unload(&mut self) {
        if let Err(e) = self.store.set(WIDTH_KEY, self.rendered_width.to_string()) {
            tracing::error!(error = %e, "could not save widget width");
        }
        tracing::info!(width = self.rendered_width, "widget unloaded");
    }

    fn apply(&mut self, result: KeyHandleResult) {
        match result {
            KeyHandleResult::Changed => self.save_tasks(),
            KeyHandleResult::Completed => {
                self.save_tasks();
                if let Some(ref chime) = self.chime {
                    chime.play();
                }
            }
            KeyHandleResult::Consumed | KeyHandleResult::Ignored => {}
        }
    }

    fn save_tasks(&mut self) {
        let result = serde_json::to_string(&self.tasks)
            .map_err(StorageError::from)
            .and_then(|json| self.store.set(TASKS_KEY, json));
        if let Err(e) = result {
            self.report_error(format!("Could not save tasks: {e}"));
        }
    }

    fn resize_by(&mut self, delta: i32) {
        let target = (i32::from(self.rendered_width) + delta).clamp(0, i32::from(u16::MAX));
        self.requested_width = clamp_width(target as u16, self.terminal_width);
        self.rendered_width = self.requested_width;
    }

    #[cfg(test)]
    fn store(&self) -> &JsonStore {
        &self.store
    }
}

fn restore_tasks(store: &JsonStore) -> TaskList {
    let Some(raw) = store.get(TASKS_KEY) else {
        return TaskList::default();
    };
    serde_json::from_str(raw).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "stored tasks unreadable, starting empty");
        TaskList::default()
    })
}
