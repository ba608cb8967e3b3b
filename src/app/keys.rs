//! Keyboard handling.
//!
//! | Key | Action |
//! |-----|--------|
//! | `q`, `Ctrl+C` | quit |
//! | `↑`/`k`, `↓`/`j` | move in the recent list |
//! | `Enter` | show the highlighted detection |
//! | `l` | live camera view |
//! | `1`-`5` | set the device display mode |
//! | `d` | edit the device id |
//! | `r` | reset counters |
//! | `C` then `y` | clear all history |
//! | `x` | clear the activity log |
//! | `R` | reload the initial snapshot |

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::App;
use crate::engine::LogLevel;
use crate::models::DisplayMode;
use crate::traits::HttpClient;

/// What keystrokes currently mean.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Waiting for `y` to confirm clearing history.
    ConfirmClear,
    /// Editing the device id; holds the text typed so far.
    DeviceEntry(String),
}

impl<H: HttpClient + Clone + 'static> App<H> {
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return;
        }

        match std::mem::take(&mut self.mode) {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::ConfirmClear => {
                if matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')) {
                    self.spawn_clear_history();
                } else {
                    self.dashboard.note(LogLevel::Info, "Clear history cancelled");
                }
            }
            InputMode::DeviceEntry(text) => self.handle_device_key(key, text),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.cursor = self.cursor.saturating_add(1);
                self.clamp_cursor();
            }
            KeyCode::Enter => {
                self.dashboard.select_index(self.cursor);
            }
            KeyCode::Char('l') => self.dashboard.live_camera_mode(),
            KeyCode::Char('r') => self.dashboard.reset_counters(),
            KeyCode::Char('x') => self.dashboard.clear_logs(),
            KeyCode::Char('R') => self.spawn_initial_load(),
            KeyCode::Char('C') => {
                self.mode = InputMode::ConfirmClear;
                self.dashboard.note(
                    LogLevel::Warning,
                    "Clear ALL history (database, images, counters)? Press y to confirm",
                );
            }
            KeyCode::Char('d') => {
                self.mode = InputMode::DeviceEntry(self.device_id.clone().unwrap_or_default());
            }
            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                self.spawn_display_mode(DisplayMode::ALL[index]);
            }
            _ => {}
        }
    }

    fn handle_device_key(&mut self, key: KeyEvent, mut text: String) {
        match key.code {
            KeyCode::Enter => {
                let trimmed = text.trim();
                self.device_id = (!trimmed.is_empty()).then(|| trimmed.to_string());
            }
            KeyCode::Esc => {}
            KeyCode::Backspace => {
                text.pop();
                self.mode = InputMode::DeviceEntry(text);
            }
            KeyCode::Char(c) => {
                text.push(c);
                self.mode = InputMode::DeviceEntry(text);
            }
            _ => self.mode = InputMode::DeviceEntry(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::test_app;
    use super::super::AppMessage;
    use super::*;
    use crate::adapters::mock::MockResponse;
    use crate::engine::HistorySource;
    use serde_json::json;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn test_quit_keys() {
        let (mut app, _, _) = test_app();
        app.handle_key(press(KeyCode::Char('q')));
        assert!(app.should_quit);

        let (mut app, _, _) = test_app();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_clear_requires_confirmation() {
        let (mut app, http, _) = test_app();
        http.set_response(
            "http://gcs.test/api/clear-history",
            MockResponse::json(200, json!({"status": "ok"})),
        );
        let mut rx = app.take_message_rx().unwrap();

        app.handle_key(press(KeyCode::Char('C')));
        assert_eq!(app.mode, InputMode::ConfirmClear);
        app.handle_key(press(KeyCode::Char('n')));
        assert_eq!(app.mode, InputMode::Normal);
        assert!(!app.dashboard.is_clearing());

        app.handle_key(press(KeyCode::Char('C')));
        app.handle_key(press(KeyCode::Char('y')));
        assert!(app.dashboard.is_clearing());

        let message = rx.recv().await.unwrap();
        assert!(matches!(message, AppMessage::ClearHistoryFinished(Ok(()))));
        app.handle_message(message);
        assert!(!app.dashboard.is_clearing());
        assert_eq!(http.get_requests().len(), 1);
    }

    #[tokio::test]
    async fn test_device_entry() {
        let (mut app, _, _) = test_app();
        app.handle_key(press(KeyCode::Char('d')));
        for c in "rpi-0x".chars() {
            app.handle_key(press(KeyCode::Char(c)));
        }
        app.handle_key(press(KeyCode::Backspace));
        app.handle_key(press(KeyCode::Char('1')));
        app.handle_key(press(KeyCode::Enter));

        assert_eq!(app.device_id.as_deref(), Some("rpi-01"));
        assert_eq!(app.mode, InputMode::Normal);
    }

    #[tokio::test]
    async fn test_display_mode_key_posts_to_device() {
        let (mut app, http, _) = test_app();
        http.set_default_response(MockResponse::json(200, json!({"status": "ok"})));
        app.device_id = Some("rpi-01".to_string());
        let mut rx = app.take_message_rx().unwrap();

        app.handle_key(press(KeyCode::Char('3')));
        match rx.recv().await.unwrap() {
            AppMessage::DisplayModeFinished { mode, result, .. } => {
                assert_eq!(mode, DisplayMode::Targets);
                assert!(result.is_ok());
            }
            other => panic!("unexpected message: {:?}", other),
        }
        assert_eq!(
            http.get_requests()[0].url,
            "http://gcs.test/api/device/rpi-01/display"
        );
    }

    #[tokio::test]
    async fn test_navigation_and_select() {
        let (mut app, _, _) = test_app();
        app.handle_message(AppMessage::RecentHistory {
            source: HistorySource::RecentDetections,
            result: Ok(crate::engine::normalize_all(&json!([
                {"type": "valve", "ts": 1},
                {"type": "gauge", "ts": 2}
            ]))),
        });

        app.handle_key(press(KeyCode::Down));
        app.handle_key(press(KeyCode::Down));
        assert_eq!(app.cursor, 1);
        app.handle_key(press(KeyCode::Enter));
        assert!(app.dashboard.recent().get(1).unwrap().active);

        app.handle_key(press(KeyCode::Char('l')));
        assert!(app.dashboard.frame().is_live());
        assert!(app.dashboard.recent().selected().is_none());
    }
}
