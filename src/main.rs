//! Zellij plugin wrapper and entry point.
//!
//! This is the thin integration layer between the Roster library and the
//! Zellij plugin system. It implements `ZellijPlugin`, translates keys, web
//! replies and timers into library [`Event`]s, and performs the resulting
//! [`Action`]s through Zellij host calls.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Key, Mouse, `WebRequestResult`, `Timer`, `PermissionRequestResult`
//! 3. **Permissions granted**: `Event::Ready` loads the employee list
//! 4. **Update**: Handle events, delegate to library layer, run actions
//! 5. **Render**: Call library render function
//!
//! # Keybindings
//!
//! Global:
//! - `Ctrl+n` / `Ctrl+p`: Move down / up
//!
//! List:
//! - `j`/`k`/arrows: Navigate, `Enter`: details, `/`: search
//! - `f`/`F`: Next/previous department, `c`: clear filters
//! - `a`: Add, `e`: Edit, `d`: Delete, `r`: Reload, `x`: dismiss toast, `q`: quit
//!
//! Detail:
//! - `e`: Edit, `d`: Delete, `r`: Reload, `ESC`: back
//!
//! Form:
//! - `Tab`/`Shift+Tab`/arrows: Move between fields, `←`/`→`: department
//! - `Enter`: Save, `ESC`: cancel
//!
//! Dialog:
//! - `y`/`Enter`: Confirm, `n`/`ESC`: cancel, `x`: dismiss toast
//!
//! Clicking a toast dismisses it.

#![allow(clippy::multiple_crate_versions)]

use std::collections::{BTreeMap, VecDeque};
use zellij_tile::prelude::*;

use roster::api::{ApiClient, ApiReply, ApiRequest, Method};
use roster::notifications::NotificationId;
use roster::{handle_event, Action, ApiError, Config, Event, InputMode, SearchFocus, View};

register_plugin!(State);

/// Plugin state wrapper.
///
/// Wraps the library's `AppState` with the API client used to turn requests
/// into Zellij web calls.
struct State {
    /// Core application state from library layer.
    app: roster::AppState,

    client: ApiClient,

    /// Pane size from the last render, for mapping mouse clicks.
    size: (usize, usize),
}

impl Default for State {
    fn default() -> Self {
        let default_config = Config::default();
        Self {
            app: roster::initialize(&default_config),
            client: ApiClient::new(default_config.api_url),
            size: (0, 0),
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, builds application state, requests permissions
    /// and subscribes to events. The first list load waits for permissions.
    ///
    /// # Permissions
    ///
    /// - `WebAccess`: Call the employee service
    /// - `ReadApplicationState`: Receive timer and permission events
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        roster::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(api_url = %config.api_url, "parsed configuration");
        self.app = roster::initialize(&config);
        self.client = ApiClient::new(config.api_url.as_str());

        request_permission(&[
            PermissionType::WebAccess,
            PermissionType::ReadApplicationState,
        ]);

        subscribe(&[
            EventType::Key,
            EventType::Mouse,
            EventType::WebRequestResult,
            EventType::Timer,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Translates a Zellij event and runs it through the library.
    ///
    /// Returns `true` if the plugin UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Mouse(Mouse::LeftClick(line, column)) => {
                match self.clicked_toast(line, column) {
                    Some(id) => Event::DismissToast(id),
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match ApiClient::parse_reply(status, &body, &context) {
                    Ok(reply) => Event::ApiReply(reply),
                    Err(e) => {
                        tracing::debug!(status, error = %e, "ignoring unrecognized web reply");
                        return false;
                    }
                }
            }
            zellij_tile::prelude::Event::Timer(_elapsed) => Event::Tick,
            zellij_tile::prelude::Event::PermissionRequestResult(permissions) => {
                match permissions {
                    PermissionStatus::Granted => {
                        tracing::debug!("permissions granted - loading employees");
                        Event::Ready
                    }
                    PermissionStatus::Denied => {
                        tracing::warn!("permissions denied - the employee service is unreachable");
                        return false;
                    }
                }
            }
            _ => return false,
        };

        self.dispatch(our_event)
    }

    fn render(&mut self, rows: usize, cols: usize) {
        self.size = (rows, cols);
        roster::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Runs `event` and every event its actions feed back.
    fn dispatch(&mut self, event: Event) -> bool {
        let mut should_render = false;
        let mut pending = VecDeque::from([event]);

        while let Some(event) = pending.pop_front() {
            match handle_event(&mut self.app, &event) {
                Ok((render, actions)) => {
                    tracing::debug!(action_count = actions.len(), render, "event handled");
                    should_render |= render;
                    for action in &actions {
                        pending.extend(self.execute_action(action));
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "error handling event");
                }
            }
        }

        should_render
    }

    /// Maps a 0-indexed click position onto the toast drawn there.
    fn clicked_toast(&self, line: isize, column: usize) -> Option<NotificationId> {
        let row = usize::try_from(line).ok()? + 1;
        let (rows, cols) = self.size;
        roster::ui::toast_at(&self.app, rows, cols, row, column + 1)
    }

    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::Mouse(..) => "Mouse".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events for the current view.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::trace!(bare_key = ?key.bare_key, "key event");

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::KeyDown),
                BareKey::Char('p') => Some(Event::KeyUp),
                _ => None,
            };
        }

        if self.app.dialog.is_some() {
            return match key.bare_key {
                BareKey::Char('y') | BareKey::Enter => Some(Event::Confirm),
                BareKey::Char('n') | BareKey::Esc => Some(Event::Cancel),
                BareKey::Char('x') => Some(Event::DismissNotification),
                _ => None,
            };
        }

        match self.app.view {
            View::List => self.map_list_key(key),
            View::Detail(_) => Self::map_detail_key(key),
            View::Form(_) => Self::map_form_key(key),
        }
    }

    fn map_list_key(&self, key: &KeyWithModifier) -> Option<Event> {
        Some(match (self.app.input_mode, key.bare_key) {
            (InputMode::Search(_), BareKey::Esc) => Event::ExitSearch,
            (InputMode::Search(SearchFocus::Typing), BareKey::Enter | BareKey::Down) => {
                Event::FocusResults
            }
            (InputMode::Search(SearchFocus::Navigating), BareKey::Char('/')) => {
                Event::FocusSearchBar
            }
            (InputMode::Search(SearchFocus::Navigating), BareKey::Char('j') | BareKey::Down)
            | (InputMode::Normal, BareKey::Char('j') | BareKey::Down) => Event::KeyDown,
            (InputMode::Search(SearchFocus::Navigating), BareKey::Char('k') | BareKey::Up)
            | (InputMode::Normal, BareKey::Char('k') | BareKey::Up) => Event::KeyUp,
            (InputMode::Search(_), BareKey::Backspace) => Event::Backspace,
            (InputMode::Search(_), BareKey::Char(c)) => Event::Char(c),
            (_, BareKey::Enter) => Event::Select,
            (_, BareKey::Right) => Event::CycleDepartment { forward: true },
            (_, BareKey::Left) => Event::CycleDepartment { forward: false },

            (InputMode::Normal, BareKey::Char('/')) => Event::SearchMode,
            (InputMode::Normal, BareKey::Char('f')) => Event::CycleDepartment { forward: true },
            (InputMode::Normal, BareKey::Char('F')) => Event::CycleDepartment { forward: false },
            (InputMode::Normal, BareKey::Char('c')) => Event::ClearFilters,
            (InputMode::Normal, BareKey::Char('a')) => Event::NewEmployee,
            (InputMode::Normal, BareKey::Char('e')) => Event::EditSelected,
            (InputMode::Normal, BareKey::Char('d')) => Event::DeleteSelected,
            (InputMode::Normal, BareKey::Char('r')) => Event::Reload,
            (InputMode::Normal, BareKey::Char('x')) => Event::DismissNotification,
            (InputMode::Normal, BareKey::Char('q')) => Event::CloseFocus,
            (InputMode::Normal, BareKey::Esc) => Event::Back,
            _ => return None,
        })
    }

    fn map_detail_key(key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Char('e') => Event::EditSelected,
            BareKey::Char('d') => Event::DeleteSelected,
            BareKey::Char('r') => Event::Reload,
            BareKey::Char('x') => Event::DismissNotification,
            BareKey::Char('q') => Event::CloseFocus,
            BareKey::Esc | BareKey::Backspace => Event::Back,
            _ => return None,
        })
    }

    fn map_form_key(key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Tab if key.has_modifiers(&[KeyModifier::Shift]) => Event::PrevField,
            BareKey::Tab | BareKey::Down => Event::NextField,
            BareKey::Up => Event::PrevField,
            BareKey::Right => Event::CycleDepartment { forward: true },
            BareKey::Left => Event::CycleDepartment { forward: false },
            BareKey::Enter => Event::Submit,
            BareKey::Esc => Event::Back,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        })
    }

    /// Performs an action through the Zellij API.
    ///
    /// Returns an event to feed back when the action fails before reaching
    /// the host, so the failure is reported like any other reply.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) -> Option<Event> {
        match action {
            Action::CloseFocus => {
                hide_self();
                None
            }
            Action::SendRequest(request) => self.send_request(request),
            Action::ScheduleTimer(after) => {
                set_timeout(after.as_secs_f64());
                None
            }
        }
    }

    fn send_request(&self, request: &ApiRequest) -> Option<Event> {
        match self.client.prepare(request) {
            Ok(call) => {
                let verb = match call.method {
                    Method::Get => HttpVerb::Get,
                    Method::Post => HttpVerb::Post,
                    Method::Put => HttpVerb::Put,
                    Method::Delete => HttpVerb::Delete,
                };
                web_request(call.url, verb, call.headers, call.body, call.context);
                None
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to prepare request");
                Some(Event::ApiReply(ApiReply {
                    tag: request.tag(),
                    outcome: Err(ApiError::Decode(e.to_string())),
                }))
            }
        }
    }
}
