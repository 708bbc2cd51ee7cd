//! View state and input translation for the terminal launcher.
//!
//! The view owns only what it needs to draw: the input line, the ids of the
//! rows on screen and the highlighted row. Every decision about filtering,
//! selection and execution belongs to the engine; the view turns terminal
//! input into `ViewEvent`s and applies the `SessionUpdate`s it gets back.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use quicklaunch_core::{
    CandidateId, Direction, EndReason, SelectionOrigin, SessionUpdate, ViewEvent,
};
use ratatui::layout::{Position, Rect};
use ratatui::widgets::ListState;
use tracing::debug;

pub struct App {
    pub input: String,
    pub items: Vec<CandidateId>,
    pub list_state: ListState,
    /// Inner area of the result list from the last draw, for mouse hit tests
    pub list_area: Rect,
    pub ended: Option<EndReason>,
}

impl App {
    #[must_use]
    pub fn new() -> Self {
        Self {
            input: String::new(),
            items: Vec::new(),
            list_state: ListState::default(),
            list_area: Rect::default(),
            ended: None,
        }
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.ended.is_some()
    }

    /// Apply an engine update to the view.
    ///
    /// Selection updates only move the highlight, whatever their origin.
    pub fn apply(&mut self, update: SessionUpdate) {
        match update {
            SessionUpdate::ListChanged { items } => {
                self.items = items;
                *self.list_state.offset_mut() = 0;
            }
            SessionUpdate::SelectionChanged { index, origin } => {
                if origin == SelectionOrigin::User {
                    debug!("User picked row {:?}", index);
                }
                self.list_state.select(index);
            }
            SessionUpdate::SessionEnded { reason } => {
                debug!("Session ended: {:?}", reason);
                self.ended = Some(reason);
            }
        }
    }

    /// Translate a key press into an engine event.
    pub fn on_key(&mut self, key: KeyEvent) -> Option<ViewEvent> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => Some(ViewEvent::Cancel),
            KeyCode::Char('c') if ctrl => Some(ViewEvent::Cancel),
            KeyCode::Enter => Some(ViewEvent::Confirm),
            KeyCode::Up => Some(move_event(Direction::Up)),
            KeyCode::Char('p') if ctrl => Some(move_event(Direction::Up)),
            KeyCode::Down => Some(move_event(Direction::Down)),
            KeyCode::Char('n') if ctrl => Some(move_event(Direction::Down)),
            KeyCode::Char('u') if ctrl => {
                if self.input.is_empty() {
                    return None;
                }
                self.input.clear();
                Some(self.query_event())
            }
            KeyCode::Backspace => {
                self.input.pop()?;
                Some(self.query_event())
            }
            KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                self.input.push(c);
                Some(self.query_event())
            }
            _ => None,
        }
    }

    /// Translate a mouse event into an engine event.
    ///
    /// A left click on a row is a direct user selection; the wheel navigates.
    pub fn on_mouse(&self, mouse: MouseEvent) -> Option<ViewEvent> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let position = Position::new(mouse.column, mouse.row);
                if !self.list_area.contains(position) {
                    return None;
                }
                let row = usize::from(mouse.row - self.list_area.y);
                let index = self.list_state.offset() + row;
                (index < self.items.len()).then_some(ViewEvent::Pick { index })
            }
            MouseEventKind::ScrollUp => Some(move_event(Direction::Up)),
            MouseEventKind::ScrollDown => Some(move_event(Direction::Down)),
            _ => None,
        }
    }

    fn query_event(&self) -> ViewEvent {
        ViewEvent::QueryChanged {
            query: self.input.clone(),
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

fn move_event(direction: Direction) -> ViewEvent {
    ViewEvent::MoveSelection { direction }
}
