//! Interactive state: which picker has focus, the current selection and the
//! last rendered view.

use crossterm::event::KeyCode;

use crate::{
    dashboard::DashboardView,
    models::{company::Company, period::Period, selection::Selection},
};

/// The picker receiving arrow keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Company,
    Period,
}

/// What the event loop must do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    /// The selection changed; fetch and render it.
    Reload(Selection),
}

#[derive(Debug, Default)]
pub struct App {
    selection: Selection,
    focus: Focus,
    view: Option<DashboardView>,
    loading: bool,
}

impl App {
    pub fn new(selection: Selection) -> Self {
        Self {
            selection,
            ..Self::default()
        }
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn view(&self) -> Option<&DashboardView> {
        self.view.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn begin_loading(&mut self) {
        self.loading = true;
    }

    /// Stores a finished view. Views for a stale selection are dropped.
    pub fn set_view(&mut self, view: DashboardView) {
        if view.selection == self.selection {
            self.view = Some(view);
            self.loading = false;
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Action {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => {
                self.focus = match self.focus {
                    Focus::Company => Focus::Period,
                    Focus::Period => Focus::Company,
                };
                Action::None
            }
            KeyCode::Up | KeyCode::Char('k') => self.step(-1),
            KeyCode::Down | KeyCode::Char('j') => self.step(1),
            _ => Action::None,
        }
    }

    fn step(&mut self, delta: isize) -> Action {
        let next = match self.focus {
            Focus::Company => {
                let i = shift(self.selection.company.position(), delta, Company::ALL.len());
                self.selection.with_company(Company::ALL[i])
            }
            Focus::Period => {
                let i = shift(self.selection.period.position(), delta, Period::ALL.len());
                self.selection.with_period(Period::ALL[i])
            }
        };
        if next == self.selection {
            return Action::None;
        }
        self.selection = next;
        Action::Reload(next)
    }
}

/// Moves within `0..len`, clamping at both ends.
fn shift(current: usize, delta: isize, len: usize) -> usize {
    current
        .saturating_add_signed(delta)
        .min(len.saturating_sub(1))
}
