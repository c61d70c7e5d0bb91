#![forbid(unsafe_code)]

//! Keyboard state machine.
//!
//! [`route_key`] maps the current [`RouterState`] and a key to the next
//! state plus the side effect the widget must carry out. It never touches
//! options or selection itself.
//!
//! | Key         | From            | To                   | Effect        |
//! |-------------|-----------------|----------------------|---------------|
//! | Enter/Space | Closed          | OpenUnfocused        | Open          |
//! | Enter/Space | OpenFocused(i)  | OpenFocused(i)       | Toggle(i)     |
//! | Escape      | open            | Closed               | Close         |
//! | Down        | Closed          | OpenUnfocused        | Open          |
//! | Down        | OpenUnfocused   | OpenFocused(0)       |               |
//! | Down        | OpenFocused(i)  | OpenFocused(i+1 % N) |               |
//! | Up          | OpenUnfocused   | OpenFocused(N-1)     |               |
//! | Up          | OpenFocused(i)  | OpenFocused(i-1 % N) |               |
//! | Home / End  | open            | OpenFocused(0 / N-1) |               |

use izui_core::event::{KeyCode, KeyEvent};

/// Where the dropdown is in its keyboard lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RouterState {
    #[default]
    Closed,
    OpenUnfocused,
    OpenFocused(usize),
}

impl RouterState {
    /// Build from the widget's open flag and focus index.
    pub fn from_parts(is_open: bool, focused: Option<usize>) -> Self {
        match (is_open, focused) {
            (false, _) => Self::Closed,
            (true, None) => Self::OpenUnfocused,
            (true, Some(i)) => Self::OpenFocused(i),
        }
    }

    pub fn is_open(self) -> bool {
        !matches!(self, Self::Closed)
    }

    pub fn focused(self) -> Option<usize> {
        match self {
            Self::OpenFocused(i) => Some(i),
            _ => None,
        }
    }
}

/// Facts about the current render the router needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteContext {
    /// Length of the filtered option list.
    pub len: usize,
    pub disabled: bool,
    pub searchable: bool,
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Open the panel and snapshot its position.
    Open,
    /// Close the panel, reset search and focus, refocus the trigger.
    Close,
    /// Toggle the option at this filtered index.
    Toggle(usize),
    /// Append a character to the search term.
    SearchPush(char),
    /// Delete the last character of the search term.
    SearchPop,
}

/// Result of routing one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: RouterState,
    pub effect: Effect,
    /// Whether the key should stop propagating.
    pub consumed: bool,
}

impl Transition {
    fn ignored(state: RouterState) -> Self {
        Self {
            next: state,
            effect: Effect::None,
            consumed: false,
        }
    }

    fn to(next: RouterState, effect: Effect) -> Self {
        Self {
            next,
            effect,
            consumed: true,
        }
    }
}

/// Route one key event.
pub fn route_key(state: RouterState, key: &KeyEvent, ctx: RouteContext) -> Transition {
    if ctx.disabled || !key.is_actionable() {
        return Transition::ignored(state);
    }
    // Focus may point past a list that shrank since it was set.
    let state = match state {
        RouterState::OpenFocused(i) if i >= ctx.len => RouterState::OpenUnfocused,
        other => other,
    };
    let n = ctx.len;

    match (state, key.code) {
        (RouterState::Closed, KeyCode::Enter | KeyCode::Down) => {
            Transition::to(RouterState::OpenUnfocused, Effect::Open)
        }
        (RouterState::Closed, KeyCode::Char(' ')) if !key.ctrl() && !key.alt() => {
            Transition::to(RouterState::OpenUnfocused, Effect::Open)
        }
        (RouterState::Closed, _) => Transition::ignored(state),

        (_, KeyCode::Escape) => Transition::to(RouterState::Closed, Effect::Close),

        (RouterState::OpenFocused(i), KeyCode::Enter) => {
            Transition::to(state, Effect::Toggle(i))
        }
        (RouterState::OpenFocused(i), KeyCode::Char(' ')) if !key.ctrl() && !key.alt() => {
            Transition::to(state, Effect::Toggle(i))
        }
        (RouterState::OpenUnfocused, KeyCode::Enter) => Transition::to(state, Effect::None),

        (_, KeyCode::Down | KeyCode::Up | KeyCode::Home | KeyCode::End) if n == 0 => {
            Transition::to(state, Effect::None)
        }
        (RouterState::OpenUnfocused, KeyCode::Down) => {
            Transition::to(RouterState::OpenFocused(0), Effect::None)
        }
        (RouterState::OpenFocused(i), KeyCode::Down) => {
            Transition::to(RouterState::OpenFocused((i + 1) % n), Effect::None)
        }
        (RouterState::OpenUnfocused, KeyCode::Up) => {
            Transition::to(RouterState::OpenFocused(n - 1), Effect::None)
        }
        (RouterState::OpenFocused(i), KeyCode::Up) => {
            Transition::to(RouterState::OpenFocused((i + n - 1) % n), Effect::None)
        }
        (_, KeyCode::Home) => Transition::to(RouterState::OpenFocused(0), Effect::None),
        (_, KeyCode::End) => Transition::to(RouterState::OpenFocused(n - 1), Effect::None),

        (_, KeyCode::Backspace) if ctx.searchable => Transition::to(state, Effect::SearchPop),
        (_, KeyCode::Char(c)) if ctx.searchable && !key.ctrl() && !key.alt() && !c.is_control() => {
            Transition::to(state, Effect::SearchPush(c))
        }

        _ => Transition::ignored(state),
    }
}
