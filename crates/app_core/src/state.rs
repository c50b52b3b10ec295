//! The view-state machine, modelled as an immutable transition function
//! `(state, event) -> state + effects` so it is testable without any
//! rendering surface or network.

use std::time::Duration;

use shared::domain::{Registration, RegistrationDraft, StatsSummary};

use crate::{auth, stats};

/// How long the post-submit success screen stays up before the app
/// auto-returns to the landing view.
pub const SUCCESS_RETURN_DELAY: Duration = Duration::from_secs(3);

/// Which top-level screen is currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Landing,
    Registration,
    Dashboard,
}

/// Visibility of the hidden admin login modal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Hidden,
    Open {
        error: Option<String>,
    },
}

impl ModalState {
    pub fn is_open(&self) -> bool {
        matches!(self, ModalState::Open { .. })
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub view: View,
    pub authenticated: bool,
    pub modal: ModalState,
    /// Current form contents; preserved across a failed submit so the
    /// user can retry without retyping.
    pub draft: RegistrationDraft,
    /// True while the post-submit success screen is showing.
    pub submit_success: bool,
    pub registrations: Vec<Registration>,
    pub stats: StatsSummary,
    dashboard_loaded: bool,
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Process start: ask the remote store for an existing session.
    Started,
    SessionResolved {
        present: bool,
    },
    JoinNowClicked,
    BackClicked,
    DraftEdited(RegistrationDraft),
    SubmitClicked,
    SubmitSucceeded,
    SubmitFailed(String),
    SuccessDelayElapsed,
    /// The click-gesture detector fired on the landing logo.
    RevealLogin,
    ModalClosed,
    LoginSubmitted {
        username: String,
        password: String,
    },
    LoginSucceeded,
    LoginFailed(String),
    LogoutClicked,
    RegistrationsLoaded(Vec<Registration>),
    RegistrationsLoadFailed(String),
}

/// Side effects requested by a transition, executed by the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    CheckSession,
    SubmitRegistration(RegistrationDraft),
    Authenticate { username: String, password: String },
    SignOut,
    FetchRegistrations,
    ScheduleSuccessReturn(Duration),
    Alert(String),
}

#[derive(Debug, Clone)]
pub struct Step {
    pub state: AppState,
    pub effects: Vec<Effect>,
}

impl Step {
    fn stay(state: AppState) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }

    fn with(state: AppState, effect: Effect) -> Self {
        Self {
            state,
            effects: vec![effect],
        }
    }
}

pub fn reduce(state: &AppState, event: AppEvent) -> Step {
    let mut next = state.clone();
    match event {
        AppEvent::Started => Step::with(next, Effect::CheckSession),

        AppEvent::SessionResolved { present } => {
            if present {
                next.authenticated = true;
                next.view = View::Dashboard;
                enter_dashboard(next)
            } else {
                Step::stay(next)
            }
        }

        AppEvent::JoinNowClicked => {
            if next.view == View::Landing {
                next.view = View::Registration;
            }
            Step::stay(next)
        }

        AppEvent::BackClicked => {
            if next.view == View::Registration {
                next.view = View::Landing;
            }
            Step::stay(next)
        }

        AppEvent::DraftEdited(draft) => {
            next.draft = draft;
            Step::stay(next)
        }

        AppEvent::SubmitClicked => {
            if next.view != View::Registration || next.submit_success {
                return Step::stay(next);
            }
            match next.draft.validate() {
                Ok(()) => {
                    let draft = next.draft.clone();
                    Step::with(next, Effect::SubmitRegistration(draft))
                }
                Err(reason) => Step::with(next, Effect::Alert(reason)),
            }
        }

        AppEvent::SubmitSucceeded => {
            next.submit_success = true;
            Step::with(next, Effect::ScheduleSuccessReturn(SUCCESS_RETURN_DELAY))
        }

        AppEvent::SubmitFailed(_) => {
            // Draft stays intact so the user can resubmit.
            Step::with(
                next,
                Effect::Alert("Registration failed. Please try again.".to_string()),
            )
        }

        AppEvent::SuccessDelayElapsed => {
            next.submit_success = false;
            next.draft = RegistrationDraft::default();
            next.view = View::Landing;
            Step::stay(next)
        }

        AppEvent::RevealLogin => {
            if next.view == View::Landing {
                next.modal = ModalState::Open { error: None };
            }
            Step::stay(next)
        }

        AppEvent::ModalClosed => {
            next.modal = ModalState::Hidden;
            Step::stay(next)
        }

        AppEvent::LoginSubmitted { username, password } => {
            if !next.modal.is_open() {
                return Step::stay(next);
            }
            if auth::modal_precheck(&username, &password) {
                Step::with(next, Effect::Authenticate { username, password })
            } else {
                next.modal = ModalState::Open {
                    error: Some("Invalid credentials".to_string()),
                };
                Step::stay(next)
            }
        }

        AppEvent::LoginSucceeded => {
            next.authenticated = true;
            next.modal = ModalState::Hidden;
            next.view = View::Dashboard;
            enter_dashboard(next)
        }

        // Reported via log only; the modal keeps whatever it showed.
        AppEvent::LoginFailed(_) => Step::stay(next),

        AppEvent::LogoutClicked => {
            if next.view != View::Dashboard {
                return Step::stay(next);
            }
            next.authenticated = false;
            next.view = View::Landing;
            Step::with(next, Effect::SignOut)
        }

        AppEvent::RegistrationsLoaded(rows) => {
            next.stats = stats::summarize(&rows);
            next.registrations = rows;
            next.dashboard_loaded = true;
            Step::stay(next)
        }

        AppEvent::RegistrationsLoadFailed(_) => {
            // Recovered locally: the dashboard shows an empty list.
            next.registrations = Vec::new();
            next.stats = StatsSummary::default();
            next.dashboard_loaded = true;
            Step::stay(next)
        }
    }
}

fn enter_dashboard(state: AppState) -> Step {
    if state.dashboard_loaded {
        Step::stay(state)
    } else {
        Step::with(state, Effect::FetchRegistrations)
    }
}
