//! Async orchestration: applies the pure reducer, executes its effects
//! against the injected store, and publishes state to the front end.

use std::{collections::VecDeque, sync::Arc, time::Instant};

use remote::RemoteStore;
use tokio::sync::{broadcast, Mutex};
use tracing::{error, warn};

use crate::{
    auth::AuthGate,
    gesture::ClickGesture,
    state::{reduce, AppEvent, AppState, Effect},
};

/// What a front end renders from. Every transition re-publishes the full
/// state; alerts are blocking user-facing messages.
#[derive(Debug, Clone)]
pub enum UiEvent {
    StateChanged(AppState),
    Alert(String),
}

pub struct AppController {
    gate: AuthGate,
    store: Arc<dyn RemoteStore>,
    state: Mutex<AppState>,
    gesture: Mutex<ClickGesture>,
    events: broadcast::Sender<UiEvent>,
}

impl AppController {
    pub fn new(store: Arc<dyn RemoteStore>, admin_domain: impl Into<String>) -> Arc<Self> {
        let (events, _) = broadcast::channel(64);
        Arc::new(Self {
            gate: AuthGate::new(Arc::clone(&store), admin_domain),
            store,
            state: Mutex::new(AppState::default()),
            gesture: Mutex::new(ClickGesture::new()),
            events,
        })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<UiEvent> {
        self.events.subscribe()
    }

    pub async fn state(&self) -> AppState {
        self.state.lock().await.clone()
    }

    /// Process start: resolves any existing session before the first
    /// render.
    pub async fn start(self: &Arc<Self>) {
        self.apply(AppEvent::Started).await;
    }

    /// One click on the landing logo; feeds the gesture detector and
    /// reveals the login modal when it fires.
    pub async fn logo_clicked(self: &Arc<Self>) {
        let fired = self.gesture.lock().await.click(Instant::now());
        if fired {
            self.apply(AppEvent::RevealLogin).await;
        }
    }

    /// Runs `event` through the reducer and executes the resulting
    /// effects to completion (timers excepted; those feed back through a
    /// spawned task).
    pub async fn apply(self: &Arc<Self>, event: AppEvent) {
        let mut queue = VecDeque::from([event]);
        while let Some(event) = queue.pop_front() {
            for effect in self.apply_step(event).await {
                match effect {
                    Effect::ScheduleSuccessReturn(delay) => {
                        let controller = Arc::clone(self);
                        tokio::spawn(async move {
                            tokio::time::sleep(delay).await;
                            // the return-to-landing transition requests
                            // no further effects
                            controller.apply_step(AppEvent::SuccessDelayElapsed).await;
                        });
                    }
                    other => {
                        if let Some(follow_up) = self.run_effect(other).await {
                            queue.push_back(follow_up);
                        }
                    }
                }
            }
        }
    }

    /// One reducer step: swaps in the next state and publishes it.
    async fn apply_step(&self, event: AppEvent) -> Vec<Effect> {
        let mut state = self.state.lock().await;
        let step = reduce(&state, event);
        *state = step.state;
        let _ = self.events.send(UiEvent::StateChanged(state.clone()));
        step.effects
    }

    async fn run_effect(&self, effect: Effect) -> Option<AppEvent> {
        match effect {
            Effect::CheckSession => match self.gate.current_session().await {
                Ok(session) => Some(AppEvent::SessionResolved {
                    present: session.is_some(),
                }),
                Err(err) => {
                    warn!("session check failed: {err}");
                    Some(AppEvent::SessionResolved { present: false })
                }
            },

            Effect::SubmitRegistration(draft) => {
                match self.store.insert_registration(&draft).await {
                    Ok(()) => Some(AppEvent::SubmitSucceeded),
                    Err(err) => {
                        error!("error submitting registration: {err}");
                        Some(AppEvent::SubmitFailed(err.to_string()))
                    }
                }
            }

            Effect::Authenticate { username, password } => {
                match self.gate.login(&username, &password).await {
                    Ok(_) => Some(AppEvent::LoginSucceeded),
                    // already logged by the gate, not surfaced to the user
                    Err(err) => Some(AppEvent::LoginFailed(err.to_string())),
                }
            }

            Effect::SignOut => {
                if let Err(err) = self.gate.logout().await {
                    warn!("remote sign-out failed: {err}");
                }
                None
            }

            Effect::FetchRegistrations => match self.store.list_registrations().await {
                Ok(rows) => Some(AppEvent::RegistrationsLoaded(rows)),
                Err(err) => {
                    error!("error fetching registrations: {err}");
                    Some(AppEvent::RegistrationsLoadFailed(err.to_string()))
                }
            },

            Effect::Alert(message) => {
                let _ = self.events.send(UiEvent::Alert(message));
                None
            }

            // handled inline by apply
            Effect::ScheduleSuccessReturn(_) => None,
        }
    }
}
