use std::sync::Arc;

use anyhow::{bail, Result};
use app_core::{export, AppController, AppEvent, ModalState, UiEvent};
use chrono::Local;
use clap::{Parser, Subcommand};
use remote::{load_settings, RemoteStore, RestStore};
use shared::domain::RegistrationDraft;
use tokio::sync::broadcast::error::TryRecvError;

#[derive(Parser, Debug)]
#[command(name = "urex", about = "Urex bootcamp registration console")]
struct Args {
    /// Backend base URL; overrides urex.toml and UREX_API_URL.
    #[arg(long)]
    api_url: Option<String>,
    /// Backend anon API key; overrides urex.toml and UREX_API_KEY.
    #[arg(long)]
    api_key: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit a bootcamp registration.
    Register {
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        date_of_birth: String,
        #[arg(long)]
        major: String,
        #[arg(long)]
        department: String,
        #[arg(long)]
        campus: String,
        #[arg(long)]
        programming_knowledge: String,
        #[arg(long)]
        programming_goals: String,
    },
    /// Admin dashboard: registrations, stats, and CSV export.
    Dashboard {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        /// Write the CSV export into the current directory.
        #[arg(long)]
        export: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(api_url) = args.api_url {
        settings.api_url = api_url;
    }
    if let Some(api_key) = args.api_key {
        settings.api_key = api_key;
    }

    let store: Arc<dyn RemoteStore> = Arc::new(RestStore::new(&settings));
    let app = AppController::new(store, settings.admin_domain.clone());
    let mut events = app.subscribe();
    app.start().await;

    match args.command {
        Command::Register {
            full_name,
            last_name,
            date_of_birth,
            major,
            department,
            campus,
            programming_knowledge,
            programming_goals,
        } => {
            let draft = RegistrationDraft {
                full_name,
                last_name,
                date_of_birth,
                major,
                department,
                campus,
                programming_knowledge,
                programming_goals,
            };
            app.apply(AppEvent::JoinNowClicked).await;
            app.apply(AppEvent::DraftEdited(draft)).await;
            app.apply(AppEvent::SubmitClicked).await;

            if app.state().await.submit_success {
                println!("Registration Successful! Welcome to the Urex Bootcamp.");
                Ok(())
            } else {
                match drain_alert(&mut events) {
                    Some(alert) => bail!(alert),
                    None => bail!("registration was not accepted"),
                }
            }
        }

        Command::Dashboard {
            username,
            password,
            export,
        } => {
            if !app.state().await.authenticated {
                // the login affordance is hidden behind the logo gesture
                app.logo_clicked().await;
                app.logo_clicked().await;
                app.apply(AppEvent::LoginSubmitted { username, password }).await;
            }

            let state = app.state().await;
            if !state.authenticated {
                if let ModalState::Open { error: Some(message) } = &state.modal {
                    bail!(message.clone());
                }
                bail!("admin login failed");
            }

            println!("Total registrations: {}", state.stats.total);
            println!("Most common major:   {}", state.stats.top_major);
            println!("Beginners:           {}%", state.stats.beginners_pct);
            println!();
            for reg in &state.registrations {
                println!(
                    "{} {} | {} | {} | {} | {}",
                    reg.full_name,
                    reg.last_name,
                    reg.major,
                    reg.campus,
                    reg.programming_knowledge,
                    reg.created_at.format("%m/%d/%Y"),
                );
            }

            if export {
                let filename = export::csv_filename(Local::now().date_naive());
                std::fs::write(&filename, export::to_csv(&state.registrations))?;
                println!("\nExported {} rows to {filename}", state.registrations.len());
            }

            app.apply(AppEvent::LogoutClicked).await;
            Ok(())
        }
    }
}

fn drain_alert(events: &mut tokio::sync::broadcast::Receiver<UiEvent>) -> Option<String> {
    loop {
        match events.try_recv() {
            Ok(UiEvent::Alert(message)) => return Some(message),
            Ok(UiEvent::StateChanged(_)) => continue,
            Err(TryRecvError::Lagged(_)) => continue,
            Err(TryRecvError::Empty | TryRecvError::Closed) => return None,
        }
    }
}
