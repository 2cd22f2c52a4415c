use anyhow::Result;
use chrono::{Local, NaiveDate, Utc};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::application::SubmittedApplication;
use crate::config::Config;
use crate::submission::{HttpSubmissionClient, SubmitApplication, SubmitError};
use crate::ui::{ScreenAction, TerminalGuard, WizardScreen};

const TICK_RATE: Duration = Duration::from_millis(100);

pub struct App {
    screen: WizardScreen,
    client: Arc<dyn SubmitApplication>,
    /// Submission running in the background while the screen keeps drawing
    pending: Option<JoinHandle<Result<(), SubmitError>>>,
    should_quit: bool,
}

impl App {
    pub fn new(config: &Config) -> Result<Self> {
        let client = HttpSubmissionClient::new(&config.client)?;
        tracing::info!(endpoint = client.endpoint(), "Submitting applications to endpoint");
        Ok(Self::with_client(Arc::new(client), Local::now().date_naive()))
    }

    pub fn with_client(client: Arc<dyn SubmitApplication>, today: NaiveDate) -> Self {
        Self {
            screen: WizardScreen::new(today),
            client,
            pending: None,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut guard = TerminalGuard::enter()?;

        while !self.should_quit {
            guard.terminal_mut().draw(|f| self.screen.render(f))?;

            if event::poll(TICK_RATE)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }

            self.poll_submission().await;
        }

        if let Some(pending) = self.pending.take() {
            tracing::warn!("Quitting with a submission still in flight");
            pending.abort();
        }

        guard.restore();
        if self.screen.is_submitted() {
            println!("Thank you for your application! A confirmation email is on its way.");
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.screen.handle_key(key.code, Utc::now()) {
            ScreenAction::Submit(application) => self.start_submission(application),
            ScreenAction::Quit => self.should_quit = true,
            ScreenAction::None => {}
        }
    }

    fn start_submission(&mut self, application: SubmittedApplication) {
        tracing::info!(applicant = application.applicant_name(), "Starting submission");
        let client = Arc::clone(&self.client);
        self.pending = Some(tokio::spawn(async move { client.submit(&application).await }));
    }

    /// Hand a finished submission back to the screen
    async fn poll_submission(&mut self) {
        if !self.pending.as_ref().is_some_and(JoinHandle::is_finished) {
            return;
        }
        let Some(handle) = self.pending.take() else {
            return;
        };
        let result = match handle.await {
            Ok(result) => result,
            Err(e) => Err(SubmitError::Network(format!("Submission task failed: {e}"))),
        };
        self.screen.finish_submission(result);
    }
}
