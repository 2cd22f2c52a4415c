//! Shared state for the submission endpoint.

use std::sync::Arc;

use crate::mailer::MailDispatcher;

/// Shared, read-only state for every request
#[derive(Clone)]
pub struct ApiState {
    pub dispatcher: Arc<MailDispatcher>,
}

impl ApiState {
    pub fn new(dispatcher: MailDispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
        }
    }
}
