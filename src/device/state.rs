use super::{Body, Feedback, Outcome};

use std::collections::HashMap;

/// Variables a device exposes to the control panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Last body returned by a read
    GetResponse,
    /// Declared for the panel, never written
    PostResponse,
    /// Last body returned by an accepted write
    PutResponse,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::GetResponse, Slot::PostResponse, Slot::PutResponse];

    /// Variable id
    pub fn id(&self) -> &'static str {
        match self {
            Self::GetResponse => "HTTP-GET-Response",
            Self::PostResponse => "HTTP-POST-Response",
            Self::PutResponse => "HTTP-PUT-Response",
        }
    }

    /// Variable display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::GetResponse => "HTTP GET Response",
            Self::PostResponse => "HTTP POST Response",
            Self::PutResponse => "HTTP PUT Response",
        }
    }
}

/// Last response per slot plus the derived feedback
#[derive(Debug, Default)]
pub(super) struct State {
    variables: HashMap<Slot, Body>,
    feedback: Feedback,
}

impl State {
    pub fn record_response(&mut self, slot: Slot, body: Body) {
        log::debug!("Setting variable {} to {}", slot.id(), body);
        self.variables.insert(slot, body);
    }

    pub fn record_outcome(&mut self, outcome: &Outcome) {
        self.record_response(outcome.slot, outcome.body.clone());
        self.feedback = outcome.enabled.into();
    }

    pub fn variable(&self, slot: Slot) -> Option<Body> {
        self.variables.get(&slot).cloned()
    }

    pub fn variables(&self) -> HashMap<Slot, Body> {
        self.variables.clone()
    }

    pub fn feedback(&self) -> Feedback {
        self.feedback
    }
}
