//! Per-run accounting of what happened to every message.

/// Terminal state of a single message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Accepted by the provider.
    Sent {
        to: String,
        message_id: String,
        attempts: u32,
    },
    /// Every attempt up to the ceiling failed.
    Failed {
        to: String,
        attempts: u32,
        cause: String,
    },
    /// The send cap was reached before this message's turn.
    NotAttempted { to: String },
}

/// Ordered outcomes for one dispatch run.
///
/// `sent() + failed() + not_attempted()` always equals the number of
/// messages handed to the dispatcher.
#[derive(Debug, Default)]
pub struct SendReport {
    outcomes: Vec<Outcome>,
}

impl SendReport {
    pub fn record(&mut self, outcome: Outcome) {
        self.outcomes.push(outcome);
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    pub fn sent(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Sent { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Failed { .. }))
    }

    pub fn not_attempted(&self) -> usize {
        self.count(|o| matches!(o, Outcome::NotAttempted { .. }))
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(o)).count()
    }
}
