use std::fmt;

/// Progress of a single survey submission
///
/// Received → Validated → TicketUpdated → EventPublished. Failure can exit
/// from Received (validation) or from either downstream call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SubmissionStage {
    Received,
    Validated,
    TicketUpdated,
    EventPublished,
}

impl SubmissionStage {
    /// Stage that follows this one, `None` once the submission is complete
    pub fn next(self) -> Option<SubmissionStage> {
        match self {
            SubmissionStage::Received => Some(SubmissionStage::Validated),
            SubmissionStage::Validated => Some(SubmissionStage::TicketUpdated),
            SubmissionStage::TicketUpdated => Some(SubmissionStage::EventPublished),
            SubmissionStage::EventPublished => None,
        }
    }

    /// Only single forward steps are allowed
    pub fn is_valid_transition(from: SubmissionStage, to: SubmissionStage) -> bool {
        from.next() == Some(to)
    }

    /// Attempt to move from one stage to another
    pub fn transition(from: SubmissionStage, to: SubmissionStage) -> Result<SubmissionStage, String> {
        if Self::is_valid_transition(from, to) {
            Ok(to)
        } else {
            Err(format!("Invalid submission transition from {} to {}", from, to))
        }
    }

    pub fn is_terminal(self) -> bool {
        self == SubmissionStage::EventPublished
    }

    /// True once the ticket has been changed downstream
    pub fn ticket_modified(self) -> bool {
        self >= SubmissionStage::TicketUpdated
    }
}

impl fmt::Display for SubmissionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SubmissionStage::Received => "received",
            SubmissionStage::Validated => "validated",
            SubmissionStage::TicketUpdated => "ticket_updated",
            SubmissionStage::EventPublished => "event_published",
        };
        write!(f, "{}", name)
    }
}
