//! Application status: an explicit finite-state machine.
//!
//! The progression used to live only in UI convention; here every status
//! change goes through `transition`, which rejects invalid jumps (e.g.
//! `scouted` straight to `offer`).

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Scouted,
    Saved,
    Draft,
    Submitted,
    Viewed,
    Screening,
    InterviewScheduled,
    Interviewed,
    Offer,
    Rejected,
    Withdrawn,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid status transition: {from} -> {to}")]
pub struct InvalidTransition {
    pub from: ApplicationStatus,
    pub to: ApplicationStatus,
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Scouted => "scouted",
            ApplicationStatus::Saved => "saved",
            ApplicationStatus::Draft => "draft",
            ApplicationStatus::Submitted => "submitted",
            ApplicationStatus::Viewed => "viewed",
            ApplicationStatus::Screening => "screening",
            ApplicationStatus::InterviewScheduled => "interview_scheduled",
            ApplicationStatus::Interviewed => "interviewed",
            ApplicationStatus::Offer => "offer",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Withdrawn => "withdrawn",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "scouted" => Some(ApplicationStatus::Scouted),
            "saved" => Some(ApplicationStatus::Saved),
            "draft" => Some(ApplicationStatus::Draft),
            "submitted" => Some(ApplicationStatus::Submitted),
            "viewed" => Some(ApplicationStatus::Viewed),
            "screening" => Some(ApplicationStatus::Screening),
            "interview_scheduled" => Some(ApplicationStatus::InterviewScheduled),
            "interviewed" => Some(ApplicationStatus::Interviewed),
            "offer" => Some(ApplicationStatus::Offer),
            "rejected" => Some(ApplicationStatus::Rejected),
            "withdrawn" => Some(ApplicationStatus::Withdrawn),
            _ => None,
        }
    }

    /// Terminal states accept no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ApplicationStatus::Offer | ApplicationStatus::Rejected | ApplicationStatus::Withdrawn
        )
    }

    /// States reachable in one step from `self`.
    ///
    /// The pipeline moves one stage at a time. Withdrawal is allowed from
    /// any non-terminal state; rejection only once the employer has the
    /// application (submitted onward).
    pub fn allowed_next(&self) -> &'static [ApplicationStatus] {
        use ApplicationStatus::*;
        match self {
            Scouted => &[Saved, Withdrawn],
            Saved => &[Draft, Withdrawn],
            Draft => &[Submitted, Withdrawn],
            Submitted => &[Viewed, Screening, Rejected, Withdrawn],
            Viewed => &[Screening, Rejected, Withdrawn],
            Screening => &[InterviewScheduled, Rejected, Withdrawn],
            InterviewScheduled => &[Interviewed, Rejected, Withdrawn],
            Interviewed => &[Offer, Rejected, Withdrawn],
            Offer | Rejected | Withdrawn => &[],
        }
    }
}

/// Validates one transition, returning the new status or the rejected jump.
pub fn transition(
    from: ApplicationStatus,
    to: ApplicationStatus,
) -> Result<ApplicationStatus, InvalidTransition> {
    if from.allowed_next().contains(&to) {
        Ok(to)
    } else {
        Err(InvalidTransition { from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ApplicationStatus::*;

    #[test]
    fn test_forward_chain_is_accepted() {
        let chain = [
            Scouted,
            Saved,
            Draft,
            Submitted,
            Viewed,
            Screening,
            InterviewScheduled,
            Interviewed,
            Offer,
        ];
        for pair in chain.windows(2) {
            assert_eq!(transition(pair[0], pair[1]), Ok(pair[1]));
        }
    }

    #[test]
    fn test_scouted_to_offer_is_rejected() {
        assert_eq!(
            transition(Scouted, Offer),
            Err(InvalidTransition {
                from: Scouted,
                to: Offer
            })
        );
    }

    #[test]
    fn test_withdraw_from_any_non_terminal() {
        for from in [
            Scouted,
            Saved,
            Draft,
            Submitted,
            Viewed,
            Screening,
            InterviewScheduled,
            Interviewed,
        ] {
            assert_eq!(transition(from, Withdrawn), Ok(Withdrawn));
        }
    }

    #[test]
    fn test_terminal_states_accept_nothing() {
        for terminal in [Offer, Rejected, Withdrawn] {
            assert!(terminal.is_terminal());
            assert!(terminal.allowed_next().is_empty());
            assert!(transition(terminal, Saved).is_err());
        }
    }

    #[test]
    fn test_rejection_requires_submission() {
        assert!(transition(Scouted, Rejected).is_err());
        assert!(transition(Draft, Rejected).is_err());
        assert_eq!(transition(Submitted, Rejected), Ok(Rejected));
    }

    #[test]
    fn test_no_backwards_transitions() {
        assert!(transition(Submitted, Draft).is_err());
        assert!(transition(Interviewed, Screening).is_err());
    }

    #[test]
    fn test_serde_snake_case() {
        assert_eq!(
            serde_json::to_string(&InterviewScheduled).unwrap(),
            "\"interview_scheduled\""
        );
        let s: ApplicationStatus = serde_json::from_str("\"scouted\"").unwrap();
        assert_eq!(s, Scouted);
    }

    #[test]
    fn test_parse_round_trips_every_status() {
        for status in [
            Scouted,
            Saved,
            Draft,
            Submitted,
            Viewed,
            Screening,
            InterviewScheduled,
            Interviewed,
            Offer,
            Rejected,
            Withdrawn,
        ] {
            assert_eq!(ApplicationStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ApplicationStatus::parse("ghosted"), None);
    }
}
