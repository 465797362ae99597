use super::domain::ShortlistItemStatus;
use super::error::TransitionConflict;

impl ShortlistItemStatus {
    /// Targets reachable from this status. Re-applying the current status is handled by the
    /// caller as a no-op and is not listed here.
    pub const fn successors(self) -> &'static [ShortlistItemStatus] {
        use ShortlistItemStatus::*;
        match self {
            Suggested => &[Contacted, Approved, Rejected],
            Contacted => &[Approved, Rejected],
            Rejected => &[Suggested],
            Approved => &[],
        }
    }

    pub fn can_transition_to(self, next: ShortlistItemStatus) -> bool {
        self == next || self.successors().contains(&next)
    }
}

/// Validates a status change, returning `Ok(false)` for a no-op re-application.
pub(crate) fn check_transition(
    from: ShortlistItemStatus,
    to: ShortlistItemStatus,
) -> Result<bool, TransitionConflict> {
    if from == to {
        return Ok(false);
    }
    if from.successors().contains(&to) {
        Ok(true)
    } else {
        Err(TransitionConflict::NotAllowed { from, to })
    }
}
