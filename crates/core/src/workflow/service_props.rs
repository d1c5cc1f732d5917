//! Property-based tests for ApprovalService.

use proptest::prelude::*;
use uuid::Uuid;

use budgetry_shared::UserId;

use crate::workflow::error::ApprovalError;
use crate::workflow::service::ApprovalService;
use crate::workflow::types::{ApprovalAction, BudgetStatus};

/// Strategy for generating random BudgetStatus values.
fn arb_status() -> impl Strategy<Value = BudgetStatus> {
    prop_oneof![
        Just(BudgetStatus::Draft),
        Just(BudgetStatus::Approved),
        Just(BudgetStatus::Active),
        Just(BudgetStatus::Revoked),
        Just(BudgetStatus::Completed),
        Just(BudgetStatus::Cancelled),
    ]
}

/// Strategy for generating random user IDs.
fn arb_user() -> impl Strategy<Value = UserId> {
    any::<u128>().prop_map(|n| UserId::from_uuid(Uuid::from_u128(n)))
}

/// Strategy for generating non-blank text (comments, reasons).
fn arb_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9]{1,40}( [a-zA-Z0-9]{1,20}){0,3}"
}

/// Runs the engine transition that targets `to`, if there is one.
fn attempt(
    from: BudgetStatus,
    to: BudgetStatus,
    user: UserId,
    text: String,
) -> Option<Result<ApprovalAction, ApprovalError>> {
    match to {
        BudgetStatus::Approved => Some(ApprovalService::approve(from, user, text)),
        BudgetStatus::Active => Some(ApprovalService::activate(from, user)),
        BudgetStatus::Revoked => Some(ApprovalService::revoke(from, user, text)),
        _ => None,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// An engine transition succeeds exactly when the edge is permitted.
    #[test]
    fn prop_transitions_match_edge_table(
        from in arb_status(),
        to in arb_status(),
        user in arb_user(),
        text in arb_text(),
    ) {
        if let Some(result) = attempt(from, to, user, text) {
            if ApprovalService::is_valid_transition(from, to) {
                prop_assert_eq!(result.unwrap().new_status(), to);
            } else {
                let is_invalid = matches!(
                    result,
                    Err(ApprovalError::InvalidTransition { from: f, to: t }) if f == from && t == to
                );
                prop_assert!(is_invalid);
            }
        } else {
            prop_assert!(!ApprovalService::is_valid_transition(from, to));
        }
    }

    /// No permitted edge leaves a terminal status.
    #[test]
    fn prop_terminal_statuses_have_no_exits(from in arb_status(), to in arb_status()) {
        if from.is_terminal() {
            prop_assert!(!ApprovalService::is_valid_transition(from, to));
        }
    }

    /// Approve keeps the approver and comment in the action.
    #[test]
    fn prop_approve_records_audit(user in arb_user(), comment in arb_text()) {
        let action = ApprovalService::approve(BudgetStatus::Draft, user, comment.clone()).unwrap();
        if let ApprovalAction::Approve { approved_by, comment: recorded, .. } = action {
            prop_assert_eq!(approved_by, user);
            prop_assert_eq!(recorded, comment);
        } else {
            prop_assert!(false, "Expected Approve action");
        }
    }

    /// Blank comments are rejected whatever the current status.
    #[test]
    fn prop_blank_comment_rejected(from in arb_status(), user in arb_user(), blank in "[ \t]{0,5}") {
        let result = ApprovalService::approve(from, user, blank);
        prop_assert!(matches!(result, Err(ApprovalError::CommentRequired)));
    }

    /// Blank reasons are rejected whatever the current status.
    #[test]
    fn prop_blank_reason_rejected(from in arb_status(), user in arb_user(), blank in "[ \t]{0,5}") {
        let result = ApprovalService::revoke(from, user, blank);
        prop_assert!(matches!(result, Err(ApprovalError::RevocationReasonRequired)));
    }
}
