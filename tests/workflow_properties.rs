//! Workflow Invariant Property Tests
//!
//! Drives the state machine with arbitrary operation sequences and
//! checks the invariants that must hold regardless of order: terminal
//! states absorb, history only grows, failures never mutate, and an
//! approval implies the checklist was complete beforehand.

use proptest::prelude::*;

use conflicts_workflow::{
    is_complete, Actor, ChecklistItem, InMemoryRepository, OpenValidationRequest, RiskTier,
    ValidationEngine, ValidationStatus,
};

const ITEMS: usize = 3;

#[derive(Debug, Clone)]
enum Op {
    StartReview,
    Approve,
    Reject,
    Escalate,
    Toggle { item: usize, completed: bool },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::StartReview),
        Just(Op::Approve),
        Just(Op::Reject),
        Just(Op::Escalate),
        (0..ITEMS, any::<bool>()).prop_map(|(item, completed)| Op::Toggle { item, completed }),
    ]
}

fn tier_strategy() -> impl Strategy<Value = RiskTier> {
    prop_oneof![
        Just(RiskTier::Low),
        Just(RiskTier::Medium),
        Just(RiskTier::High),
        Just(RiskTier::Critical),
    ]
}

fn actors() -> Vec<Actor> {
    vec![
        Actor::new("partner@firm.example", "partner"),
        Actor::new("senior@firm.example", "senior_associate"),
        Actor::new("junior@firm.example", "junior_associate"),
        Actor::new("paralegal@firm.example", "paralegal"),
    ]
}

proptest! {
    #[test]
    fn invariants_hold_for_any_operation_sequence(
        ops in prop::collection::vec((op_strategy(), 0..4usize), 1..30),
        tier in tier_strategy(),
    ) {
        let engine = ValidationEngine::new(InMemoryRepository::new());
        let actors = actors();

        let checklist = (0..ITEMS)
            .map(|i| ChecklistItem::new(format!("item-{i}"), format!("Step {i}")))
            .collect();
        let record = engine
            .open(OpenValidationRequest {
                case_id: "EXP-2024-0042".to_string(),
                risk_tier: tier,
                detected_conflicts: vec![],
                checklist,
                requested_by: "intake@firm.example".to_string(),
            })
            .unwrap();
        let id = record.id;

        for (op, actor_idx) in ops {
            let actor = &actors[actor_idx];
            let pre = engine.get(id).unwrap();

            let result = match &op {
                Op::StartReview => engine.start_review(id, actor),
                Op::Approve => engine.approve(id, actor, "no conflict found"),
                Op::Reject => engine.reject(id, actor, "conflict confirmed"),
                Op::Escalate => engine.escalate(id, actor, "needs higher authority"),
                Op::Toggle { item, completed } => {
                    engine.toggle_checklist_item(id, &format!("item-{item}"), *completed, actor)
                }
            };

            let post = engine.get(id).unwrap();

            // History is append-only
            prop_assert!(post.history.len() >= pre.history.len());

            // Terminal states absorb every operation
            if pre.status.is_terminal() {
                prop_assert!(result.is_err());
                prop_assert_eq!(post.status, pre.status);
            }

            match &result {
                Ok(updated) => {
                    // Successful approval implies the checklist was
                    // complete immediately before the call, and the
                    // actor cleared the tier gate
                    if updated.status == ValidationStatus::Approved
                        && pre.status != ValidationStatus::Approved
                    {
                        prop_assert!(is_complete(&pre.checklist));
                        prop_assert!(conflicts_workflow::can_approve_given_tier(
                            &actor.role,
                            tier
                        ));
                    }
                    // At most one audit entry per operation
                    prop_assert!(updated.history.len() <= pre.history.len() + 1);
                }
                Err(_) => {
                    // Failures mutate nothing
                    prop_assert_eq!(post.history.len(), pre.history.len());
                    prop_assert_eq!(post.status, pre.status);
                    prop_assert_eq!(&post.checklist, &pre.checklist);
                }
            }

            // Tier and checklist identity never change
            prop_assert_eq!(post.risk_tier, tier);
            prop_assert_eq!(post.checklist.len(), ITEMS);
        }
    }
}
