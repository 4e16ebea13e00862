//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::event::Command;
use super::transition::*;
use super::*;
use crate::db::Item;
use crate::format::Reply;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_flow() -> impl Strategy<Value = Flow> {
    prop_oneof![
        Just(Flow::Idle),
        Just(Flow::AddingName),
        "[A-Za-z][A-Za-z0-9 ]{0,20}".prop_map(|name| Flow::AddingPrice { name }),
        Just(Flow::ChoosingDeletionTarget),
    ]
}

fn arb_command() -> impl Strategy<Value = Command> {
    prop_oneof![
        Just(Command::Start),
        Just(Command::Help),
        Just(Command::AddItem),
        Just(Command::ListItems),
        Just(Command::RemoveItem),
    ]
}

fn arb_item() -> impl Strategy<Value = Item> {
    (1i64..10_000, "[A-Za-z]{1,12}", 0i64..1_000_000).prop_map(|(id, name, price)| Item {
        id,
        name,
        price,
    })
}

fn arb_non_numeric() -> impl Strategy<Value = String> {
    "[A-Za-z .,-]{0,12}".prop_filter("must not be a number", |s| parse_price(s).is_none())
}

// ============================================================================
// Invariants
// ============================================================================

proptest! {
    /// Commands are available in every flow
    #[test]
    fn prop_commands_always_accepted(flow in arb_flow(), command in arb_command()) {
        let result = transition(&flow, Event::Command { command, sender: None });
        prop_assert!(result.is_ok());
    }

    /// start/help/list_items never move the flow
    #[test]
    fn prop_informational_commands_keep_flow(
        flow in arb_flow(),
        command in prop_oneof![Just(Command::Start), Just(Command::Help), Just(Command::ListItems)],
    ) {
        let result = transition(&flow, Event::Command { command, sender: None }).unwrap();
        prop_assert_eq!(result.new_state, flow);
    }

    /// Selections are only accepted while choosing a deletion target
    #[test]
    fn prop_selection_requires_choosing(flow in arb_flow(), item_id in 0i64..1_000_000) {
        let result = transition(&flow, Event::Selection { item_id });
        if flow == Flow::ChoosingDeletionTarget {
            let result = result.unwrap();
            prop_assert_eq!(result.new_state, Flow::Idle);
            prop_assert_eq!(result.effects, vec![Effect::DeleteItem { id: item_id }]);
        } else {
            let is_mismatch = matches!(result, Err(TransitionError::RoutingMismatch { .. }));
            prop_assert!(is_mismatch);
        }
    }

    /// Any non-negative number completes the add flow with exactly that price
    #[test]
    fn prop_numeric_price_creates_item(name in "[A-Za-z][A-Za-z ]{0,20}", price in 0i64..=i64::MAX) {
        let flow = Flow::AddingPrice { name: name.clone() };
        let result = transition(&flow, Event::Text { content: price.to_string() }).unwrap();
        prop_assert_eq!(result.new_state, Flow::Idle);
        prop_assert_eq!(result.effects, vec![Effect::CreateItem { name, price }]);
    }

    /// Non-numeric prices leave the draft untouched and re-prompt
    #[test]
    fn prop_non_numeric_price_reprompts(name in "[A-Za-z]{1,12}", input in arb_non_numeric()) {
        let flow = Flow::AddingPrice { name };
        let result = transition(&flow, Event::Text { content: input }).unwrap();
        prop_assert_eq!(result.new_state, flow);
        prop_assert_eq!(result.effects, vec![Effect::Reply(Reply::InvalidPrice)]);
    }

    /// A storage failure always lands in Idle
    #[test]
    fn prop_store_failure_resets(flow in arb_flow(), message in "[a-z ]{0,20}") {
        let result = transition(&flow, Event::StoreFailed { message }).unwrap();
        prop_assert_eq!(result.new_state, Flow::Idle);
    }

    /// The deletion prompt offers exactly the loaded items
    #[test]
    fn prop_deletion_prompt_matches_catalog(items in proptest::collection::vec(arb_item(), 0..8)) {
        let result = transition(&Flow::Idle, Event::DeletionTargetsLoaded { items: items.clone() }).unwrap();
        if items.is_empty() {
            prop_assert_eq!(result.new_state, Flow::Idle);
        } else {
            prop_assert_eq!(result.new_state, Flow::ChoosingDeletionTarget);
            prop_assert_eq!(
                result.effects,
                vec![Effect::Reply(Reply::ChooseDeletionTarget { items })]
            );
        }
    }

    /// Transitions are pure: same input, same output
    #[test]
    fn prop_transition_is_deterministic(flow in arb_flow(), content in "[A-Za-z0-9 ]{0,12}") {
        let first = transition(&flow, Event::Text { content: content.clone() });
        let second = transition(&flow, Event::Text { content });
        match (first, second) {
            (Ok(a), Ok(b)) => {
                prop_assert_eq!(a.new_state, b.new_state);
                prop_assert_eq!(a.effects, b.effects);
            }
            (Err(a), Err(b)) => prop_assert_eq!(a, b),
            _ => prop_assert!(false, "transition outcome differed between runs"),
        }
    }
}
