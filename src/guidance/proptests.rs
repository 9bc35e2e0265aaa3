//! Property-based tests for the session state machine
//!
//! Invariants checked across arbitrary event sequences:
//! - the transcript only grows, and always starts with the welcome message
//! - at most one query is in flight
//! - every user message is followed by exactly one assistant reply once resolved

#![allow(clippy::needless_pass_by_value)]

use super::*;
use crate::backend::{BackendErrorKind, GuidanceResult};
use chrono::{TimeZone, Utc};
use proptest::prelude::*;

fn arb_result() -> impl Strategy<Value = GuidanceResult> {
    let field = proptest::option::of("[a-zA-Z0-9 ]{0,12}");
    (field.clone(), field.clone(), field.clone(), field.clone(), field).prop_map(
        |(sanskrit, transliteration, meaning, chapter, verse)| GuidanceResult {
            sanskrit,
            transliteration,
            meaning,
            chapter,
            verse,
        },
    )
}

#[derive(Debug, Clone)]
enum Step {
    Submit(String),
    Resolve(GuidanceResult),
    Fail,
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        "[ a-z]{0,8}".prop_map(Step::Submit),
        arb_result().prop_map(Step::Resolve),
        Just(Step::Fail),
    ]
}

fn to_event(step: Step, seq: usize) -> Event {
    let at = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    match step {
        Step::Submit(text) => Event::Submit {
            text,
            message_id: format!("{seq}_u"),
            at,
        },
        Step::Resolve(result) => Event::BackendResolved {
            result,
            message_id: format!("{seq}_a"),
            at,
        },
        Step::Fail => Event::BackendFailed {
            error: "network down".to_string(),
            kind: BackendErrorKind::Network,
            message_id: format!("{seq}_err"),
            at,
        },
    }
}

proptest! {
    #[test]
    fn prop_transcript_alternates(steps in proptest::collection::vec(arb_step(), 0..40)) {
        let mut state = SessionState::start(Utc.timestamp_opt(1_700_000_000, 0).unwrap());

        for (seq, step) in steps.into_iter().enumerate() {
            let before = state.transcript.len();
            // Rejected events leave the state untouched
            if let Ok(result) = transition(&state, to_event(step, seq)) {
                prop_assert_eq!(result.new_state.transcript.len(), before + 1);
                prop_assert_eq!(&result.new_state.transcript[..before], &state.transcript[..]);
                state = result.new_state;
            }
        }

        prop_assert_eq!(&state.transcript[0].id, "welcome");
        let roles: Vec<Role> = state.transcript[1..].iter().map(|m| m.role).collect();
        for pair in roles.chunks(2) {
            prop_assert_eq!(pair[0], Role::User);
            if let Some(reply) = pair.get(1) {
                prop_assert_eq!(*reply, Role::Assistant);
            }
        }
        // An unanswered user message exists exactly when a query is in flight
        prop_assert_eq!(roles.len() % 2 == 1, state.pending);
    }

    #[test]
    fn prop_resolution_clears_pending(text in "[a-z]{1,10}", outcome in arb_result()) {
        let state = SessionState::start(Utc::now());
        let state = transition(&state, to_event(Step::Submit(text), 0)).unwrap().new_state;
        prop_assert!(state.pending);
        let state = transition(&state, to_event(Step::Resolve(outcome), 1)).unwrap().new_state;
        prop_assert!(!state.pending);
        prop_assert_eq!(state.transcript.len(), 3);
    }

    #[test]
    fn prop_render_never_empty(result in arb_result()) {
        prop_assert!(!render(&result).is_empty());
    }
}
