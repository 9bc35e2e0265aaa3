//! Pure counter transitions

use super::state::{NameOption, Picker, CUSTOM_OPTION_ID};
use super::{Effect, Intent, MalaState};

/// Result of applying one intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalaTransition {
    pub new_state: MalaState,
    /// Set only by the tap that lands on a positive multiple of the round size
    pub round_just_completed: bool,
    pub effects: Vec<Effect>,
}

impl MalaTransition {
    fn new(state: MalaState) -> Self {
        Self {
            new_state: state,
            round_just_completed: false,
            effects: vec![],
        }
    }

    fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Apply an intent. None of the intents can fail.
pub fn transition(state: &MalaState, intent: Intent) -> MalaTransition {
    let mut next = state.clone();

    match intent {
        Intent::Tap => {
            // A saturated counter stays put and must not complete again
            let advanced = match next.count.checked_add(1) {
                Some(count) => {
                    next.count = count;
                    true
                }
                None => false,
            };
            let mut result = MalaTransition::new(next).with_effect(Effect::Pulse);
            if advanced && result.new_state.at_round_boundary() {
                let total_count = result.new_state.count;
                let rounds_completed = result.new_state.rounds_completed();
                result.round_just_completed = true;
                result = result.with_effect(Effect::RoundCompleted {
                    total_count,
                    rounds_completed,
                });
            }
            result
        }

        Intent::OpenPicker => {
            next.picker = Picker::Open;
            MalaTransition::new(next)
        }

        Intent::ClosePicker => {
            next.picker = Picker::Closed;
            MalaTransition::new(next)
        }

        Intent::SelectPreset { option_id } => {
            match NameOption::find(&option_id) {
                Some(opt) if opt.is_custom() => {
                    // Selection stays as-is until the draft is committed
                    next.picker = Picker::EditingCustom;
                }
                Some(opt) => {
                    next.selected_name = opt.label.to_string();
                    next.selected_option = opt.id.to_string();
                    next.custom_name.clear();
                    next.picker = Picker::Closed;
                }
                None => {
                    tracing::debug!(option_id = %option_id, "Ignoring unknown name option");
                }
            }
            MalaTransition::new(next)
        }

        Intent::SetCustomDraft { text } => {
            next.custom_name = text;
            MalaTransition::new(next)
        }

        Intent::CommitCustomName => {
            let trimmed = next.custom_name.trim();
            if !trimmed.is_empty() {
                next.selected_name = trimmed.to_string();
                next.selected_option = CUSTOM_OPTION_ID.to_string();
            }
            next.picker = Picker::Closed;
            MalaTransition::new(next)
        }
    }
}
