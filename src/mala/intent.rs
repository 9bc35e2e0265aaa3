//! Intents a host can dispatch into the counter

use serde::Deserialize;

/// User intents that drive counter transitions
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    Tap,
    OpenPicker,
    ClosePicker,
    SelectPreset { option_id: String },
    SetCustomDraft { text: String },
    CommitCustomName,
}
