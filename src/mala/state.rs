//! Bead counter state

use serde::{Deserialize, Serialize};

/// Beads in one round when nothing (or nothing usable) is configured
pub const DEFAULT_BEADS_PER_ROUND: u32 = 108;

/// Name shown when the host does not pick one
pub const DEFAULT_NAME: &str = "Ram";

/// Option id that switches the picker into free-form entry
pub const CUSTOM_OPTION_ID: &str = "custom";

/// One entry of the name picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NameOption {
    pub id: &'static str,
    pub label: &'static str,
}

/// Fixed picker entries, in display order
pub const NAME_OPTIONS: [NameOption; 3] = [
    NameOption {
        id: "ram",
        label: "Ram",
    },
    NameOption {
        id: "radha",
        label: "Radha",
    },
    NameOption {
        id: CUSTOM_OPTION_ID,
        label: "Custom...",
    },
];

impl NameOption {
    pub fn find(id: &str) -> Option<&'static NameOption> {
        NAME_OPTIONS.iter().find(|opt| opt.id == id)
    }

    pub fn is_custom(&self) -> bool {
        self.id == CUSTOM_OPTION_ID
    }
}

/// Where the name picker currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Picker {
    #[default]
    Closed,
    Open,
    /// Custom entry chosen, waiting for the draft to be committed
    EditingCustom,
}

/// Construction parameters supplied by the host
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MalaConfig {
    #[serde(default)]
    pub initial_name: Option<String>,
    /// Signed so that nonsense from the host can be recognised and replaced
    #[serde(default)]
    pub beads_per_round: Option<i64>,
}

/// Counter state for one screen session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MalaState {
    /// Taps since the session began; never reset automatically
    pub count: u64,
    /// Always > 0
    pub beads_per_round: u32,
    pub selected_name: String,
    /// Id of the picker option the selected name came from
    pub selected_option: String,
    /// Uncommitted text of the custom-name field
    pub custom_name: String,
    pub picker: Picker,
}

impl MalaState {
    /// Build the initial state.
    ///
    /// An unusable `beads_per_round` (zero, negative, or wider than `u32`) is
    /// logged and replaced by [`DEFAULT_BEADS_PER_ROUND`]; it is never an
    /// error for the caller.
    pub fn initialize(config: &MalaConfig) -> Self {
        let beads_per_round = match config.beads_per_round {
            None => DEFAULT_BEADS_PER_ROUND,
            Some(n) => match u32::try_from(n) {
                Ok(n) if n > 0 => n,
                _ => {
                    tracing::warn!(
                        beads_per_round = n,
                        fallback = DEFAULT_BEADS_PER_ROUND,
                        "Invalid beads_per_round, using default"
                    );
                    DEFAULT_BEADS_PER_ROUND
                }
            },
        };

        let initial = config
            .initial_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty());

        let (selected_name, selected_option, custom_name) = match initial {
            None => (DEFAULT_NAME.to_string(), "ram".to_string(), String::new()),
            Some(name) => match NAME_OPTIONS
                .iter()
                .find(|opt| !opt.is_custom() && opt.label == name)
            {
                Some(preset) => (name.to_string(), preset.id.to_string(), String::new()),
                None => (
                    name.to_string(),
                    CUSTOM_OPTION_ID.to_string(),
                    name.to_string(),
                ),
            },
        };

        Self {
            count: 0,
            beads_per_round,
            selected_name,
            selected_option,
            custom_name,
            picker: Picker::Closed,
        }
    }

    pub fn rounds_completed(&self) -> u64 {
        self.count / u64::from(self.beads_per_round)
    }

    pub fn remainder_in_round(&self) -> u64 {
        self.count % u64::from(self.beads_per_round)
    }

    /// Fraction of the current round done, in `[0, 1)`
    #[allow(clippy::cast_precision_loss)] // remainder < beads_per_round <= u32::MAX
    pub fn progress(&self) -> f64 {
        self.remainder_in_round() as f64 / f64::from(self.beads_per_round)
    }

    /// True right after the tap that finished a round
    pub fn at_round_boundary(&self) -> bool {
        self.count > 0 && self.remainder_in_round() == 0
    }

    pub fn view(&self) -> MalaView {
        MalaView {
            count: self.count,
            beads_per_round: self.beads_per_round,
            rounds_completed: self.rounds_completed(),
            remainder_in_round: self.remainder_in_round(),
            progress: self.progress(),
            selected_name: self.selected_name.clone(),
            selected_option: self.selected_option.clone(),
            custom_name: self.custom_name.clone(),
            picker: self.picker,
        }
    }
}

impl Default for MalaState {
    fn default() -> Self {
        Self::initialize(&MalaConfig::default())
    }
}

/// Read-only projection handed to the host, derived fields included
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MalaView {
    pub count: u64,
    pub beads_per_round: u32,
    pub rounds_completed: u64,
    pub remainder_in_round: u64,
    pub progress: f64,
    pub selected_name: String,
    pub selected_option: String,
    pub custom_name: String,
    pub picker: Picker,
}
