/// Combat rules constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Action points one cell of movement costs. A move's cost is
    /// `path length * move_cost_per_tile`.
    pub move_cost_per_tile: u32,

    /// Inclusive bounds of the random initiative draw.
    pub initiative_min: i32,
    pub initiative_max: i32,

    /// A Blue unit still counts as able to act only while it holds at least
    /// this many action points.
    pub min_action_points_to_act: u32,

    /// Turn counter value when combat starts.
    pub first_turn: u32,

    /// Seed for the initiative draw. `None` seeds from entropy.
    pub initiative_seed: Option<u64>,
}

impl CombatConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MOVE_COST_PER_TILE: u32 = 2;
    pub const DEFAULT_INITIATIVE_MIN: i32 = 1;
    pub const DEFAULT_INITIATIVE_MAX: i32 = 9;
    pub const DEFAULT_MIN_ACTION_POINTS_TO_ACT: u32 = 2;
    pub const DEFAULT_FIRST_TURN: u32 = 1;

    pub fn new() -> Self {
        Self {
            move_cost_per_tile: Self::DEFAULT_MOVE_COST_PER_TILE,
            initiative_min: Self::DEFAULT_INITIATIVE_MIN,
            initiative_max: Self::DEFAULT_INITIATIVE_MAX,
            min_action_points_to_act: Self::DEFAULT_MIN_ACTION_POINTS_TO_ACT,
            first_turn: Self::DEFAULT_FIRST_TURN,
            initiative_seed: None,
        }
    }

    pub fn with_initiative_seed(mut self, seed: u64) -> Self {
        self.initiative_seed = Some(seed);
        self
    }

    /// Cost of walking a path of `path_length` cells.
    pub fn move_cost(&self, path_length: usize) -> u32 {
        u32::try_from(path_length)
            .unwrap_or(u32::MAX)
            .saturating_mul(self.move_cost_per_tile)
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
