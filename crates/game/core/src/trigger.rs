//! Cell-attached trigger descriptors evaluated against Blue unit positions.

/// Scripted trigger placed on a cell by the level designer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellTrigger {
    /// Plays cutscene `index`, at most once, and only out of combat.
    Cutscene { index: u32 },
    /// Asks the encounter loader to bring in AI stage `index`.
    Combat { index: u32 },
}

/// Moves the party to another level.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelTransition {
    pub current_level: String,
    pub next_level: String,
    pub cutscene_index: u32,
}

/// Starts the boss encounter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BossTrigger;
