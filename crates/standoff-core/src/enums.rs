//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Which side of the match a fighter belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlayerSlot {
    #[default]
    One,
    Two,
}

impl PlayerSlot {
    pub const ALL: [PlayerSlot; 2] = [PlayerSlot::One, PlayerSlot::Two];

    pub fn index(self) -> usize {
        match self {
            PlayerSlot::One => 0,
            PlayerSlot::Two => 1,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            PlayerSlot::One => PlayerSlot::Two,
            PlayerSlot::Two => PlayerSlot::One,
        }
    }
}

/// One of the three attack buttons / combo stages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AttackSlot {
    #[default]
    One,
    Two,
    Three,
}

impl AttackSlot {
    pub const ALL: [AttackSlot; 3] = [AttackSlot::One, AttackSlot::Two, AttackSlot::Three];

    /// Zero-based index into per-slot tables.
    pub fn index(self) -> usize {
        match self {
            AttackSlot::One => 0,
            AttackSlot::Two => 1,
            AttackSlot::Three => 2,
        }
    }

    /// Combo stage number (1..=3).
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    /// Slot for combo stage `n` (1..=3).
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(AttackSlot::One),
            2 => Some(AttackSlot::Two),
            3 => Some(AttackSlot::Three),
            _ => None,
        }
    }
}

/// Who carries out an attack: the fighter's own body or its Stand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackForm {
    Owner,
    Stand,
}

/// How the animation driver walks a clip's frame range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Playback {
    /// Wrap to the first frame after the last.
    Loop,
    /// Stop on the last frame and signal completion.
    OneShot,
    /// Stop on the last frame without signalling.
    Hold,
    /// Advance to a freeze frame while held, then finish from the release frame.
    FreezeToPoint,
    /// Jump arc: loop a sub-range while airborne, finish after landing.
    PositionGated,
}

/// Every action a fighter can display. The archetype maps each to a clip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActionKind {
    #[default]
    Idle,
    WalkForward,
    WalkBackward,
    Jump,
    Crouch,
    DashForward,
    DashBackward,
    StandSummon,
    Attack1,
    Attack2,
    Attack3,
    /// Owner pose held while the Stand performs attack 1.
    StandAttack1,
    StandAttack2,
    StandAttack3,
    Hit,
    Intro,
    Victory,
    Defeat,
}

impl ActionKind {
    pub const ALL: [ActionKind; 18] = [
        ActionKind::Idle,
        ActionKind::WalkForward,
        ActionKind::WalkBackward,
        ActionKind::Jump,
        ActionKind::Crouch,
        ActionKind::DashForward,
        ActionKind::DashBackward,
        ActionKind::StandSummon,
        ActionKind::Attack1,
        ActionKind::Attack2,
        ActionKind::Attack3,
        ActionKind::StandAttack1,
        ActionKind::StandAttack2,
        ActionKind::StandAttack3,
        ActionKind::Hit,
        ActionKind::Intro,
        ActionKind::Victory,
        ActionKind::Defeat,
    ];

    /// Name used in archetype data files.
    pub fn name(self) -> &'static str {
        match self {
            ActionKind::Idle => "idle",
            ActionKind::WalkForward => "walk_forward",
            ActionKind::WalkBackward => "walk_backward",
            ActionKind::Jump => "jump",
            ActionKind::Crouch => "crouch",
            ActionKind::DashForward => "dash_forward",
            ActionKind::DashBackward => "dash_backward",
            ActionKind::StandSummon => "stand_summon",
            ActionKind::Attack1 => "attack1",
            ActionKind::Attack2 => "attack2",
            ActionKind::Attack3 => "attack3",
            ActionKind::StandAttack1 => "stand_attack1",
            ActionKind::StandAttack2 => "stand_attack2",
            ActionKind::StandAttack3 => "stand_attack3",
            ActionKind::Hit => "hit",
            ActionKind::Intro => "intro",
            ActionKind::Victory => "victory",
            ActionKind::Defeat => "defeat",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }

    /// Actions an archetype may leave out of its table.
    pub fn is_optional(self) -> bool {
        matches!(self, ActionKind::Hit)
    }

    pub fn playback(self) -> Playback {
        match self {
            ActionKind::Idle
            | ActionKind::WalkForward
            | ActionKind::WalkBackward
            | ActionKind::StandAttack1
            | ActionKind::StandAttack2
            | ActionKind::StandAttack3
            | ActionKind::Intro => Playback::Loop,
            ActionKind::DashForward
            | ActionKind::DashBackward
            | ActionKind::StandSummon
            | ActionKind::Attack1
            | ActionKind::Attack2
            | ActionKind::Attack3
            | ActionKind::Hit => Playback::OneShot,
            ActionKind::Victory | ActionKind::Defeat => Playback::Hold,
            ActionKind::Crouch => Playback::FreezeToPoint,
            ActionKind::Jump => Playback::PositionGated,
        }
    }

    /// Owner-form attack clip for `slot`.
    pub fn attack(slot: AttackSlot) -> Self {
        match slot {
            AttackSlot::One => ActionKind::Attack1,
            AttackSlot::Two => ActionKind::Attack2,
            AttackSlot::Three => ActionKind::Attack3,
        }
    }

    /// Stance clip the owner holds while its Stand attacks with `slot`.
    pub fn stand_stance(slot: AttackSlot) -> Self {
        match slot {
            AttackSlot::One => ActionKind::StandAttack1,
            AttackSlot::Two => ActionKind::StandAttack2,
            AttackSlot::Three => ActionKind::StandAttack3,
        }
    }

    /// Attack-class actions cancel horizontal intent on entry.
    pub fn is_attack_class(self) -> bool {
        matches!(
            self,
            ActionKind::Attack1
                | ActionKind::Attack2
                | ActionKind::Attack3
                | ActionKind::StandAttack1
                | ActionKind::StandAttack2
                | ActionKind::StandAttack3
        )
    }

    pub fn is_dash(self) -> bool {
        matches!(self, ActionKind::DashForward | ActionKind::DashBackward)
    }

    /// Match-flow actions that bypass every transition guard.
    pub fn is_scripted(self) -> bool {
        matches!(
            self,
            ActionKind::Intro | ActionKind::Victory | ActionKind::Defeat
        )
    }
}

/// Actions available to a Stand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StandAction {
    #[default]
    Idle,
    MoveForward,
    MoveBackward,
    Jump,
    DashForward,
    DashBackward,
    Summon,
    Block,
    Attack1,
    Attack2,
    Attack3,
}

impl StandAction {
    pub const ALL: [StandAction; 11] = [
        StandAction::Idle,
        StandAction::MoveForward,
        StandAction::MoveBackward,
        StandAction::Jump,
        StandAction::DashForward,
        StandAction::DashBackward,
        StandAction::Summon,
        StandAction::Block,
        StandAction::Attack1,
        StandAction::Attack2,
        StandAction::Attack3,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StandAction::Idle => "idle",
            StandAction::MoveForward => "move_forward",
            StandAction::MoveBackward => "move_backward",
            StandAction::Jump => "jump",
            StandAction::DashForward => "dash_forward",
            StandAction::DashBackward => "dash_backward",
            StandAction::Summon => "summon",
            StandAction::Block => "block",
            StandAction::Attack1 => "attack1",
            StandAction::Attack2 => "attack2",
            StandAction::Attack3 => "attack3",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }

    /// Stands without a guard pose fall back to idle.
    pub fn is_optional(self) -> bool {
        matches!(self, StandAction::Block)
    }

    pub fn attack(slot: AttackSlot) -> Self {
        match slot {
            AttackSlot::One => StandAction::Attack1,
            AttackSlot::Two => StandAction::Attack2,
            AttackSlot::Three => StandAction::Attack3,
        }
    }

    pub fn is_attack(self) -> bool {
        matches!(
            self,
            StandAction::Attack1 | StandAction::Attack2 | StandAction::Attack3
        )
    }

    pub fn playback(self) -> Playback {
        match self {
            StandAction::Jump => Playback::PositionGated,
            StandAction::Summon
            | StandAction::Attack1
            | StandAction::Attack2
            | StandAction::Attack3 => Playback::OneShot,
            _ => Playback::Loop,
        }
    }
}

/// Overall match state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Both fighters play their intro; inputs are ignored.
    #[default]
    Intro,
    /// Normal play.
    Fighting,
    /// Fighting suspended; ticks do not advance time.
    Paused,
    /// A fighter was knocked out; victory/defeat poses play out.
    Finished,
}
