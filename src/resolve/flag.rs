//! Queued flag modifiers and the conflict rules between flags.

use crate::model::{Note, NoteFlags, Tick};

/// Which notes at the tick a [`DeferredFlag`] applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagTarget {
    /// Every note at the tick.
    Chord,
    /// Only the notes with this raw index.
    Raw(u32),
}

impl FlagTarget {
    /// Whether a note with the raw index is targeted.
    #[must_use]
    pub const fn matches(self, raw: u32) -> bool {
        match self {
            Self::Chord => true,
            Self::Raw(target) => target == raw,
        }
    }
}

/// A flag waiting for the notes of its track to be complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeferredFlag {
    /// Where the flag applies.
    pub tick: Tick,
    /// Which notes at the tick.
    pub target: FlagTarget,
    /// The flag and its conflicts.
    pub rule: FlagRule,
}

impl DeferredFlag {
    /// A flag for every note at the tick.
    #[must_use]
    pub fn chord(tick: Tick, flag: NoteFlags) -> Self {
        Self {
            tick,
            target: FlagTarget::Chord,
            rule: FlagRule::for_flag(flag),
        }
    }

    /// A flag for the notes with a raw index at the tick.
    #[must_use]
    pub fn raw(tick: Tick, raw: u32, flag: NoteFlags) -> Self {
        Self {
            tick,
            target: FlagTarget::Raw(raw),
            rule: FlagRule::for_flag(flag),
        }
    }
}

/// A flag with the flag preventing it and the flag it replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlagRule {
    /// The flag to set.
    pub flag: NoteFlags,
    /// When any of these is set, the flag is not applied.
    pub blocked_by: NoteFlags,
    /// These are cleared when the flag is applied.
    pub displaces: NoteFlags,
}

impl FlagRule {
    /// The known rules, from the highest lookup priority.
    pub const RULES: [Self; 6] = [
        Self::new(NoteFlags::FORCED, NoteFlags::TAP, NoteFlags::NONE),
        Self::new(NoteFlags::TAP, NoteFlags::NONE, NoteFlags::FORCED),
        Self::new(NoteFlags::INSTRUMENT_PLUS, NoteFlags::NONE, NoteFlags::NONE),
        Self::new(NoteFlags::CYMBAL, NoteFlags::NONE, NoteFlags::NONE),
        Self::new(NoteFlags::ACCENT, NoteFlags::NONE, NoteFlags::GHOST),
        Self::new(NoteFlags::GHOST, NoteFlags::ACCENT, NoteFlags::NONE),
    ];

    /// Creates a rule.
    #[must_use]
    pub const fn new(flag: NoteFlags, blocked_by: NoteFlags, displaces: NoteFlags) -> Self {
        Self {
            flag,
            blocked_by,
            displaces,
        }
    }

    /// Returns the rule of a flag. Flags without a rule conflict with nothing.
    #[must_use]
    pub fn for_flag(flag: NoteFlags) -> Self {
        Self::RULES
            .into_iter()
            .find(|rule| rule.flag == flag)
            .unwrap_or(Self::new(flag, NoteFlags::NONE, NoteFlags::NONE))
    }

    /// Sets the flag on a note, clearing the flags it displaces.
    ///
    /// # Errors
    ///
    /// Returns the blocking flags present on the note, leaving it untouched.
    pub const fn try_apply(&self, note: &mut Note) -> Result<(), NoteFlags> {
        let blockers = NoteFlags::from_bits_truncate(note.flags.bits() & self.blocked_by.bits());
        if !blockers.is_empty() {
            return Err(blockers);
        }
        note.flags.remove(self.displaces);
        note.flags.insert(self.flag);
        Ok(())
    }
}

/// Whether no flag in the set is accompanied by a flag blocking it.
#[must_use]
pub fn are_flags_valid(flags: NoteFlags) -> bool {
    FlagRule::RULES
        .iter()
        .all(|rule| !flags.contains(rule.flag) || !flags.intersects(rule.blocked_by))
}
