//! Operation kinds and their wake-up precedence.

use std::fmt;

/// The kind of a vehicle operation.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OpKind {
    Enter,
    Advance,
    Circulate,
    ChangeLane,
    Exit,
}

impl OpKind {
    /// All kinds, highest wake-up precedence first.
    ///
    /// Downstream operations come first: they make room that upstream
    /// operations are waiting for.
    pub const PRECEDENCE: [OpKind; 5] = [
        OpKind::Exit,
        OpKind::Advance,
        OpKind::ChangeLane,
        OpKind::Circulate,
        OpKind::Enter,
    ];

    /// The kinds that can be deferred, in precedence order.  Exit never blocks.
    pub const DEFERRABLE: [OpKind; 4] = [
        OpKind::Advance,
        OpKind::ChangeLane,
        OpKind::Circulate,
        OpKind::Enter,
    ];

    /// Position in [`OpKind::PRECEDENCE`]; lower is served first.
    #[inline]
    pub fn rank(self) -> usize {
        match self {
            OpKind::Exit       => 0,
            OpKind::Advance    => 1,
            OpKind::ChangeLane => 2,
            OpKind::Circulate  => 3,
            OpKind::Enter      => 4,
        }
    }

    #[inline]
    pub fn is_deferrable(self) -> bool {
        self != OpKind::Exit
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OpKind::Enter      => "enter",
            OpKind::Advance    => "advance",
            OpKind::Circulate  => "circulate",
            OpKind::ChangeLane => "change_lane",
            OpKind::Exit       => "exit",
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
