use serde::Serialize;

use crate::sticker::StickerId;

/// What a pointer-down or touch-start landed on, as resolved by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// Empty canvas area.
    Canvas,
    Body(StickerId),
    RotateHandle(StickerId),
    /// Vertical drag on this handle scales the sticker.
    ScaleHandle(StickerId),
    ResizeHandle(StickerId, ResizeHandle),
}

impl HitTarget {
    pub const fn sticker(self) -> Option<StickerId> {
        match self {
            Self::Canvas => None,
            Self::Body(id)
            | Self::RotateHandle(id)
            | Self::ScaleHandle(id)
            | Self::ResizeHandle(id, _) => Some(id),
        }
    }
}

/// One of the eight resize handles; each fixes which box edges follow the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    N,
    E,
    S,
    W,
    Ne,
    Nw,
    Se,
    Sw,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        Self::N,
        Self::E,
        Self::S,
        Self::W,
        Self::Nw,
        Self::Ne,
        Self::Se,
        Self::Sw,
    ];

    pub const fn moves_north(self) -> bool {
        matches!(self, Self::N | Self::Ne | Self::Nw)
    }

    pub const fn moves_south(self) -> bool {
        matches!(self, Self::S | Self::Se | Self::Sw)
    }

    pub const fn moves_east(self) -> bool {
        matches!(self, Self::E | Self::Ne | Self::Se)
    }

    pub const fn moves_west(self) -> bool {
        matches!(self, Self::W | Self::Nw | Self::Sw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_handles_combine_two_edges() {
        assert!(ResizeHandle::Ne.moves_north() && ResizeHandle::Ne.moves_east());
        assert!(!ResizeHandle::Ne.moves_south() && !ResizeHandle::Ne.moves_west());
        assert!(ResizeHandle::Sw.moves_south() && ResizeHandle::Sw.moves_west());
    }

    #[test]
    fn edge_handles_move_a_single_edge() {
        for handle in [ResizeHandle::N, ResizeHandle::E, ResizeHandle::S, ResizeHandle::W] {
            let edges = [
                handle.moves_north(),
                handle.moves_east(),
                handle.moves_south(),
                handle.moves_west(),
            ];
            assert_eq!(edges.iter().filter(|edge| **edge).count(), 1);
        }
    }
}
