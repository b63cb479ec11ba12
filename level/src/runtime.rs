//! Mutable per-sector and per-line state used by the play simulation. It is
//! kept apart from the immutable geometry tables and indexed by the same ids.

use crate::ids::{LineId, SectorId};
use crate::map_defs::{BBox, Vertex};

/// Handle to a map object owned by the play simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThingRef(pub u32);

/// Handle to a thinker (door, lift, light effect...) owned by the play
/// simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThinkerRef(pub u32);

#[derive(Debug, Default, Clone, PartialEq)]
pub struct SectorState {
    /// 0 = untraversed, 1,2 = sndlines -1
    pub sound_traversed: i32,
    /// Thing that made a sound, if any
    pub sound_target: Option<ThingRef>,
    /// Origin for any sounds played by the sector
    pub sound_origin: Vertex,
    /// If == validcount, already checked
    pub valid_count: usize,
    /// Bounds of every line touching the sector
    pub bbox: BBox,
    /// Things currently in the sector
    pub thing_list: Vec<ThingRef>,
    /// Thinker for reversable actions
    pub special_data: Option<ThinkerRef>,
    /// Every line with this sector on either side
    pub lines: Vec<LineId>,
    pub line_count: usize,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct LineState {
    pub valid_count: usize,
    pub special_data: Option<ThinkerRef>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct RuntimeState {
    pub sectors: Vec<SectorState>,
    pub lines: Vec<LineState>,
}

impl RuntimeState {
    pub fn new(sectors: Vec<SectorState>, line_count: usize) -> Self {
        Self {
            sectors,
            lines: vec![LineState::default(); line_count],
        }
    }

    pub fn sector(&self, id: SectorId) -> &SectorState {
        &self.sectors[id.index()]
    }

    pub fn sector_mut(&mut self, id: SectorId) -> &mut SectorState {
        &mut self.sectors[id.index()]
    }

    pub fn line(&self, id: LineId) -> &LineState {
        &self.lines[id.index()]
    }

    pub fn line_mut(&mut self, id: LineId) -> &mut LineState {
        &mut self.lines[id.index()]
    }

    /// Clear the validcount marks, used when the global validcount wraps
    pub fn clear_valid_counts(&mut self) {
        self.sectors.iter_mut().for_each(|s| s.valid_count = 0);
        self.lines.iter_mut().for_each(|l| l.valid_count = 0);
    }
}

#[cfg(test)]
mod tests {
    use super::{RuntimeState, SectorState, ThinkerRef};
    use crate::ids::{LineId, SectorId};

    #[test]
    fn state_by_id() {
        let mut state = RuntimeState::new(vec![SectorState::default(); 2], 3);
        state.sector_mut(SectorId::new(1)).valid_count = 7;
        state.line_mut(LineId::new(2)).special_data = Some(ThinkerRef(4));
        state.line_mut(LineId::new(0)).valid_count = 7;

        assert_eq!(state.sector(SectorId::new(1)).valid_count, 7);
        assert_eq!(state.line(LineId::new(2)).special_data, Some(ThinkerRef(4)));

        state.clear_valid_counts();
        assert_eq!(state.sector(SectorId::new(1)).valid_count, 0);
        assert_eq!(state.line(LineId::new(0)).valid_count, 0);
    }
}
