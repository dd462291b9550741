//! Geometry of the board on screen, shared by drawing and hit testing.

use hanoi_core::{BoardSnapshot, Disk, DiskPosition, HitTest, PegId, Pointer};
use ratatui::layout::Rect;

/// Where pegs, levels and disks land in terminal cells.
///
/// Each peg owns an equal-width vertical band. The bottom row of the area is
/// the base; level 0 sits directly above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    area: Rect,
    peg_count: usize,
    disk_count: u8,
}

impl BoardLayout {
    /// Lays out `peg_count` pegs inside `area`.
    pub fn new(area: Rect, peg_count: usize, disk_count: u8) -> Self {
        Self {
            area,
            peg_count: peg_count.max(1),
            disk_count: disk_count.max(1),
        }
    }

    /// Board area.
    pub fn area(&self) -> Rect {
        self.area
    }

    /// Rows needed to show a full tower plus the lift row and base.
    pub fn required_height(&self) -> u16 {
        u16::from(self.disk_count) + 3
    }

    /// Whether every level fits.
    pub fn fits(&self) -> bool {
        self.area.height >= self.required_height() && self.band_width() >= 3
    }

    /// Width of one peg band.
    pub fn band_width(&self) -> u16 {
        self.area.width / self.peg_count as u16
    }

    /// Horizontal band of `peg`.
    pub fn band(&self, peg: PegId) -> Rect {
        let width = self.band_width();
        Rect::new(
            self.area.x + width * peg as u16,
            self.area.y,
            width,
            self.area.height,
        )
    }

    /// Column of the peg rod.
    pub fn peg_center(&self, peg: PegId) -> u16 {
        let band = self.band(peg);
        band.x + band.width / 2
    }

    /// Row of the base line.
    pub fn base_row(&self) -> u16 {
        self.area.bottom().saturating_sub(1)
    }

    /// Row of stack level `level`, if it is on screen.
    pub fn level_row(&self, level: usize) -> Option<u16> {
        let row = self.base_row().checked_sub(1 + u16::try_from(level).ok()?)?;
        (row >= self.area.y).then_some(row)
    }

    /// Half-width of `disk`, excluding the centre cell.
    pub fn disk_half_width(&self, disk: Disk) -> u16 {
        let max_half = (self.band_width().saturating_sub(2) / 2).max(1);
        (u16::from(disk.size()) * max_half / u16::from(self.disk_count)).max(1)
    }

    /// First column and width of `disk` centred on `center`.
    pub fn disk_span(&self, center: u16, disk: Disk) -> (u16, u16) {
        let half = self.disk_half_width(disk);
        (center.saturating_sub(half), half * 2 + 1)
    }

    /// Cell for an animated position.
    pub fn cell_for(&self, position: DiskPosition) -> (u16, u16) {
        let band = f32::from(self.band_width());
        let column = f32::from(self.area.x) + band * position.x + band / 2.0;
        let lifted = f32::from(self.base_row()) - 1.0 - position.y.round();
        let row = lifted.max(f32::from(self.area.y));
        (column.round() as u16, row as u16)
    }

    fn contains(&self, at: Pointer) -> bool {
        at.column >= self.area.x
            && at.column < self.area.right()
            && at.row >= self.area.y
            && at.row < self.area.bottom()
    }
}

impl HitTest for BoardLayout {
    fn top_disk_at(&self, board: &BoardSnapshot<'_>, at: Pointer) -> Option<PegId> {
        let peg = self.peg_at(at)?;
        let stack = board.pegs.get(peg)?;
        let top = stack.top()?;
        let row = self.level_row(stack.len() - 1)?;
        let half = self.disk_half_width(top);
        let center = self.peg_center(peg);
        (at.row == row && at.column.abs_diff(center) <= half).then_some(peg)
    }

    fn peg_at(&self, at: Pointer) -> Option<PegId> {
        if !self.contains(at) || self.band_width() == 0 {
            return None;
        }
        let peg = usize::from((at.column - self.area.x) / self.band_width());
        (peg < self.peg_count).then_some(peg)
    }
}
