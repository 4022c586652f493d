//! Selection rectangle over a full-screen capture overlay
//!
//! The host forwards pointer events here and repaints from `top_left` /
//! `bottom_right`. Every incoming point is clamped into the screen first, so
//! the rectangle can never leave `[0, width] x [0, height]`.

use texsnap_types::{CropRect, Point, PointerEvent, PointerKind, ScreenSize};

use crate::error::SelectionError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RegionMode {
    /// Drawing a new rectangle
    #[default]
    Selecting,
    /// A rectangle exists and can be dragged around
    Moving,
}

#[derive(Debug, Clone)]
pub struct CaptureRegion {
    pub bounds: ScreenSize,
    pub selection_start: Point,
    pub selection_end: Point,
    pub top_left: Point,
    pub bottom_right: Point,
    /// Last pointer position of an active drag-move
    pub last_move_point: Option<Point>,
    mode: RegionMode,
}

impl CaptureRegion {
    pub fn new(bounds: ScreenSize) -> Self {
        Self {
            bounds,
            selection_start: Point::UNSET,
            selection_end: Point::UNSET,
            top_left: Point::default(),
            bottom_right: Point::default(),
            last_move_point: None,
            mode: RegionMode::Selecting,
        }
    }

    pub fn mode(&self) -> RegionMode {
        self.mode
    }

    pub fn width(&self) -> u32 {
        (self.bottom_right.x - self.top_left.x) as u32
    }

    pub fn height(&self) -> u32 {
        (self.bottom_right.y - self.top_left.y) as u32
    }

    /// Inclusive hit test against the current rectangle
    pub fn contains(&self, point: Point) -> bool {
        (self.top_left.x..=self.bottom_right.x).contains(&point.x)
            && (self.top_left.y..=self.bottom_right.y).contains(&point.y)
    }

    pub fn handle(&mut self, event: PointerEvent) {
        match event.kind {
            PointerKind::Down => self.on_pointer_down(event.point),
            PointerKind::Move => self.on_pointer_move(event.point),
            PointerKind::Up => self.on_pointer_up(event.point),
        }
    }

    pub fn on_pointer_down(&mut self, point: Point) {
        let point = self.clamp_point(point);

        match self.mode {
            RegionMode::Selecting => self.begin_selection(point),
            RegionMode::Moving => {
                if self.contains(point) {
                    self.last_move_point = Some(point);
                } else {
                    tracing::debug!("pointer down outside {:?}, starting a new selection", point);
                    self.reset();
                    self.begin_selection(point);
                }
            }
        }
    }

    pub fn on_pointer_move(&mut self, point: Point) {
        let point = self.clamp_point(point);

        match self.mode {
            RegionMode::Selecting => {
                if self.selection_start.is_unset() {
                    return;
                }
                self.selection_end = point;
                self.normalize();
            }
            RegionMode::Moving => {
                let Some(last) = self.last_move_point else {
                    return;
                };
                self.translate(point - last);
                self.last_move_point = Some(point);
            }
        }
    }

    pub fn on_pointer_up(&mut self, _point: Point) {
        match self.mode {
            RegionMode::Selecting => {
                tracing::debug!(
                    "selection finished: {:?} - {:?}",
                    self.top_left,
                    self.bottom_right
                );
                self.mode = RegionMode::Moving;
            }
            RegionMode::Moving => {
                self.last_move_point = None;
            }
        }
    }

    /// The current rectangle for cropping; zero-area selections are rejected
    pub fn confirm(&self) -> Result<CropRect, SelectionError> {
        let (width, height) = (self.width(), self.height());
        if width == 0 || height == 0 {
            return Err(SelectionError::InvalidSelection { width, height });
        }

        Ok(CropRect {
            x: self.top_left.x as u32,
            y: self.top_left.y as u32,
            width,
            height,
        })
    }

    /// Back to the freshly created state, keeping the bounds
    pub fn reset(&mut self) {
        *self = Self::new(self.bounds);
    }

    /// Caption drawn next to the rectangle by the overlay
    pub fn describe(&self) -> String {
        format!(
            "{} - {}  size: {} x {}",
            self.top_left,
            self.bottom_right,
            self.width(),
            self.height()
        )
    }

    fn begin_selection(&mut self, point: Point) {
        self.selection_start = point;
        self.selection_end = point;
        self.top_left = point;
        self.bottom_right = point;
    }

    fn max_x(&self) -> i32 {
        self.bounds.width.min(i32::MAX as u32) as i32
    }

    fn max_y(&self) -> i32 {
        self.bounds.height.min(i32::MAX as u32) as i32
    }

    fn clamp_point(&self, point: Point) -> Point {
        Point::new(point.x.clamp(0, self.max_x()), point.y.clamp(0, self.max_y()))
    }

    /// Component-wise min/max of the drag endpoints
    fn normalize(&mut self) {
        let (start, end) = (self.selection_start, self.selection_end);
        self.top_left = Point::new(start.x.min(end.x), start.y.min(end.y));
        self.bottom_right = Point::new(start.x.max(end.x), start.y.max(end.y));
    }

    /// Shift the whole rectangle, stopping at the screen edges without resizing
    fn translate(&mut self, delta: Point) {
        let width = self.bottom_right.x - self.top_left.x;
        let height = self.bottom_right.y - self.top_left.y;

        let left = (self.top_left.x + delta.x).clamp(0, self.max_x() - width);
        let top = (self.top_left.y + delta.y).clamp(0, self.max_y() - height);

        self.top_left = Point::new(left, top);
        self.bottom_right = Point::new(left + width, top + height);
        self.selection_start = self.top_left;
        self.selection_end = self.bottom_right;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> CaptureRegion {
        CaptureRegion::new(ScreenSize::new(100, 100))
    }

    fn assert_invariants(region: &CaptureRegion) {
        let (tl, br) = (region.top_left, region.bottom_right);
        assert!(tl.x <= br.x && tl.y <= br.y, "not normalized: {tl:?} {br:?}");
        for p in [tl, br] {
            assert!((0..=region.bounds.width as i32).contains(&p.x), "x out of bounds: {p:?}");
            assert!((0..=region.bounds.height as i32).contains(&p.y), "y out of bounds: {p:?}");
        }
    }

    #[test]
    fn test_new_region_is_empty() {
        let region = screen();
        assert_eq!(region.mode(), RegionMode::Selecting);
        assert_eq!(region.selection_start, Point::UNSET);
        assert_eq!(region.selection_end, Point::UNSET);
        assert_eq!(region.width(), 0);
        assert_eq!(region.height(), 0);
        assert_invariants(&region);
    }

    #[test]
    fn test_drag_direction_does_not_matter() {
        let mut region = screen();
        for event in PointerEvent::drag(Point::new(50, 50), Point::new(10, 10)) {
            region.handle(event);
        }

        assert_eq!(region.top_left, Point::new(10, 10));
        assert_eq!(region.bottom_right, Point::new(50, 50));
        assert_eq!(region.mode(), RegionMode::Moving);
    }

    #[test]
    fn test_mixed_direction_drag_is_min_max() {
        let mut region = screen();
        region.on_pointer_down(Point::new(10, 60));
        region.on_pointer_move(Point::new(40, 20));

        assert_eq!(region.top_left, Point::new(10, 20));
        assert_eq!(region.bottom_right, Point::new(40, 60));
    }

    #[test]
    fn test_move_and_clamp_keeps_size() {
        let mut region = screen();
        for event in PointerEvent::drag(Point::new(10, 10), Point::new(50, 50)) {
            region.handle(event);
        }

        region.on_pointer_down(Point::new(20, 20));
        region.on_pointer_move(Point::new(25, 25));
        assert_eq!(region.top_left, Point::new(15, 15));
        assert_eq!(region.bottom_right, Point::new(55, 55));

        region.on_pointer_move(Point::new(85, 85));
        assert_eq!(region.top_left, Point::new(60, 60));
        assert_eq!(region.bottom_right, Point::new(100, 100));
        assert_eq!((region.width(), region.height()), (40, 40));
        assert_eq!(region.mode(), RegionMode::Moving);
    }

    #[test]
    fn test_move_clamps_at_origin() {
        let mut region = screen();
        for event in PointerEvent::drag(Point::new(10, 20), Point::new(30, 50)) {
            region.handle(event);
        }

        region.on_pointer_down(Point::new(15, 25));
        region.on_pointer_move(Point::new(0, 0));
        assert_eq!(region.top_left, Point::new(0, 0));
        assert_eq!(region.bottom_right, Point::new(20, 30));
    }

    #[test]
    fn test_moves_without_press_are_ignored() {
        let mut region = screen();
        region.on_pointer_move(Point::new(40, 40));
        assert_eq!(region.width(), 0);

        for event in PointerEvent::drag(Point::new(10, 10), Point::new(50, 50)) {
            region.handle(event);
        }
        region.on_pointer_down(Point::new(20, 20));
        region.on_pointer_up(Point::new(20, 20));
        region.on_pointer_move(Point::new(30, 30));

        assert_eq!(region.top_left, Point::new(10, 10));
        assert_eq!(region.bottom_right, Point::new(50, 50));
    }

    #[test]
    fn test_click_without_move_is_invalid() {
        let mut region = screen();
        region.on_pointer_down(Point::new(30, 30));
        region.on_pointer_up(Point::new(30, 30));

        assert_eq!(region.mode(), RegionMode::Moving);
        assert_eq!(
            region.confirm(),
            Err(SelectionError::InvalidSelection {
                width: 0,
                height: 0
            })
        );
    }

    #[test]
    fn test_flat_selection_is_invalid() {
        let mut region = screen();
        for event in PointerEvent::drag(Point::new(10, 30), Point::new(60, 30)) {
            region.handle(event);
        }
        assert!(matches!(
            region.confirm(),
            Err(SelectionError::InvalidSelection { width: 50, height: 0 })
        ));
    }

    #[test]
    fn test_confirm_returns_crop_rect() {
        let mut region = screen();
        for event in PointerEvent::drag(Point::new(70, 5), Point::new(20, 45)) {
            region.handle(event);
        }

        let rect = region.confirm().unwrap();
        assert_eq!(
            rect,
            CropRect {
                x: 20,
                y: 5,
                width: 50,
                height: 40
            }
        );
    }

    #[test]
    fn test_click_outside_starts_new_selection() {
        let mut region = screen();
        for event in PointerEvent::drag(Point::new(10, 10), Point::new(50, 50)) {
            region.handle(event);
        }

        region.on_pointer_down(Point::new(70, 80));
        assert_eq!(region.mode(), RegionMode::Selecting);
        assert_eq!(region.selection_start, Point::new(70, 80));
        assert_eq!(region.width(), 0);

        region.on_pointer_move(Point::new(90, 95));
        region.on_pointer_up(Point::new(90, 95));
        assert_eq!(region.top_left, Point::new(70, 80));
        assert_eq!(region.bottom_right, Point::new(90, 95));
        assert_eq!(region.mode(), RegionMode::Moving);
    }

    #[test]
    fn test_edge_click_counts_as_inside() {
        let mut region = screen();
        for event in PointerEvent::drag(Point::new(10, 10), Point::new(50, 50)) {
            region.handle(event);
        }

        region.on_pointer_down(Point::new(50, 10));
        assert_eq!(region.mode(), RegionMode::Moving);
        assert_eq!(region.last_move_point, Some(Point::new(50, 10)));
    }

    #[test]
    fn test_out_of_bounds_points_are_clamped() {
        let mut region = screen();
        region.on_pointer_down(Point::new(-20, 30));
        region.on_pointer_move(Point::new(500, 140));

        assert_eq!(region.top_left, Point::new(0, 30));
        assert_eq!(region.bottom_right, Point::new(100, 100));
    }

    #[test]
    fn test_reset_keeps_bounds() {
        let mut region = screen();
        for event in PointerEvent::drag(Point::new(10, 10), Point::new(50, 50)) {
            region.handle(event);
        }

        region.reset();
        assert_eq!(region.mode(), RegionMode::Selecting);
        assert_eq!(region.bounds, ScreenSize::new(100, 100));
        assert_eq!(region.selection_start, Point::UNSET);
        assert_eq!(region.last_move_point, None);
        assert_eq!(region.width(), 0);
    }

    #[test]
    fn test_describe() {
        let mut region = screen();
        for event in PointerEvent::drag(Point::new(10, 20), Point::new(40, 60)) {
            region.handle(event);
        }
        assert_eq!(region.describe(), "(10, 20) - (40, 60)  size: 30 x 40");
    }

    #[test]
    fn test_invariants_hold_for_random_sequences() {
        // Small LCG so the sequence is reproducible
        let mut seed: u64 = 0x5eed;
        let mut next = move |limit: i32| {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((seed >> 33) % (limit as u64)) as i32
        };

        for _ in 0..50 {
            let mut region = CaptureRegion::new(ScreenSize::new(320, 200));
            for _ in 0..200 {
                let point = Point::new(next(480) - 80, next(360) - 80);
                let event = match next(3) {
                    0 => PointerEvent::down(point.x, point.y),
                    1 => PointerEvent::moved(point.x, point.y),
                    _ => PointerEvent::up(point.x, point.y),
                };
                region.handle(event);
                assert_invariants(&region);
            }
        }
    }
}
