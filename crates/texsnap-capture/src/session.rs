use anyhow::Result;
use image::RgbaImage;
use texsnap_core::CaptureRegion;
use texsnap_types::{CropRect, PointerEvent};
use uuid::Uuid;

use crate::capture::{BitmapSource, CaptureError, crop, encode_png, screen_size};

/// Cropped selection, PNG encoded
#[derive(Debug, Clone)]
pub struct CapturedImage {
    pub rect: CropRect,
    pub png: Vec<u8>,
}

/// One overlay session: the frozen screen plus the selection drawn over it
pub struct CaptureSession {
    pub id: Uuid,
    screen: RgbaImage,
    region: CaptureRegion,
}

impl CaptureSession {
    pub fn new(screen: RgbaImage) -> Self {
        let id = Uuid::new_v4();
        let bounds = screen_size(&screen);
        tracing::info!(
            "Capture session {} started on {}x{} screen",
            id,
            bounds.width,
            bounds.height
        );

        Self {
            id,
            screen,
            region: CaptureRegion::new(bounds),
        }
    }

    pub fn grab(source: &dyn BitmapSource) -> Result<Self> {
        Ok(Self::new(source.grab()?))
    }

    pub fn region(&self) -> &CaptureRegion {
        &self.region
    }

    pub fn screen(&self) -> &RgbaImage {
        &self.screen
    }

    pub fn handle(&mut self, event: PointerEvent) {
        self.region.handle(event);
        tracing::trace!("[{}] {:?}: {}", self.id, event.kind, self.region.describe());
    }

    pub fn confirm(&self) -> Result<CapturedImage, CaptureError> {
        let rect = self.region.confirm()?;
        let cropped = crop(&self.screen, rect)?;
        let png = encode_png(&cropped)?;

        tracing::info!("[{}] Captured {} ({} bytes)", self.id, rect, png.len());
        Ok(CapturedImage { rect, png })
    }
}

#[cfg(test)]
mod tests {
    use image::Rgba;
    use texsnap_core::SelectionError;
    use texsnap_types::{Point, ScreenSize};

    use super::*;

    fn session() -> CaptureSession {
        CaptureSession::new(RgbaImage::from_fn(200, 100, |x, y| {
            Rgba([x as u8, y as u8, 7, 255])
        }))
    }

    #[test]
    fn test_region_sized_to_screen() {
        let session = session();
        assert_eq!(session.region().bounds, ScreenSize::new(200, 100));
        assert_eq!(session.screen().dimensions(), (200, 100));
    }

    #[test]
    fn test_confirm_crops_selection() {
        let mut session = session();
        for event in PointerEvent::drag(Point::new(150, 90), Point::new(120, 40)) {
            session.handle(event);
        }

        let captured = session.confirm().unwrap();
        assert_eq!(
            captured.rect,
            CropRect {
                x: 120,
                y: 40,
                width: 30,
                height: 50
            }
        );

        let decoded = image::load_from_memory(&captured.png).unwrap().into_rgba8();
        assert_eq!(decoded.dimensions(), (30, 50));
        assert_eq!(decoded.get_pixel(0, 0), &Rgba([120, 40, 7, 255]));
    }

    #[test]
    fn test_selection_reaching_screen_edge() {
        let mut session = session();
        for event in PointerEvent::drag(Point::new(180, 80), Point::new(400, 400)) {
            session.handle(event);
        }

        let captured = session.confirm().unwrap();
        assert_eq!(captured.rect.right(), 200);
        assert_eq!(captured.rect.bottom(), 100);
    }

    #[test]
    fn test_empty_selection_is_rejected() {
        let mut session = session();
        session.handle(PointerEvent::down(10, 10));
        session.handle(PointerEvent::up(10, 10));

        assert!(matches!(
            session.confirm(),
            Err(CaptureError::Selection(SelectionError::InvalidSelection { .. }))
        ));
    }
}
