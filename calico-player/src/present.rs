//! Presenters for the standalone player

use std::path::PathBuf;

use tracing::warn;

use calico_core::Presenter;

/// Discards every frame; pacing without a display
pub struct HeadlessPresenter;

impl Presenter for HeadlessPresenter {
    fn present(&mut self, _frame: &[u8]) {}
}

/// Writes every Nth presented frame as a PNG file
pub struct CapturePresenter {
    directory: PathBuf,
    every: u64,
    width: u32,
    height: u32,
    presented: u64,
}

impl CapturePresenter {
    pub fn new(directory: PathBuf, every: u64, width: u32, height: u32) -> std::io::Result<Self> {
        std::fs::create_dir_all(&directory)?;
        Ok(Self {
            directory,
            every: every.max(1),
            width,
            height,
            presented: 0,
        })
    }
}

impl Presenter for CapturePresenter {
    fn present(&mut self, frame: &[u8]) {
        if self.presented % self.every == 0 {
            let path = self
                .directory
                .join(format!("frame-{:06}.png", self.presented));
            match image::RgbaImage::from_raw(self.width, self.height, frame.to_vec()) {
                Some(image) => {
                    if let Err(err) = image.save(&path) {
                        warn!("Failed to write {}: {}", path.display(), err);
                    }
                }
                None => warn!(
                    "Framebuffer does not match {}x{} RGBA; skipping capture",
                    self.width, self.height
                ),
            }
        }
        self.presented += 1;
    }
}
