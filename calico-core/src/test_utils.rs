//! Shared test utilities

use crate::machine::{Machine, MachineFault, MachineSpecs, Presenter};

/// Scripted machine core for pacing tests
///
/// Each step fills the audio chunk with a running sample counter, so tests
/// can check ordering and continuity across the whole pipeline: step `s`
/// (1-based) produces the values `(s-1)*n .. s*n` for chunk length `n`.
/// The framebuffer's first byte carries the step count.
pub struct TestMachine {
    specs: MachineSpecs,
    audio: Vec<f32>,
    video: Vec<u8>,
    steps: u64,
    fail_at: Option<u64>,
}

impl TestMachine {
    pub fn new(frame_rate: u32, sample_rate: u32) -> Self {
        let specs = MachineSpecs {
            width: 8,
            height: 4,
            frame_rate,
            sample_rate,
        };
        Self {
            audio: vec![0.0; specs.samples_per_frame()],
            video: vec![0; specs.frame_bytes()],
            specs,
            steps: 0,
            fail_at: None,
        }
    }

    /// Fail with a scripted fault on the given 1-based step
    pub fn failing_at(frame_rate: u32, sample_rate: u32, step: u64) -> Self {
        let mut machine = Self::new(frame_rate, sample_rate);
        machine.fail_at = Some(step);
        machine
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }
}

impl Machine for TestMachine {
    fn specs(&self) -> MachineSpecs {
        self.specs
    }

    fn step(&mut self) -> Result<(), MachineFault> {
        self.steps += 1;
        if self.fail_at == Some(self.steps) {
            return Err(MachineFault::new("scripted fault"));
        }
        let base = (self.steps - 1) * self.audio.len() as u64;
        for (i, sample) in self.audio.iter_mut().enumerate() {
            *sample = (base + i as u64) as f32;
        }
        self.video[0] = self.steps as u8;
        Ok(())
    }

    fn audio(&self) -> &[f32] {
        &self.audio
    }

    fn video(&self) -> &[u8] {
        &self.video
    }
}

/// Presenter that counts frames and keeps the latest one
#[derive(Default)]
pub struct CountingPresenter {
    pub frames: u64,
    pub last: Vec<u8>,
}

impl Presenter for CountingPresenter {
    fn present(&mut self, frame: &[u8]) {
        self.frames += 1;
        self.last.clear();
        self.last.extend_from_slice(frame);
    }
}

/// Presenter that discards every frame
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn present(&mut self, _frame: &[u8]) {}
}
