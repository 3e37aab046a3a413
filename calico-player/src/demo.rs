//! Built-in demonstration machine
//!
//! Stands in for a real machine core so the player can run without a ROM:
//! a square-wave tone plus a scrolling test pattern, produced at the
//! platform's native surface sizes.

use std::f32::consts::TAU;

use calico_core::{Machine, MachineFault, MachineSpecs};

/// Native framebuffer width in pixels
pub const WIDTH: usize = 320;
/// Native framebuffer height in pixels
pub const HEIGHT: usize = 180;
/// Simulation frame rate in Hz
pub const FRAME_RATE: u32 = 60;
/// Audio sample rate in Hz
pub const SAMPLE_RATE: u32 = 48_000;

const SPECS: MachineSpecs = MachineSpecs {
    width: WIDTH,
    height: HEIGHT,
    frame_rate: FRAME_RATE,
    sample_rate: SAMPLE_RATE,
};

/// Demonstration machine core
pub struct DemoMachine {
    audio: Vec<f32>,
    video: Vec<u8>,
    phase: f32,
    increment: f32,
    frame: u64,
}

impl DemoMachine {
    pub fn new(frequency: f32) -> Self {
        Self {
            audio: vec![0.0; SPECS.samples_per_frame()],
            video: vec![0; SPECS.frame_bytes()],
            phase: 0.0,
            increment: TAU * frequency / SAMPLE_RATE as f32,
            frame: 0,
        }
    }
}

impl Machine for DemoMachine {
    fn specs(&self) -> MachineSpecs {
        SPECS
    }

    fn step(&mut self) -> Result<(), MachineFault> {
        self.frame += 1;

        // Quarter-amplitude square wave from a sine phase accumulator
        for sample in &mut self.audio {
            self.phase = (self.phase + self.increment) % TAU;
            *sample = 0.25 * self.phase.sin().signum();
        }

        // Scrolling diagonal gradient, full alpha
        let scroll = self.frame as usize;
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                let i = (x + y * WIDTH) * 4;
                self.video[i] = ((x + scroll) % 256) as u8;
                self.video[i + 1] = ((y + scroll / 2) % 256) as u8;
                self.video[i + 2] = 64;
                self.video[i + 3] = 255;
            }
        }

        Ok(())
    }

    fn audio(&self) -> &[f32] {
        &self.audio
    }

    fn video(&self) -> &[u8] {
        &self.video
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_and_frame_sizes_match_specs() {
        let mut machine = DemoMachine::new(220.0);
        machine.step().unwrap();
        assert_eq!(machine.audio().len(), 800);
        assert_eq!(machine.video().len(), WIDTH * HEIGHT * 4);
    }

    #[test]
    fn tone_is_quarter_amplitude_square() {
        let mut machine = DemoMachine::new(440.0);
        machine.step().unwrap();
        assert!(machine.audio().iter().all(|&s| s == 0.25 || s == -0.25));
    }
}
