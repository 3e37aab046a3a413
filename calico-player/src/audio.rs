//! Audio device host using cpal
//!
//! Builds an output stream from the device's default configuration and runs
//! the device adapter inside the stream callback. The machine's mono stream
//! is duplicated to every device channel.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use tracing::{debug, error, warn};

use calico_core::{DeviceAdapter, DeviceControls, DeviceLink, SyncConfig};

/// Audio device host
pub struct AudioHost {
    /// The cpal stream (kept alive for the duration)
    _stream: cpal::Stream,
    controls: DeviceControls,
    sample_rate: u32,
}

impl AudioHost {
    /// Open the default output device and start playback
    pub fn new(link: DeviceLink, config: &SyncConfig) -> Result<Self, String> {
        let host = cpal::default_host();

        let device = host
            .default_output_device()
            .ok_or_else(|| "No audio output device available".to_string())?;

        let device_config = device
            .default_output_config()
            .map_err(|e| format!("Failed to get default output config: {}", e))?;

        let sample_rate = device_config.sample_rate().0;
        if sample_rate != config.sample_rate {
            warn!(
                "Device rate {}Hz differs from machine rate {}Hz; playback will drift in pitch",
                sample_rate, config.sample_rate
            );
        }

        let channels = device_config.channels().max(1) as usize;
        let controls = link.controls();
        let mut adapter = DeviceAdapter::new(link, config);
        // Mono scratch buffer reused across callbacks
        let mut mono: Vec<f32> = Vec::new();

        // Build the stream based on sample format
        let stream = match device_config.sample_format() {
            cpal::SampleFormat::F32 => {
                let device_config = device_config.into();
                device
                    .build_output_stream(
                        &device_config,
                        move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                            let frames = data.len() / channels;
                            if mono.len() != frames {
                                mono.resize(frames, 0.0);
                            }
                            adapter.fill(&mut mono);
                            for (frame, &sample) in
                                data.chunks_exact_mut(channels).zip(mono.iter())
                            {
                                frame.fill(sample);
                            }
                        },
                        |err| error!("Audio stream error: {}", err),
                        None,
                    )
                    .map_err(|e| format!("Failed to build audio stream: {}", e))?
            }
            cpal::SampleFormat::I16 => {
                let device_config = device_config.into();
                device
                    .build_output_stream(
                        &device_config,
                        move |data: &mut [i16], _: &cpal::OutputCallbackInfo| {
                            let frames = data.len() / channels;
                            if mono.len() != frames {
                                mono.resize(frames, 0.0);
                            }
                            adapter.fill(&mut mono);
                            for (frame, &sample) in
                                data.chunks_exact_mut(channels).zip(mono.iter())
                            {
                                let value = (sample * 32767.0).clamp(-32768.0, 32767.0) as i16;
                                frame.fill(value);
                            }
                        },
                        |err| error!("Audio stream error: {}", err),
                        None,
                    )
                    .map_err(|e| format!("Failed to build audio stream: {}", e))?
            }
            cpal::SampleFormat::U16 => {
                let device_config = device_config.into();
                device
                    .build_output_stream(
                        &device_config,
                        move |data: &mut [u16], _: &cpal::OutputCallbackInfo| {
                            let frames = data.len() / channels;
                            if mono.len() != frames {
                                mono.resize(frames, 0.0);
                            }
                            adapter.fill(&mut mono);
                            for (frame, &sample) in
                                data.chunks_exact_mut(channels).zip(mono.iter())
                            {
                                let value =
                                    ((sample * 32767.0 + 32768.0).clamp(0.0, 65535.0)) as u16;
                                frame.fill(value);
                            }
                        },
                        |err| error!("Audio stream error: {}", err),
                        None,
                    )
                    .map_err(|e| format!("Failed to build audio stream: {}", e))?
            }
            other => {
                return Err(format!("Unsupported sample format: {:?}", other));
            }
        };

        stream
            .play()
            .map_err(|e| format!("Failed to play audio stream: {}", e))?;
        controls.set_running(true);

        debug!("Audio stream started at {}Hz", sample_rate);

        Ok(Self {
            _stream: stream,
            controls,
            sample_rate,
        })
    }

    /// Get the device's output sample rate
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

impl Drop for AudioHost {
    fn drop(&mut self) {
        // Producers gate on the running flag; clear it before the stream dies.
        self.controls.set_running(false);
    }
}
