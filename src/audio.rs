//! Audio capture module using cpal

use crate::error::{VesperError, VesperResult};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
use tracing::{info, warn};

const SAMPLE_RATE: u32 = 16000;
const CHUNK_SIZE: usize = 1024;

/// Start audio capture and return a receiver for audio chunks
pub fn start_capture(device_index: Option<usize>) -> VesperResult<UnboundedReceiver<Vec<i16>>> {
    let host = cpal::default_host();

    // List available devices
    info!("Available audio input devices:");
    for (i, device) in host
        .input_devices()
        .map_err(|e| VesperError::Audio(e.to_string()))?
        .enumerate()
    {
        let name = device.name().unwrap_or_else(|_| "Unknown".to_string());
        let marker = if device_index == Some(i) { "*" } else { " " };
        info!("  {} [{}] {}", marker, i, name);
    }

    // Select device
    let device = if let Some(idx) = device_index {
        host.input_devices()
            .map_err(|e| VesperError::Audio(e.to_string()))?
            .nth(idx)
            .ok_or_else(|| VesperError::Audio("Device index out of range".to_string()))?
    } else {
        host.default_input_device()
            .ok_or_else(|| VesperError::Audio("No default input device".to_string()))?
    };

    let device_name = device.name().unwrap_or_else(|_| "Unknown".to_string());
    info!("Using audio device: {}", device_name);

    // Configure stream
    let config = cpal::StreamConfig {
        channels: 1,
        sample_rate: cpal::SampleRate(SAMPLE_RATE),
        buffer_size: cpal::BufferSize::Fixed(CHUNK_SIZE as u32),
    };

    let (tx, rx) = unbounded_channel::<Vec<i16>>();

    // Build input stream
    let stream = device
        .build_input_stream(
            &config,
            move |data: &[i16], _: &cpal::InputCallbackInfo| {
                // Send audio chunk to the processing loop
                if tx.send(data.to_vec()).is_err() {
                    warn!("Audio receiver dropped");
                }
            },
            |err| {
                warn!("Audio stream error: {}", err);
            },
            None,
        )
        .map_err(|e| VesperError::Audio(e.to_string()))?;

    stream
        .play()
        .map_err(|e| VesperError::Audio(e.to_string()))?;

    // Keep stream alive for the lifetime of the process
    std::mem::forget(stream);

    Ok(rx)
}
