//! System volume control
//!
//! The `VolumeControl` trait is the seam the dispatcher talks through; the
//! shipped implementation drives the default PulseAudio/PipeWire sink via
//! `pactl`.

use crate::error::{VesperError, VesperResult};
use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use tokio::process::Command;
use tracing::debug;

const DEFAULT_SINK: &str = "@DEFAULT_SINK@";

#[async_trait]
pub trait VolumeControl: Send + Sync {
    /// Raise volume by one step
    async fn volume_up(&self) -> VesperResult<()>;

    /// Lower volume by one step
    async fn volume_down(&self) -> VesperResult<()>;

    /// Mute the default sink
    async fn mute(&self) -> VesperResult<()>;

    /// Unmute the default sink
    async fn unmute(&self) -> VesperResult<()>;

    /// Set volume to a fraction of full scale (0.0 - 1.0, unclamped)
    async fn volume_to(&self, fraction: f32) -> VesperResult<()>;

    /// Current volume as a percentage
    async fn get_volume(&self) -> VesperResult<u32>;
}

/// `pactl`-backed volume controller for the default sink
pub struct PactlVolume {
    step_percent: u32,
}

lazy_static! {
    static ref PERCENT: Regex = Regex::new(r"(\d+)%").unwrap();
}

impl PactlVolume {
    pub fn new(step_percent: u32) -> Self {
        Self { step_percent }
    }

    async fn pactl(&self, args: &[&str]) -> VesperResult<String> {
        debug!("pactl {}", args.join(" "));
        let output = Command::new("pactl")
            .args(args)
            .output()
            .await
            .map_err(|e| VesperError::Volume(format!("could not run pactl: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VesperError::Volume(stderr.trim().to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

#[async_trait]
impl VolumeControl for PactlVolume {
    async fn volume_up(&self) -> VesperResult<()> {
        let delta = format!("+{}%", self.step_percent);
        self.pactl(&["set-sink-volume", DEFAULT_SINK, delta.as_str()])
            .await?;
        Ok(())
    }

    async fn volume_down(&self) -> VesperResult<()> {
        let delta = format!("-{}%", self.step_percent);
        self.pactl(&["set-sink-volume", DEFAULT_SINK, delta.as_str()])
            .await?;
        Ok(())
    }

    async fn mute(&self) -> VesperResult<()> {
        self.pactl(&["set-sink-mute", DEFAULT_SINK, "1"]).await?;
        Ok(())
    }

    async fn unmute(&self) -> VesperResult<()> {
        self.pactl(&["set-sink-mute", DEFAULT_SINK, "0"]).await?;
        Ok(())
    }

    async fn volume_to(&self, fraction: f32) -> VesperResult<()> {
        let percent = format!("{}%", (fraction * 100.0).round() as i64);
        self.pactl(&["set-sink-volume", DEFAULT_SINK, percent.as_str()])
            .await?;
        Ok(())
    }

    async fn get_volume(&self) -> VesperResult<u32> {
        let stdout = self.pactl(&["get-sink-volume", DEFAULT_SINK]).await?;
        parse_volume_percent(&stdout)
            .ok_or_else(|| VesperError::Volume(format!("unparseable pactl output: {}", stdout)))
    }
}

/// First percentage in `pactl get-sink-volume` output, e.g.
/// "Volume: front-left: 39322 /  60% / -13.31 dB, ..." -> 60
fn parse_volume_percent(output: &str) -> Option<u32> {
    PERCENT
        .captures(output)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_volume_percent() {
        let output = "Volume: front-left: 39322 /  60% / -13.31 dB,   front-right: 39322 /  60% / -13.31 dB";
        assert_eq!(parse_volume_percent(output), Some(60));
    }

    #[test]
    fn test_parse_volume_percent_missing() {
        assert_eq!(parse_volume_percent("Volume: muted"), None);
        assert_eq!(parse_volume_percent(""), None);
    }
}
