//! Input simulation module using Linux evdev/uinput
//!
//! Provides native key simulation without X11 dependencies.
//! Works on both X11 and Wayland.

use crate::error::{VesperError, VesperResult};
use evdev::{uinput::VirtualDeviceBuilder, AttributeSet, Key};
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

/// Virtual keyboard for simulating media keys and the lock hotkey
pub struct VirtualKeyboard {
    device: evdev::uinput::VirtualDevice,
}

impl VirtualKeyboard {
    /// Create a new virtual keyboard device
    pub fn new() -> VesperResult<Self> {
        // Only the keys the dispatcher actually sends
        let mut keys = AttributeSet::<Key>::new();
        for key in [
            Key::KEY_PLAYPAUSE,
            Key::KEY_NEXTSONG,
            Key::KEY_PREVIOUSSONG,
            Key::KEY_LEFTMETA,
            Key::KEY_L,
        ] {
            keys.insert(key);
        }

        let device = VirtualDeviceBuilder::new()
            .map_err(|e| VesperError::Input(e.to_string()))?
            .name("Vesper Virtual Keyboard")
            .with_keys(&keys)
            .map_err(|e| VesperError::Input(e.to_string()))?
            .build()
            .map_err(|e| VesperError::Input(format!("failed to create virtual keyboard: {}", e)))?;

        info!("⌨️ Virtual keyboard created");
        Ok(Self { device })
    }

    /// Press and release a single key
    pub fn tap_key(&mut self, key: Key) -> VesperResult<()> {
        self.press_key(key)?;
        thread::sleep(Duration::from_millis(10));
        self.release_key(key)?;
        Ok(())
    }

    /// Press modifiers, tap the key, release modifiers in reverse order
    pub fn key_combo(&mut self, modifiers: &[Key], key: Key) -> VesperResult<()> {
        for modifier in modifiers {
            self.press_key(*modifier)?;
        }
        thread::sleep(Duration::from_millis(10));

        self.tap_key(key)?;

        thread::sleep(Duration::from_millis(10));
        for modifier in modifiers.iter().rev() {
            self.release_key(*modifier)?;
        }
        Ok(())
    }

    fn press_key(&mut self, key: Key) -> VesperResult<()> {
        debug!("Key down: {:?}", key);
        self.device
            .emit(&[evdev::InputEvent::new(evdev::EventType::KEY, key.code(), 1)])
            .map_err(|e| VesperError::Input(e.to_string()))?;
        Ok(())
    }

    fn release_key(&mut self, key: Key) -> VesperResult<()> {
        debug!("Key up: {:?}", key);
        self.device
            .emit(&[evdev::InputEvent::new(evdev::EventType::KEY, key.code(), 0)])
            .map_err(|e| VesperError::Input(e.to_string()))?;
        Ok(())
    }
}
