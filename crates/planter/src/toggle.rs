//! On/off switch for automatic planting, with a transient HUD countdown.

use autoplanter_input::{KeyBinding, KeyEventSource};
use tracing::info;

/// Ticks the status line stays visible after a flip (5 s at 20 TPS).
pub const DEFAULT_HUD_DISPLAY_TICKS: u32 = 100;

/// Text colour for an enabled status line.
pub const STATUS_COLOR_ON: u32 = 0x55FF55;
/// Text colour for a disabled status line.
pub const STATUS_COLOR_OFF: u32 = 0xFF5555;

/// Status text plus the colour it should be drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusLine {
    pub text: &'static str,
    pub color: u32,
}

/// Tracks whether planting is enabled and how long to keep showing that.
#[derive(Debug, Clone)]
pub struct ToggleController {
    binding: KeyBinding,
    display_ticks: u32,
    enabled: bool,
    hud_ticks_remaining: u32,
}

impl ToggleController {
    /// Disabled controller listening on `binding`.
    pub fn new(binding: KeyBinding, display_ticks: u32) -> Self {
        Self {
            binding,
            display_ticks,
            enabled: false,
            hud_ticks_remaining: 0,
        }
    }

    /// Consume pending activations, flipping once per activation, then count
    /// the HUD timer down. Returns the number of flips.
    pub fn on_tick<K: KeyEventSource + ?Sized>(&mut self, keys: &mut K) -> u32 {
        let flips = keys.consume_activations(&self.binding);
        for _ in 0..flips {
            self.enabled = !self.enabled;
            self.hud_ticks_remaining = self.display_ticks;
            info!(
                enabled = self.enabled,
                key = %self.binding.key,
                "Automatic planting toggled"
            );
        }

        self.hud_ticks_remaining = self.hud_ticks_remaining.saturating_sub(1);
        flips
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn hud_ticks_remaining(&self) -> u32 {
        self.hud_ticks_remaining
    }

    pub fn binding(&self) -> &KeyBinding {
        &self.binding
    }

    /// True while the status line should be drawn.
    pub fn should_show_status(&self) -> bool {
        self.hud_ticks_remaining > 0
    }

    pub fn status_text(&self) -> &'static str {
        self.status_line().text
    }

    pub fn status_line(&self) -> StatusLine {
        if self.enabled {
            StatusLine {
                text: "Auto planting: ON",
                color: STATUS_COLOR_ON,
            }
        } else {
            StatusLine {
                text: "Auto planting: OFF",
                color: STATUS_COLOR_OFF,
            }
        }
    }
}

impl Default for ToggleController {
    fn default() -> Self {
        Self::new(KeyBinding::planting_toggle(), DEFAULT_HUD_DISPLAY_TICKS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Presses(u32);

    impl KeyEventSource for Presses {
        fn consume_activations(&mut self, _binding: &KeyBinding) -> u32 {
            std::mem::take(&mut self.0)
        }
    }

    #[test]
    fn starts_disabled_and_hidden() {
        let toggle = ToggleController::default();
        assert!(!toggle.is_enabled());
        assert!(!toggle.should_show_status());
        assert_eq!(toggle.status_text(), "Auto planting: OFF");
    }

    #[test]
    fn one_press_flips_and_shows_status_for_display_window() {
        let mut toggle = ToggleController::default();
        assert_eq!(toggle.on_tick(&mut Presses(1)), 1);
        assert!(toggle.is_enabled());
        assert!(toggle.should_show_status());
        assert_eq!(toggle.status_line().color, STATUS_COLOR_ON);

        let mut none = Presses(0);
        for _ in 0..98 {
            toggle.on_tick(&mut none);
        }
        assert!(toggle.should_show_status());

        toggle.on_tick(&mut none);
        toggle.on_tick(&mut none);
        assert!(!toggle.should_show_status());
        assert!(toggle.is_enabled());
    }

    #[test]
    fn two_presses_in_one_tick_cancel_out() {
        let mut toggle = ToggleController::default();
        assert_eq!(toggle.on_tick(&mut Presses(2)), 2);
        assert!(!toggle.is_enabled());
        assert!(toggle.should_show_status());
    }

    #[test]
    fn countdown_never_goes_below_zero() {
        let mut toggle = ToggleController::new(KeyBinding::planting_toggle(), 1);
        toggle.on_tick(&mut Presses(1));
        assert_eq!(toggle.hud_ticks_remaining(), 0);
        toggle.on_tick(&mut Presses(0));
        assert_eq!(toggle.hud_ticks_remaining(), 0);
    }
}
