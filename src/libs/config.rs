//! Configuration management for the pomo application.
//!
//! Holds the timer durations, activity-monitor thresholds, and break
//! enforcement settings, with JSON persistence in the platform data
//! directory and an interactive setup wizard.
//!
//! A malformed configuration file never stops the daemon: `read` logs a
//! warning and falls back to defaults.

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::{msg_print, msg_warning};
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

/// Configuration file name used for storing application settings.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Focus/break timing settings.
///
/// Defaults mirror a classic pomodoro setup: 25-minute focus runs, a
/// 30-second micro-break every 15 minutes, and a 5-minute long break when
/// a run completes.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TimerConfig {
    /// Focus run length in minutes.
    pub focus_duration: u64,
    /// Minutes of focus between short breaks.
    pub short_break_interval: u64,
    /// Short break length in seconds.
    pub short_break_duration: u64,
    /// Long break length in minutes.
    pub long_break_duration: u64,
}

impl Default for TimerConfig {
    fn default() -> Self {
        TimerConfig {
            focus_duration: 25,
            short_break_interval: 15,
            short_break_duration: 30,
            long_break_duration: 5,
        }
    }
}

/// Activity monitor thresholds, all in seconds except the pointer
/// threshold. The warn threshold must stay below the idle threshold; the
/// gap is the window in which the idle-imminent advisory fires.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MonitorConfig {
    /// Global switch; starting the monitor is a no-op when false.
    pub enabled: bool,
    /// Pointer sample interval in seconds.
    pub poll_interval: u64,
    /// Pointer movement below this many pixels is not activity.
    pub pointer_threshold: u32,
    /// Continuous inactivity before the idle-imminent advisory.
    pub idle_warn: u64,
    /// Continuous inactivity before presence flips to idle.
    pub idle_threshold: u64,
    /// Minimum spacing between idle-imminent advisories.
    pub warn_cooldown: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        MonitorConfig {
            enabled: true,
            poll_interval: 10,
            pointer_threshold: 3,
            idle_warn: 240,
            idle_threshold: 300,
            warn_cooldown: 20,
        }
    }
}

/// Break enforcement settings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BreakConfig {
    /// Force kiosk overlays for every break, not just long ones.
    pub full_screen: bool,
}

impl Default for BreakConfig {
    fn default() -> Self {
        BreakConfig { full_screen: false }
    }
}

/// Main configuration container.
///
/// Each section is optional so unconfigured modules fall back to their
/// defaults and stay out of the JSON file.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timer: Option<TimerConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor: Option<MonitorConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub breaks: Option<BreakConfig>,
}

impl Config {
    /// Reads configuration from the filesystem.
    ///
    /// A missing file yields the default configuration. A file that exists
    /// but fails to parse also yields the default configuration, with a
    /// warning, so a corrupted settings file can never keep the daemon
    /// from starting.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        match serde_json::from_str::<Config>(&config_str) {
            Ok(config) => Ok(config),
            Err(e) => {
                msg_warning!(Message::ConfigParseFallback(e.to_string()));
                Ok(Config::default())
            }
        }
    }

    /// Saves the current configuration as pretty-printed JSON.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Effective timer settings (configured or default).
    pub fn timer_config(&self) -> TimerConfig {
        self.timer.clone().unwrap_or_default()
    }

    /// Effective monitor settings (configured or default).
    pub fn monitor_config(&self) -> MonitorConfig {
        self.monitor.clone().unwrap_or_default()
    }

    /// Effective break settings (configured or default).
    pub fn breaks_config(&self) -> BreakConfig {
        self.breaks.clone().unwrap_or_default()
    }

    /// Runs the interactive configuration setup wizard.
    ///
    /// Presents the available modules, pre-fills existing values as
    /// defaults, and returns the updated configuration for saving.
    pub fn init() -> Result<Self> {
        let mut config = match Self::read() {
            Ok(config) => config,
            Err(_) => Config::default(),
        };

        let modules = ["Timer", "Monitor", "Breaks"];

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules)
            .interact()?;

        for &selection in &selected {
            match modules[selection] {
                "Timer" => {
                    let default = config.timer.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleTimer);
                    config.timer = Some(TimerConfig {
                        focus_duration: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptFocusDuration.to_string())
                            .default(default.focus_duration)
                            .interact_text()?,
                        short_break_interval: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptShortBreakInterval.to_string())
                            .default(default.short_break_interval)
                            .interact_text()?,
                        short_break_duration: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptShortBreakDuration.to_string())
                            .default(default.short_break_duration)
                            .interact_text()?,
                        long_break_duration: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptLongBreakDuration.to_string())
                            .default(default.long_break_duration)
                            .interact_text()?,
                    });
                }
                "Monitor" => {
                    let default = config.monitor.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleMonitor);
                    config.monitor = Some(MonitorConfig {
                        enabled: Confirm::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptMonitoringEnabled.to_string())
                            .default(default.enabled)
                            .interact()?,
                        poll_interval: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptPollInterval.to_string())
                            .default(default.poll_interval)
                            .interact_text()?,
                        idle_threshold: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptIdleThreshold.to_string())
                            .default(default.idle_threshold)
                            .interact_text()?,
                        ..default
                    });
                }
                "Breaks" => {
                    let default = config.breaks.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleBreaks);
                    config.breaks = Some(BreakConfig {
                        full_screen: Confirm::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptFullScreenBreaks.to_string())
                            .default(default.full_screen)
                            .interact()?,
                    });
                }
                _ => {}
            }
        }

        Ok(config)
    }
}
