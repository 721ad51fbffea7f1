//! Build script for keylite-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates panel.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Mirror of the firmware's configuration file
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PanelToml {
    illumination: Option<IlluminationToml>,
    input: Option<InputToml>,
    serial: Option<SerialToml>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct IlluminationToml {
    presets: Option<Vec<i64>>,
    fade_step: Option<i64>,
    fade_interval_ms: Option<i64>,
    proximity_hold_ms: Option<i64>,
    power_off_hold_ms: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct InputToml {
    poll_interval_ms: Option<i64>,
    debounce_ms: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SerialToml {
    baudrate: Option<i64>,
}

const DEFAULT_FADE_STEP: i64 = 1000;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate panel.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=panel.toml");

    let config_path = Path::new("panel.toml");

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read panel.toml", &[e.to_string()]),
    };

    let config: PanelToml = match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => fail(
            "Invalid panel.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    };

    let mut errors = Vec::new();
    validate_illumination(config.illumination.unwrap_or_default(), &mut errors);
    validate_input(config.input.unwrap_or_default(), &mut errors);
    validate_serial(config.serial.unwrap_or_default(), &mut errors);

    if !errors.is_empty() {
        fail("Invalid panel configuration", &errors);
    }

    println!("cargo:warning=panel.toml validated successfully");
}

fn validate_illumination(section: IlluminationToml, errors: &mut Vec<String>) {
    let fade_step = section.fade_step.unwrap_or(DEFAULT_FADE_STEP);
    if !(1..=65535).contains(&fade_step) {
        errors.push("[illumination] fade_step must be 1-65535".to_string());
    }

    if let Some(presets) = section.presets {
        if presets.len() != 3 {
            errors.push("[illumination] presets must have exactly 3 entries".to_string());
        }
        for (i, preset) in presets.iter().enumerate() {
            if !(fade_step..=65535).contains(preset) {
                errors.push(format!(
                    "[illumination] presets[{}] must be between fade_step ({}) and 65535",
                    i, fade_step
                ));
            }
        }
        if presets.windows(2).any(|w| w[1] > w[0]) {
            errors.push("[illumination] presets must be ordered brightest first".to_string());
        }
    }

    check_positive("illumination", "fade_interval_ms", section.fade_interval_ms, errors);
    check_positive("illumination", "proximity_hold_ms", section.proximity_hold_ms, errors);
    check_positive("illumination", "power_off_hold_ms", section.power_off_hold_ms, errors);
}

fn validate_input(section: InputToml, errors: &mut Vec<String>) {
    check_positive("input", "poll_interval_ms", section.poll_interval_ms, errors);
    if let Some(debounce) = section.debounce_ms {
        if !(0..=1000).contains(&debounce) {
            errors.push("[input] debounce_ms must be 0-1000".to_string());
        }
    }
}

fn validate_serial(section: SerialToml, errors: &mut Vec<String>) {
    if let Some(baudrate) = section.baudrate {
        if !(300..=921_600).contains(&baudrate) {
            errors.push("[serial] baudrate must be 300-921600".to_string());
        }
    }
}

fn check_positive(section: &str, key: &str, value: Option<i64>, errors: &mut Vec<String>) {
    if let Some(value) = value {
        if !(1..=u32::MAX as i64).contains(&value) {
            errors.push(format!("[{}] {} must be a positive u32", section, key));
        }
    }
}

/// Abort the build with a boxed error report
fn fail(title: &str, lines: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<57}║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        lines
            .iter()
            .map(|line| {
                let truncated = if line.len() > 62 {
                    format!("{}...", &line[..59])
                } else {
                    line.clone()
                };
                format!("║  • {:<62} ║", truncated)
            })
            .collect::<Vec<_>>()
            .join("\n")
    );
}
