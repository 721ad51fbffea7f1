//! Minimal TOML parser for `panel.toml`
//!
//! Handles only the subset the panel configuration needs. It does NOT
//! support the full TOML grammar.
//!
//! Supported features:
//! - `[section]` headers
//! - `key = value` pairs with integer values
//! - Single-line integer arrays: `presets = [65535, 20000, 2000]`
//! - Underscore digit separators (`65_535`)
//! - Comments (`# ...`), whole-line or trailing
//!
//! Keys absent from the file keep their defaults.

use super::types::{PanelConfig, PRESET_COUNT};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not valid in its section
    UnknownKey,
    /// Line is not `key = value`
    InvalidLine,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// Array has the wrong number of items
    WrongItemCount,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Illumination,
    Input,
    Serial,
}

/// Parse TOML configuration into a PanelConfig
pub fn parse_config(input: &str) -> Result<PanelConfig, ParseError> {
    let mut config = PanelConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let header = header.strip_suffix(']').ok_or(ParseError::InvalidSection)?;
            section = parse_section_header(header)?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;
        apply_value(section, key, value, &mut config)?;
    }

    Ok(config)
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "illumination" => Ok(Section::Illumination),
        "input" => Ok(Section::Input),
        "serial" => Ok(Section::Serial),
        _ => Err(ParseError::InvalidSection),
    }
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

fn parse_int<T: TryFrom<u64>>(value: &str) -> Result<T, ParseError> {
    let mut result: u64 = 0;
    let mut digits = 0;

    for c in value.chars() {
        match c {
            '_' if digits > 0 => continue,
            '0'..='9' => {
                result = result
                    .checked_mul(10)
                    .and_then(|r| r.checked_add(u64::from(c as u8 - b'0')))
                    .ok_or(ParseError::InvalidValue)?;
                digits += 1;
            }
            _ => return Err(ParseError::InvalidValue),
        }
    }

    if digits == 0 || value.ends_with('_') {
        return Err(ParseError::InvalidValue);
    }

    T::try_from(result).map_err(|_| ParseError::InvalidValue)
}

fn parse_presets(value: &str) -> Result<[u16; PRESET_COUNT], ParseError> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or(ParseError::InvalidValue)?;

    let mut presets = [0u16; PRESET_COUNT];
    let mut count = 0;

    for item in inner.split(',') {
        let item = item.trim();
        // Trailing comma
        if item.is_empty() {
            continue;
        }
        let slot = presets.get_mut(count).ok_or(ParseError::WrongItemCount)?;
        *slot = parse_int(item)?;
        count += 1;
    }

    if count != PRESET_COUNT {
        return Err(ParseError::WrongItemCount);
    }

    Ok(presets)
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut PanelConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Root => return Err(ParseError::UnknownKey),
        Section::Illumination => {
            let illumination = &mut config.illumination;
            match key {
                "presets" => illumination.presets = parse_presets(value)?,
                "fade_step" => illumination.fade_step = parse_int(value)?,
                "fade_interval_ms" => illumination.fade_interval_ms = parse_int(value)?,
                "proximity_hold_ms" => illumination.proximity_hold_ms = parse_int(value)?,
                "power_off_hold_ms" => illumination.power_off_hold_ms = parse_int(value)?,
                _ => return Err(ParseError::UnknownKey),
            }
        }
        Section::Input => match key {
            "poll_interval_ms" => config.input.poll_interval_ms = parse_int(value)?,
            "debounce_ms" => config.input.debounce_ms = parse_int(value)?,
            _ => return Err(ParseError::UnknownKey),
        },
        Section::Serial => match key {
            "baudrate" => config.serial.baudrate = parse_int(value)?,
            _ => return Err(ParseError::UnknownKey),
        },
    }
    Ok(())
}
