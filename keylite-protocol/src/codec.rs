//! Button <-> receiver code mapping
//!
//! The panel has 12 lighted buttons in a 4x3 grid. Each button sends one
//! receiver code when pressed, and lights up when the receiver reports
//! that code as its current state:
//!
//! ```text
//! +----------+----------+-----------+
//! |  TV    0 | GAME1  1 | TAPE    2 |
//! |  DVD   3 | NET    4 | SWITCH  5 |
//! |  PC    6 | GAME2  7 | CBL     8 |
//! |  AUX   9 | TUN   10 | POWER  11 |
//! +----------+----------+-----------+
//! ```
//!
//! The receiver reports more states than the panel has buttons, so the
//! status table carries aliases: both tuner bands light TUN, and the two
//! sources with no button of their own light POWER.

use heapless::Vec;

use crate::command::{Command, MAX_CODE_LEN};
use crate::frame::{FrameError, DELIMITER, TERMINATOR};

/// Number of physical buttons (and LED channels)
pub const BUTTON_COUNT: usize = 12;

/// Capacity of the status table (buttons + aliases)
pub const MAX_STATUS_ENTRIES: usize = 24;

/// Receiver protocol codes used by the panel
pub mod codes {
    use super::ProtocolCode;

    /// BD/DVD input
    pub const DVD: ProtocolCode = ProtocolCode::new("1SLI10");
    /// CBL/SAT input
    pub const CBL: ProtocolCode = ProtocolCode::new("1SLI01");
    /// STRM BOX input
    pub const STM: ProtocolCode = ProtocolCode::new("1SLI11");
    /// PC input
    pub const PC: ProtocolCode = ProtocolCode::new("1SLI05");
    /// GAME1 input
    pub const GAME1: ProtocolCode = ProtocolCode::new("1SLI02");
    /// GAME2 input
    pub const GAME2: ProtocolCode = ProtocolCode::new("1SLI04");
    /// Front AUX input
    pub const AUX: ProtocolCode = ProtocolCode::new("1SLI03");
    /// CD input (tape deck on this panel)
    pub const CD: ProtocolCode = ProtocolCode::new("1SLI23");
    /// PHONO input (no button)
    pub const PHONO: ProtocolCode = ProtocolCode::new("1SLI22");
    /// TV input
    pub const TV: ProtocolCode = ProtocolCode::new("1SLI12");
    /// Tuner, last used band
    pub const TUNER: ProtocolCode = ProtocolCode::new("1SLI26");
    /// FM tuner
    pub const FM: ProtocolCode = ProtocolCode::new("1SLI24");
    /// AM tuner
    pub const AM: ProtocolCode = ProtocolCode::new("1SLI25");
    /// NET input
    pub const NET: ProtocolCode = ProtocolCode::new("1SLI2B");
    /// BLUETOOTH input (no button)
    pub const BLUETOOTH: ProtocolCode = ProtocolCode::new("1SLI2E");
    /// System power off (command and status)
    pub const POWER_OFF: ProtocolCode = ProtocolCode::new("1PWR00");
}

/// Identifier of one physical button / LED channel (0-11)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonId(u8);

impl ButtonId {
    /// TUN button, bottom middle
    pub const TUNER: ButtonId = ButtonId(10);
    /// POWER button, bottom right
    pub const POWER: ButtonId = ButtonId(11);

    /// Create a button id, rejecting values outside the grid
    pub const fn new(raw: u8) -> Option<Self> {
        if (raw as usize) < BUTTON_COUNT {
            Some(ButtonId(raw))
        } else {
            None
        }
    }

    /// Raw id
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Index into per-button arrays (LED channel number)
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate all buttons in id order
    pub fn all() -> impl Iterator<Item = ButtonId> {
        (0..BUTTON_COUNT as u8).map(ButtonId)
    }
}

/// An ASCII receiver command code such as `1SLI10`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProtocolCode(&'static str);

impl ProtocolCode {
    /// Wrap a code string
    pub const fn new(code: &'static str) -> Self {
        ProtocolCode(code)
    }

    /// Code as text
    pub const fn as_str(self) -> &'static str {
        self.0
    }

    /// Code as wire bytes
    pub const fn as_bytes(self) -> &'static [u8] {
        self.0.as_bytes()
    }

    /// Check the code can be framed: 1-14 printable ASCII bytes, no framing bytes
    pub fn is_valid(self) -> bool {
        let bytes = self.as_bytes();
        !bytes.is_empty()
            && bytes.len() <= MAX_CODE_LEN
            && bytes
                .iter()
                .all(|&b| b.is_ascii_graphic() && b != DELIMITER && b != TERMINATOR)
    }
}

/// Errors detected while building mapping tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MappingError {
    /// A code cannot be framed
    InvalidCode,
    /// Two buttons send the same code
    DuplicateButtonCode,
    /// A status code maps to two different buttons
    AmbiguousStatus,
    /// Status table capacity exceeded
    TooManyEntries,
    /// The power-off code is not assigned to a button
    PowerOffUnmapped,
}

/// Immutable button -> code table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonMapping {
    codes: [ProtocolCode; BUTTON_COUNT],
}

impl ButtonMapping {
    /// The panel's wiring, in button id order
    pub const PANEL_CODES: [ProtocolCode; BUTTON_COUNT] = [
        codes::TV,
        codes::GAME1,
        codes::CD,
        codes::DVD,
        codes::NET,
        codes::STM,
        codes::PC,
        codes::GAME2,
        codes::CBL,
        codes::AUX,
        codes::TUNER,
        codes::POWER_OFF,
    ];

    /// Build a mapping, checking every code is valid and distinct
    pub fn new(codes: [ProtocolCode; BUTTON_COUNT]) -> Result<Self, MappingError> {
        for (i, code) in codes.iter().enumerate() {
            if !code.is_valid() {
                return Err(MappingError::InvalidCode);
            }
            if codes[..i].contains(code) {
                return Err(MappingError::DuplicateButtonCode);
            }
        }
        Ok(Self { codes })
    }

    /// The panel's mapping
    pub fn panel() -> Result<Self, MappingError> {
        Self::new(Self::PANEL_CODES)
    }

    /// Code sent by a button
    pub fn code(&self, button: ButtonId) -> ProtocolCode {
        self.codes[button.index()]
    }

    /// Iterate `(button, code)` pairs in id order
    pub fn iter(&self) -> impl Iterator<Item = (ButtonId, ProtocolCode)> + '_ {
        ButtonId::all().zip(self.codes.iter().copied())
    }

    /// Button that sends `code`, if any
    pub fn button_for(&self, code: ProtocolCode) -> Option<ButtonId> {
        self.iter().find(|(_, c)| *c == code).map(|(b, _)| b)
    }
}

/// Status code -> button table (inverted button mapping plus aliases)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMapping {
    entries: Vec<(ProtocolCode, ButtonId), MAX_STATUS_ENTRIES>,
}

impl StatusMapping {
    /// Status codes that share another code's button
    pub const PANEL_ALIASES: [(ProtocolCode, ButtonId); 4] = [
        (codes::FM, ButtonId::TUNER),
        (codes::AM, ButtonId::TUNER),
        (codes::PHONO, ButtonId::POWER),
        (codes::BLUETOOTH, ButtonId::POWER),
    ];

    /// Invert `buttons` and append `aliases`
    ///
    /// An alias that repeats an existing code with the same button is
    /// accepted and stored once; one with a different button is rejected.
    pub fn new(
        buttons: &ButtonMapping,
        aliases: &[(ProtocolCode, ButtonId)],
    ) -> Result<Self, MappingError> {
        let mut mapping = Self {
            entries: Vec::new(),
        };

        for (button, code) in buttons.iter() {
            mapping.insert(code, button)?;
        }
        for &(code, button) in aliases {
            mapping.insert(code, button)?;
        }

        Ok(mapping)
    }

    /// The panel's status table
    pub fn panel(buttons: &ButtonMapping) -> Result<Self, MappingError> {
        Self::new(buttons, &Self::PANEL_ALIASES)
    }

    fn insert(&mut self, code: ProtocolCode, button: ButtonId) -> Result<(), MappingError> {
        if !code.is_valid() {
            return Err(MappingError::InvalidCode);
        }
        match self.lookup_code(code) {
            Some(existing) if existing == button => Ok(()),
            Some(_) => Err(MappingError::AmbiguousStatus),
            None => self
                .entries
                .push((code, button))
                .map_err(|_| MappingError::TooManyEntries),
        }
    }

    fn lookup_code(&self, code: ProtocolCode) -> Option<ButtonId> {
        self.lookup(code.as_bytes())
    }

    /// Button lit by a received status code
    pub fn lookup(&self, code: &[u8]) -> Option<ButtonId> {
        self.entries
            .iter()
            .find(|(c, _)| c.as_bytes() == code)
            .map(|&(_, b)| b)
    }

    /// Number of recognised status codes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(code, button)` entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (ProtocolCode, ButtonId)> + '_ {
        self.entries.iter().copied()
    }
}

/// Decoded receiver state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReceiverStatus {
    /// Receiver is on and reports a state lit by this button
    Selected(ButtonId),
    /// Receiver reported system power off
    PoweredOff,
}

impl ReceiverStatus {
    /// Button lit by this status
    pub fn button(self) -> ButtonId {
        match self {
            ReceiverStatus::Selected(button) => button,
            ReceiverStatus::PoweredOff => ButtonId::POWER,
        }
    }
}

/// Bidirectional codec between buttons and receiver codes
#[derive(Debug, Clone)]
pub struct Codec {
    buttons: ButtonMapping,
    status: StatusMapping,
    power_off: ProtocolCode,
    power_button: ButtonId,
}

impl Codec {
    /// Build a codec; `power_off` must be one of the button codes
    pub fn new(
        buttons: ButtonMapping,
        status: StatusMapping,
        power_off: ProtocolCode,
    ) -> Result<Self, MappingError> {
        let power_button = buttons
            .button_for(power_off)
            .ok_or(MappingError::PowerOffUnmapped)?;
        Ok(Self {
            buttons,
            status,
            power_off,
            power_button,
        })
    }

    /// The panel's codec
    pub fn panel() -> Result<Self, MappingError> {
        let buttons = ButtonMapping::panel()?;
        let status = StatusMapping::panel(&buttons)?;
        Self::new(buttons, status, codes::POWER_OFF)
    }

    /// Button -> code table
    pub fn buttons(&self) -> &ButtonMapping {
        &self.buttons
    }

    /// Status code -> button table
    pub fn status(&self) -> &StatusMapping {
        &self.status
    }

    /// Button carrying the power-off code
    pub fn power_button(&self) -> ButtonId {
        self.power_button
    }

    /// Framed command for a key press; `None` for keys outside the grid
    pub fn encode(&self, key_id: u8) -> Option<Command> {
        let button = ButtonId::new(key_id)?;
        Command::new(self.buttons.code(button)).ok()
    }

    /// Frame an arbitrary code, such as a status query
    pub fn query(&self, code: ProtocolCode) -> Result<Command, FrameError> {
        Command::new(code)
    }

    /// Button lit by a received code; unknown codes are `None`
    pub fn decode(&self, command: &[u8]) -> Option<ButtonId> {
        self.status.lookup(command)
    }

    /// Decode a received code, separating power off from everything else
    pub fn decode_status(&self, command: &[u8]) -> Option<ReceiverStatus> {
        if command == self.power_off.as_bytes() {
            return Some(ReceiverStatus::PoweredOff);
        }
        self.decode(command).map(ReceiverStatus::Selected)
    }
}
