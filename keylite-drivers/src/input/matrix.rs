//! Key matrix scanner
//!
//! Rows are outputs idling high; one row at a time is driven low while the
//! columns (inputs with pull-ups) are read. A pressed key pulls its column
//! low. Keys are numbered row-major: `key_id = row * COLS + col`.

use heapless::Deque;
use keylite_core::input::{Edge, KeyEvent};
use keylite_core::traits::KeySource;
use keylite_hal::{InputPin, OutputPin};

use super::debounce::Debouncer;

/// Pending events kept between polls
pub const EVENT_QUEUE_LEN: usize = 16;

/// Debounced `ROWS` x `COLS` key matrix
pub struct KeyMatrix<R, C, const ROWS: usize, const COLS: usize> {
    rows: [R; ROWS],
    cols: [C; COLS],
    keys: [[Debouncer; COLS]; ROWS],
    events: Deque<KeyEvent, EVENT_QUEUE_LEN>,
    dropped: u32,
}

impl<R, C, const ROWS: usize, const COLS: usize> KeyMatrix<R, C, ROWS, COLS>
where
    R: OutputPin,
    C: InputPin,
{
    /// Create the scanner; all keys start released
    pub fn new(mut rows: [R; ROWS], cols: [C; COLS], debounce_ms: u32) -> Self {
        for row in rows.iter_mut() {
            row.set_high();
        }
        Self {
            rows,
            cols,
            keys: [[Debouncer::new(false, debounce_ms); COLS]; ROWS],
            events: Deque::new(),
            dropped: 0,
        }
    }

    /// Number of keys
    pub const fn key_count(&self) -> usize {
        ROWS * COLS
    }

    /// Events lost because the queue was full
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Debounced state of a key
    pub fn is_pressed(&self, key_id: u8) -> bool {
        let index = usize::from(key_id);
        self.keys
            .get(index / COLS)
            .and_then(|row| row.get(index % COLS))
            .is_some_and(Debouncer::level)
    }

    /// Scan every key once, queueing debounced changes
    pub fn scan(&mut self, now_ms: u64) {
        for (r, row) in self.rows.iter_mut().enumerate() {
            row.set_low();
            for (c, col) in self.cols.iter_mut().enumerate() {
                let pressed = col.is_low();
                let Some(edge) = self.keys[r][c].update(pressed, now_ms) else {
                    continue;
                };
                // ROWS * COLS keys fit in a u8 for any matrix this drives
                let key_id = (r * COLS + c) as u8;
                let event = match edge {
                    Edge::Rising => KeyEvent::press(key_id),
                    Edge::Falling => KeyEvent::release(key_id),
                };
                if self.events.push_back(event).is_err() {
                    self.dropped = self.dropped.saturating_add(1);
                }
            }
            row.set_high();
        }
    }

    /// Release the pins
    pub fn release(self) -> ([R; ROWS], [C; COLS]) {
        (self.rows, self.cols)
    }
}

impl<R, C, const ROWS: usize, const COLS: usize> KeySource for KeyMatrix<R, C, ROWS, COLS>
where
    R: OutputPin,
    C: InputPin,
{
    fn poll_key(&mut self, now_ms: u64) -> Option<KeyEvent> {
        self.scan(now_ms);
        self.events.pop_front()
    }
}
