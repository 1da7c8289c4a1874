//! Four-key front panel scanner.
//!
//! Keys are wired active-low with internal pull-ups, one pin per key in
//! [`Key`] code order (Previous, Next, Confirm, Activate). A key is reported
//! once, on the poll where it first reads low; holding it reports nothing
//! more until it is released.

use embedded_hal::digital::InputPin;
use platform::{Key, KeyScanner};

/// Number of keys on the panel.
pub const KEY_COUNT: usize = 4;

const KEYS: [Key; KEY_COUNT] = [Key::Previous, Key::Next, Key::Confirm, Key::Activate];

/// Edge-detecting scanner over four input pins.
#[derive(Debug)]
pub struct Keypad<P> {
    pins: [P; KEY_COUNT],
    held: [bool; KEY_COUNT],
}

impl<P: InputPin> Keypad<P> {
    /// Pins in key order: Previous, Next, Confirm, Activate.
    pub fn new(pins: [P; KEY_COUNT]) -> Self {
        Self {
            pins,
            held: [false; KEY_COUNT],
        }
    }

    /// Keys currently held, as of the last scan.
    pub fn held(&self) -> [bool; KEY_COUNT] {
        self.held
    }

    /// Release the pins.
    pub fn into_pins(self) -> [P; KEY_COUNT] {
        self.pins
    }

    /// Read every pin and return the lowest-numbered key that went down
    /// since the previous scan.
    ///
    /// A pin that fails to read counts as released.
    pub fn scan(&mut self) -> Option<Key> {
        let mut pressed = None;
        for ((pin, held), key) in self.pins.iter_mut().zip(self.held.iter_mut()).zip(KEYS) {
            let down = match pin.is_low() {
                Ok(low) => low,
                Err(_) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("keypad: read failed for {}", key);
                    false
                }
            };
            if down && !*held && pressed.is_none() {
                pressed = Some(key);
            }
            *held = down;
        }
        pressed
    }
}

impl<P: InputPin> KeyScanner for Keypad<P> {
    fn get_key(&mut self) -> u8 {
        self.scan().map_or(0, Key::code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::digital::{Mock, State, Transaction};

    fn pin(states: &[State]) -> Mock {
        let expectations: Vec<Transaction> = states.iter().map(|s| Transaction::get(*s)).collect();
        Mock::new(&expectations)
    }

    fn done(keypad: Keypad<Mock>) {
        for mut pin in keypad.into_pins() {
            pin.done();
        }
    }

    #[test]
    fn lowest_key_wins_when_two_go_down_together() {
        use State::{High, Low};
        let mut keypad = Keypad::new([pin(&[High, High]), pin(&[Low, Low]), pin(&[Low, High]), pin(&[High, High])]);
        assert_eq!(keypad.scan(), Some(Key::Next));
        // Confirm lost to Next and is released before it can report.
        assert_eq!(keypad.scan(), None);
        assert_eq!(keypad.held(), [false, true, false, false]);
        done(keypad);
    }
}
