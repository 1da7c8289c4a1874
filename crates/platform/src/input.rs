//! Input device abstraction

/// Polled key scanner.
///
/// Implementations debounce in hardware or firmware and report each press
/// once. `poll_key` never blocks.
pub trait KeyScanner {
    /// Raw code of the key pressed since the last poll: 0 for none,
    /// 1..=4 for a specific key.
    fn get_key(&mut self) -> u8;

    /// Decoded variant of [`KeyScanner::get_key`].
    fn poll_key(&mut self) -> Option<Key> {
        Key::from_code(self.get_key())
    }
}

/// The four front-panel keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    /// Key 1: previous item.
    Previous = 1,
    /// Key 2: next item.
    Next = 2,
    /// Key 3: confirm / back.
    Confirm = 3,
    /// Key 4: activate / enter.
    Activate = 4,
}

impl Key {
    /// Decode a raw key code. Unknown codes (including 0) are `None`.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Previous),
            2 => Some(Self::Next),
            3 => Some(Self::Confirm),
            4 => Some(Self::Activate),
            _ => None,
        }
    }

    /// Raw key code.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::Key;

    #[test]
    fn codes_round_trip() {
        for key in [Key::Previous, Key::Next, Key::Confirm, Key::Activate] {
            assert_eq!(Key::from_code(key.code()), Some(key));
        }
    }

    #[test]
    fn zero_and_unknown_codes_decode_to_none() {
        assert_eq!(Key::from_code(0), None);
        assert_eq!(Key::from_code(5), None);
        assert_eq!(Key::from_code(255), None);
    }
}
