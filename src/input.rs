//! Merges remote-control frames and push-buttons into [`KeyEvent`]s.

use crate::peripherals::ButtonSampler;
use crate::rc5::Rc5Frame;
use crate::shared::Rc5Mailbox;
use crate::types::KeyEvent;
use embedded_hal::delay::DelayNs;

/// Maps an RC5 command number to a key.
///
/// Only the low six bits select the key, so an RC5X extended command (field
/// bit clear) maps like its base command. Commands 1-3 are the adjustment
/// keys in reverse order, 4 and anything unrecognized act as the mode key.
pub fn key_for_command(command: u8) -> KeyEvent {
    match command & 0x3F {
        1 => KeyEvent::Key3,
        2 => KeyEvent::Key2,
        3 => KeyEvent::Key1,
        _ => KeyEvent::Key4,
    }
}

/// Produces at most one key per poll.
///
/// A pending RC5 frame always wins. Otherwise the buttons are scanned in
/// [`KeyEvent::SCAN_ORDER`]; a pressed button counts only if it still reads
/// pressed after the debounce delay.
pub struct InputArbiter<'a> {
    mailbox: &'a Rc5Mailbox,
    debounce_ms: u32,
}

impl<'a> InputArbiter<'a> {
    pub fn new(mailbox: &'a Rc5Mailbox, debounce_ms: u32) -> Self {
        Self {
            mailbox,
            debounce_ms,
        }
    }

    pub fn poll<H: ButtonSampler + DelayNs>(&self, hw: &mut H) -> Option<KeyEvent> {
        if let Some(word) = self.mailbox.take() {
            let frame = Rc5Frame::from_word(word);
            let key = key_for_command(frame.command);
            debug!(
                "rc5 frame: address {=u8} command {=u8} toggle {=bool} -> {}",
                frame.address,
                frame.command,
                frame.toggle,
                key
            );
            return Some(key);
        }

        for key in KeyEvent::SCAN_ORDER {
            if hw.sample_button(key) {
                hw.delay_ms(self.debounce_ms);
                if hw.sample_button(key) {
                    debug!("button {}", key);
                    return Some(key);
                }
            }
        }

        None
    }
}
