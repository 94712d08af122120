//! Text screen session
//!
//! [`Screen`] owns the transport, the panel configuration, the font and the
//! cursor. Characters go through the cursor state machine, the resolver and
//! the renderer; everything that touches the panel goes through the
//! [`DisplayInterface`].

use crate::address::{cmd, encode_address, init_sequence};
use crate::config::{PanelConfig, GLYPH_WIDTH, MAX_WIDTH};
use crate::cursor::{Control, Cursor, CursorPosition, Step};
use crate::error::{Error, Outcome, RejectReason};
use crate::font::{Font, Glyph, BLANK_GLYPH, FONT_6X8};
use crate::glyph::resolve;
use crate::interface::DisplayInterface;
use crate::render::{render, CharMode};

/// Text screen on a page-addressed OLED panel
///
/// Rejected requests are silent no-ops by default; [`Screen::set_strict`]
/// turns them into [`Error::Rejected`].
pub struct Screen<I> {
    interface: I,
    panel: PanelConfig,
    font: &'static Font<'static>,
    cursor: Cursor,
    strict: bool,
}

impl<I: DisplayInterface> Screen<I> {
    /// Create a screen using the built-in 6x8 font
    ///
    /// Nothing is sent until [`init`](Self::init) or the first write.
    pub fn new(interface: I, panel: PanelConfig) -> Self {
        Self::with_font(interface, panel, &FONT_6X8)
    }

    /// Create a screen with a custom font
    pub fn with_font(interface: I, panel: PanelConfig, font: &'static Font<'static>) -> Self {
        Self {
            interface,
            panel,
            font,
            cursor: Cursor::new(&panel),
            strict: false,
        }
    }

    /// Give back the interface
    pub fn release(self) -> I {
        self.interface
    }

    pub fn panel(&self) -> &PanelConfig {
        &self.panel
    }

    /// Send the initialization sequence, then clear the screen
    pub fn init(&mut self, display_on: bool) -> Result<(), Error<I>> {
        #[cfg(feature = "defmt")]
        defmt::debug!(
            "init {}x{} {}",
            self.panel.width(),
            self.panel.height(),
            self.panel.dialect
        );

        self.command(&init_sequence(&self.panel, display_on))?;
        self.clear()
    }

    /// Blank every page and home the cursor
    pub fn clear(&mut self) -> Result<(), Error<I>> {
        let blank = [0u8; MAX_WIDTH as usize];
        let width = self.panel.width() as usize;

        for page in 0..self.panel.pages() {
            self.address(CursorPosition { x: 0, y: page })?;
            self.interface
                .send_data(&blank[..width])
                .map_err(Error::Interface)?;
        }

        self.home().map(|_| ())
    }

    /// Move to the top left
    pub fn home(&mut self) -> Result<Outcome, Error<I>> {
        self.goto(0, 0)
    }

    /// Move to pixel column `x`, page row `y`
    ///
    /// Off-panel targets are rejected and the cursor stays put.
    pub fn goto(&mut self, x: u8, y: u8) -> Result<Outcome, Error<I>> {
        match self.cursor.goto(x, y) {
            Ok(position) => {
                self.address(position)?;
                Ok(Outcome::Rendered)
            }
            Err(reason) => self.reject(reason),
        }
    }

    /// Move to character cell `col`, page row `row`
    pub fn goto_char(&mut self, col: u8, row: u8) -> Result<Outcome, Error<I>> {
        let x = col as usize * GLYPH_WIDTH;
        match u8::try_from(x) {
            Ok(x) => self.goto(x, row),
            Err(_) => self.reject(RejectReason::OutOfBounds),
        }
    }

    pub fn position(&self) -> CursorPosition {
        self.cursor.position()
    }

    pub fn set_char_mode(&mut self, mode: CharMode) {
        self.cursor.set_mode(mode);
    }

    pub fn char_mode(&self) -> CharMode {
        self.cursor.mode()
    }

    /// Turn rejected requests into errors
    pub fn set_strict(&mut self, strict: bool) {
        self.strict = strict;
    }

    /// Write one character code (Latin-1)
    pub fn put(&mut self, code: u8) -> Result<Outcome, Error<I>> {
        match Control::from_code(code) {
            Some(control) => self.control(control),
            None => self.printable(code),
        }
    }

    /// Write one `char`; anything beyond Latin-1 has no glyph
    pub fn put_char(&mut self, ch: char) -> Result<Outcome, Error<I>> {
        match u8::try_from(ch) {
            Ok(code) => self.put(code),
            Err(_) => self.reject(RejectReason::Unrenderable),
        }
    }

    /// Write a string, stopping at the first NUL
    ///
    /// In strict mode the first rejected character ends the string with an
    /// error.
    pub fn puts(&mut self, s: &str) -> Result<(), Error<I>> {
        for ch in s.chars().take_while(|&ch| ch != '\0') {
            self.put_char(ch)?;
        }
        Ok(())
    }

    /// Write a string kept in a static table, stopping at the first NUL
    ///
    /// Behaves exactly like [`puts`](Self::puts) on Latin-1 bytes.
    pub fn puts_static(&mut self, s: &'static [u8]) -> Result<(), Error<I>> {
        for &code in s.iter().take_while(|&&code| code != 0) {
            self.put(code)?;
        }
        Ok(())
    }

    /// Invert all pixels (hardware, no redraw)
    pub fn invert(&mut self, invert: bool) -> Result<(), Error<I>> {
        let command = if invert {
            cmd::SET_INVERSE
        } else {
            cmd::SET_NORMAL
        };
        self.command(&[command])
    }

    /// Put the panel to sleep or wake it up; RAM is kept
    pub fn sleep(&mut self, sleep: bool) -> Result<(), Error<I>> {
        let command = if sleep {
            cmd::DISPLAY_OFF
        } else {
            cmd::DISPLAY_ON
        };
        self.command(&[command])
    }

    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), Error<I>> {
        self.command(&[cmd::SET_CONTRAST, contrast])
    }

    fn control(&mut self, control: Control) -> Result<Outcome, Error<I>> {
        match self.cursor.plan(control) {
            Step::Goto(position) => self.move_to(position),
            Step::Clamped(position) => match self.move_to(position)? {
                Outcome::Rendered => Ok(Outcome::Clamped),
                outcome => Ok(outcome),
            },
            Step::Erase { at } => {
                let blank = render(
                    &mut self.interface,
                    &self.panel,
                    &BLANK_GLYPH,
                    at,
                    self.cursor.mode(),
                )
                .map_err(Error::Interface)?;

                if !blank.is_rendered() {
                    return self.reject(RejectReason::AtBoundary);
                }
                self.move_to(at)
            }
            Step::Rejected(reason) => self.reject(reason),
        }
    }

    fn printable(&mut self, code: u8) -> Result<Outcome, Error<I>> {
        let glyph = match resolve(self.font, code).and_then(|index| self.font.glyph(index)) {
            Some(glyph) => glyph,
            None => return self.reject(RejectReason::Unrenderable),
        };
        self.draw(glyph)
    }

    fn draw(&mut self, glyph: &Glyph) -> Result<Outcome, Error<I>> {
        let result = render(
            &mut self.interface,
            &self.panel,
            glyph,
            self.cursor.position(),
            self.cursor.mode(),
        )
        .map_err(Error::Interface)?;

        if !result.is_rendered() {
            return self.reject(RejectReason::Overflow);
        }

        self.cursor.advance_to(result.cursor);
        Ok(Outcome::Rendered)
    }

    fn move_to(&mut self, position: CursorPosition) -> Result<Outcome, Error<I>> {
        match self.cursor.move_to(position) {
            Ok(position) => {
                // The line-full column has no RAM behind it
                let x = position.x.min(self.panel.width() - 1);
                self.address(CursorPosition { x, ..position })?;
                Ok(Outcome::Rendered)
            }
            Err(reason) => self.reject(reason),
        }
    }

    fn address(&mut self, position: CursorPosition) -> Result<(), Error<I>> {
        let address = encode_address(position.y, position.x, self.panel.dialect);
        self.command(address.as_bytes())
    }

    fn command(&mut self, bytes: &[u8]) -> Result<(), Error<I>> {
        self.interface.send_command(bytes).map_err(Error::Interface)
    }

    fn reject(&self, reason: RejectReason) -> Result<Outcome, Error<I>> {
        #[cfg(feature = "defmt")]
        defmt::trace!("rejected at {}: {}", self.cursor.position(), reason);

        if self.strict {
            Err(Error::Rejected(reason))
        } else {
            Ok(Outcome::Rejected(reason))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Dialect;
    use crate::interface::mock::{MockInterface, Write};
    use proptest::prelude::*;

    fn screen() -> Screen<MockInterface> {
        Screen::new(MockInterface::new(), PanelConfig::SH1106_128X64)
    }

    fn glyph(code: u8) -> Vec<u8> {
        FONT_6X8.glyph(code - b' ').unwrap().to_vec()
    }

    fn addr(page: u8, x: u8) -> Vec<u8> {
        encode_address(page, x, Dialect::Sh1106).as_bytes().to_vec()
    }

    #[test]
    fn test_init_sends_sequence_then_clears() {
        let mut screen = screen();
        screen.init(true).unwrap();

        let iface = screen.release();
        assert_eq!(
            iface.writes[0],
            Write::Command(init_sequence(&PanelConfig::SH1106_128X64, true).to_vec())
        );
        assert_eq!(iface.data().len(), 8);
    }

    #[test]
    fn test_clear_blanks_every_page() {
        let mut screen = screen();
        screen.goto(40, 5).unwrap();
        screen.clear().unwrap();

        let iface = screen.release();
        let data = iface.data();
        assert_eq!(data.len(), 8);
        assert!(data.iter().all(|page| page.len() == 128 && page.iter().all(|&b| b == 0)));

        let commands = iface.commands();
        for page in 0..8u8 {
            assert_eq!(commands[1 + page as usize], addr(page, 0).as_slice());
        }
        assert_eq!(*commands.last().unwrap(), addr(0, 0).as_slice());
    }

    #[test]
    fn test_clear_short_panel() {
        let mut screen = Screen::new(MockInterface::new(), PanelConfig::SSD1306_128X32);
        screen.clear().unwrap();
        assert_eq!(screen.release().data().len(), 4);
    }

    #[test]
    fn test_goto_sends_address() {
        let mut screen = screen();
        assert_eq!(screen.goto(30, 3).unwrap(), Outcome::Rendered);
        assert_eq!(screen.position(), CursorPosition::new(30, 3));
        assert_eq!(screen.release().writes, vec![Write::Command(addr(3, 30))]);
    }

    #[test]
    fn test_goto_out_of_bounds_is_silent() {
        let mut screen = screen();
        screen.goto(30, 3).unwrap();
        screen.interface.clear();

        assert_eq!(
            screen.goto(128, 3).unwrap(),
            Outcome::Rejected(RejectReason::OutOfBounds)
        );
        assert_eq!(screen.position(), CursorPosition::new(30, 3));
        assert!(screen.release().writes.is_empty());
    }

    #[test]
    fn test_goto_char() {
        let mut screen = screen();
        screen.goto_char(3, 2).unwrap();
        assert_eq!(screen.position(), CursorPosition::new(18, 2));

        assert_eq!(
            screen.goto_char(22, 0).unwrap(),
            Outcome::Rejected(RejectReason::OutOfBounds)
        );
        assert_eq!(
            screen.goto_char(200, 0).unwrap(),
            Outcome::Rejected(RejectReason::OutOfBounds)
        );
        assert_eq!(screen.position(), CursorPosition::new(18, 2));
    }

    proptest! {
        #[test]
        fn prop_goto_then_position(x in 0u8..128, y in 0u8..8) {
            let mut screen = screen();
            prop_assert_eq!(screen.goto(x, y).unwrap(), Outcome::Rendered);
            prop_assert_eq!(screen.position(), CursorPosition::new(x, y));
        }
    }

    #[test]
    fn test_home_is_idempotent() {
        let mut screen = screen();
        screen.goto(50, 4).unwrap();

        screen.home().unwrap();
        let once = screen.position();
        screen.home().unwrap();
        assert_eq!(screen.position(), once);
        assert_eq!(once, CursorPosition::ORIGIN);
    }

    #[test]
    fn test_normal_string() {
        let mut screen = screen();
        screen.puts("AB").unwrap();

        assert_eq!(screen.position(), CursorPosition::new(12, 0));
        assert_eq!(
            screen.release().writes,
            vec![
                Write::Command(addr(0, 0)),
                Write::Data(glyph(b'A')),
                Write::Command(addr(0, 6)),
                Write::Data(glyph(b'B')),
            ]
        );
    }

    #[test]
    fn test_double_char() {
        let mut screen = screen();
        screen.set_char_mode(CharMode::Double);
        assert_eq!(screen.put(b'A').unwrap(), Outcome::Rendered);

        assert_eq!(screen.position(), CursorPosition::new(12, 0));

        let iface = screen.release();
        assert_eq!(iface.commands(), vec![addr(0, 0).as_slice(), addr(1, 0).as_slice()]);
        let data = iface.data();
        assert_eq!(data.len(), 2);
        assert!(data.iter().all(|half| half.len() == 12));
    }

    #[test]
    fn test_special_char() {
        let mut screen = screen();
        screen.put_char('Ü').unwrap();

        let expected = FONT_6X8.glyph(95).unwrap().to_vec();
        assert_eq!(screen.release().data(), vec![expected.as_slice()]);
    }

    #[test]
    fn test_unrenderable_is_dropped() {
        let mut screen = screen();

        assert_eq!(
            screen.put(0x07).unwrap(),
            Outcome::Rejected(RejectReason::Unrenderable)
        );
        assert_eq!(
            screen.put(0x7F).unwrap(),
            Outcome::Rejected(RejectReason::Unrenderable)
        );
        assert_eq!(
            screen.put_char('€').unwrap(),
            Outcome::Rejected(RejectReason::Unrenderable)
        );
        assert_eq!(screen.position(), CursorPosition::ORIGIN);
        assert!(screen.release().writes.is_empty());
    }

    #[test]
    fn test_line_full_drops_characters() {
        let mut screen = screen();
        screen.goto(122, 0).unwrap();

        assert_eq!(screen.put(b'X').unwrap(), Outcome::Rendered);
        assert_eq!(screen.position(), CursorPosition::new(128, 0));
        assert_eq!(
            screen.put(b'Y').unwrap(),
            Outcome::Rejected(RejectReason::Overflow)
        );
        assert_eq!(screen.position(), CursorPosition::new(128, 0));
    }

    #[test]
    fn test_newline_and_return() {
        let mut screen = screen();
        screen.puts("Hi\r\nyo").unwrap();

        assert_eq!(screen.position(), CursorPosition::new(12, 1));
    }

    #[test]
    fn test_tab_clamps() {
        let mut screen = screen();
        screen.goto(116, 0).unwrap();

        assert_eq!(screen.put(b'\t').unwrap(), Outcome::Clamped);
        assert_eq!(screen.position(), CursorPosition::new(122, 0));
    }

    #[test]
    fn test_backspace_erases_previous_cell() {
        let mut screen = screen();
        screen.puts("AB").unwrap();
        screen.interface.clear();

        assert_eq!(screen.put(0x08).unwrap(), Outcome::Rendered);
        assert_eq!(screen.position(), CursorPosition::new(6, 0));
        assert_eq!(
            screen.release().writes,
            vec![
                Write::Command(addr(0, 6)),
                Write::Data(BLANK_GLYPH.to_vec()),
                Write::Command(addr(0, 6)),
            ]
        );
    }

    #[test]
    fn test_full_line_then_newline() {
        let mut screen = screen();
        screen.goto(122, 0).unwrap();
        screen.put(b'X').unwrap();
        screen.interface.clear();

        assert_eq!(screen.put(b'\n').unwrap(), Outcome::Rendered);
        assert_eq!(screen.position(), CursorPosition::new(128, 1));
        assert_eq!(screen.release().writes, vec![Write::Command(addr(1, 127))]);
    }

    #[test]
    fn test_full_line_then_return() {
        let mut screen = screen();
        screen.goto(122, 4).unwrap();
        screen.put(b'X').unwrap();

        assert_eq!(screen.put(b'\r').unwrap(), Outcome::Rendered);
        assert_eq!(screen.position(), CursorPosition::new(0, 4));
        assert_eq!(screen.put(b'Y').unwrap(), Outcome::Rendered);
        assert_eq!(screen.position(), CursorPosition::new(6, 4));
    }

    #[test]
    fn test_full_line_then_tab() {
        let mut screen = screen();
        screen.goto(122, 0).unwrap();
        screen.put(b'X').unwrap();

        assert_eq!(screen.put(b'\t').unwrap(), Outcome::Clamped);
        assert_eq!(screen.position(), CursorPosition::new(122, 0));
    }

    #[test]
    fn test_full_line_then_backspace() {
        let mut screen = screen();
        screen.goto(122, 0).unwrap();
        screen.put(b'X').unwrap();
        screen.interface.clear();

        assert_eq!(screen.put(0x08).unwrap(), Outcome::Rendered);
        assert_eq!(screen.position(), CursorPosition::new(122, 0));
        assert_eq!(screen.release().data(), vec![&BLANK_GLYPH[..]]);
    }

    #[test]
    fn test_double_backspace_on_last_page_is_rejected() {
        let mut screen = screen();
        screen.goto(24, 7).unwrap();
        screen.set_char_mode(CharMode::Double);
        screen.interface.clear();

        assert_eq!(
            screen.put(0x08).unwrap(),
            Outcome::Rejected(RejectReason::AtBoundary)
        );
        assert_eq!(screen.position(), CursorPosition::new(24, 7));
        assert!(screen.interface.writes.is_empty());

        screen.set_strict(true);
        assert!(matches!(
            screen.put(0x08),
            Err(Error::Rejected(RejectReason::AtBoundary))
        ));
        assert_eq!(screen.position(), CursorPosition::new(24, 7));
    }

    #[test]
    fn test_double_controls_on_last_page() {
        let mut screen = screen();
        screen.goto(24, 7).unwrap();
        screen.set_char_mode(CharMode::Double);

        assert_eq!(
            screen.put(b'\n').unwrap(),
            Outcome::Rejected(RejectReason::AtBoundary)
        );
        assert_eq!(screen.put(b'\t').unwrap(), Outcome::Rendered);
        assert_eq!(screen.position(), CursorPosition::new(72, 7));
        assert_eq!(screen.put(b'\r').unwrap(), Outcome::Rendered);
        assert_eq!(screen.position(), CursorPosition::new(0, 7));
        assert_eq!(
            screen.put(b'A').unwrap(),
            Outcome::Rejected(RejectReason::Overflow)
        );
        assert_eq!(screen.position(), CursorPosition::new(0, 7));
    }

    #[test]
    fn test_backspace_at_origin_is_rejected() {
        let mut screen = screen();

        assert_eq!(
            screen.put(0x08).unwrap(),
            Outcome::Rejected(RejectReason::AtBoundary)
        );
        assert_eq!(screen.position(), CursorPosition::ORIGIN);
        assert!(screen.release().writes.is_empty());
    }

    #[test]
    fn test_linefeed_at_bottom_is_rejected() {
        let mut screen = screen();
        screen.goto(0, 7).unwrap();

        assert_eq!(
            screen.put(b'\n').unwrap(),
            Outcome::Rejected(RejectReason::AtBoundary)
        );
        assert_eq!(screen.position(), CursorPosition::new(0, 7));
    }

    #[test]
    fn test_strict_mode() {
        let mut screen = screen();
        screen.set_strict(true);

        assert!(matches!(
            screen.goto(200, 0),
            Err(Error::Rejected(RejectReason::OutOfBounds))
        ));

        // The string stops at the first rejected character
        screen.goto(0, 0).unwrap();
        let result = screen.puts("A\u{7}B");
        assert!(matches!(
            result,
            Err(Error::Rejected(RejectReason::Unrenderable))
        ));
        assert_eq!(screen.position(), CursorPosition::new(6, 0));
    }

    #[test]
    fn test_lenient_string_skips_rejections() {
        let mut screen = screen();
        screen.puts("A\u{7}B").unwrap();
        assert_eq!(screen.position(), CursorPosition::new(12, 0));
    }

    #[test]
    fn test_puts_flavors_match() {
        static TEXT: &[u8] = b"Hi\tthere\0ignored";

        let mut from_ram = screen();
        from_ram.puts("Hi\tthere\0ignored").unwrap();

        let mut from_table = screen();
        from_table.puts_static(TEXT).unwrap();

        assert_eq!(from_ram.position(), from_table.position());
        assert_eq!(from_ram.release().writes, from_table.release().writes);
    }

    #[test]
    fn test_device_toggles() {
        let mut screen = screen();
        screen.invert(true).unwrap();
        screen.invert(false).unwrap();
        screen.sleep(true).unwrap();
        screen.sleep(false).unwrap();
        screen.set_contrast(0x7F).unwrap();

        assert_eq!(
            screen.release().commands(),
            vec![&[0xA7][..], &[0xA6][..], &[0xAE][..], &[0xAF][..], &[0x81, 0x7F][..]]
        );
    }

    #[test]
    fn test_interface_error_keeps_cursor() {
        let mut screen = Screen::new(MockInterface::failing_after(0), PanelConfig::SH1106_128X64);

        assert!(matches!(screen.put(b'A'), Err(Error::Interface(_))));
        assert_eq!(screen.position(), CursorPosition::ORIGIN);
    }

    #[test]
    fn test_split_dialect_session() {
        let mut screen = Screen::new(MockInterface::new(), PanelConfig::SSD1306_128X64);
        screen.goto(10, 1).unwrap();

        assert_eq!(screen.release().commands(), vec![&[0xB1, 0x0C, 0x10][..]]);
    }
}
