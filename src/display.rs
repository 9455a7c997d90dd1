//! # Display
//! Decides what to (re)draw on the status display.
//!
//! Every tick the core renders a [`Frame`] of what should be visible and compares it with the
//! frame drawn the tick before. Each item whose text changed gets a blank request with the old
//! text (the surface draws it in the background color) followed by a draw request with the new
//! text. Nothing else is redrawn, how glyphs end up on the screen is up to the surface.
use crate::alarm_settings::AlarmEntry;
use crate::settings::SettingField;
use crate::state::OperationMode;
use crate::utility::date_time::{TimeSnapshot, Weekday};
use crate::utility::string_utils::{DisplayText, StringUtils};

/// Accepts draw requests for the status display
pub trait DisplaySurface {
    /// Draws (or, for `blank` requests, erases) one piece of text
    fn draw(&mut self, request: &DrawRequest);

    /// Called once after all requests of a tick, if there were any
    fn flush(&mut self) {}
}

/// The things shown on the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayItem {
    /// The value of an editable field
    Field(SettingField),
    /// Name of the current weekday
    Today,
    /// Banner naming the active mode
    Mode,
    /// Marker under the active field, only in setup
    Cursor,
}

impl DisplayItem {
    /// All items, in drawing order
    pub const ALL: [Self; 14] = [
        Self::Mode,
        Self::Field(SettingField::Hour),
        Self::Field(SettingField::Minute),
        Self::Field(SettingField::Second),
        Self::Field(SettingField::AmPmHalf),
        Self::Field(SettingField::Month),
        Self::Field(SettingField::Day),
        Self::Field(SettingField::Year),
        Self::Today,
        Self::Field(SettingField::WeekdaySelector),
        Self::Field(SettingField::AlarmHour),
        Self::Field(SettingField::AlarmMinute),
        Self::Field(SettingField::AlarmHalf),
        Self::Cursor,
    ];
}

/// Width of the display in pixels
pub const DISPLAY_WIDTH: i32 = 128;

/// Height of the display in pixels
pub const DISPLAY_HEIGHT: i32 = 64;

/// Width of one character cell of the display font
pub const CHAR_WIDTH: i32 = 6;

/// Height of one character cell of the display font
pub const LINE_HEIGHT: i32 = 13;

const TIME_ROW: i32 = 0;
const DATE_ROW: i32 = 21;
const ALARM_ROW: i32 = 42;

/// Top left corner of a field on the display
const fn field_position(field: SettingField) -> (i32, i32) {
    match field {
        SettingField::Hour => (0, TIME_ROW),
        SettingField::Minute => (18, TIME_ROW),
        SettingField::Second => (36, TIME_ROW),
        SettingField::AmPmHalf => (54, TIME_ROW),
        SettingField::Month => (0, DATE_ROW),
        SettingField::Day => (18, DATE_ROW),
        SettingField::Year => (36, DATE_ROW),
        SettingField::WeekdaySelector => (0, ALARM_ROW),
        SettingField::AlarmHour => (66, ALARM_ROW),
        SettingField::AlarmMinute => (84, ALARM_ROW),
        SettingField::AlarmHalf => (102, ALARM_ROW),
    }
}

/// Vertical distance between a field and the cursor marker under it. The marker under the
/// alarm row ends on the last pixel line.
const CURSOR_OFFSET: i32 = DISPLAY_HEIGHT - LINE_HEIGHT - ALARM_ROW;

/// One request to the display surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawRequest {
    /// Left edge in pixels
    pub x: i32,
    /// Top edge in pixels
    pub y: i32,
    /// The text to draw, or to erase for blank requests
    pub text: DisplayText,
    /// What the text shows
    pub item: DisplayItem,
    /// Erase the text instead of drawing it
    pub blank: bool,
}

/// Everything the display shows at one moment
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    /// The time shown
    pub snapshot: TimeSnapshot,
    /// The active mode
    pub mode: OperationMode,
    /// Weekday of the alarm shown
    pub alarm_weekday: Weekday,
    /// The alarm shown
    pub alarm: AlarmEntry,
    /// The field being edited, shown in setup only
    pub active_field: SettingField,
}

impl Frame {
    /// Position of an item in this frame
    const fn position(&self, item: DisplayItem) -> (i32, i32) {
        match item {
            DisplayItem::Field(field) => field_position(field),
            DisplayItem::Today => (66, DATE_ROW),
            DisplayItem::Mode => (80, TIME_ROW),
            DisplayItem::Cursor => {
                let (x, y) = field_position(self.active_field);
                (x, y + CURSOR_OFFSET)
            }
        }
    }

    /// Text of an item in this frame, empty if the item is not shown
    fn text(&self, item: DisplayItem) -> DisplayText {
        let now = &self.snapshot;
        match item {
            DisplayItem::Field(SettingField::Hour) => {
                StringUtils::padded(u16::from(StringUtils::hour_12(now.hour())), 2)
            }
            DisplayItem::Field(SettingField::Minute) => {
                StringUtils::padded(u16::from(now.minute()), 2)
            }
            DisplayItem::Field(SettingField::Second) => {
                StringUtils::padded(u16::from(now.second()), 2)
            }
            DisplayItem::Field(SettingField::AmPmHalf) => {
                StringUtils::text(StringUtils::meridiem(now.hour()))
            }
            DisplayItem::Field(SettingField::Year) => StringUtils::padded(now.year(), 4),
            DisplayItem::Field(SettingField::Month) => {
                StringUtils::padded(u16::from(now.month()), 2)
            }
            DisplayItem::Field(SettingField::Day) => StringUtils::padded(u16::from(now.day()), 2),
            DisplayItem::Field(SettingField::WeekdaySelector) => {
                StringUtils::text(StringUtils::weekday_name(self.alarm_weekday))
            }
            DisplayItem::Field(SettingField::AlarmHour) => {
                StringUtils::padded(u16::from(StringUtils::hour_12(self.alarm.hour())), 2)
            }
            DisplayItem::Field(SettingField::AlarmMinute) => {
                StringUtils::padded(u16::from(self.alarm.minute()), 2)
            }
            DisplayItem::Field(SettingField::AlarmHalf) => {
                StringUtils::text(StringUtils::meridiem(self.alarm.hour()))
            }
            DisplayItem::Today => StringUtils::text(StringUtils::weekday_name(now.weekday())),
            DisplayItem::Mode => StringUtils::text(match self.mode {
                OperationMode::Clock => "",
                OperationMode::Sunrise => "Sunrise",
                OperationMode::Sleep => "Sleep",
                OperationMode::Setup => "Setup",
            }),
            DisplayItem::Cursor => {
                StringUtils::text(if self.mode == OperationMode::Setup {
                    "^^"
                } else {
                    ""
                })
            }
        }
    }
}

/// Sends the requests that turn the `previous` frame into `current` to the surface and returns
/// how many were sent. Without a previous frame everything is drawn.
pub fn redraw<D: DisplaySurface>(
    surface: &mut D,
    previous: Option<&Frame>,
    current: &Frame,
) -> usize {
    let mut sent = 0;
    for item in DisplayItem::ALL {
        let (x, y) = current.position(item);
        let text = current.text(item);
        let old = previous.map(|frame| (frame.position(item), frame.text(item)));

        if let Some(((old_x, old_y), old_text)) = &old {
            if *old_x == x && *old_y == y && *old_text == text {
                continue;
            }
            if !old_text.is_empty() {
                surface.draw(&DrawRequest {
                    x: *old_x,
                    y: *old_y,
                    text: old_text.clone(),
                    item,
                    blank: true,
                });
                sent += 1;
            }
        }
        if !text.is_empty() {
            surface.draw(&DrawRequest {
                x,
                y,
                text,
                item,
                blank: false,
            });
            sent += 1;
        }
    }
    if sent > 0 {
        surface.flush();
    }
    sent
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        requests: std::vec::Vec<DrawRequest>,
        flushes: usize,
    }

    impl DisplaySurface for Recorder {
        fn draw(&mut self, request: &DrawRequest) {
            self.requests.push(request.clone());
        }

        fn flush(&mut self) {
            self.flushes += 1;
        }
    }

    fn frame(hour: u8, minute: u8, second: u8, mode: OperationMode) -> Frame {
        let snapshot = TimeSnapshot::new(2024, 6, 26, hour, minute, second).unwrap();
        Frame {
            snapshot,
            mode,
            alarm_weekday: snapshot.weekday(),
            alarm: AlarmEntry::new(6, 30),
            active_field: SettingField::Hour,
        }
    }

    #[test]
    fn first_frame_draws_every_visible_item() {
        let mut surface = Recorder::default();
        let sent = redraw(&mut surface, None, &frame(6, 5, 9, OperationMode::Clock));
        // the mode banner and the cursor are empty in clock mode
        assert_eq!(sent, 12);
        assert!(surface.requests.iter().all(|r| !r.blank));
        assert_eq!(surface.flushes, 1);
        let today = surface
            .requests
            .iter()
            .find(|r| r.item == DisplayItem::Today)
            .unwrap();
        assert_eq!(today.text.as_str(), "Wednesday");
    }

    #[test]
    fn unchanged_frame_draws_nothing() {
        let mut surface = Recorder::default();
        let shown = frame(6, 5, 9, OperationMode::Clock);
        assert_eq!(redraw(&mut surface, Some(&shown), &shown.clone()), 0);
        assert_eq!(surface.flushes, 0);
    }

    #[test]
    fn changed_second_is_blanked_then_redrawn() {
        let mut surface = Recorder::default();
        let before = frame(6, 5, 9, OperationMode::Clock);
        let after = frame(6, 5, 10, OperationMode::Clock);
        redraw(&mut surface, Some(&before), &after);
        let requests = &surface.requests;
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].item, DisplayItem::Field(SettingField::Second));
        assert!(requests[0].blank);
        assert_eq!(requests[0].text.as_str(), "09");
        assert!(!requests[1].blank);
        assert_eq!(requests[1].text.as_str(), "10");
        assert_eq!((requests[1].x, requests[1].y), (36, 0));
    }

    #[test]
    fn hours_use_the_twelve_hour_clock() {
        let mut surface = Recorder::default();
        redraw(&mut surface, None, &frame(13, 0, 0, OperationMode::Clock));
        let text_of = |item| {
            surface
                .requests
                .iter()
                .find(|r| r.item == item)
                .map(|r| r.text.clone())
                .unwrap()
        };
        assert_eq!(text_of(DisplayItem::Field(SettingField::Hour)).as_str(), "01");
        assert_eq!(text_of(DisplayItem::Field(SettingField::AmPmHalf)).as_str(), "PM");
    }

    #[test]
    fn cursor_follows_the_active_field_in_setup() {
        let mut surface = Recorder::default();
        let before = frame(6, 5, 9, OperationMode::Setup);
        let mut after = before.clone();
        after.active_field = SettingField::Minute;
        redraw(&mut surface, Some(&before), &after);
        let requests = &surface.requests;
        assert_eq!(requests.len(), 2);
        assert!(requests.iter().all(|r| r.item == DisplayItem::Cursor));
        assert_eq!((requests[0].x, requests[0].y, requests[0].blank), (0, 9, true));
        assert_eq!((requests[1].x, requests[1].y, requests[1].blank), (18, 9, false));
    }

    #[test]
    fn leaving_setup_erases_banner_and_cursor() {
        let mut surface = Recorder::default();
        let before = frame(6, 5, 9, OperationMode::Setup);
        let after = frame(6, 5, 9, OperationMode::Clock);
        redraw(&mut surface, Some(&before), &after);
        assert_eq!(surface.requests.len(), 2);
        assert!(surface.requests.iter().all(|r| r.blank));
    }

    #[test]
    fn every_item_fits_on_the_panel() {
        // Wednesday and Sunrise are the longest texts
        let widest = |mode| {
            let mut shown = frame(10, 59, 59, mode);
            shown.snapshot = TimeSnapshot::new(2024, 9, 25, 22, 59, 59).unwrap();
            shown.alarm_weekday = Weekday::WEDNESDAY;
            shown
        };
        for mode in [OperationMode::Sunrise, OperationMode::Setup] {
            for field in SettingField::ALL {
                let mut current = widest(mode);
                current.active_field = field;
                for item in DisplayItem::ALL {
                    let (x, y) = current.position(item);
                    let width = i32::try_from(current.text(item).len()).unwrap() * CHAR_WIDTH;
                    assert!(x >= 0 && x + width <= DISPLAY_WIDTH, "{item:?} at {x}");
                    assert!(y >= 0 && y + LINE_HEIGHT <= DISPLAY_HEIGHT, "{item:?} at {y}");
                }
            }
        }
    }

    #[test]
    fn items_on_a_row_do_not_overlap() {
        let mut current = frame(10, 59, 59, OperationMode::Sunrise);
        current.snapshot = TimeSnapshot::new(2024, 9, 25, 22, 59, 59).unwrap();
        let mut cells: std::vec::Vec<(i32, i32, i32)> = std::vec::Vec::new();
        for item in DisplayItem::ALL {
            let (x, y) = current.position(item);
            let width = i32::try_from(current.text(item).len()).unwrap() * CHAR_WIDTH;
            if width > 0 {
                cells.push((y, x, x + width));
            }
        }
        for (i, a) in cells.iter().enumerate() {
            for b in &cells[i + 1..] {
                if a.0 == b.0 {
                    assert!(a.2 <= b.1 || b.2 <= a.1, "{a:?} overlaps {b:?}");
                }
            }
        }
    }
}
