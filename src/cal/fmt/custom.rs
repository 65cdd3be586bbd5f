//! Datetime-to-string routines.

use std::fmt;
use std::str::CharIndices;

use pad::{PadStr, Alignment};

use crate::cal::{DatePiece, TimePiece};
use crate::cal::calendar::CalendarView;
use crate::cal::gregorian::Weekday;
use crate::cal::zone::TimeZone;


/// What formatting a value produces when it can’t be resolved to an
/// instant.
pub const FORMAT_FAILURE: &str = "-";


#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Field<'a> {
    Literal(&'a str),

    Era(NumArguments),
    Year(NumArguments),
    YearOfCentury(NumArguments),

    MonthName(bool, TextArguments),
    MonthNumber(NumArguments),

    Day(NumArguments),
    WeekdayName(bool, TextArguments),

    Hour(NumArguments),
    Minute(NumArguments),
    Second(NumArguments),
    Nanosecond(NumArguments),

    Zone(TextArguments),
}

impl<'a> Field<'a> {
    fn format(&self, when: &CalendarView, w: &mut String, locale: &locale::Time) {
        let month = (when.month() - 1) as usize;
        let weekday = when.weekday.days_from_sunday();

        match *self {
            Field::Literal(s)             => w.push_str(s),
            Field::Era(a)                 => a.format(w, when.era()),
            Field::Year(a)                => a.format(w, when.year()),
            Field::YearOfCentury(a)       => a.format(w, when.year().rem_euclid(100)),
            Field::MonthName(true, a)     => a.format(w, &locale.long_month_name(month)),
            Field::MonthName(false, a)    => a.format(w, &locale.short_month_name(month)),
            Field::MonthNumber(a)         => a.format(w, when.month()),
            Field::Day(a)                 => a.format(w, when.day()),
            Field::WeekdayName(true, a)   => a.format(w, &long_day_name(locale, when.weekday)),
            Field::WeekdayName(false, a)  => a.format(w, &locale.short_day_name(weekday)),
            Field::Hour(a)                => a.format(w, when.hour()),
            Field::Minute(a)              => a.format(w, when.minute()),
            Field::Second(a)              => a.format(w, when.second()),
            Field::Nanosecond(a)          => a.format(w, when.nanosecond()),
            Field::Zone(a)                => a.format(w, &when.zone),
        }
    }
}


/// The locale’s long name for a weekday. `locale` 0.2 hands back the short
/// name here, so that case falls back to the English name.
fn long_day_name(locale: &locale::Time, weekday: Weekday) -> String {
    let index = weekday.days_from_sunday();
    let name = locale.long_day_name(index);

    if name == locale.short_day_name(index) { weekday.to_string() }
                                       else { name }
}


#[derive(PartialEq, Eq, Clone, Debug)]
pub struct DateFormat<'a> {
    pub fields: Vec<Field<'a>>,
}


#[derive(PartialEq, Eq, Clone, Debug, Copy)]
pub enum FormatError {
    InvalidChar { c: char, colon: bool, pos: Pos },
    OpenCurlyBrace { open_pos: Pos },
    CloseCurlyBrace { close_pos: Pos },
    MissingField { open_pos: Pos, close_pos: Pos },
    DoubleAlignment { open_pos: Pos, current_alignment: Alignment },
    DoubleWidth { open_pos: Pos, current_width: Width },
    WidthTooLarge { open_pos: Pos },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            FormatError::InvalidChar { c, pos, .. }        => write!(f, "invalid character {:?} at {}", c, pos),
            FormatError::OpenCurlyBrace { open_pos }       => write!(f, "unclosed brace at {}", open_pos),
            FormatError::CloseCurlyBrace { close_pos }     => write!(f, "unopened brace at {}", close_pos),
            FormatError::MissingField { open_pos, .. }     => write!(f, "no field given in the braces at {}", open_pos),
            FormatError::DoubleAlignment { open_pos, .. }  => write!(f, "alignment given twice in the braces at {}", open_pos),
            FormatError::DoubleWidth { open_pos, .. }      => write!(f, "width given twice in the braces at {}", open_pos),
            FormatError::WidthTooLarge { open_pos }        => write!(f, "width too large in the braces at {}", open_pos),
        }
    }
}

impl std::error::Error for FormatError {
}

pub type Width = usize;
pub type Pos = usize;

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Arguments {
    pub alignment: Option<Alignment>,
    pub width:     Option<Width>,
    pub pad_char:  Option<char>,
}

impl Arguments {
    pub fn empty() -> Self {
        Self {
            alignment: None,
            width:     None,
            pad_char:  None,
        }
    }

    /// Right-aligned and padded with zeroes to the given width.
    pub fn zero_padded(width: Width) -> Self {
        Self {
            alignment: Some(Alignment::Right),
            width:     Some(width),
            pad_char:  Some('0'),
        }
    }

    pub fn set_width(&mut self, width: Width) -> Self {
        self.width = Some(width);
        *self
    }

    pub fn set_alignment(&mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        *self
    }

    pub fn update_width(&mut self, width: Width, open_pos: Pos) -> Result<(), FormatError> {
        match self.width {
            None => { self.width = Some(width); Ok(())},
            Some(existing) => Err(FormatError::DoubleWidth { open_pos, current_width: existing }),
        }
    }

    pub fn update_alignment(&mut self, alignment: Alignment, open_pos: Pos) -> Result<(), FormatError> {
        match self.alignment {
            None => { self.alignment = Some(alignment); Ok(())},
            Some(existing) => Err(FormatError::DoubleAlignment { open_pos, current_alignment: existing }),
        }
    }

    fn format(self, w: &mut String, string: &str) {
        let width     = self.width.unwrap_or(0);
        let pad_char  = self.pad_char.unwrap_or(' ');
        let alignment = self.alignment.unwrap_or(Alignment::Left);

        w.push_str(&string.pad(width, pad_char, alignment, false));
    }

    pub fn is_empty(&self) -> bool {
        self.alignment.is_none() && self.width.is_none() && self.pad_char.is_none()
    }
}


#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct TextArguments(pub Arguments);

impl TextArguments {
    pub fn empty() -> TextArguments {
        TextArguments(Arguments::empty())
    }

    fn format(self, w: &mut String, string: &str) {
        self.0.format(w, string)
    }
}


#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct NumArguments(pub Arguments);

impl NumArguments {
    pub fn empty() -> NumArguments {
        NumArguments(Arguments::empty())
    }

    pub fn zero_padded(width: Width) -> NumArguments {
        NumArguments(Arguments::zero_padded(width))
    }

    fn format(self, w: &mut String, number: i64) {
        self.0.format(w, &number.to_string())
    }
}

impl<'a> DateFormat<'a> {

    /// Renders every field of this format, in order.
    pub fn format(&self, when: &CalendarView, locale: &locale::Time) -> String {
        let mut buf = String::new();

        for field in &self.fields {
            field.format(when, &mut buf, locale);
        }

        buf
    }

    /// Parses a format string.
    ///
    /// Fields go in braces: `{:Y}` is the year, and the characters between
    /// the opening brace and the colon give the alignment (`<`, `^`, or
    /// `>`), the width, a `0` to pad with zeroes, and a `_` to use long
    /// names. Everything outside braces is literal text, with `{{` and
    /// `}}` standing for single braces.
    ///
    /// ### Examples
    ///
    /// ```
    /// use khrysalis_runtime::DateFormat;
    ///
    /// assert!(DateFormat::parse("{:Y}-{02>:N}-{02>:D}").is_ok());
    /// assert!(DateFormat::parse("{:Q}").is_err());
    /// ```
    pub fn parse(input: &'a str) -> Result<DateFormat<'a>, FormatError> {
        let mut parser = FormatParser::new(input);
        parser.parse_format_string()?;

        Ok(DateFormat { fields: parser.fields })
    }
}


struct FormatParser<'a> {
    iter:   CharIndices<'a>,
    fields: Vec<Field<'a>>,
    input:  &'a str,
    anchor: Option<Pos>,
    peekee: Option<Option<(Pos, char)>>,
}

impl<'a> FormatParser<'a> {
    fn new(input: &'a str) -> FormatParser<'a> {
        FormatParser {
            iter:   input.char_indices(),
            fields: Vec::new(),
            input,
            anchor: None,
            peekee: None,
        }
    }

    fn next(&mut self) -> Option<(Pos, char)> {
        match self.peekee.take() {
            Some(p) => p,
            None    => self.iter.next(),
        }
    }

    fn peek(&mut self) -> Option<(Pos, char)> {
        match self.peekee {
            Some(thing) => thing,
            None => {
                let thing = self.iter.next();
                self.peekee = Some(thing);
                thing
            }
        }
    }

    fn collect_up_to_anchor(&mut self, position: Option<Pos>) {
        if let Some(pos) = self.anchor.take() {
            let text = match position {
                Some(new_pos) => &self.input[pos..new_pos],
                None          => &self.input[pos..],
            };
            self.fields.push(Field::Literal(text));
        }
    }

    fn parse_format_string(&mut self) -> Result<(), FormatError> {
        loop {
            match self.next() {
                Some((new_pos, '{')) => {
                    self.collect_up_to_anchor(Some(new_pos));

                    let field = self.parse_a_thing(new_pos)?;
                    self.fields.push(field);
                },
                Some((new_pos, '}')) => {
                    if let Some((_, '}')) = self.next() {
                        self.collect_up_to_anchor(Some(new_pos));

                        let field = Field::Literal(&self.input[new_pos ..=new_pos]);
                        self.fields.push(field);
                    }
                    else {
                        return Err(FormatError::CloseCurlyBrace { close_pos: new_pos });
                    }
                },
                Some((pos, _)) => {
                    if self.anchor.is_none() {
                        self.anchor = Some(pos);
                    }
                }
                None => break,
            }
        }

        // Literal text after the last field.
        self.collect_up_to_anchor(None);
        Ok(())
    }

    // Literals are slices of the input, so escaped braces can’t be spliced
    // into their neighbours. Each "{{" or "}}" becomes its own one-character
    // Literal pointing at the first brace instead.

    fn parse_number(&mut self, just_parsed_character: char, open_pos: Pos) -> Result<Width, FormatError> {
        let mut buf = just_parsed_character.to_string();

        while let Some((_, n)) = self.peek() {
            if !n.is_ascii_digit() {
                break;
            }

            buf.push(n);
            let _ = self.next();
        }

        buf.parse().map_err(|_| FormatError::WidthTooLarge { open_pos })
    }

    fn parse_a_thing(&mut self, open_pos: Pos) -> Result<Field<'a>, FormatError> {
        let mut args = Arguments::empty();
        let mut bit = None;
        let close_pos;
        let mut first = true;
        let mut long = false;

        loop {
            match self.next() {
                Some((pos, '{')) if first => return Ok(Field::Literal(&self.input[pos ..=pos])),
                Some((_, '<')) => { args.update_alignment(Alignment::Left, open_pos)?; },
                Some((_, '^')) => { args.update_alignment(Alignment::Middle, open_pos)?; },
                Some((_, '>')) => { args.update_alignment(Alignment::Right, open_pos)?; },
                Some((_, '0')) => { args.pad_char = Some('0'); },
                Some((_, n)) if n.is_ascii_digit() => {
                    let width = self.parse_number(n, open_pos)?;
                    args.update_width(width, open_pos)?;
                },
                Some((_, '_')) => { long = true; },
                Some((_, ':')) => {
                    let bitlet = match self.next() {
                        Some((_, 'G')) => Field::Era(NumArguments(args)),
                        Some((_, 'Y')) => Field::Year(NumArguments(args)),
                        Some((_, 'y')) => Field::YearOfCentury(NumArguments(args)),
                        Some((_, 'M')) => Field::MonthName(long, TextArguments(args)),
                        Some((_, 'N')) => Field::MonthNumber(NumArguments(args)),
                        Some((_, 'D')) => Field::Day(NumArguments(args)),
                        Some((_, 'E')) => Field::WeekdayName(long, TextArguments(args)),
                        Some((_, 'h')) => Field::Hour(NumArguments(args)),
                        Some((_, 'm')) => Field::Minute(NumArguments(args)),
                        Some((_, 's')) => Field::Second(NumArguments(args)),
                        Some((_, 'f')) => Field::Nanosecond(NumArguments(args)),
                        Some((_, 'Z')) => Field::Zone(TextArguments(args)),
                        Some((pos, c)) => return Err(FormatError::InvalidChar { c, colon: true, pos }),
                        None => return Err(FormatError::OpenCurlyBrace { open_pos }),
                    };

                    bit = Some(bitlet);
                },
                Some((pos, '}')) => { close_pos = pos; break; },
                Some((pos, c)) => return Err(FormatError::InvalidChar { c, colon: false, pos }),
                None => return Err(FormatError::OpenCurlyBrace { open_pos }),
            };

            first = false;
        }

        match bit {
            Some(b) => Ok(b),
            None    => Err(FormatError::MissingField { open_pos, close_pos }),
        }
    }
}


/// How much of a date a styled formatter shows.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum DateStyle {
    /// No date at all.
    None,

    /// `3/5/24`
    Short,

    /// `Mar 5, 2024`
    Medium,

    /// `March 5, 2024`
    Long,

    /// `Tuesday, March 5, 2024`
    Full,
}

/// How much of a time a styled formatter shows.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum TimeStyle {
    /// No time at all.
    None,

    /// `10:15`
    Short,

    /// `10:15:30`
    Medium,

    /// `10:15:30 Europe/London`
    Long,

    /// `10:15:30.000000001 Europe/London`
    Full,
}

impl DateStyle {
    fn fields(self) -> Vec<Field<'static>> {
        use self::Field::*;

        match self {
            DateStyle::None   => vec![],
            DateStyle::Short  => vec![ MonthNumber(NumArguments::empty()), Literal("/"), Day(NumArguments::empty()), Literal("/"), YearOfCentury(NumArguments::zero_padded(2)) ],
            DateStyle::Medium => vec![ MonthName(false, TextArguments::empty()), Literal(" "), Day(NumArguments::empty()), Literal(", "), Year(NumArguments::empty()) ],
            DateStyle::Long   => vec![ MonthName(true, TextArguments::empty()), Literal(" "), Day(NumArguments::empty()), Literal(", "), Year(NumArguments::empty()) ],
            DateStyle::Full   => vec![ WeekdayName(true, TextArguments::empty()), Literal(", "), MonthName(true, TextArguments::empty()), Literal(" "), Day(NumArguments::empty()), Literal(", "), Year(NumArguments::empty()) ],
        }
    }
}

impl TimeStyle {
    fn fields(self) -> Vec<Field<'static>> {
        use self::Field::*;

        let mut fields = match self {
            TimeStyle::None => return vec![],
            _               => vec![ Hour(NumArguments::zero_padded(2)), Literal(":"), Minute(NumArguments::zero_padded(2)) ],
        };

        if self != TimeStyle::Short {
            fields.extend(vec![ Literal(":"), Second(NumArguments::zero_padded(2)) ]);
        }

        if self == TimeStyle::Full {
            fields.extend(vec![ Literal("."), Nanosecond(NumArguments::zero_padded(9)) ]);
        }

        if self == TimeStyle::Long || self == TimeStyle::Full {
            fields.extend(vec![ Literal(" "), Zone(TextArguments::empty()) ]);
        }

        fields
    }
}


/// A format together with the locale to render names in, and optionally
/// a time zone to show every value in.
pub struct DateFormatter {
    format:    DateFormat<'static>,
    locale:    locale::Time,
    time_zone: Option<TimeZone>,
}

impl DateFormatter {

    /// A formatter for an already-parsed format.
    pub fn new(format: DateFormat<'static>, locale: locale::Time) -> Self {
        Self { format, locale, time_zone: None }
    }

    /// A formatter with English names and one of the preset date and time
    /// styles, with the date before the time.
    ///
    /// ```
    /// use khrysalis_runtime::{DateFormatter, DateStyle, TimeStyle};
    ///
    /// let formatter = DateFormatter::styled(DateStyle::Medium, TimeStyle::Short);
    /// assert_eq!(formatter.date_format().fields.len(), 9);
    /// ```
    pub fn styled(date: DateStyle, time: TimeStyle) -> Self {
        let mut fields = date.fields();
        let time_fields = time.fields();

        if !fields.is_empty() && !time_fields.is_empty() {
            fields.push(Field::Literal(", "));
        }

        fields.extend(time_fields);
        Self::new(DateFormat { fields }, locale::Time::english())
    }

    /// Returns a copy of this formatter that shows every value in the
    /// given time zone, rather than the value’s own.
    pub fn with_time_zone(mut self, time_zone: TimeZone) -> Self {
        self.time_zone = Some(time_zone);
        self
    }

    pub fn time_zone(&self) -> Option<&TimeZone> {
        self.time_zone.as_ref()
    }

    pub fn date_format(&self) -> &DateFormat<'static> {
        &self.format
    }

    /// Renders a fully-decomposed instant.
    pub fn format(&self, when: &CalendarView) -> String {
        self.format.format(when, &self.locale)
    }
}

impl fmt::Debug for DateFormatter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("DateFormatter")
         .field("format", &self.format)
         .field("time_zone", &self.time_zone)
         .finish()
    }
}
