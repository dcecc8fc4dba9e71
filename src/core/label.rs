//! Free-text label parsing for annotation nodes.
//!
//! Order of precedence:
//! 1. first `NNNN-NNNN` range (whitespace allowed around the dash), taken
//!    verbatim as `(first, last)` even when reversed
//! 2. with a range, an optional `+N` handle pads both ends
//! 3. without a range, the first number not glued to a preceding letter is
//!    a single frame (`v003` is a version, `_1204` and `1204f` are frames)
//!
//! Digit floors and caps come from [`Settings`](crate::config::Settings);
//! short incidental numbers (versions, counts) stay below the floor.

use log::debug;
use regex::Regex;

use crate::config::Settings;
use crate::entities::{Extraction, FrameRange};
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct LabelParser {
    range_re: Regex,
    handle_re: Regex,
    frame_re: Regex,
}

impl LabelParser {
    /// Build patterns for the given digit floor/cap.
    pub fn new(min_digits: usize, max_range_digits: usize, handle_min_digits: usize) -> Result<Self> {
        if min_digits == 0 || handle_min_digits == 0 || max_range_digits < min_digits {
            return Err(Error::config(format!(
                "invalid digit bounds: min {}, max {}, handle {}",
                min_digits, max_range_digits, handle_min_digits
            )));
        }
        let range = format!(
            r"(\d{{{min},{max}}})\s*-\s*(\d{{{min},{max}}})",
            min = min_digits,
            max = max_range_digits
        );
        let handle = format!(r"\+\s?(\d{{{},}})", handle_min_digits);
        // No lookbehind in `regex`: consume the char before the run instead
        let frame = format!(r"(?:^|[^\p{{L}}\d])(\d{{{},}})", min_digits);

        let compile = |pattern: &str| Regex::new(pattern).map_err(|e| Error::config(format!("Regex error: {}", e)));
        Ok(Self {
            range_re: compile(range.as_str())?,
            handle_re: compile(handle.as_str())?,
            frame_re: compile(frame.as_str())?,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(settings.min_digits, settings.max_range_digits, settings.handle_min_digits)
    }

    /// First range in `text`, without handles
    pub fn find_range(&self, text: &str) -> Option<FrameRange> {
        self.range_re.captures_iter(text).find_map(|caps| {
            let first = caps.get(1)?.as_str().parse().ok()?;
            let last = caps.get(2)?.as_str().parse().ok()?;
            Some(FrameRange::new(first, last))
        })
    }

    /// First `+N` handle in `text`
    pub fn find_handle(&self, text: &str) -> Option<i32> {
        self.handle_re
            .captures_iter(text)
            .find_map(|caps| caps.get(1)?.as_str().parse().ok())
    }

    /// First number in `text` not preceded by a letter
    pub fn find_frame(&self, text: &str) -> Option<i32> {
        self.frame_re
            .captures_iter(text)
            .find_map(|caps| caps.get(1)?.as_str().parse().ok())
    }

    /// Range (padded by handle) > single frame > nothing.
    pub fn parse(&self, text: &str) -> Extraction {
        if let Some(range) = self.find_range(text) {
            let result = match self.find_handle(text) {
                Some(handle) => range.padded(handle),
                None => range,
            };
            debug!("label {:?}: range {}", text, result);
            return Extraction::Range(result);
        }
        if let Some(frame) = self.find_frame(text) {
            debug!("label {:?}: frame {}", text, frame);
            return Extraction::SingleFrame(frame);
        }
        debug!("label {:?}: nothing usable", text);
        Extraction::NoData
    }
}

#[cfg(test)]
impl LabelParser {
    /// Parser with the default digit floors
    pub(crate) fn with_defaults() -> Self {
        Self::from_settings(&Settings::default()).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Extraction {
        LabelParser::with_defaults().parse(text)
    }

    #[test]
    fn test_range_with_handle() {
        assert_eq!(parse("0900 - 1050 +10"), Extraction::Range(FrameRange::new(890, 1060)));
        assert_eq!(parse("1001-1100 + 8"), Extraction::Range(FrameRange::new(993, 1108)));
    }

    #[test]
    fn test_range_verbatim() {
        assert_eq!(parse("shot 1001-1100"), Extraction::Range(FrameRange::new(1001, 1100)));
        assert_eq!(parse("1100 -1001"), Extraction::Range(FrameRange::new(1100, 1001)));
        assert_eq!(parse("a1001-1100b"), Extraction::Range(FrameRange::new(1001, 1100)));
    }

    #[test]
    fn test_first_range_wins() {
        assert_eq!(parse("1001-1050 then 2001-2050"), Extraction::Range(FrameRange::new(1001, 1050)));
    }

    #[test]
    fn test_single_frame_skips_version_tokens() {
        assert_eq!(parse("plate v003 1204"), Extraction::SingleFrame(1204));
        assert_eq!(parse("1050"), Extraction::SingleFrame(1050));
    }

    #[test]
    fn test_frame_next_to_underscore_or_suffix() {
        assert_eq!(parse("shot_1204"), Extraction::SingleFrame(1204));
        assert_eq!(parse("ref: 1204f"), Extraction::SingleFrame(1204));
        assert_eq!(parse("(1204)"), Extraction::SingleFrame(1204));
        assert_eq!(parse("f1204"), Extraction::NoData);
        assert_eq!(parse("v0031204 then 1300"), Extraction::SingleFrame(1300));
    }

    #[test]
    fn test_handle_allows_one_space_only() {
        assert_eq!(parse("1001-1100 +   10"), Extraction::Range(FrameRange::new(1001, 1100)));
        assert_eq!(parse("1001-1100 +\t10"), Extraction::Range(FrameRange::new(991, 1110)));
    }

    #[test]
    fn test_handle_ignored_without_range() {
        assert_eq!(parse("frame 1001 +10"), Extraction::SingleFrame(1001));
    }

    #[test]
    fn test_short_numbers_are_ignored() {
        assert_eq!(parse("v2 take 12"), Extraction::NoData);
        assert_eq!(parse("10-20"), Extraction::NoData);
        assert_eq!(parse("no numbers here"), Extraction::NoData);
        assert_eq!(parse(""), Extraction::NoData);
    }

    #[test]
    fn test_configurable_floor() {
        let parser = LabelParser::new(2, 6, 1).unwrap();
        assert_eq!(parser.parse("10-20"), Extraction::Range(FrameRange::new(10, 20)));
        assert_eq!(parser.parse("take 12"), Extraction::SingleFrame(12));
    }

    #[test]
    fn test_handle_floor() {
        let parser = LabelParser::new(3, 6, 2).unwrap();
        assert_eq!(parser.parse("1001-1100 +8"), Extraction::Range(FrameRange::new(1001, 1100)));
        assert_eq!(parser.parse("1001-1100 +16"), Extraction::Range(FrameRange::new(985, 1116)));
    }

    #[test]
    fn test_overflowing_frame_is_skipped() {
        assert_eq!(parse("99999999999 1001"), Extraction::SingleFrame(1001));
    }

    #[test]
    fn test_invalid_bounds() {
        assert!(LabelParser::new(0, 6, 1).is_err());
        assert!(LabelParser::new(4, 3, 1).is_err());
        assert!(LabelParser::new(3, 6, 0).is_err());
    }
}
