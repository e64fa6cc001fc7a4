//! Date format and date range validators
//!
//! Formats use the common letter notation (`Y-m-d`, `d/m/Y H:i`, ...) rather
//! than strftime, so declarations stay readable. A value is accepted only if it
//! parses under the format *and* formats back to exactly the same string,
//! which rejects inputs like `2023-13-01` or `2024-2-5` for `Y-m-d`.

use crate::error::ConfigError;
use crate::traits::{option, reject_unknown, required_option, Checked, ErrorKey, RuleOptions, ValidationRule};
use chrono::format::{parse, Parsed, StrftimeItems};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value;

pub const DEFAULT_DATE_FORMAT: &str = "Y-m-d";

/// Which calendar and clock components a format spells out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Components {
    year: bool,
    month: bool,
    day: bool,
    hour: bool,
    twelve_hour: bool,
    meridiem: bool,
    minute: bool,
}

/// A compiled date format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    source: String,
    strftime: String,
    components: Components,
}

impl DateFormat {
    /// Compile a letter-notation format. `rule` names the owner in errors.
    pub fn compile(rule: &str, format: &str) -> Result<Self, ConfigError> {
        if format.is_empty() {
            return Err(ConfigError::invalid_parameter(rule, "format", "format must not be empty"));
        }

        let mut strftime = String::with_capacity(format.len() * 2);
        let mut components = Components::default();
        let mut chars = format.chars();
        while let Some(c) = chars.next() {
            match c {
                'Y' | 'y' => components.year = true,
                'm' | 'n' | 'M' | 'F' => components.month = true,
                'd' | 'j' => components.day = true,
                'H' | 'G' => components.hour = true,
                'h' | 'g' => components.twelve_hour = true,
                'A' | 'a' => components.meridiem = true,
                'i' => components.minute = true,
                _ => {}
            }

            let spec = match c {
                'Y' => "%Y",
                'y' => "%y",
                'm' => "%m",
                'n' => "%-m",
                'M' => "%b",
                'F' => "%B",
                'd' => "%d",
                'j' => "%-d",
                'D' => "%a",
                'l' => "%A",
                'H' => "%H",
                'G' => "%-H",
                'h' => "%I",
                'g' => "%-I",
                'i' => "%M",
                's' => "%S",
                'A' => "%p",
                'a' => "%P",
                '\\' => {
                    match chars.next() {
                        Some('%') => strftime.push_str("%%"),
                        Some(escaped) => strftime.push(escaped),
                        None => {
                            return Err(ConfigError::invalid_parameter(
                                rule,
                                "format",
                                "format ends with a dangling escape",
                            ))
                        }
                    }
                    continue;
                }
                '%' => "%%",
                c if c.is_ascii_alphabetic() => {
                    return Err(ConfigError::invalid_parameter(
                        rule,
                        "format",
                        format!("unsupported format character '{}'", c),
                    ));
                }
                other => {
                    strftime.push(other);
                    continue;
                }
            };
            strftime.push_str(spec);
        }

        Ok(Self {
            source: format.to_string(),
            strftime,
            components,
        })
    }

    /// The format as it was declared
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Parse `input`, requiring an exact round trip
    ///
    /// Components the format leaves out take their earliest value: January,
    /// the first of the month, 1970 for time-only formats, midnight and minute
    /// zero. A 12-hour clock without `A`/`a` reads as morning.
    pub fn parse(&self, input: &str) -> Option<NaiveDateTime> {
        let mut parsed = Parsed::new();
        parse(&mut parsed, input, StrftimeItems::new(&self.strftime)).ok()?;
        self.fill_missing(&mut parsed)?;

        let date = parsed.to_naive_date().ok()?;
        let time = parsed.to_naive_time().ok()?;
        let datetime = date.and_time(time);

        (self.format(&datetime) == input).then_some(datetime)
    }

    fn fill_missing(&self, parsed: &mut Parsed) -> Option<()> {
        let components = self.components;
        if !components.year {
            parsed.set_year(1970).ok()?;
        }
        if !components.month {
            parsed.set_month(1).ok()?;
        }
        if !components.day {
            parsed.set_day(1).ok()?;
        }
        if components.twelve_hour {
            if !components.meridiem {
                parsed.set_ampm(false).ok()?;
            }
        } else if !components.hour {
            parsed.set_hour(0).ok()?;
        }
        if !components.minute {
            parsed.set_minute(0).ok()?;
        }
        Some(())
    }

    /// Render a date-time in this format
    pub fn format(&self, datetime: &NaiveDateTime) -> String {
        datetime
            .format_with_items(StrftimeItems::new(&self.strftime))
            .to_string()
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        Self {
            source: DEFAULT_DATE_FORMAT.to_string(),
            strftime: "%Y-%m-%d".to_string(),
            components: Components {
                year: true,
                month: true,
                day: true,
                ..Components::default()
            },
        }
    }
}

/// Validator for strings that spell a date in the configured format
#[derive(Debug, Clone, Default)]
pub struct DateFormatValidator {
    format: DateFormat,
}

impl DateFormatValidator {
    /// Create a validator for the default `Y-m-d` format
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(format: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            format: DateFormat::compile("dateFormat", format)?,
        })
    }

    /// The active format
    pub fn format(&self) -> &DateFormat {
        &self.format
    }
}

impl ValidationRule for DateFormatValidator {
    fn rule_name(&self) -> &str {
        "dateFormat"
    }

    fn configure(&mut self, options: &RuleOptions) -> Result<(), ConfigError> {
        reject_unknown("dateFormat", options, &["format"])?;
        if let Some(format) = option::<String>("dateFormat", options, "format")? {
            self.format = DateFormat::compile("dateFormat", &format)?;
        }
        Ok(())
    }

    fn check(&self, input: Value) -> Checked {
        let valid = match input.as_str() {
            Some(s) => self.format.parse(s).is_some(),
            None => return Checked::invalid(input, ErrorKey::InvalidType),
        };

        if valid {
            Checked::valid(input)
        } else {
            Checked::invalid(input, ErrorKey::InvalidFormat)
        }
    }

    fn parameters(&self) -> Option<Value> {
        Some(serde_json::json!({ "format": self.format.as_str() }))
    }

    fn default_message(&self, key: &ErrorKey) -> String {
        match key {
            ErrorKey::InvalidFormat => format!("Must be a date in the format {}", self.format.as_str()),
            other => other.default_message().to_string(),
        }
    }
}

/// Validator for dates within an inclusive range, compared by calendar day
#[derive(Debug, Clone)]
pub struct DateRangeValidator {
    format: DateFormat,
    min: NaiveDate,
    max: NaiveDate,
}

impl DateRangeValidator {
    /// Create a range using the default `Y-m-d` format
    pub fn new(min_date: &str, max_date: &str) -> Result<Self, ConfigError> {
        Self::with_format(DEFAULT_DATE_FORMAT, min_date, max_date)
    }

    pub fn with_format(format: &str, min_date: &str, max_date: &str) -> Result<Self, ConfigError> {
        let format = DateFormat::compile("dateRange", format)?;
        let min = Self::parse_bound(&format, "minDate", min_date)?;
        let max = Self::parse_bound(&format, "maxDate", max_date)?;
        if min > max {
            return Err(ConfigError::invalid_order("dateRange", "minDate", "maxDate"));
        }
        Ok(Self { format, min, max })
    }

    fn parse_bound(format: &DateFormat, parameter: &str, date: &str) -> Result<NaiveDate, ConfigError> {
        format.parse(date).map(|dt| dt.date()).ok_or_else(|| {
            ConfigError::invalid_parameter(
                "dateRange",
                parameter,
                format!("expected format '{}', got '{}'", format.as_str(), date),
            )
        })
    }

    /// Earliest accepted day
    pub fn min_date(&self) -> NaiveDate {
        self.min
    }

    /// Latest accepted day
    pub fn max_date(&self) -> NaiveDate {
        self.max
    }

    fn display_bound(&self, date: NaiveDate) -> String {
        self.format.format(&date.and_time(NaiveTime::MIN))
    }
}

impl Default for DateRangeValidator {
    fn default() -> Self {
        Self {
            format: DateFormat::default(),
            min: NaiveDate::MIN,
            max: NaiveDate::MAX,
        }
    }
}

impl ValidationRule for DateRangeValidator {
    fn rule_name(&self) -> &str {
        "dateRange"
    }

    fn configure(&mut self, options: &RuleOptions) -> Result<(), ConfigError> {
        reject_unknown("dateRange", options, &["minDate", "maxDate", "format"])?;
        let min_date: String = required_option("dateRange", options, "minDate")?;
        let max_date: String = required_option("dateRange", options, "maxDate")?;
        let format = option::<String>("dateRange", options, "format")?
            .unwrap_or_else(|| DEFAULT_DATE_FORMAT.to_string());

        *self = Self::with_format(&format, &min_date, &max_date)?;
        Ok(())
    }

    fn check(&self, input: Value) -> Checked {
        let parsed = match input.as_str() {
            Some(s) => self.format.parse(s),
            None => return Checked::invalid(input, ErrorKey::InvalidType),
        };

        match parsed {
            None => Checked::invalid(input, ErrorKey::InvalidDate),
            Some(datetime) if datetime.date() < self.min || datetime.date() > self.max => {
                Checked::invalid(input, ErrorKey::OutOfRange)
            }
            Some(_) => Checked::valid(input),
        }
    }

    fn parameters(&self) -> Option<Value> {
        Some(serde_json::json!({
            "format": self.format.as_str(),
            "minDate": self.display_bound(self.min),
            "maxDate": self.display_bound(self.max),
        }))
    }

    fn default_message(&self, key: &ErrorKey) -> String {
        match key {
            ErrorKey::InvalidDate => format!("Must be a date in the format {}", self.format.as_str()),
            ErrorKey::OutOfRange => format!(
                "Must be between {} and {}",
                self.display_bound(self.min),
                self.display_bound(self.max)
            ),
            other => other.default_message().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_date_format_default() {
        let validator = DateFormatValidator::new();

        assert!(validator.check(json!("2024-03-15")).is_valid());
        assert_eq!(validator.check(json!("15-03-2024")).error, Some(ErrorKey::InvalidFormat));
        assert_eq!(validator.check(json!(123)).error, Some(ErrorKey::InvalidType));
    }

    #[test]
    fn test_date_format_requires_round_trip() {
        let validator = DateFormatValidator::new();
        for input in ["2023-13-01", "2023-02-30", "2024-3-15", "2024-03-15 ", "2024-03-15T00:00"] {
            assert_eq!(
                validator.check(json!(input)).error,
                Some(ErrorKey::InvalidFormat),
                "'{}' should be rejected",
                input
            );
        }
        assert!(validator.check(json!("2024-02-29")).is_valid());
    }

    #[test]
    fn test_date_format_custom_formats() {
        let validator = DateFormatValidator::with_format("d/m/Y H:i").unwrap();
        assert!(validator.check(json!("15/03/2024 09:30")).is_valid());
        assert_eq!(
            validator.check(json!("15/03/2024 24:30")).error,
            Some(ErrorKey::InvalidFormat)
        );

        let validator = DateFormatValidator::with_format("j M Y").unwrap();
        assert!(validator.check(json!("5 Mar 2024")).is_valid());
        assert_eq!(validator.check(json!("05 Mar 2024")).error, Some(ErrorKey::InvalidFormat));
    }

    #[test]
    fn test_date_format_without_day() {
        let validator = DateFormatValidator::with_format("Y-m").unwrap();
        assert!(validator.check(json!("2024-03")).is_valid());
        assert_eq!(validator.check(json!("2024-3")).error, Some(ErrorKey::InvalidFormat));
        assert_eq!(validator.check(json!("2024-13")).error, Some(ErrorKey::InvalidFormat));

        let validator = DateFormatValidator::with_format("m/Y").unwrap();
        assert!(validator.check(json!("03/2024")).is_valid());
        assert_eq!(validator.format().as_str(), "m/Y");

        let validator = DateFormatValidator::with_format("Y").unwrap();
        assert!(validator.check(json!("2024")).is_valid());
    }

    #[test]
    fn test_date_format_time_only() {
        let validator = DateFormatValidator::with_format("H:i").unwrap();
        assert!(validator.check(json!("09:30")).is_valid());
        assert!(validator.check(json!("23:59")).is_valid());
        assert_eq!(validator.check(json!("25:00")).error, Some(ErrorKey::InvalidFormat));
        assert_eq!(validator.check(json!("9:30")).error, Some(ErrorKey::InvalidFormat));

        let validator = DateFormatValidator::with_format("Y-m-d H").unwrap();
        assert!(validator.check(json!("2024-03-15 09")).is_valid());
    }

    #[test]
    fn test_date_format_twelve_hour_clock() {
        let validator = DateFormatValidator::with_format("Y-m-d h:i").unwrap();
        assert!(validator.check(json!("2024-03-15 09:30")).is_valid());
        assert!(validator.check(json!("2024-03-15 12:00")).is_valid());
        assert_eq!(
            validator.check(json!("2024-03-15 13:00")).error,
            Some(ErrorKey::InvalidFormat)
        );

        let format = DateFormat::compile("dateFormat", "g:i A").unwrap();
        let evening = format.parse("9:30 PM").unwrap();
        assert_eq!(evening.time(), NaiveTime::from_hms_opt(21, 30, 0).unwrap());
        assert!(format.parse("09:30 PM").is_none());
    }

    #[test]
    fn test_date_format_escapes() {
        let format = DateFormat::compile("dateFormat", r"Y\mm\dd").unwrap();
        assert!(format.parse("2024m03d05").is_some());
        assert!(format.parse("20240305").is_none());

        let format = DateFormat::compile("dateFormat", r"\Y: Y, m-d").unwrap();
        assert!(format.parse("Y: 2024, 03-05").is_some());

        let format = DateFormat::compile("dateFormat", "Y-m-d 100%").unwrap();
        assert!(format.parse("2024-01-02 100%").is_some());
    }

    #[test]
    fn test_date_format_rejects_unsupported_letters() {
        let error = DateFormat::compile("dateFormat", "Y-m-dQ").unwrap_err();
        assert!(matches!(error, ConfigError::InvalidParameter { ref parameter, .. } if parameter == "format"));

        let mut validator = DateFormatValidator::new();
        let options = json!({ "format": "" });
        assert!(validator.configure(options.as_object().unwrap()).is_err());
    }

    #[test]
    fn test_date_range_bounds() {
        let mut validator = DateRangeValidator::default();
        let options = json!({ "minDate": "2024-01-01", "maxDate": "2024-12-31" });
        validator.configure(options.as_object().unwrap()).unwrap();

        assert_eq!(validator.check(json!("2023-12-31")).error, Some(ErrorKey::OutOfRange));
        assert_eq!(validator.check(json!("2025-01-01")).error, Some(ErrorKey::OutOfRange));
        assert!(validator.check(json!("2024-01-01")).is_valid());
        assert!(validator.check(json!("2024-12-31")).is_valid());
        assert!(validator.check(json!("2024-06-15")).is_valid());
    }

    #[test]
    fn test_date_range_invalid_inputs() {
        let validator = DateRangeValidator::new("2024-01-01", "2024-12-31").unwrap();
        assert_eq!(validator.check(json!("2024-13-01")).error, Some(ErrorKey::InvalidDate));
        assert_eq!(validator.check(json!("tomorrow")).error, Some(ErrorKey::InvalidDate));
        assert_eq!(validator.check(json!(20240101)).error, Some(ErrorKey::InvalidType));
    }

    #[test]
    fn test_date_range_compares_whole_days() {
        let validator =
            DateRangeValidator::with_format("Y-m-d H:i", "2024-01-01 12:00", "2024-01-31 08:00").unwrap();
        assert!(validator.check(json!("2024-01-01 06:00")).is_valid());
        assert!(validator.check(json!("2024-01-31 23:59")).is_valid());
        assert_eq!(
            validator.check(json!("2024-02-01 00:00")).error,
            Some(ErrorKey::OutOfRange)
        );
    }

    #[test]
    fn test_date_range_configuration_errors() {
        let mut validator = DateRangeValidator::default();

        let options = json!({ "minDate": "2024-12-31", "maxDate": "2024-01-01" });
        let error = validator.configure(options.as_object().unwrap()).unwrap_err();
        assert_eq!(error, ConfigError::invalid_order("dateRange", "minDate", "maxDate"));

        let options = json!({ "maxDate": "2024-01-01" });
        let error = validator.configure(options.as_object().unwrap()).unwrap_err();
        assert_eq!(error, ConfigError::missing_parameter("dateRange", "minDate"));

        let options = json!({ "minDate": "2024-01-01" });
        let error = validator.configure(options.as_object().unwrap()).unwrap_err();
        assert_eq!(error, ConfigError::missing_parameter("dateRange", "maxDate"));

        let options = json!({ "minDate": "01/01/2024", "maxDate": "2024-12-31" });
        let error = validator.configure(options.as_object().unwrap()).unwrap_err();
        assert!(matches!(error, ConfigError::InvalidParameter { ref parameter, .. } if parameter == "minDate"));
    }

    #[test]
    fn test_date_range_month_granularity() {
        let validator = DateRangeValidator::with_format("Y-m", "2024-01", "2024-12").unwrap();
        assert_eq!(validator.min_date(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(validator.max_date(), NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());

        assert!(validator.check(json!("2024-12")).is_valid());
        assert_eq!(validator.check(json!("2023-12")).error, Some(ErrorKey::OutOfRange));
        assert_eq!(validator.check(json!("2024-12-01")).error, Some(ErrorKey::InvalidDate));
    }

    #[test]
    fn test_date_range_default_messages() {
        let validator = DateRangeValidator::with_format("d/m/Y", "01/01/2024", "31/12/2024").unwrap();
        assert_eq!(
            validator.default_message(&ErrorKey::OutOfRange),
            "Must be between 01/01/2024 and 31/12/2024"
        );
    }
}
