use std::fmt::{Display, Error as FmtError, Formatter};

/// Feed country code, passed to the feed as given. Empty means the global feed.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Country(String);

#[derive(Clone)]
pub struct CountryValueParser;

impl clap::builder::TypedValueParser for CountryValueParser {
    type Value = Country;
    fn parse_ref(&self, _cmd: &clap::Command, _arg: Option<&clap::Arg>, value: &std::ffi::OsStr) -> Result<Self::Value, clap::Error> {
        Ok(Country::new(value.to_string_lossy().as_ref()))
    }
}

impl Country {
    pub fn new(input: &str) -> Country {
        Country(input.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Country {
    fn fmt(&self, f: &mut Formatter) -> Result<(), FmtError> {
        if self.0.is_empty() {
            write!(f, "global")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_the_code_as_given_apart_from_whitespace() {
        assert_eq!(Country::new("US").as_str(), "US");
        assert_eq!(Country::new(" jp ").as_str(), "jp");
        assert_eq!(Country::new("en-US").as_str(), "en-US");
    }

    #[test]
    fn empty_means_global_feed() {
        let c = Country::new("  ");
        assert_eq!(c.as_str(), "");
        assert_eq!(c.to_string(), "global");
    }
}
