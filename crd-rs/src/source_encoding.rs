use crate::error::CardError;
use std::fmt;
use std::str::FromStr;

/// The encoding card text was written in.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SourceEncoding {
    /// Bytes are passed through as they are.
    #[default]
    Ascii,
    /// Windows-1251, transcoded to UTF-8.
    Windows1251,
}

impl SourceEncoding {
    /// The canonical selector name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            SourceEncoding::Ascii => "ascii",
            SourceEncoding::Windows1251 => "legacy-cyrillic",
        }
    }
}

impl fmt::Display for SourceEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SourceEncoding {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ascii" => Ok(SourceEncoding::Ascii),
            "legacy-cyrillic" | "windows-1251" | "cp1251" => Ok(SourceEncoding::Windows1251),
            _ => Err(CardError::UnsupportedEncoding(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("ascii", SourceEncoding::Ascii)]
    #[case("ASCII", SourceEncoding::Ascii)]
    #[case("legacy-cyrillic", SourceEncoding::Windows1251)]
    #[case("Windows-1251", SourceEncoding::Windows1251)]
    #[case("cp1251", SourceEncoding::Windows1251)]
    fn parses_selectors(#[case] input: &str, #[case] expected: SourceEncoding) {
        assert_eq!(input.parse::<SourceEncoding>().unwrap(), expected);
    }

    #[test]
    fn rejects_unknown_selector() {
        match "koi8-r".parse::<SourceEncoding>() {
            Err(CardError::UnsupportedEncoding(name)) => assert_eq!(name, "koi8-r"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn display_round_trips_through_parse() {
        for encoding in [SourceEncoding::Ascii, SourceEncoding::Windows1251] {
            assert_eq!(encoding.to_string().parse::<SourceEncoding>().unwrap(), encoding);
        }
    }
}
