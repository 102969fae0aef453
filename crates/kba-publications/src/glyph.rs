use std::str::FromStr;

use encoding_rs::WINDOWS_1252;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GlyphDecoding {
    /// Every byte is taken as the Unicode scalar with the same value, so `0x80..=0x9F`
    /// come out as C1 control characters.
    #[default]
    Latin1,
    Windows1252,
}

impl GlyphDecoding {
    #[must_use]
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Self::Latin1 => bytes.iter().copied().map(char::from).collect(),
            Self::Windows1252 => WINDOWS_1252
                .decode_without_bom_handling(bytes)
                .0
                .into_owned(),
        }
    }
}

impl FromStr for GlyphDecoding {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "latin1" | "latin-1" | "iso-8859-1" => Ok(Self::Latin1),
            "windows1252" | "windows-1252" | "cp1252" => Ok(Self::Windows1252),
            other => Err(format!(
                "unknown glyph decoding '{other}', expected latin1 or windows1252"
            )),
        }
    }
}
