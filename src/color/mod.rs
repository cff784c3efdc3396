//! Emotion label → `#RRGGBB` color, via the text-generation collaborator.

use crate::collaborator::{TextGenerator, color_prompt};
use crate::core::{CHANNEL_MAX, ChromaError};
use log::{debug, warn};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

static HEX_COLOR: OnceLock<Regex> = OnceLock::new();

fn hex_color_pattern() -> &'static Regex {
    HEX_COLOR.get_or_init(|| Regex::new(r"#[0-9a-fA-F]{6}").expect("hex color regex must compile"))
}

/// A validated RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorCode {
    /// Red channel.
    pub red: u8,
    /// Green channel.
    pub green: u8,
    /// Blue channel.
    pub blue: u8,
}

impl ColorCode {
    /// Creates a color from raw channel values.
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Finds the first `#RRGGBB` token anywhere in `text`.
    ///
    /// `None` means the text names no color; that is an outcome, not an error.
    pub fn find_in(text: &str) -> Option<Self> {
        hex_color_pattern().find(text).and_then(|m| m.as_str().parse().ok())
    }

    /// Channels scaled to [0, 1] by dividing by 255.
    pub fn normalized(&self) -> [f64; 3] {
        [self.red, self.green, self.blue].map(|c| f64::from(c) / CHANNEL_MAX)
    }
}

impl FromStr for ColorCode {
    type Err = ChromaError;

    /// Parses exactly `#` followed by six hex digits, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ChromaError::InvalidColor { input: s.to_string() };
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for ColorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

/// Asks the collaborator which color represents an emotion.
#[derive(Clone)]
pub struct ColorResolver {
    generator: Arc<dyn TextGenerator>,
    system_prompt: String,
}

impl ColorResolver {
    /// Creates a resolver that frames requests with `system_prompt`.
    pub fn new(generator: Arc<dyn TextGenerator>, system_prompt: impl Into<String>) -> Self {
        Self {
            generator,
            system_prompt: system_prompt.into(),
        }
    }

    /// Resolves `emotion` to a color.
    ///
    /// # Returns
    /// * `Ok(Some(color))` when the reply contains a `#RRGGBB` token.
    /// * `Ok(None)` when it contains none, or when the collaborator timed out.
    /// * `Err(ChromaError)` for any other collaborator failure; callers skip the tick.
    pub async fn resolve(&self, emotion: &str) -> Result<Option<ColorCode>, ChromaError> {
        let reply = match self.generator.complete(&self.system_prompt, &color_prompt(emotion)).await {
            Ok(reply) => reply,
            Err(ChromaError::CollaboratorTimeout { message }) => {
                warn!("color request for {:?} timed out: {}", emotion, message);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let color = ColorCode::find_in(&reply);
        debug!("emotion {:?} resolved to {:?}", emotion, color);
        Ok(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct Canned(Result<String, ChromaError>);

    #[async_trait]
    impl TextGenerator for Canned {
        async fn complete(&self, _system: &str, _user: &str) -> Result<String, ChromaError> {
            self.0.clone()
        }
    }

    fn resolver(reply: Result<&str, ChromaError>) -> ColorResolver {
        ColorResolver::new(Arc::new(Canned(reply.map(str::to_string))), "sys")
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        let lower: ColorCode = "#3498db".parse().unwrap();
        let upper: ColorCode = "#3498DB".parse().unwrap();
        assert_eq!(lower, upper);
        assert_eq!(upper, ColorCode::new(0x34, 0x98, 0xDB));
        assert_eq!(upper.to_string(), "#3498DB");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["3498DB", "#3498D", "#3498DBA", "#34G8DB", "", "#"] {
            assert!(
                matches!(bad.parse::<ColorCode>(), Err(ChromaError::InvalidColor { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_normalized_channels() {
        let [r, g, b] = ColorCode::new(255, 0, 51).normalized();
        assert_eq!(r, 1.0);
        assert_eq!(g, 0.0);
        assert!((b - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_find_in_prose() {
        assert_eq!(
            ColorCode::find_in("I'd say #3498DB represents happiness"),
            Some(ColorCode::new(0x34, 0x98, 0xDB))
        );
        assert_eq!(
            ColorCode::find_in("first #00ff00 then #FF0000"),
            Some(ColorCode::new(0, 255, 0))
        );
        assert_eq!(ColorCode::find_in("I cannot determine a color"), None);
        assert_eq!(ColorCode::find_in("#12345 is too short"), None);
    }

    #[tokio::test]
    async fn test_resolve_embedded_token() {
        let color = resolver(Ok("I'd say #3498DB represents happiness")).resolve("happy").await.unwrap();
        assert_eq!(color, Some(ColorCode::new(0x34, 0x98, 0xDB)));
    }

    #[tokio::test]
    async fn test_resolve_without_token_is_none() {
        let color = resolver(Ok("I cannot determine a color")).resolve("happy").await.unwrap();
        assert_eq!(color, None);
    }

    #[tokio::test]
    async fn test_timeout_becomes_none() {
        let err = ChromaError::CollaboratorTimeout { message: "30s".to_string() };
        assert_eq!(resolver(Err(err)).resolve("happy").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unavailable_propagates() {
        let err = ChromaError::CollaboratorUnavailable { message: "down".to_string() };
        assert!(resolver(Err(err)).resolve("happy").await.is_err());
    }
}
