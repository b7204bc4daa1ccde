use std::fmt;
use std::path::Path;
use std::str::FromStr;

use super::FeedError;

/// Feed output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedFormat {
    /// RSS 2.0
    Rss,
    /// Atom 1.0
    Atom,
    /// JSON Feed 1.1
    Json,
}

impl FeedFormat {
    #[cfg(test)]
    pub const ALL: [Self; 3] = [Self::Rss, Self::Atom, Self::Json];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Rss => "rss",
            Self::Atom => "atom",
            Self::Json => "json",
        }
    }

    /// Human-readable name used in links.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Rss => "RSS",
            Self::Atom => "Atom",
            Self::Json => "JSON",
        }
    }

    /// Infer the format from an output file extension.
    pub fn from_path(path: &Path) -> Result<Self, FeedError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        ext.parse()
    }
}

impl FromStr for FeedFormat {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rss" => Ok(Self::Rss),
            "atom" => Ok(Self::Atom),
            "json" => Ok(Self::Json),
            _ => Err(FeedError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for FeedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!("rss".parse::<FeedFormat>().unwrap(), FeedFormat::Rss);
        assert_eq!("ATOM".parse::<FeedFormat>().unwrap(), FeedFormat::Atom);
        assert_eq!("json".parse::<FeedFormat>().unwrap(), FeedFormat::Json);
    }

    #[test]
    fn test_unsupported_format() {
        let err = "xml".parse::<FeedFormat>().unwrap_err();
        assert!(matches!(err, FeedError::UnsupportedFormat(ref f) if f == "xml"));
        assert!(err.to_string().contains("supported: rss, atom, json"));
    }

    #[test]
    fn test_from_path() {
        assert_eq!(
            FeedFormat::from_path(Path::new("out/feed.rss")).unwrap(),
            FeedFormat::Rss
        );
        assert_eq!(
            FeedFormat::from_path(Path::new("feed.Atom")).unwrap(),
            FeedFormat::Atom
        );
        assert!(matches!(
            FeedFormat::from_path(Path::new("feed.xml")),
            Err(FeedError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            FeedFormat::from_path(Path::new("feed")),
            Err(FeedError::UnsupportedFormat(_))
        ));
    }
}
