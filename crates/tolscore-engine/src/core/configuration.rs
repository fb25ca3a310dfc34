use std::{fmt, str::FromStr};

use crate::{InvalidPegCountError, MalformedConfigurationError};

/// Marker written before the items of each peg in configuration text.
pub const PEG_DELIMITER: char = '|';

/// A single ball on a peg, identified by its letter.
pub type Item = char;

/// Arrangement of items across an ordered, fixed set of pegs.
///
/// Each peg is a stack: the last item of a peg is the topmost one and the only
/// one that can be moved. Pegs are not interchangeable, so two configurations
/// holding the same stacks in a different peg order are different positions.
///
/// # Text format
///
/// Configurations are recorded as a `|` before every peg followed by that peg's
/// items from bottom to top. A single trailing `|` is accepted and ignored:
///
/// ```
/// use tolscore_engine::Configuration;
///
/// let config = Configuration::parse("|AB|C||").unwrap();
/// assert_eq!(config.peg_count(), 3);
/// assert_eq!(config.peg(0), Some(&['A', 'B'][..]));
/// assert_eq!(config.peg(2), Some(&[][..]));
/// assert_eq!(config.to_string(), "|AB|C||");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Configuration {
    pegs: Vec<Vec<Item>>,
}

impl Configuration {
    /// Builds a configuration from pegs listed in order, items bottom to top.
    pub fn new<I, P>(pegs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: IntoIterator<Item = Item>,
    {
        Self {
            pegs: pegs
                .into_iter()
                .map(|peg| peg.into_iter().collect())
                .collect(),
        }
    }

    /// Parses configuration text such as `|AB|C|`.
    ///
    /// Every character between two delimiters is one item. The empty segment
    /// produced by a final delimiter is dropped rather than read as an extra peg.
    pub fn parse(text: &str) -> Result<Self, MalformedConfigurationError> {
        let Some(rest) = text.strip_prefix(PEG_DELIMITER) else {
            return Err(MalformedConfigurationError {
                text: text.to_owned(),
            });
        };

        let mut segments = rest.split(PEG_DELIMITER).collect::<Vec<_>>();
        if segments.last().is_some_and(|segment| segment.is_empty()) {
            segments.pop();
        }

        Ok(Self::new(segments.into_iter().map(str::chars)))
    }

    /// Pads the configuration with empty pegs up to exactly `peg_count` pegs.
    ///
    /// A configuration can only grow: one that already has more pegs than
    /// requested is rejected.
    pub fn normalize(mut self, peg_count: usize) -> Result<Self, InvalidPegCountError> {
        if self.pegs.len() > peg_count {
            return Err(InvalidPegCountError {
                actual: self.pegs.len(),
                expected: peg_count,
            });
        }
        self.pegs.resize_with(peg_count, Vec::new);
        Ok(self)
    }

    /// Returns the frozen, hashable form used as the identity of a search node.
    #[must_use]
    pub fn canonical(&self) -> CanonicalForm {
        CanonicalForm(
            self.pegs
                .iter()
                .map(|peg| peg.as_slice().into())
                .collect(),
        )
    }

    #[must_use]
    pub fn peg_count(&self) -> usize {
        self.pegs.len()
    }

    /// Returns the items of the peg at `index`, bottom to top.
    #[must_use]
    pub fn peg(&self, index: usize) -> Option<&[Item]> {
        self.pegs.get(index).map(Vec::as_slice)
    }

    pub fn pegs(&self) -> impl ExactSizeIterator<Item = &[Item]> + '_ {
        self.pegs.iter().map(Vec::as_slice)
    }

    /// Total number of items over all pegs.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.pegs.iter().map(Vec::len).sum()
    }

    /// Height of the fullest peg, 0 for a configuration without items.
    #[must_use]
    pub fn max_peg_height(&self) -> usize {
        self.pegs.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Returns `true` if no peg holds more than `capacity` items.
    #[must_use]
    pub fn fits_capacity(&self, capacity: usize) -> bool {
        self.max_peg_height() <= capacity
    }

    pub(crate) fn pegs_mut(&mut self) -> &mut [Vec<Item>] {
        &mut self.pegs
    }
}

impl FromStr for Configuration {
    type Err = MalformedConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The closing delimiter keeps a trailing empty peg from being dropped on re-parse.
        for peg in &self.pegs {
            write!(f, "{PEG_DELIMITER}")?;
            for item in peg {
                write!(f, "{item}")?;
            }
        }
        write!(f, "{PEG_DELIMITER}")
    }
}

/// Immutable snapshot of a [`Configuration`], keyed on peg order and item order.
///
/// Two configurations are the same search node exactly when their canonical
/// forms are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalForm(Box<[Box<[Item]>]>);

impl CanonicalForm {
    pub fn pegs(&self) -> impl ExactSizeIterator<Item = &[Item]> + '_ {
        self.0.iter().map(|peg| &**peg)
    }
}

impl From<&CanonicalForm> for Configuration {
    fn from(canonical: &CanonicalForm) -> Self {
        Configuration::new(canonical.pegs().map(|peg| peg.iter().copied()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod parse {
        use super::*;

        #[test]
        fn test_three_pegs_with_trailing_delimiter() {
            let config = Configuration::parse("|A|B|C|").unwrap();
            assert_eq!(config, Configuration::new([vec!['A'], vec!['B'], vec!['C']]));
        }

        #[test]
        fn test_without_trailing_delimiter() {
            let config = Configuration::parse("|AB||C").unwrap();
            assert_eq!(config, Configuration::new([vec!['A', 'B'], vec![], vec!['C']]));
        }

        #[test]
        fn test_only_one_trailing_segment_is_dropped() {
            let config = Configuration::parse("|A|B||").unwrap();
            assert_eq!(config.peg_count(), 3);
            assert_eq!(config.peg(2), Some(&[][..]));
        }

        #[test]
        fn test_single_delimiter_has_no_pegs() {
            let config = Configuration::parse("|").unwrap();
            assert_eq!(config.peg_count(), 0);
            assert_eq!(config.item_count(), 0);
        }

        #[test]
        fn test_last_item_is_top() {
            let config = Configuration::parse("|ABC|").unwrap();
            assert_eq!(config.peg(0).and_then(<[_]>::last), Some(&'C'));
        }

        #[test]
        fn test_error_missing_leading_delimiter() {
            let err = Configuration::parse("A|B|C|").unwrap_err();
            assert_eq!(err.text, "A|B|C|");
            assert!(err.to_string().contains("must begin with '|'"));
        }

        #[test]
        fn test_error_empty_text() {
            assert!(Configuration::parse("").is_err());
        }

        #[test]
        fn test_from_str() {
            let config: Configuration = "|R|G|B|".parse().unwrap();
            assert_eq!(config.item_count(), 3);
        }
    }

    mod normalize {
        use super::*;

        #[test]
        fn test_pads_with_empty_pegs() {
            let config = Configuration::parse("|AB|").unwrap().normalize(3).unwrap();
            assert_eq!(config, Configuration::new([vec!['A', 'B'], vec![], vec![]]));
        }

        #[test]
        fn test_exact_count_is_unchanged() {
            let config = Configuration::parse("|A|B|C|").unwrap();
            assert_eq!(config.clone().normalize(3).unwrap(), config);
        }

        #[test]
        fn test_error_cannot_shrink() {
            let err = Configuration::parse("|A|B|C|D|")
                .unwrap()
                .normalize(3)
                .unwrap_err();
            assert_eq!(
                err,
                InvalidPegCountError {
                    actual: 4,
                    expected: 3
                }
            );
        }
    }

    mod canonical {
        use super::*;

        #[test]
        fn test_equal_configurations_share_canonical_form() {
            let a = Configuration::parse("|AB|C||").unwrap();
            let b = Configuration::new([vec!['A', 'B'], vec!['C'], vec![]]);
            assert_eq!(a.canonical(), b.canonical());
        }

        #[test]
        fn test_peg_order_matters() {
            let a = Configuration::parse("|A|B|").unwrap();
            let b = Configuration::parse("|B|A|").unwrap();
            assert_ne!(a.canonical(), b.canonical());
        }

        #[test]
        fn test_item_order_within_peg_matters() {
            let a = Configuration::parse("|AB|").unwrap();
            let b = Configuration::parse("|BA|").unwrap();
            assert_ne!(a.canonical(), b.canonical());
        }

        #[test]
        fn test_converts_back_to_configuration() {
            let config = Configuration::parse("|A||BC|").unwrap();
            assert_eq!(Configuration::from(&config.canonical()), config);
        }
    }

    #[test]
    fn test_display_round_trip() {
        for text in ["|A|B|C|", "|AB|C||", "||||", "|", "|ABC|||"] {
            let config = Configuration::parse(text).unwrap();
            let reparsed = Configuration::parse(&config.to_string()).unwrap();
            assert_eq!(reparsed, config, "round trip of {text:?}");
        }
    }

    #[test]
    fn test_capacity_checks() {
        let config = Configuration::parse("|ABC|D||").unwrap();
        assert_eq!(config.max_peg_height(), 3);
        assert!(config.fits_capacity(3));
        assert!(!config.fits_capacity(2));
        assert!(Configuration::parse("||||").unwrap().fits_capacity(0));
    }
}
