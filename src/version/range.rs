//! Half-open version windows `[min, max)`

use std::fmt;
use std::ops::BitAnd;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::version::bound::{lt_bound, min_bound};
use crate::version::error::VersionError;
use crate::version::value::GameVersion;

/// Window of versions a model or labeling rule applies to.
///
/// `min` is inclusive and `max` exclusive. A missing `max` means the window is
/// open-ended. `min < max` always holds for bounded ranges.
///
/// The bound type defaults to [`GameVersion`]; catalog entries ordered by id
/// use the same algebra.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionRange<V = GameVersion> {
    min: V,
    max: Option<V>,
}

impl<V: Ord + fmt::Display> VersionRange<V> {
    /// Build a range, rejecting bounded ranges where `min >= max`.
    pub fn new(min: V, max: Option<V>) -> Result<Self, VersionError> {
        if let Some(max) = &max
            && min >= *max
        {
            return Err(VersionError::InvalidRange {
                min: min.to_string(),
                max: max.to_string(),
            });
        }
        Ok(Self { min, max })
    }
}

impl VersionRange<GameVersion> {
    /// Parse both bounds and build the range.
    pub fn from_strings(min: &str, max: Option<&str>) -> Result<Self, VersionError> {
        let min: GameVersion = min.parse()?;
        let max: Option<GameVersion> = max.map(str::parse).transpose()?;
        Self::new(min, max)
    }
}

impl<V> VersionRange<V> {
    pub fn min(&self) -> &V {
        &self.min
    }

    pub fn max(&self) -> Option<&V> {
        self.max.as_ref()
    }

    pub fn bounded(&self) -> bool {
        self.max.is_some()
    }
}

impl<V: Ord> VersionRange<V> {
    pub fn contains(&self, version: &V) -> bool {
        self.min <= *version && lt_bound(version, self.max.as_ref())
    }

    /// Membership for a possibly unknown version.
    ///
    /// An unknown version sorts after every known one, so only open-ended
    /// ranges contain it.
    pub fn contains_opt(&self, version: Option<&V>) -> bool {
        match version {
            Some(version) => self.contains(version),
            None => !self.bounded(),
        }
    }

    /// True when `self` ends at or before the start of `other`.
    fn is_left_of(&self, other: &Self) -> bool {
        self.max.as_ref().is_some_and(|max| *max <= other.min)
    }
}

impl<V: Ord + Clone + fmt::Display> VersionRange<V> {
    /// Tightest range contained in both, or `None` when they do not overlap.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        if self.is_left_of(other) || other.is_left_of(self) {
            return None;
        }

        let min = std::cmp::max(&self.min, &other.min).clone();
        let max = min_bound(self.max.as_ref(), other.max.as_ref()).cloned();

        Self::new(min, max)
            .inspect_err(|e| debug!("Degenerate intersection of {} and {}: {}", self, other, e))
            .ok()
    }
}

impl<V: fmt::Display> VersionRange<V> {
    /// `[min, max_or_null]` as names
    pub fn to_list(&self) -> [Option<String>; 2] {
        [
            Some(self.min.to_string()),
            self.max.as_ref().map(ToString::to_string),
        ]
    }
}

impl<V: Ord + Clone + fmt::Display> BitAnd for &VersionRange<V> {
    type Output = Option<VersionRange<V>>;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.intersect(rhs)
    }
}

impl<V: fmt::Display> fmt::Display for VersionRange<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.max {
            Some(max) => write!(f, ">={},<{}", self.min, max),
            None => write!(f, ">={}", self.min),
        }
    }
}

impl<V: Serialize> Serialize for VersionRange<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.min, &self.max).serialize(serializer)
    }
}

impl<'de, V> Deserialize<'de> for VersionRange<V>
where
    V: Deserialize<'de> + Ord + fmt::Display,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (min, max) = <(V, Option<V>)>::deserialize(deserializer)?;
        Self::new(min, max).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn range(min: &str, max: Option<&str>) -> VersionRange {
        VersionRange::from_strings(min, max).unwrap()
    }

    fn v(s: &str) -> GameVersion {
        s.parse().unwrap()
    }

    #[test]
    fn new_builds_unbounded_range() {
        for vr in [
            range("7.5.0", None),
            VersionRange::new(GameVersion::new("7", "5", "0", true), None).unwrap(),
        ] {
            assert!(!vr.bounded());
            assert_eq!(vr.min().major, "7");
            assert_eq!(vr.min().to_string(), "7.5.0");
            assert!(vr.max().is_none());
            assert!(vr.min().is_release);
        }
    }

    #[test]
    fn new_builds_bounded_range() {
        for vr in [
            range("8.0.0-ptb", Some("8.0.0")),
            VersionRange::new(
                GameVersion::new("8", "0", "0", false),
                Some(GameVersion::new("8", "0", "0", true)),
            )
            .unwrap(),
        ] {
            assert!(vr.bounded());
            assert_eq!(vr.min().to_string(), "8.0.0-ptb");
            assert_eq!(vr.max().map(ToString::to_string).as_deref(), Some("8.0.0"));
            assert!(vr.min().is_ptb());
            assert!(vr.max().is_some_and(|max| max.is_release));
        }
    }

    #[rstest]
    #[case("8.0.0", "8.0.0")]
    #[case("8.0.0", "7.5.0")]
    #[case("8.0.0", "8.0.0-ptb")]
    fn new_rejects_empty_or_inverted_range(#[case] min: &str, #[case] max: &str) {
        let expected = Err(VersionError::InvalidRange {
            min: min.to_string(),
            max: max.to_string(),
        });
        assert_eq!(VersionRange::from_strings(min, Some(max)), expected);
        assert_eq!(VersionRange::new(v(min), Some(v(max))), expected);
    }

    #[test]
    fn from_strings_propagates_parse_errors() {
        assert_eq!(
            VersionRange::from_strings("8.0", None),
            Err(VersionError::Malformed {
                input: "8.0".to_string()
            })
        );
        assert!(matches!(
            VersionRange::from_strings("8.0.0", Some("9")),
            Err(VersionError::Malformed { .. })
        ));
    }

    #[test]
    fn display_form() {
        assert_eq!(range("7.5.0", None).to_string(), ">=7.5.0");
        assert_eq!(range("7.5.0", Some("8.0.0")).to_string(), ">=7.5.0,<8.0.0");
    }

    #[test]
    fn to_list_projects_bounds() {
        assert_eq!(
            range("7.5.0", Some("8.0.0-ptb")).to_list(),
            [Some("7.5.0".to_string()), Some("8.0.0-ptb".to_string())]
        );
        assert_eq!(
            range("7.5.0", None).to_list(),
            [Some("7.5.0".to_string()), None]
        );
    }

    #[rstest]
    #[case(true, "7.5.0", "8.0.0", "7.5.0", "8.0.0")]
    #[case(true, "1.5.0", "4.5.0", "1.5.0", "4.5.0")]
    #[case(false, "7.5.0", "8.0.0", "7.6.0", "8.0.0")]
    #[case(false, "7.5.0", "8.0.0", "7.5.0", "9.0.0")]
    #[case(false, "7.5.0", "8.0.0", "7.9.0", "8.1.2")]
    #[case(false, "7.5.0", "8.0.0", "7.5.0a", "8.0.0")]
    fn eq_compares_both_bounds(
        #[case] eq: bool,
        #[case] a_min: &str,
        #[case] a_max: &str,
        #[case] b_min: &str,
        #[case] b_max: &str,
    ) {
        assert_eq!(range(a_min, Some(a_max)) == range(b_min, Some(b_max)), eq);
    }

    #[test]
    fn eq_bounded_vs_unbounded_is_false() {
        assert_ne!(range("7.5.0", Some("8.0.0")), range("7.5.0", None));
        assert_ne!(range("7.5.0", None), range("7.5.0", Some("8.0.0")));
        assert_eq!(range("7.5.0", None), range("7.5.0", None));
    }

    #[rstest]
    #[case(false, false, "7.5.0", "8.0.0", "7.0.0")]
    #[case(false, false, "7.5.0", "8.0.0", "7.4.9a")]
    #[case(true, true, "7.5.0", "8.0.0", "7.5.0")]
    #[case(true, true, "7.5.0", "8.0.0", "7.5.0a")]
    #[case(true, true, "7.5.0", "8.0.0", "7.9.0")]
    #[case(true, true, "7.5.0", "8.0.0", "7.9.0a")]
    #[case(true, true, "7.5.0", "8.0.0", "7.9.9")]
    #[case(true, true, "7.5.0", "8.0.0", "7.9.9a")]
    #[case(false, true, "7.5.0", "8.0.0", "8.0.0")]
    #[case(false, true, "7.5.0", "8.0.0", "8.0.0a")]
    #[case(false, true, "7.5.0", "8.0.0", "8.0.1")]
    #[case(false, true, "7.5.0", "8.0.0", "9.0.0")]
    #[case(false, false, "1.5.0", "4.5.0", "1.0.0")]
    #[case(true, true, "1.5.0", "4.5.0", "3.0.0")]
    #[case(false, true, "1.5.0", "4.5.0", "7.5.0")]
    #[case(true, true, "7.5.0", "8.0.0", "8.0.0-ptb")]
    #[case(false, false, "7.5.0", "8.0.0", "7.5.0-ptb")]
    fn contains_is_half_open(
        #[case] bounded_expected: bool,
        #[case] unbounded_expected: bool,
        #[case] min: &str,
        #[case] max: &str,
        #[case] version: &str,
    ) {
        assert_eq!(range(min, Some(max)).contains(&v(version)), bounded_expected);
        assert_eq!(range(min, None).contains(&v(version)), unbounded_expected);
    }

    #[test]
    fn contains_opt_places_unknown_version_in_open_ranges_only() {
        let bounded = range("7.5.0", Some("8.0.0"));
        let unbounded = range("7.5.0", None);

        assert!(!bounded.contains_opt(None));
        assert!(unbounded.contains_opt(None));
        assert!(bounded.contains_opt(Some(&v("7.9.0"))));
        assert!(!bounded.contains_opt(Some(&v("8.0.0"))));
        assert!(!unbounded.contains_opt(Some(&v("7.0.0"))));
    }

    #[rstest]
    #[case(("8.0.0", Some("8.5.0")), ("8.0.0", Some("8.5.0")), ("8.0.0", Some("8.5.0")))]
    #[case(("8.0.0", Some("8.5.0")), ("8.0.0", Some("9.0.0")), ("8.0.0", Some("8.5.0")))]
    #[case(("8.0.0", Some("8.5.0")), ("7.5.0", Some("8.5.0")), ("8.0.0", Some("8.5.0")))]
    #[case(("8.0.0", Some("8.5.0")), ("7.5.0", Some("9.0.0")), ("8.0.0", Some("8.5.0")))]
    #[case(("8.0.0-ptb", Some("8.0.0")), ("7.5.0", Some("9.0.0")), ("8.0.0-ptb", Some("8.0.0")))]
    #[case(("8.0.0-ptb", Some("8.0.0")), ("8.0.0-ptb", Some("8.1.0")), ("8.0.0-ptb", Some("8.0.0")))]
    #[case(("8.0.0", Some("8.5.0")), ("8.0.0", Some("8.5.0")), ("8.0.0", None))]
    #[case(("8.0.0", Some("8.5.0")), ("8.0.0", Some("8.5.0")), ("7.0.0", None))]
    #[case(("8.0.0", Some("8.5.0")), ("7.0.0", Some("8.5.0")), ("8.0.0", None))]
    #[case(("8.5.0", None), ("8.0.0", None), ("8.5.0", None))]
    #[case(("8.0.0", None), ("8.0.0", None), ("8.0.0", None))]
    #[case(("8.0.0", None), ("8.0.0-ptb", None), ("8.0.0", None))]
    fn intersect_is_tightest_common_range(
        #[case] expected: (&str, Option<&str>),
        #[case] a: (&str, Option<&str>),
        #[case] b: (&str, Option<&str>),
    ) {
        let expected = range(expected.0, expected.1);
        let a = range(a.0, a.1);
        let b = range(b.0, b.1);

        assert_eq!(a.intersect(&b), Some(expected.clone()));
        assert_eq!(&b & &a, Some(expected));
    }

    #[rstest]
    #[case(("8.0.0", Some("8.5.0")), ("9.0.0", Some("9.5.0")))]
    #[case(("8.0.0", Some("8.5.0")), ("8.5.0", Some("9.0.0")))]
    #[case(("8.0.0", Some("8.5.0")), ("8.5.0", None))]
    #[case(("7.0.0", Some("8.0.0-ptb")), ("8.0.0-ptb", None))]
    fn intersect_of_disjoint_ranges_is_none(
        #[case] a: (&str, Option<&str>),
        #[case] b: (&str, Option<&str>),
    ) {
        let a = range(a.0, a.1);
        let b = range(b.0, b.1);

        assert_eq!(&a & &b, None);
        assert_eq!(&b & &a, None);
    }

    #[test]
    fn serde_uses_two_element_list() {
        let vr = range("7.5.0", Some("8.0.0"));
        let json = serde_json::to_value(&vr).unwrap();
        assert_eq!(json, serde_json::json!(["7.5.0", "8.0.0"]));
        assert_eq!(serde_json::from_value::<VersionRange>(json).unwrap(), vr);

        let unbounded: VersionRange =
            serde_json::from_value(serde_json::json!(["7.5.0", null])).unwrap();
        assert_eq!(unbounded, range("7.5.0", None));

        assert!(
            serde_json::from_value::<VersionRange>(serde_json::json!(["8.0.0", "7.5.0"])).is_err()
        );
    }
}
