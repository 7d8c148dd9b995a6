//! Atlas region lookup.
//!
//! The 100 parcels are split into two hemispheres of 50, and each hemisphere
//! is split into the same seven networks. Ids are 1-based.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use thiserror::Error;

/// Smallest valid node id.
pub const MIN_NODE: i64 = 1;
/// Largest valid node id.
pub const MAX_NODE: i64 = 100;

/// One of the seven canonical brain networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    Vis,
    Somot,
    DorsAttn,
    VentAttn,
    Limbic,
    Control,
    Default,
}

impl Region {
    pub const ALL: [Region; 7] = [
        Region::Vis,
        Region::Somot,
        Region::DorsAttn,
        Region::VentAttn,
        Region::Limbic,
        Region::Control,
        Region::Default,
    ];

    /// Label written to the `area` node attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            Region::Vis => "vis",
            Region::Somot => "somot",
            Region::DorsAttn => "dorsattn",
            Region::VentAttn => "ventattn",
            Region::Limbic => "limbic",
            Region::Control => "control",
            Region::Default => "default",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown region label `{0}`")]
pub struct ParseRegionError(pub String);

impl FromStr for Region {
    type Err = ParseRegionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| ParseRegionError(s.to_string()))
    }
}

/// Node id outside the atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid node: {node} (expected {MIN_NODE}..={MAX_NODE})")]
pub struct InvalidNodeError {
    pub node: i64,
}

// (left hemisphere, right hemisphere) per network. Disjoint; union is 1..=100.
const REGION_RANGES: [(Region, RangeInclusive<i64>, RangeInclusive<i64>); 7] = [
    (Region::Vis, 1..=9, 51..=58),
    (Region::Somot, 10..=15, 59..=66),
    (Region::DorsAttn, 16..=23, 67..=73),
    (Region::VentAttn, 24..=30, 74..=78),
    (Region::Limbic, 31..=33, 79..=80),
    (Region::Control, 34..=37, 81..=89),
    (Region::Default, 38..=50, 90..=100),
];

/// Map a 1-based node id to its network.
pub fn classify(node: i64) -> Result<Region, InvalidNodeError> {
    REGION_RANGES
        .iter()
        .find(|(_, left, right)| left.contains(&node) || right.contains(&node))
        .map(|(region, _, _)| *region)
        .ok_or(InvalidNodeError { node })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hemisphere_boundaries() {
        assert_eq!(classify(1), Ok(Region::Vis));
        assert_eq!(classify(9), Ok(Region::Vis));
        assert_eq!(classify(10), Ok(Region::Somot));
        assert_eq!(classify(50), Ok(Region::Default));
        assert_eq!(classify(51), Ok(Region::Vis));
        assert_eq!(classify(80), Ok(Region::Limbic));
        assert_eq!(classify(81), Ok(Region::Control));
        assert_eq!(classify(100), Ok(Region::Default));
    }

    #[test]
    fn rejects_ids_outside_atlas() {
        assert_eq!(classify(0), Err(InvalidNodeError { node: 0 }));
        assert_eq!(classify(101), Err(InvalidNodeError { node: 101 }));
        assert_eq!(classify(-3), Err(InvalidNodeError { node: -3 }));
    }

    #[test]
    fn region_sizes_match_atlas() {
        let count = |r: Region| {
            (MIN_NODE..=MAX_NODE)
                .filter(|n| classify(*n) == Ok(r))
                .count()
        };
        assert_eq!(count(Region::Vis), 17);
        assert_eq!(count(Region::Somot), 14);
        assert_eq!(count(Region::DorsAttn), 15);
        assert_eq!(count(Region::VentAttn), 12);
        assert_eq!(count(Region::Limbic), 5);
        assert_eq!(count(Region::Control), 13);
        assert_eq!(count(Region::Default), 24);
    }

    #[test]
    fn labels_parse_back() {
        for r in Region::ALL {
            assert_eq!(r.as_str().parse::<Region>(), Ok(r));
        }
        assert!("visual".parse::<Region>().is_err());
    }
}
