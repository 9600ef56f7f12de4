//! The adjacency-matrix cell value, parametrized so the same [`crate::matrix::GraphMatrix`]
//! code serves both the unweighted and weighted graph variants (§9's
//! "replace subclassing with a cell-value parameter" redesign note).

use std::fmt;
use std::num::NonZeroU32;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A value that can sit in an adjacency-matrix cell: present-or-absent, with
/// an associated traversal cost for the algorithms that need one.
pub trait CellValue: Copy + Clone + PartialEq + Eq + fmt::Debug + Default {
    /// Whether this cell represents an edge.
    fn is_present(&self) -> bool;

    /// The cost of traversing this edge. Unweighted cells cost `1`;
    /// absent cells cost `0` (callers only ever read this after checking
    /// [`CellValue::is_present`]).
    fn cost(&self) -> u32;
}

impl CellValue for bool {
    fn is_present(&self) -> bool {
        *self
    }

    fn cost(&self) -> u32 {
        if *self {
            1
        } else {
            0
        }
    }
}

/// A weighted cell: absent, or present with a positive integer cost.
///
/// Weight `0` is never constructible through [`Weight::new`] — §3 of the
/// specification treats it as equivalent to "no edge" on import, so the
/// document codec maps a JSON `0` to [`Weight::ABSENT`] rather than
/// rejecting it.
#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub struct Weight(Option<NonZeroU32>);

impl Weight {
    /// The "no edge" cell value.
    pub const ABSENT: Weight = Weight(None);

    /// Builds a present weight, or `None` if `value` is zero.
    pub fn new(value: u32) -> Option<Weight> {
        NonZeroU32::new(value).map(|v| Weight(Some(v)))
    }

    /// The numeric weight, if present.
    pub fn value(&self) -> Option<u32> {
        self.0.map(NonZeroU32::get)
    }
}

impl fmt::Debug for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Some(v) => write!(f, "Weight({v})"),
            None => write!(f, "Weight(absent)"),
        }
    }
}

impl CellValue for Weight {
    fn is_present(&self) -> bool {
        self.0.is_some()
    }

    fn cost(&self) -> u32 {
        self.value().unwrap_or(0)
    }
}

impl Serialize for Weight {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.value() {
            Some(v) => serializer.serialize_u32(v),
            None => serializer.serialize_bool(false),
        }
    }
}

impl<'de> Deserialize<'de> for Weight {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct WeightVisitor;

        impl<'de> Visitor<'de> for WeightVisitor {
            type Value = Weight;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("`false` or a non-negative integer")
            }

            fn visit_bool<E: de::Error>(self, value: bool) -> Result<Weight, E> {
                if value {
                    Err(de::Error::custom(
                        "`true` is not a valid weighted-graph cell; use an integer weight",
                    ))
                } else {
                    Ok(Weight::ABSENT)
                }
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Weight, E> {
                let value = u32::try_from(value).map_err(de::Error::custom)?;
                // weight 0 is treated as absent on import, per §3.
                Ok(Weight::new(value).unwrap_or(Weight::ABSENT))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Weight, E> {
                if value < 0 {
                    return Err(de::Error::custom("edge weights cannot be negative"));
                }
                self.visit_u64(value as u64)
            }
        }

        deserializer.deserialize_any(WeightVisitor)
    }
}
