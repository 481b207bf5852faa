//! Backend-agnostic filter contract.
//!
//! Each backend provides a [`FilterBuilder`] implementation that turns chained
//! condition calls into its native query structure. Operations the backend's
//! query language cannot express keep their default body and fail with a typed
//! [`StoreError::Unsupported`] at the call site, so capability gaps surface
//! before any backend call instead of being silently dropped.

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};
use crate::models::RecordId;

/// Equality term accepted by `matches`.
///
/// Backends match keywords, integers, and booleans; float equality is not part
/// of the contract (use a range instead).
#[derive(Debug, Clone, PartialEq)]
pub enum MatchTerm {
    Keyword(String),
    Integer(i64),
    Boolean(bool),
}

impl From<&str> for MatchTerm {
    fn from(value: &str) -> Self {
        MatchTerm::Keyword(value.to_string())
    }
}

impl From<String> for MatchTerm {
    fn from(value: String) -> Self {
        MatchTerm::Keyword(value)
    }
}

impl From<i64> for MatchTerm {
    fn from(value: i64) -> Self {
        MatchTerm::Integer(value)
    }
}

impl From<bool> for MatchTerm {
    fn from(value: bool) -> Self {
        MatchTerm::Boolean(value)
    }
}

/// Homogeneous value list for `match_any` / `match_except`.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchList {
    Keywords(Vec<String>),
    Integers(Vec<i64>),
}

impl From<Vec<String>> for MatchList {
    fn from(values: Vec<String>) -> Self {
        MatchList::Keywords(values)
    }
}

impl From<Vec<&str>> for MatchList {
    fn from(values: Vec<&str>) -> Self {
        MatchList::Keywords(values.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<i64>> for MatchList {
    fn from(values: Vec<i64>) -> Self {
        MatchList::Integers(values)
    }
}

/// Numeric range bounds. Unset bounds impose no constraint and must stay
/// unset all the way to the backend, never defaulted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RangeBounds {
    pub gt: Option<f64>,
    pub gte: Option<f64>,
    pub lt: Option<f64>,
    pub lte: Option<f64>,
}

/// Cardinality bounds for `values_count`. Same unset-stays-unset rule as
/// [`RangeBounds`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountBounds {
    pub gt: Option<u64>,
    pub gte: Option<u64>,
    pub lt: Option<u64>,
    pub lte: Option<u64>,
}

/// Geographic point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Filter input accepted by store operations: a typed builder, or a flat
/// field→value mapping kept for callers that predate the builder.
///
/// Both forms compile to structurally identical backend filters for
/// equivalent intent.
#[derive(Debug, Clone)]
pub enum Filters<F> {
    Builder(F),
    Mapping(serde_json::Map<String, serde_json::Value>),
}

impl<F> Filters<F> {
    pub fn builder(builder: F) -> Self {
        Filters::Builder(builder)
    }

    pub fn mapping(mapping: serde_json::Map<String, serde_json::Value>) -> Self {
        Filters::Mapping(mapping)
    }
}

/// Per-backend filter builder.
///
/// Condition methods append to the builder's flat condition list; the three
/// composition methods fill the boolean slots. A builder holding both a
/// non-empty flat list and a non-empty slot fails `build()` with
/// [`StoreError::FilterComposition`].
///
/// Builders are values: composition consumes the sub-builder, so a filter
/// embedded in one slot can never alias state with another.
pub trait FilterBuilder: Sized {
    /// Backend name reported by unsupported-operation errors.
    const BACKEND: &'static str;

    /// Backend-native filter produced by [`FilterBuilder::build`].
    type Output;

    /// Operand accepted by `must` / `should` / `must_not`: a single condition
    /// or a whole sub-builder.
    type Clause;

    /// Validate the builder and produce the backend-native filter.
    fn build(self) -> StoreResult<Self::Output>;

    /// Equality match on a payload field.
    fn matches(self, _key: &str, _value: impl Into<MatchTerm>) -> StoreResult<Self> {
        Err(StoreError::unsupported(Self::BACKEND, "match"))
    }

    /// Match records whose field equals any of the given values.
    fn match_any(self, _key: &str, _values: impl Into<MatchList>) -> StoreResult<Self> {
        Err(StoreError::unsupported(Self::BACKEND, "match_any"))
    }

    /// Match records whose field equals none of the given values.
    fn match_except(self, _key: &str, _values: impl Into<MatchList>) -> StoreResult<Self> {
        Err(StoreError::unsupported(Self::BACKEND, "match_except"))
    }

    /// Numeric range over a payload field.
    fn range(self, _key: &str, _bounds: RangeBounds) -> StoreResult<Self> {
        Err(StoreError::unsupported(Self::BACKEND, "range"))
    }

    /// Restrict to the given record ids.
    fn has_id(self, _ids: Vec<RecordId>) -> StoreResult<Self> {
        Err(StoreError::unsupported(Self::BACKEND, "has_id"))
    }

    /// Match records carrying the given named vector.
    fn has_vector(self, _vector_name: &str) -> StoreResult<Self> {
        Err(StoreError::unsupported(Self::BACKEND, "has_vector"))
    }

    /// Match records whose field is absent or an empty container.
    fn is_empty(self, _key: &str) -> StoreResult<Self> {
        Err(StoreError::unsupported(Self::BACKEND, "is_empty"))
    }

    /// Match records whose field is explicitly null.
    fn is_null(self, _key: &str) -> StoreResult<Self> {
        Err(StoreError::unsupported(Self::BACKEND, "is_null"))
    }

    /// Bound the number of values stored under a field.
    fn values_count(self, _key: &str, _bounds: CountBounds) -> StoreResult<Self> {
        Err(StoreError::unsupported(Self::BACKEND, "values_count"))
    }

    /// Match geo points inside the box spanned by two corners.
    fn geo_bounding_box(
        self,
        _key: &str,
        _top_left: GeoPoint,
        _bottom_right: GeoPoint,
    ) -> StoreResult<Self> {
        Err(StoreError::unsupported(Self::BACKEND, "geo_bounding_box"))
    }

    /// Match geo points within `radius` meters of `center`.
    fn geo_radius(self, _key: &str, _center: GeoPoint, _radius: f32) -> StoreResult<Self> {
        Err(StoreError::unsupported(Self::BACKEND, "geo_radius"))
    }

    /// Match geo points inside a polygon with optional interior holes.
    fn geo_polygon(
        self,
        _key: &str,
        _exterior: Vec<GeoPoint>,
        _interiors: Vec<Vec<GeoPoint>>,
    ) -> StoreResult<Self> {
        Err(StoreError::unsupported(Self::BACKEND, "geo_polygon"))
    }

    /// Add a clause that must hold.
    fn must(self, _clause: impl Into<Self::Clause>) -> StoreResult<Self> {
        Err(StoreError::unsupported(Self::BACKEND, "must"))
    }

    /// Add a clause that should hold.
    fn should(self, _clause: impl Into<Self::Clause>) -> StoreResult<Self> {
        Err(StoreError::unsupported(Self::BACKEND, "should"))
    }

    /// Add a clause that must not hold.
    fn must_not(self, _clause: impl Into<Self::Clause>) -> StoreResult<Self> {
        Err(StoreError::unsupported(Self::BACKEND, "must_not"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builder that only implements equality, mimicking a backend with a
    /// minimal query language.
    #[derive(Debug, Default)]
    struct SparseBuilder {
        conditions: Vec<(String, MatchTerm)>,
    }

    impl FilterBuilder for SparseBuilder {
        const BACKEND: &'static str = "sparse";
        type Output = Vec<(String, MatchTerm)>;
        type Clause = ();

        fn build(self) -> StoreResult<Self::Output> {
            Ok(self.conditions)
        }

        fn matches(mut self, key: &str, value: impl Into<MatchTerm>) -> StoreResult<Self> {
            self.conditions.push((key.to_string(), value.into()));
            Ok(self)
        }
    }

    #[test]
    fn test_implemented_operation_succeeds() {
        let built = SparseBuilder::default()
            .matches("kind", "note")
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(built, vec![("kind".to_string(), MatchTerm::from("note"))]);
    }

    #[test]
    fn test_unimplemented_operations_fail_typed() {
        let err = SparseBuilder::default()
            .range("score", RangeBounds::default())
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Unsupported {
                backend: "sparse",
                operation: "range"
            }
        ));

        let err = SparseBuilder::default().must(()).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Unsupported {
                backend: "sparse",
                operation: "must"
            }
        ));
    }

    #[test]
    fn test_match_term_conversions() {
        assert_eq!(MatchTerm::from("a"), MatchTerm::Keyword("a".to_string()));
        assert_eq!(MatchTerm::from(3), MatchTerm::Integer(3));
        assert_eq!(MatchTerm::from(true), MatchTerm::Boolean(true));
    }

    #[test]
    fn test_match_list_conversions() {
        assert_eq!(
            MatchList::from(vec!["a", "b"]),
            MatchList::Keywords(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(
            MatchList::from(vec![1i64, 2]),
            MatchList::Integers(vec![1, 2])
        );
    }
}
