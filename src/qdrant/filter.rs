//! Qdrant filter compilation.
//!
//! [`QdrantFilter`] implements the full [`FilterBuilder`] surface by
//! constructing `qdrant_client::qdrant` condition structs directly;
//! [`compile_filters`] is the single entry point turning either a builder or
//! a legacy flat mapping into the canonical [`Filter`]. Compilation is pure:
//! no backend call happens here.

use qdrant_client::qdrant::condition::ConditionOneOf;
use qdrant_client::qdrant::point_id::PointIdOptions;
use qdrant_client::qdrant::r#match::MatchValue;
use qdrant_client::qdrant::{
    Condition, FieldCondition, Filter, GeoBoundingBox, GeoLineString, GeoPoint as QdrantGeoPoint,
    GeoPolygon, GeoRadius, HasIdCondition, HasVectorCondition, IsEmptyCondition, IsNullCondition,
    Match, PointId, Range, RepeatedIntegers, RepeatedStrings, ValuesCount,
};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::filter::{CountBounds, FilterBuilder, Filters, GeoPoint, MatchList, MatchTerm, RangeBounds};
use crate::models::RecordId;

/// Qdrant implementation of the filter builder.
///
/// Condition methods append to the flat list; `must`/`should`/`must_not`
/// consume their operand, so composed sub-filters never share state.
#[derive(Debug, Clone, Default)]
pub struct QdrantFilter {
    conditions: Vec<Condition>,
    must: Vec<Condition>,
    should: Vec<Condition>,
    must_not: Vec<Condition>,
}

/// Operand of the boolean composition methods: a raw condition or a whole
/// sub-builder.
#[derive(Debug, Clone)]
pub enum QdrantClause {
    Condition(Condition),
    Filter(QdrantFilter),
}

impl From<Condition> for QdrantClause {
    fn from(condition: Condition) -> Self {
        QdrantClause::Condition(condition)
    }
}

impl From<QdrantFilter> for QdrantClause {
    fn from(builder: QdrantFilter) -> Self {
        QdrantClause::Filter(builder)
    }
}

impl QdrantClause {
    fn into_conditions(self) -> StoreResult<Vec<Condition>> {
        match self {
            QdrantClause::Condition(condition) => Ok(vec![condition]),
            QdrantClause::Filter(builder) => builder.into_clauses(),
        }
    }
}

impl QdrantFilter {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Conditions this builder contributes when embedded in a parent slot: a
    /// flat-only builder dissolves into its condition list, one using boolean
    /// slots is kept intact as a nested group.
    fn into_clauses(self) -> StoreResult<Vec<Condition>> {
        if self.must.is_empty() && self.should.is_empty() && self.must_not.is_empty() {
            return Ok(self.conditions);
        }
        Ok(vec![Condition {
            condition_one_of: Some(ConditionOneOf::Filter(self.build()?)),
        }])
    }
}

impl FilterBuilder for QdrantFilter {
    const BACKEND: &'static str = "qdrant";
    type Output = Filter;
    type Clause = QdrantClause;

    fn build(self) -> StoreResult<Filter> {
        if !self.conditions.is_empty() {
            if !self.must.is_empty() || !self.should.is_empty() || !self.must_not.is_empty() {
                return Err(StoreError::FilterComposition);
            }
            return Ok(Filter {
                must: self.conditions,
                ..Default::default()
            });
        }

        Ok(Filter {
            must: self.must,
            should: self.should,
            must_not: self.must_not,
            ..Default::default()
        })
    }

    fn matches(self, key: &str, value: impl Into<MatchTerm>) -> StoreResult<Self> {
        Ok(self.push(match_condition(key, term_value(value.into()))))
    }

    fn match_any(self, key: &str, values: impl Into<MatchList>) -> StoreResult<Self> {
        let value = match values.into() {
            MatchList::Keywords(strings) => MatchValue::Keywords(RepeatedStrings { strings }),
            MatchList::Integers(integers) => MatchValue::Integers(RepeatedIntegers { integers }),
        };
        Ok(self.push(match_condition(key, value)))
    }

    fn match_except(self, key: &str, values: impl Into<MatchList>) -> StoreResult<Self> {
        let value = match values.into() {
            MatchList::Keywords(strings) => {
                MatchValue::ExceptKeywords(RepeatedStrings { strings })
            }
            MatchList::Integers(integers) => {
                MatchValue::ExceptIntegers(RepeatedIntegers { integers })
            }
        };
        Ok(self.push(match_condition(key, value)))
    }

    fn range(self, key: &str, bounds: RangeBounds) -> StoreResult<Self> {
        Ok(self.push(field(FieldCondition {
            key: key.to_string(),
            range: Some(Range {
                gt: bounds.gt,
                gte: bounds.gte,
                lt: bounds.lt,
                lte: bounds.lte,
            }),
            ..Default::default()
        })))
    }

    fn has_id(self, ids: Vec<RecordId>) -> StoreResult<Self> {
        let has_id = ids.iter().map(point_id_from_record).collect();
        Ok(self.push(Condition {
            condition_one_of: Some(ConditionOneOf::HasId(HasIdCondition { has_id })),
        }))
    }

    fn has_vector(self, vector_name: &str) -> StoreResult<Self> {
        Ok(self.push(Condition {
            condition_one_of: Some(ConditionOneOf::HasVector(HasVectorCondition {
                has_vector: vector_name.to_string(),
            })),
        }))
    }

    fn is_empty(self, key: &str) -> StoreResult<Self> {
        Ok(self.push(Condition {
            condition_one_of: Some(ConditionOneOf::IsEmpty(IsEmptyCondition {
                key: key.to_string(),
            })),
        }))
    }

    fn is_null(self, key: &str) -> StoreResult<Self> {
        Ok(self.push(Condition {
            condition_one_of: Some(ConditionOneOf::IsNull(IsNullCondition {
                key: key.to_string(),
            })),
        }))
    }

    fn values_count(self, key: &str, bounds: CountBounds) -> StoreResult<Self> {
        Ok(self.push(field(FieldCondition {
            key: key.to_string(),
            values_count: Some(ValuesCount {
                gt: bounds.gt,
                gte: bounds.gte,
                lt: bounds.lt,
                lte: bounds.lte,
            }),
            ..Default::default()
        })))
    }

    fn geo_bounding_box(
        self,
        key: &str,
        top_left: GeoPoint,
        bottom_right: GeoPoint,
    ) -> StoreResult<Self> {
        Ok(self.push(field(FieldCondition {
            key: key.to_string(),
            geo_bounding_box: Some(GeoBoundingBox {
                top_left: Some(geo_point(top_left)),
                bottom_right: Some(geo_point(bottom_right)),
            }),
            ..Default::default()
        })))
    }

    fn geo_radius(self, key: &str, center: GeoPoint, radius: f32) -> StoreResult<Self> {
        Ok(self.push(field(FieldCondition {
            key: key.to_string(),
            geo_radius: Some(GeoRadius {
                center: Some(geo_point(center)),
                radius,
            }),
            ..Default::default()
        })))
    }

    fn geo_polygon(
        self,
        key: &str,
        exterior: Vec<GeoPoint>,
        interiors: Vec<Vec<GeoPoint>>,
    ) -> StoreResult<Self> {
        Ok(self.push(field(FieldCondition {
            key: key.to_string(),
            geo_polygon: Some(GeoPolygon {
                exterior: Some(line_string(exterior)),
                interiors: interiors.into_iter().map(line_string).collect(),
            }),
            ..Default::default()
        })))
    }

    fn must(mut self, clause: impl Into<QdrantClause>) -> StoreResult<Self> {
        self.must.extend(clause.into().into_conditions()?);
        Ok(self)
    }

    fn should(mut self, clause: impl Into<QdrantClause>) -> StoreResult<Self> {
        self.should.extend(clause.into().into_conditions()?);
        Ok(self)
    }

    fn must_not(mut self, clause: impl Into<QdrantClause>) -> StoreResult<Self> {
        self.must_not.extend(clause.into().into_conditions()?);
        Ok(self)
    }
}

/// Compile caller-supplied filters into the backend filter.
///
/// `None` and an empty mapping both mean "no filter"; the operation proceeds
/// unfiltered.
pub fn compile_filters(filters: Option<Filters<QdrantFilter>>) -> StoreResult<Option<Filter>> {
    match filters {
        None => Ok(None),
        Some(Filters::Builder(builder)) => builder.build().map(Some),
        Some(Filters::Mapping(mapping)) => compile_mapping(mapping),
    }
}

const RANGE_KEYS: [&str; 4] = ["gt", "gte", "lt", "lte"];

fn compile_mapping(
    mapping: serde_json::Map<String, serde_json::Value>,
) -> StoreResult<Option<Filter>> {
    if mapping.is_empty() {
        return Ok(None);
    }

    let mut conditions = Vec::with_capacity(mapping.len());
    for (key, value) in mapping {
        conditions.push(mapping_condition(&key, value)?);
    }

    Ok(Some(Filter {
        must: conditions,
        ..Default::default()
    }))
}

fn mapping_condition(key: &str, value: serde_json::Value) -> StoreResult<Condition> {
    use serde_json::Value;

    match value {
        Value::Object(bounds) if RANGE_KEYS.iter().any(|k| bounds.contains_key(*k)) => {
            Ok(field(FieldCondition {
                key: key.to_string(),
                range: Some(Range {
                    gt: bound(&bounds, "gt", key)?,
                    gte: bound(&bounds, "gte", key)?,
                    lt: bound(&bounds, "lt", key)?,
                    lte: bound(&bounds, "lte", key)?,
                }),
                ..Default::default()
            }))
        }
        Value::Object(_) => Err(StoreError::InvalidFilter(format!(
            "field '{key}': object values must contain at least one of gt/gte/lt/lte"
        ))),
        Value::String(s) => Ok(match_condition(key, MatchValue::Keyword(s))),
        Value::Bool(b) => Ok(match_condition(key, MatchValue::Boolean(b))),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Ok(match_condition(key, MatchValue::Integer(i))),
            None => Err(StoreError::InvalidFilter(format!(
                "field '{key}': equality match requires an integer value; use a range for floats"
            ))),
        },
        Value::Null => Err(StoreError::InvalidFilter(format!(
            "field '{key}': null has no equality match; use an is_null condition"
        ))),
        Value::Array(_) => Err(StoreError::InvalidFilter(format!(
            "field '{key}': arrays have no equality match; use match_any via the builder"
        ))),
    }
}

fn bound(
    bounds: &serde_json::Map<String, serde_json::Value>,
    name: &str,
    key: &str,
) -> StoreResult<Option<f64>> {
    match bounds.get(name) {
        None => Ok(None),
        Some(value) => value.as_f64().map(Some).ok_or_else(|| {
            StoreError::InvalidFilter(format!("field '{key}': bound '{name}' must be numeric"))
        }),
    }
}

fn field(condition: FieldCondition) -> Condition {
    Condition {
        condition_one_of: Some(ConditionOneOf::Field(condition)),
    }
}

fn match_condition(key: &str, value: MatchValue) -> Condition {
    field(FieldCondition {
        key: key.to_string(),
        r#match: Some(Match {
            match_value: Some(value),
        }),
        ..Default::default()
    })
}

fn term_value(term: MatchTerm) -> MatchValue {
    match term {
        MatchTerm::Keyword(s) => MatchValue::Keyword(s),
        MatchTerm::Integer(i) => MatchValue::Integer(i),
        MatchTerm::Boolean(b) => MatchValue::Boolean(b),
    }
}

fn geo_point(point: GeoPoint) -> QdrantGeoPoint {
    QdrantGeoPoint {
        lat: point.lat,
        lon: point.lon,
    }
}

fn line_string(points: Vec<GeoPoint>) -> GeoLineString {
    GeoLineString {
        points: points.into_iter().map(geo_point).collect(),
    }
}

pub(crate) fn point_id_from_record(id: &RecordId) -> PointId {
    let options = match id {
        RecordId::Num(n) => PointIdOptions::Num(*n),
        RecordId::Uuid(id) => PointIdOptions::Uuid(id.to_string()),
    };
    PointId {
        point_id_options: Some(options),
    }
}

pub(crate) fn record_id_from_point(point_id: &PointId) -> StoreResult<RecordId> {
    match &point_id.point_id_options {
        Some(PointIdOptions::Num(n)) => Ok(RecordId::Num(*n)),
        Some(PointIdOptions::Uuid(raw)) => Uuid::parse_str(raw)
            .map(RecordId::Uuid)
            .map_err(|e| StoreError::Backend(format!("Invalid point UUID '{raw}': {e}"))),
        None => Err(StoreError::Backend("Missing point id".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_must(filter: &Filter) -> &Condition {
        assert_eq!(filter.must.len(), 1, "expected exactly one must condition");
        &filter.must[0]
    }

    fn as_field(condition: &Condition) -> &FieldCondition {
        match condition.condition_one_of.as_ref().unwrap() {
            ConditionOneOf::Field(fc) => fc,
            other => panic!("expected field condition, got {other:?}"),
        }
    }

    fn as_nested(condition: &Condition) -> &Filter {
        match condition.condition_one_of.as_ref().unwrap() {
            ConditionOneOf::Filter(f) => f,
            other => panic!("expected nested filter, got {other:?}"),
        }
    }

    #[test]
    fn test_matches() {
        let built = QdrantFilter::new()
            .matches("field", "value")
            .unwrap()
            .build()
            .unwrap();

        let fc = as_field(single_must(&built));
        assert_eq!(fc.key, "field");
        assert_eq!(
            fc.r#match.as_ref().unwrap().match_value,
            Some(MatchValue::Keyword("value".to_string()))
        );
    }

    #[test]
    fn test_match_any_keywords_and_integers() {
        let built = QdrantFilter::new()
            .match_any("field", vec!["value1", "value2"])
            .unwrap()
            .build()
            .unwrap();
        let fc = as_field(single_must(&built));
        assert_eq!(
            fc.r#match.as_ref().unwrap().match_value,
            Some(MatchValue::Keywords(RepeatedStrings {
                strings: vec!["value1".to_string(), "value2".to_string()],
            }))
        );

        let built = QdrantFilter::new()
            .match_any("field", vec![1i64, 2])
            .unwrap()
            .build()
            .unwrap();
        let fc = as_field(single_must(&built));
        assert_eq!(
            fc.r#match.as_ref().unwrap().match_value,
            Some(MatchValue::Integers(RepeatedIntegers {
                integers: vec![1, 2],
            }))
        );
    }

    #[test]
    fn test_match_except() {
        let built = QdrantFilter::new()
            .match_except("field", vec!["value1", "value2"])
            .unwrap()
            .build()
            .unwrap();

        let fc = as_field(single_must(&built));
        assert_eq!(
            fc.r#match.as_ref().unwrap().match_value,
            Some(MatchValue::ExceptKeywords(RepeatedStrings {
                strings: vec!["value1".to_string(), "value2".to_string()],
            }))
        );
    }

    #[test]
    fn test_range_leaves_absent_bounds_unset() {
        let built = QdrantFilter::new()
            .range(
                "field",
                RangeBounds {
                    gt: Some(1.0),
                    lt: Some(2.0),
                    ..Default::default()
                },
            )
            .unwrap()
            .build()
            .unwrap();

        let range = as_field(single_must(&built)).range.as_ref().unwrap();
        assert_eq!(range.gt, Some(1.0));
        assert_eq!(range.lt, Some(2.0));
        assert_eq!(range.gte, None);
        assert_eq!(range.lte, None);
    }

    #[test]
    fn test_has_id() {
        let built = QdrantFilter::new()
            .has_id(vec![RecordId::from(1), RecordId::from(2)])
            .unwrap()
            .build()
            .unwrap();

        match single_must(&built).condition_one_of.as_ref().unwrap() {
            ConditionOneOf::HasId(c) => {
                assert_eq!(c.has_id.len(), 2);
                assert_eq!(
                    c.has_id[0].point_id_options,
                    Some(PointIdOptions::Num(1))
                );
            }
            other => panic!("expected has_id condition, got {other:?}"),
        }
    }

    #[test]
    fn test_has_vector() {
        let built = QdrantFilter::new()
            .has_vector("vector_name")
            .unwrap()
            .build()
            .unwrap();

        match single_must(&built).condition_one_of.as_ref().unwrap() {
            ConditionOneOf::HasVector(c) => assert_eq!(c.has_vector, "vector_name"),
            other => panic!("expected has_vector condition, got {other:?}"),
        }
    }

    #[test]
    fn test_is_empty_and_is_null() {
        let built = QdrantFilter::new().is_empty("field").unwrap().build().unwrap();
        match single_must(&built).condition_one_of.as_ref().unwrap() {
            ConditionOneOf::IsEmpty(c) => assert_eq!(c.key, "field"),
            other => panic!("expected is_empty condition, got {other:?}"),
        }

        let built = QdrantFilter::new().is_null("field").unwrap().build().unwrap();
        match single_must(&built).condition_one_of.as_ref().unwrap() {
            ConditionOneOf::IsNull(c) => assert_eq!(c.key, "field"),
            other => panic!("expected is_null condition, got {other:?}"),
        }
    }

    #[test]
    fn test_values_count() {
        let built = QdrantFilter::new()
            .values_count(
                "field",
                CountBounds {
                    gt: Some(1),
                    lt: Some(5),
                    ..Default::default()
                },
            )
            .unwrap()
            .build()
            .unwrap();

        let count = as_field(single_must(&built)).values_count.as_ref().unwrap();
        assert_eq!(count.gt, Some(1));
        assert_eq!(count.lt, Some(5));
        assert_eq!(count.gte, None);
        assert_eq!(count.lte, None);
    }

    #[test]
    fn test_geo_bounding_box() {
        let built = QdrantFilter::new()
            .geo_bounding_box(
                "field",
                GeoPoint { lat: 3.0, lon: 4.0 },
                GeoPoint { lat: 1.0, lon: 2.0 },
            )
            .unwrap()
            .build()
            .unwrap();

        let bbox = as_field(single_must(&built))
            .geo_bounding_box
            .as_ref()
            .unwrap();
        assert_eq!(bbox.top_left.as_ref().unwrap().lat, 3.0);
        assert_eq!(bbox.bottom_right.as_ref().unwrap().lon, 2.0);
    }

    #[test]
    fn test_geo_radius() {
        let built = QdrantFilter::new()
            .geo_radius("field", GeoPoint { lat: 1.0, lon: 2.0 }, 1000.0)
            .unwrap()
            .build()
            .unwrap();

        let radius = as_field(single_must(&built)).geo_radius.as_ref().unwrap();
        assert_eq!(radius.center.as_ref().unwrap().lat, 1.0);
        assert_eq!(radius.radius, 1000.0);
    }

    #[test]
    fn test_geo_polygon() {
        let built = QdrantFilter::new()
            .geo_polygon(
                "field",
                vec![GeoPoint { lat: 1.0, lon: 2.0 }, GeoPoint { lat: 3.0, lon: 4.0 }],
                vec![vec![
                    GeoPoint { lat: 5.0, lon: 6.0 },
                    GeoPoint { lat: 7.0, lon: 8.0 },
                ]],
            )
            .unwrap()
            .build()
            .unwrap();

        let polygon = as_field(single_must(&built)).geo_polygon.as_ref().unwrap();
        assert_eq!(polygon.exterior.as_ref().unwrap().points.len(), 2);
        assert_eq!(polygon.interiors.len(), 1);
        assert_eq!(polygon.interiors[0].points.len(), 2);
    }

    #[test]
    fn test_mixing_conditions_with_clauses_fails() {
        let err = QdrantFilter::new()
            .matches("field1", "value1")
            .unwrap()
            .must(QdrantFilter::new().matches("field2", "value2").unwrap())
            .unwrap()
            .build()
            .unwrap_err();

        assert!(matches!(err, StoreError::FilterComposition));
    }

    #[test]
    fn test_composition_error_requires_both_sides() {
        // Flat-only and slots-only builders both build fine.
        QdrantFilter::new()
            .matches("a", 1)
            .unwrap()
            .build()
            .unwrap();

        QdrantFilter::new()
            .must(QdrantFilter::new().matches("a", 1).unwrap())
            .unwrap()
            .build()
            .unwrap();
    }

    #[test]
    fn test_flat_sub_builder_flattens_into_slot() {
        let sub = QdrantFilter::new()
            .matches("field2", "value2")
            .unwrap()
            .matches("field3", "value3")
            .unwrap();

        let built = QdrantFilter::new().must(sub).unwrap().build().unwrap();

        // Two conditions land directly in the slot, no nested group.
        assert_eq!(built.must.len(), 2);
        assert_eq!(as_field(&built.must[0]).key, "field2");
        assert_eq!(as_field(&built.must[1]).key, "field3");
    }

    #[test]
    fn test_nested_tree_preserves_depth_and_slots() {
        // must(must(must(should(must_not(cond))))): the tree structure must
        // survive compilation exactly.
        let innermost = QdrantFilter::new()
            .must_not(QdrantFilter::new().matches("field5", "value5").unwrap())
            .unwrap();
        let with_should = QdrantFilter::new().should(innermost).unwrap();
        let level3 = QdrantFilter::new().must(with_should).unwrap();
        let level2 = QdrantFilter::new().must(level3).unwrap();
        let built = QdrantFilter::new().must(level2).unwrap().build().unwrap();

        let level2 = as_nested(single_must(&built));
        let level3 = as_nested(single_must(level2));
        let with_should = as_nested(single_must(level3));

        assert_eq!(with_should.should.len(), 1);
        let innermost = as_nested(&with_should.should[0]);

        assert_eq!(innermost.must_not.len(), 1);
        let leaf = as_field(&innermost.must_not[0]);
        assert_eq!(leaf.key, "field5");
        assert_eq!(
            leaf.r#match.as_ref().unwrap().match_value,
            Some(MatchValue::Keyword("value5".to_string()))
        );
    }

    #[test]
    fn test_empty_builder_builds_empty_filter() {
        let built = QdrantFilter::new().build().unwrap();
        assert_eq!(built, Filter::default());
    }

    #[test]
    fn test_compile_none_is_no_filter() {
        assert_eq!(compile_filters(None).unwrap(), None);
    }

    #[test]
    fn test_compile_empty_mapping_is_no_filter() {
        let mapping = serde_json::Map::new();
        assert_eq!(
            compile_filters(Some(Filters::Mapping(mapping))).unwrap(),
            None
        );
    }

    #[test]
    fn test_mapping_scalar_matches_builder_output() {
        let mut mapping = serde_json::Map::new();
        mapping.insert("field".to_string(), serde_json::json!("value"));
        let from_mapping = compile_filters(Some(Filters::Mapping(mapping)))
            .unwrap()
            .unwrap();

        let from_builder = QdrantFilter::new()
            .matches("field", "value")
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(from_mapping, from_builder);
    }

    #[test]
    fn test_mapping_integer_and_bool_scalars() {
        let mut mapping = serde_json::Map::new();
        mapping.insert("count".to_string(), serde_json::json!(3));
        mapping.insert("enabled".to_string(), serde_json::json!(true));
        let built = compile_filters(Some(Filters::Mapping(mapping)))
            .unwrap()
            .unwrap();

        assert_eq!(built.must.len(), 2);
        // serde_json::Map iterates in key order.
        assert_eq!(
            as_field(&built.must[0]).r#match.as_ref().unwrap().match_value,
            Some(MatchValue::Integer(3))
        );
        assert_eq!(
            as_field(&built.must[1]).r#match.as_ref().unwrap().match_value,
            Some(MatchValue::Boolean(true))
        );
    }

    #[test]
    fn test_mapping_range_sets_exactly_present_bounds() {
        let mut mapping = serde_json::Map::new();
        mapping.insert(
            "field".to_string(),
            serde_json::json!({"gte": 1.0, "lte": 2.0}),
        );
        let built = compile_filters(Some(Filters::Mapping(mapping)))
            .unwrap()
            .unwrap();

        let range = as_field(single_must(&built)).range.as_ref().unwrap();
        assert_eq!(range.gte, Some(1.0));
        assert_eq!(range.lte, Some(2.0));
        assert_eq!(range.gt, None);
        assert_eq!(range.lt, None);
    }

    #[test]
    fn test_mapping_range_matches_builder_output() {
        let mut mapping = serde_json::Map::new();
        mapping.insert("field".to_string(), serde_json::json!({"gt": 1.5}));
        let from_mapping = compile_filters(Some(Filters::Mapping(mapping)))
            .unwrap()
            .unwrap();

        let from_builder = QdrantFilter::new()
            .range(
                "field",
                RangeBounds {
                    gt: Some(1.5),
                    ..Default::default()
                },
            )
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(from_mapping, from_builder);
    }

    #[test]
    fn test_mapping_multiple_entries_combine_under_and() {
        let mut mapping = serde_json::Map::new();
        mapping.insert("field1".to_string(), serde_json::json!("value1"));
        mapping.insert("field2".to_string(), serde_json::json!({"gt": 1, "lt": 2}));
        let built = compile_filters(Some(Filters::Mapping(mapping)))
            .unwrap()
            .unwrap();

        assert_eq!(built.must.len(), 2);
        assert!(built.should.is_empty());
        assert!(built.must_not.is_empty());
    }

    #[test]
    fn test_mapping_rejects_unexpressible_values() {
        for value in [
            serde_json::json!(1.5),
            serde_json::json!(null),
            serde_json::json!(["a", "b"]),
            serde_json::json!({"unexpected": 1}),
            serde_json::json!({"gt": "high"}),
        ] {
            let mut mapping = serde_json::Map::new();
            mapping.insert("field".to_string(), value);
            let err = compile_filters(Some(Filters::Mapping(mapping))).unwrap_err();
            assert!(matches!(err, StoreError::InvalidFilter(_)));
        }
    }

    #[test]
    fn test_record_id_point_id_round_trip() {
        let num = RecordId::from(9);
        assert_eq!(record_id_from_point(&point_id_from_record(&num)).unwrap(), num);

        let id = RecordId::Uuid(Uuid::new_v4());
        assert_eq!(record_id_from_point(&point_id_from_record(&id)).unwrap(), id);
    }
}
