//! Behavior of the individual extractors.

use serde_json::{json, Value};
use similar_asserts::assert_eq;

use urlq_ir::operators::{Operator, OperatorEntry, OperatorTable};
use urlq_ir::request::{NumberOrText, StringOrList};
use urlq_translation::translation::error::Error;
use urlq_translation::translation::query::fields::{FieldFormat, FieldSelector};
use urlq_translation::translation::query::filtering::FilterExtractor;
use urlq_translation::translation::query::pagination::PaginationExtractor;
use urlq_translation::translation::query::relationships::{RelationExtractor, RelationFormat};
use urlq_translation::translation::query::sorting::{SortExtractor, SortFormat};

fn page(limit: Option<i64>, page: Option<i64>, offset: Option<i64>) -> PaginationExtractor {
    let limit = limit.map(NumberOrText::from);
    let page = page.map(NumberOrText::from);
    let offset = offset.map(NumberOrText::from);
    PaginationExtractor::new(limit.as_ref(), page.as_ref(), offset.as_ref())
}

#[test]
fn sort_parses_ascending_and_descending() {
    assert_eq!(
        SortExtractor::new("price").parse(SortFormat::Object),
        json!({ "price": "asc" })
    );
    assert_eq!(
        SortExtractor::new("-price").parse(SortFormat::Object),
        json!({ "price": "desc" })
    );
    assert_eq!(
        SortExtractor::new("price,-id").parse(SortFormat::Object),
        json!({ "price": "asc", "id": "desc" })
    );
}

#[test]
fn sort_keeps_the_first_occurrence_of_a_field() {
    assert_eq!(
        SortExtractor::new("price,-price").parse(SortFormat::Object),
        json!({ "price": "asc" })
    );
}

#[test]
fn sort_renders_as_pairs() {
    assert_eq!(
        SortExtractor::new("-price").parse(SortFormat::Array),
        json!([["price", "desc"]])
    );
}

#[test]
fn sort_supports_a_custom_reducer() {
    let fields = SortExtractor::new("-price,id").parse_with(|sorts| {
        Value::Array(sorts.keys().map(|field| json!(field)).collect())
    });
    assert_eq!(fields, json!(["price", "id"]));
}

#[test]
fn pagination_defaults_page_and_offset() {
    assert_eq!(
        page(Some(12), None, None).parse().to_value(),
        json!({ "limit": 12, "offset": 0, "page": 1 })
    );
}

#[test]
fn pagination_derives_offset_from_the_page() {
    assert_eq!(
        page(Some(12), Some(2), None).parse().to_value(),
        json!({ "limit": 12, "offset": 12, "page": 2 })
    );
    assert_eq!(
        page(Some(6), Some(3), None).parse().to_value(),
        json!({ "limit": 6, "offset": 12, "page": 3 })
    );
}

#[test]
fn pagination_ignores_an_explicit_offset_when_a_limit_is_set() {
    assert_eq!(
        page(Some(10), Some(2), Some(99)).parse().to_value(),
        json!({ "limit": 10, "offset": 10, "page": 2 })
    );
}

#[test]
fn pagination_preserves_an_explicit_offset_without_a_limit() {
    assert_eq!(
        page(None, None, Some(5)).parse().to_value(),
        json!({ "offset": 5, "page": 1 })
    );
}

#[test]
fn pagination_clamps_the_page_to_at_least_one() {
    assert_eq!(page(Some(6), Some(0), None).parse().page, 1);
    assert_eq!(page(Some(6), Some(-3), None).parse().page, 1);
}

#[test]
fn pagination_treats_malformed_numbers_as_absent() {
    let limit = NumberOrText::from("twelve");
    let offset = NumberOrText::from(5);
    let spec = PaginationExtractor::new(Some(&limit), None, Some(&offset)).parse();
    assert_eq!(spec.limit, None);
    assert_eq!(spec.offset, 5);
}

#[test]
fn filter_renders_equality_bare() {
    let filter = FilterExtractor::new(&["id,eq,1"], &OperatorTable::generic()).unwrap();
    assert_eq!(filter.parse(), json!({ "id": 1 }));
}

#[test]
fn filter_wraps_comparisons_in_their_literal() {
    let filter = FilterExtractor::new(&["id,gt,1"], &OperatorTable::generic()).unwrap();
    assert_eq!(filter.parse(), json!({ "id": { "gt": 1 } }));
}

#[test]
fn filter_splits_and_coerces_multi_valued_operands() {
    let filter = FilterExtractor::new(&["id,in,1:2"], &OperatorTable::generic()).unwrap();
    assert_eq!(filter.parse(), json!({ "id": { "in": [1, 2] } }));
}

#[test]
fn filter_broadcasts_or_groups_over_their_fields() {
    let filter = FilterExtractor::new(&["id:id2,eq,1"], &OperatorTable::generic()).unwrap();
    assert_eq!(filter.parse(), json!({ "OR": [{ "id": 1 }, { "id2": 1 }] }));
}

#[test]
fn filter_nests_dotted_fields_one_level() {
    let filter = FilterExtractor::new(&["user.id,eq,1"], &OperatorTable::generic()).unwrap();
    assert_eq!(filter.parse(), json!({ "user": { "id": 1 } }));

    // deeper segments are dropped
    let filter = FilterExtractor::new(&["user.id.extra,eq,1"], &OperatorTable::generic()).unwrap();
    assert_eq!(filter.parse(), json!({ "user": { "id": 1 } }));
}

#[test]
fn filter_accepts_every_generic_operator() {
    let filter = FilterExtractor::new(
        &[
            "id,eq,1",
            "id2,and,1:2",
            "id3,lt,3",
            "id4,gt,3",
            "id5,ne,3",
            "id6,not,3",
            "id7,between,3:4",
            "id8,in,3:4",
            "id10,like,%3%",
            "id11,isNull",
        ],
        &OperatorTable::generic(),
    )
    .unwrap();

    assert_eq!(
        filter.parse(),
        json!({
            "id": 1,
            "id2": [1, 2],
            "id3": { "lt": 3 },
            "id4": { "gt": 3 },
            "id5": { "ne": 3 },
            "id6": { "not": 3 },
            "id7": { "between": [3, 4] },
            "id8": { "in": [3, 4] },
            "id10": { "like": "%3%" },
            "id11": "isNull",
        })
    );
}

#[test]
fn filter_discards_segments_past_the_value() {
    let filter =
        FilterExtractor::new(&["name,eq,a,b"], &OperatorTable::generic()).unwrap();
    assert_eq!(filter.parse(), json!({ "name": "a" }));
}

#[test]
fn filter_last_write_wins_on_duplicate_keys() {
    let filter =
        FilterExtractor::new(&["id,eq,1", "id,gt,5"], &OperatorTable::generic()).unwrap();
    assert_eq!(filter.parse(), json!({ "id": { "gt": 5 } }));
}

#[test]
fn filter_supports_function_renderings() {
    let table = OperatorTable::empty().with(
        Operator::In,
        OperatorEntry::function(|operand| {
            Value::from(serde_json::to_string(&operand).unwrap())
        }),
    );
    let filter = FilterExtractor::new(&["id,in,1:2:3"], &table).unwrap();
    assert_eq!(filter.parse(), json!({ "id": "[1,2,3]" }));
}

#[test]
fn filter_rejects_unknown_operator_names() {
    let result = FilterExtractor::new(&["id,almost,1"], &OperatorTable::generic());
    assert_eq!(result.unwrap_err(), Error::UnknownOperator("almost".to_string()));
}

#[test]
fn filter_rejects_operators_missing_from_the_table() {
    let result = FilterExtractor::new(&["id,gt,1"], &OperatorTable::empty());
    assert_eq!(result.unwrap_err(), Error::MissingOperator(Operator::Gt));
}

#[test]
fn filter_skips_degenerate_tokens() {
    let filter =
        FilterExtractor::new(&["justafield", "id,eq,1", "name,gt"], &OperatorTable::generic())
            .unwrap();
    assert_eq!(filter.parse(), json!({ "id": 1 }));
}

#[test]
fn fields_render_as_object_or_array() {
    let fields = FieldSelector::new(&StringOrList::from("id,name,age"));
    assert_eq!(
        fields.parse(FieldFormat::Object),
        json!({ "id": true, "name": true, "age": true })
    );
    assert_eq!(fields.parse(FieldFormat::Array), json!(["id", "name", "age"]));
}

#[test]
fn fields_accept_a_pre_split_list() {
    let fields = FieldSelector::new(&StringOrList::from(vec!["id", "name"]));
    assert_eq!(fields.parse(FieldFormat::Array), json!(["id", "name"]));
}

#[test]
fn relations_render_as_booleans() {
    let relations = RelationExtractor::new(&["users"], &OperatorTable::generic()).unwrap();
    assert_eq!(
        relations.parse(RelationFormat::Boolean),
        json!({ "users": true })
    );
}

#[test]
fn relations_without_sub_sections_render_a_minimal_dto() {
    let relations = RelationExtractor::new(&["users"], &OperatorTable::generic()).unwrap();
    assert_eq!(
        relations.parse(RelationFormat::Array),
        json!([{ "include": "users" }])
    );
}

#[test]
fn relations_parse_the_full_sub_grammar() {
    let relations =
        RelationExtractor::new(&["users:id,name:id,eq,1:12:-id"], &OperatorTable::generic())
            .unwrap();
    assert_eq!(
        relations.parse(RelationFormat::Object),
        json!({
            "users": {
                "include": "users",
                "fields": { "id": true, "name": true },
                "filters": { "id": 1 },
                "order": { "id": "desc" },
                "limit": 12,
                "offset": 0,
                "page": 1,
            }
        })
    );
}

#[test]
fn relations_skip_empty_sub_sections() {
    let relations =
        RelationExtractor::new(&["users::id,eq,1"], &OperatorTable::generic()).unwrap();
    assert_eq!(
        relations.parse(RelationFormat::Object),
        json!({
            "users": {
                "include": "users",
                "filters": { "id": 1 },
            }
        })
    );
}

#[test]
fn relations_support_a_custom_renderer() {
    let relations =
        RelationExtractor::new(&["users:id,name:id,eq,1:12:-id"], &OperatorTable::generic())
            .unwrap();
    let rendered = relations.parse_with(|relations| {
        Value::Array(
            relations
                .iter()
                .map(|(association, sub)| {
                    json!({
                        "association": association,
                        "attributes": sub.fields.as_ref().unwrap().parse(FieldFormat::Array),
                        "where": sub.filters.as_ref().unwrap().parse(),
                    })
                })
                .collect(),
        )
    });
    assert_eq!(
        rendered,
        json!([{
            "association": "users",
            "attributes": ["id", "name"],
            "where": { "id": 1 },
        }])
    );
}

#[test]
fn rendering_is_idempotent() {
    let sort = SortExtractor::new("price,-id");
    assert_eq!(sort.parse(SortFormat::Object), sort.parse(SortFormat::Object));

    let filter = FilterExtractor::new(&["id,in,1:2"], &OperatorTable::generic()).unwrap();
    assert_eq!(filter.parse(), filter.parse());

    let relations =
        RelationExtractor::new(&["users:id,name:id,eq,1:12:-id"], &OperatorTable::generic())
            .unwrap();
    assert_eq!(
        relations.parse(RelationFormat::Object),
        relations.parse(RelationFormat::Object)
    );
}
