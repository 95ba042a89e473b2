//! Product metadata resolution
//!
//! Resolves a product code against the primary catalog first, then the
//! AgriBalyse dataset. Explicitly requested ingredients are resolved last and
//! override any impact found through the product.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::data::{null_as_default, Dataset};

/// Weight given to AgriBalyse ingredients, which carry no weights
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Body of `POST /metadata`
///
/// Missing or `null` fields decode as empty. Common casings of the field
/// names are accepted as well.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataRequest {
    #[serde(
        rename = "CIQUALCode",
        alias = "ciqualCode",
        alias = "CiqualCode",
        alias = "ciqualcode",
        alias = "ciqual_code",
        default,
        deserialize_with = "null_as_default"
    )]
    pub ciqual_code: String,
    #[serde(
        rename = "Ingredients",
        alias = "ingredients",
        default,
        deserialize_with = "null_as_default"
    )]
    pub ingredients: Vec<String>,
}

/// Resolved product metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataResponse {
    #[serde(rename = "ProductName")]
    pub product_name: String,
    /// One single-entry `{id: weight}` object per ingredient, in order
    #[serde(rename = "Ingredients")]
    pub ingredients: Vec<BTreeMap<String, f64>>,
    #[serde(rename = "ImpactByIngredient")]
    pub impact_by_ingredient: BTreeMap<String, f64>,
}

impl MetadataResponse {
    fn push_ingredient(&mut self, id: &str, weight: f64) {
        self.ingredients
            .push(BTreeMap::from([(id.to_string(), weight)]));
    }
}

/// Resolve name, ingredient list and single-score impacts for a product.
///
/// An unknown code is not an error: the name and ingredient list stay empty.
pub fn resolve_metadata(
    dataset: &Dataset,
    ciqual_code: &str,
    explicit_ingredients: &[String],
) -> MetadataResponse {
    let mut response = MetadataResponse::default();

    if let Some(product) = dataset.product(ciqual_code) {
        response.product_name = product.product_name.clone();
        for entry in &product.ingredients {
            response.push_ingredient(&entry.id, entry.percent);
            if let Some(amount) = dataset.ingredient(&entry.id).and_then(|i| i.single_score()) {
                response.impact_by_ingredient.insert(entry.id.clone(), amount);
            }
        }
    } else if let Some(entry) = dataset.agribalyse_entry(ciqual_code) {
        response.product_name = entry.nom_francais.clone();
        for (id, amount) in entry.single_score_ingredients() {
            response.push_ingredient(id, DEFAULT_WEIGHT);
            response.impact_by_ingredient.insert(id.to_string(), amount);
        }
    }

    for id in explicit_ingredients {
        if let Some(amount) = dataset.ingredient(id).and_then(|i| i.single_score()) {
            response.impact_by_ingredient.insert(id.clone(), amount);
        }
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{AgribalyseEntry, Ingredient, Product};
    use std::collections::HashMap;

    fn fixture() -> Dataset {
        let products: Vec<Product> = serde_json::from_str(
            r#"[
                {"ciqual_code": "12345", "product_name": "Crêpe",
                 "ingredients": [{"id": "eggs", "percent": 40.0}, {"id": "flour", "percent": 60.0}]},
                {"ciqual_code": "4000", "product_name": "Omelette au lait",
                 "ingredients": [{"id": "milk", "percent": 30.0}, {"id": "eggs", "percent": 70.0}]},
                {"ciqual_code": "5000", "product_name": "Gâteau",
                 "ingredients": [{"id": "eggs", "percent": 35.0}, {"id": "vanilla", "percent": 0.5}]}
            ]"#,
        )
        .unwrap();
        let agribalyse: Vec<AgribalyseEntry> = serde_json::from_str(
            r#"[
                {"ciqual_code": "20001", "nom_francais": "Soupe de légumes",
                 "impact_environnemental": {"Score unique EF": {"ingredients": {"poireau": 0.1, "eggs": 9.0}}}},
                {"ciqual_code": "12345", "nom_francais": "Shadowed"},
                {"ciqual_code": "30000", "nom_francais": "Sans détail",
                 "impact_environnemental": {"Changement climatique": {"ingredients": {"sel": 0.01}}}}
            ]"#,
        )
        .unwrap();
        let ingredients: HashMap<String, Ingredient> = serde_json::from_str(
            r#"{
                "eggs": {"impacts": {"Score unique EF": {"amount": 2.5}}},
                "flour": {"impacts": {"Changement climatique": {"amount": 0.4}}},
                "milk": {"impacts": {"Score unique EF": {"amount": 1.25}}},
                "salt": {}
            }"#,
        )
        .unwrap();
        Dataset::from_records(products, agribalyse, ingredients)
    }

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_primary_product() {
        let dataset = fixture();
        let response = resolve_metadata(&dataset, "12345", &[]);

        assert_eq!(response.product_name, "Crêpe");
        assert_eq!(
            response.ingredients,
            vec![
                BTreeMap::from([("eggs".to_string(), 40.0)]),
                BTreeMap::from([("flour".to_string(), 60.0)]),
            ]
        );
        assert_eq!(
            response.impact_by_ingredient,
            BTreeMap::from([("eggs".to_string(), 2.5)])
        );
    }

    #[test]
    fn test_primary_keeps_recipe_order() {
        let dataset = fixture();
        let response = resolve_metadata(&dataset, "4000", &[]);

        let order: Vec<&String> = response
            .ingredients
            .iter()
            .flat_map(|entry| entry.keys())
            .collect();
        assert_eq!(order, vec!["milk", "eggs"]);
        assert_eq!(response.impact_by_ingredient.len(), 2);
    }

    #[test]
    fn test_primary_ingredient_missing_from_table() {
        let dataset = fixture();
        assert!(dataset.ingredient("vanilla").is_none());

        let response = resolve_metadata(&dataset, "5000", &[]);
        assert_eq!(
            response.ingredients,
            vec![
                BTreeMap::from([("eggs".to_string(), 35.0)]),
                BTreeMap::from([("vanilla".to_string(), 0.5)]),
            ]
        );
        assert_eq!(
            response.impact_by_ingredient,
            BTreeMap::from([("eggs".to_string(), 2.5)])
        );
    }

    #[test]
    fn test_primary_takes_precedence_over_agribalyse() {
        let dataset = fixture();
        let response = resolve_metadata(&dataset, "12345", &[]);
        assert_eq!(response.product_name, "Crêpe");
    }

    #[test]
    fn test_agribalyse_product() {
        let dataset = fixture();
        let response = resolve_metadata(&dataset, "20001", &[]);

        assert_eq!(response.product_name, "Soupe de légumes");
        assert_eq!(response.ingredients.len(), 2);
        for entry in &response.ingredients {
            assert!(entry.values().all(|w| *w == DEFAULT_WEIGHT));
        }
        assert_eq!(response.impact_by_ingredient["poireau"], 0.1);
        assert_eq!(response.impact_by_ingredient["eggs"], 9.0);
    }

    #[test]
    fn test_agribalyse_without_single_score() {
        let dataset = fixture();
        let response = resolve_metadata(&dataset, "30000", &[]);

        assert_eq!(response.product_name, "Sans détail");
        assert!(response.ingredients.is_empty());
        assert!(response.impact_by_ingredient.is_empty());
    }

    #[test]
    fn test_unknown_code() {
        let dataset = fixture();
        let response = resolve_metadata(&dataset, "unknown", &[]);
        assert_eq!(response, MetadataResponse::default());
    }

    #[test]
    fn test_unknown_code_with_explicit_ingredients() {
        let dataset = fixture();
        let response = resolve_metadata(&dataset, "unknown", &ids(&["eggs"]));

        assert_eq!(response.product_name, "");
        assert!(response.ingredients.is_empty());
        assert_eq!(
            response.impact_by_ingredient,
            BTreeMap::from([("eggs".to_string(), 2.5)])
        );
    }

    #[test]
    fn test_explicit_ingredients_override_product_impacts() {
        let dataset = fixture();
        let response = resolve_metadata(&dataset, "20001", &ids(&["eggs"]));

        // AgriBalyse says 9.0, the ingredient table says 2.5.
        assert_eq!(response.impact_by_ingredient["eggs"], 2.5);
        assert_eq!(response.impact_by_ingredient["poireau"], 0.1);
    }

    #[test]
    fn test_explicit_ingredients_without_score_are_skipped() {
        let dataset = fixture();
        let response = resolve_metadata(&dataset, "unknown", &ids(&["flour", "salt", "nope"]));
        assert!(response.impact_by_ingredient.is_empty());
    }

    #[test]
    fn test_response_roundtrip() {
        let dataset = fixture();
        let response = resolve_metadata(&dataset, "12345", &ids(&["milk"]));

        let json = serde_json::to_string(&response).unwrap();
        let decoded: MetadataResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, response);
    }

    #[test]
    fn test_response_wire_format() {
        let dataset = fixture();
        let value = serde_json::to_value(resolve_metadata(&dataset, "12345", &[])).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "ProductName": "Crêpe",
                "Ingredients": [{"eggs": 40.0}, {"flour": 60.0}],
                "ImpactByIngredient": {"eggs": 2.5}
            })
        );
    }

    #[test]
    fn test_empty_ingredients_encode_as_array() {
        let value = serde_json::to_value(MetadataResponse::default()).unwrap();
        assert_eq!(value["Ingredients"], serde_json::json!([]));
    }

    #[test]
    fn test_request_fields_default() {
        let request: MetadataRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request, MetadataRequest::default());

        let request: MetadataRequest =
            serde_json::from_str(r#"{"CIQUALCode": "12345", "Ingredients": ["eggs"]}"#).unwrap();
        assert_eq!(request.ciqual_code, "12345");
        assert_eq!(request.ingredients, vec!["eggs"]);
    }

    #[test]
    fn test_request_null_fields() {
        let request: MetadataRequest =
            serde_json::from_str(r#"{"CIQUALCode": "12345", "Ingredients": null}"#).unwrap();
        assert_eq!(request.ciqual_code, "12345");
        assert!(request.ingredients.is_empty());

        let request: MetadataRequest =
            serde_json::from_str(r#"{"CIQUALCode": null, "Ingredients": ["eggs"]}"#).unwrap();
        assert_eq!(request.ciqual_code, "");
        assert_eq!(request.ingredients, vec!["eggs"]);
    }

    #[test]
    fn test_request_field_casing() {
        let request: MetadataRequest =
            serde_json::from_str(r#"{"ciqualcode": "12345", "ingredients": ["eggs"]}"#).unwrap();
        assert_eq!(request.ciqual_code, "12345");
        assert_eq!(request.ingredients, vec!["eggs"]);

        let request: MetadataRequest =
            serde_json::from_str(r#"{"ciqualCode": "4000"}"#).unwrap();
        assert_eq!(request.ciqual_code, "4000");
    }
}
