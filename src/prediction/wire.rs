//! JSON shapes of the prediction service and their classification.

use serde::Deserialize;
use serde_json::Value;

use super::error::{NO_FOOD_DETECTED_MESSAGE, PredictionError};
use super::types::{IngredientRecord, NutritionTotals, PredictionResult, Quantity};

#[derive(Debug, Deserialize)]
struct PredictResponseWire {
    #[serde(default)]
    image_url: Option<Value>,
    #[serde(default)]
    calories_info: Option<CaloriesInfoWire>,
    #[serde(default)]
    error: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct CaloriesInfoWire {
    #[serde(default)]
    food_items: Option<Vec<FoodItemWire>>,
    #[serde(default)]
    total_calories: Option<Value>,
    #[serde(default)]
    total_protein: Option<Value>,
    #[serde(default)]
    total_carbs: Option<Value>,
    #[serde(default)]
    total_fat: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct FoodItemWire {
    #[serde(default)]
    name: Option<Value>,
    #[serde(default)]
    calories: Option<Value>,
    #[serde(default)]
    protein: Option<Value>,
    #[serde(default)]
    carbs: Option<Value>,
    #[serde(default)]
    fat: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ErrorBodyWire {
    #[serde(default)]
    error: Option<Value>,
}

/// Interpret a 2xx body.
pub(crate) fn classify_success(body: &[u8]) -> Result<PredictionResult, PredictionError> {
    let parsed: PredictResponseWire = serde_json::from_slice(body)
        .map_err(|err| PredictionError::transport(format!("malformed response body: {err}")))?;
    let server_error = non_empty_string(parsed.error.as_ref());
    let info = parsed.calories_info.unwrap_or_default();
    let items = info.food_items.unwrap_or_default();
    if items.is_empty() {
        return Err(PredictionError::EmptyResult {
            message: server_error.unwrap_or_else(|| NO_FOOD_DETECTED_MESSAGE.to_string()),
        });
    }
    Ok(PredictionResult {
        image_url: non_empty_string(parsed.image_url.as_ref()).unwrap_or_default(),
        ingredients: items.into_iter().map(ingredient_from_wire).collect(),
        totals: NutritionTotals {
            calories: quantity(info.total_calories),
            protein_g: quantity(info.total_protein),
            carbs_g: quantity(info.total_carbs),
            fat_g: quantity(info.total_fat),
        },
    })
}

/// Interpret a non-2xx response.
pub(crate) fn classify_failure(status: u16, status_text: &str, body: &[u8]) -> PredictionError {
    let server_error = serde_json::from_slice::<ErrorBodyWire>(body)
        .ok()
        .and_then(|parsed| non_empty_string(parsed.error.as_ref()));
    let message = server_error
        .unwrap_or_else(|| format!("HTTP Error: {status} {status_text}").trim_end().to_string());
    PredictionError::Server { status, message }
}

fn ingredient_from_wire(item: FoodItemWire) -> IngredientRecord {
    IngredientRecord {
        name: item
            .name
            .as_ref()
            .and_then(|value| quantity(Some(value.clone())))
            .map(|name| name.to_string())
            .unwrap_or_default(),
        calories: quantity(item.calories),
        protein_g: quantity(item.protein),
        carbs_g: quantity(item.carbs),
        fat_g: quantity(item.fat),
    }
}

/// Numbers and non-blank strings are figures; anything else is unknown.
fn quantity(value: Option<Value>) -> Option<Quantity> {
    match value? {
        Value::Number(number) => number.as_f64().map(Quantity::Number),
        Value::String(text) => {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| Quantity::Text(trimmed.to_string()))
        }
        _ => None,
    }
}

fn non_empty_string(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RICE: &str = r#"{
        "image_url": "http://localhost:5000/static/uploads/rice.jpg",
        "calories_info": {
            "food_items": [{"name": "Rice", "calories": 200, "protein": 4, "carbs": 44, "fat": 0.4}],
            "total_calories": 200, "total_protein": 4, "total_carbs": 44, "total_fat": 0.4
        }
    }"#;

    #[test]
    fn parses_populated_response() {
        let result = classify_success(RICE.as_bytes()).unwrap();
        assert_eq!(
            result.image_url,
            "http://localhost:5000/static/uploads/rice.jpg"
        );
        assert_eq!(result.ingredients.len(), 1);
        let rice = &result.ingredients[0];
        assert_eq!(rice.name, "Rice");
        assert_eq!(rice.calories, Some(Quantity::Number(200.0)));
        assert_eq!(rice.fat_g, Some(Quantity::Number(0.4)));
        assert_eq!(result.totals.carbs_g, Some(Quantity::Number(44.0)));
    }

    #[test]
    fn keeps_string_figures_and_drops_blank_ones() {
        let body = r#"{
            "image_url": "",
            "calories_info": {
                "food_items": [{"name": "Donut", "calories": "300 - 450 calories per donut", "protein": "", "fat": null}],
                "total_calories": "1200"
            }
        }"#;
        let result = classify_success(body.as_bytes()).unwrap();
        let donut = &result.ingredients[0];
        assert_eq!(
            donut.calories,
            Some(Quantity::Text("300 - 450 calories per donut".into()))
        );
        assert_eq!(donut.protein_g, None);
        assert_eq!(donut.carbs_g, None);
        assert_eq!(donut.fat_g, None);
        assert_eq!(result.totals.calories, Some(Quantity::Text("1200".into())));
        assert_eq!(result.totals.protein_g, None);
        assert_eq!(result.image_url, "");
    }

    #[test]
    fn empty_items_without_error_use_default_message() {
        let body = r#"{"image_url": "x", "calories_info": {"food_items": [], "total_calories": 0}}"#;
        let err = classify_success(body.as_bytes()).unwrap_err();
        assert_eq!(
            err,
            PredictionError::EmptyResult {
                message: NO_FOOD_DETECTED_MESSAGE.into()
            }
        );
    }

    #[test]
    fn missing_calories_info_prefers_server_error() {
        let body = r#"{"error": "Image too dark"}"#;
        let err = classify_success(body.as_bytes()).unwrap_err();
        assert_eq!(err.to_string(), "Image too dark");
    }

    #[test]
    fn malformed_success_body_is_a_transport_failure() {
        let err = classify_success(b"<html>oops</html>").unwrap_err();
        assert!(matches!(err, PredictionError::Transport { .. }));
    }

    #[test]
    fn failure_uses_server_error_field() {
        let err = classify_failure(
            415,
            "Unsupported Media Type",
            br#"{"error":"Unsupported file type"}"#,
        );
        assert_eq!(err.to_string(), "Unsupported file type");
    }

    #[test]
    fn failure_without_error_field_uses_status_line() {
        let err = classify_failure(500, "Internal Server Error", b"<html>boom</html>");
        assert_eq!(err.to_string(), "HTTP Error: 500 Internal Server Error");
        let err = classify_failure(400, "", br#"{"error": ""}"#);
        assert_eq!(err.to_string(), "HTTP Error: 400");
    }
}
