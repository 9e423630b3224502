use crate::schemas::ApiDoc;
use utoipa::OpenApi;

#[test]
fn test_openapi_schema_generation() {
    let openapi = ApiDoc::openapi();

    assert!(openapi.components.is_some());
    let components = openapi.components.as_ref().unwrap();

    for schema in ["ErrorResponse", "HealthResponse", "DemandRequest", "DemandResponse", "PopularRoute"] {
        assert!(components.schemas.contains_key(schema), "missing schema {}", schema);
    }

    // Verify that the schema can be serialized to JSON without errors
    let json_result = serde_json::to_string(&openapi);
    assert!(json_result.is_ok());
}

#[test]
fn test_market_demand_path_is_documented() {
    let openapi = ApiDoc::openapi();
    assert!(openapi.paths.paths.contains_key("/api/market-demand"));
    assert!(openapi.paths.paths.contains_key("/health"));
}

#[test]
fn test_error_response_schema_structure() {
    let openapi = ApiDoc::openapi();
    let components = openapi.components.as_ref().unwrap();
    let error_response_schema = components.schemas.get("ErrorResponse").unwrap();

    if let utoipa::openapi::RefOr::T(utoipa::openapi::schema::Schema::Object(obj)) = error_response_schema {
        let properties = &obj.properties;
        assert!(properties.contains_key("error"));
        assert!(properties.contains_key("code"));
        assert!(properties.contains_key("success"));
    } else {
        panic!("ErrorResponse should be an object schema");
    }
}

#[test]
fn test_popular_route_prices_are_numbers() {
    let openapi = ApiDoc::openapi();
    let json = serde_json::to_value(&openapi).unwrap();
    let avg_price = &json["components"]["schemas"]["PopularRoute"]["properties"]["avg_price"];
    assert_eq!(avg_price["type"], "number");
}
