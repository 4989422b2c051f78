//! Request dispatch and tool implementations

use canivete_units::{self as units, UnitCategory, UnitsError};
use serde_json::{json, Value as JsonValue};
use crate::config::ServerConfig;
use crate::protocol::{McpError, McpRequest, McpResponse, METHOD_NOT_FOUND};

pub const PROTOCOL_VERSION: &str = "2025-11-25";
pub const SERVER_NAME: &str = "canivete";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn handle_request(config: &ServerConfig, request: &McpRequest) -> McpResponse {
    let result = match request.method.as_str() {
        // Lifecycle
        "initialize" => handle_initialize(&request.params),
        "initialized" | "notifications/initialized" => Ok(json!({})),
        "ping" => Ok(json!({})),

        // Tools
        "tools/list" => handle_tools_list(),
        "tools/call" => handle_tool_call(config, &request.params),

        _ => Err(McpError::new(METHOD_NOT_FOUND, format!("Method not found: {}", request.method))),
    };

    match result {
        Ok(r) => McpResponse::success(request.id.clone(), r),
        Err(e) => {
            tracing::debug!(method = %request.method, code = e.code, message = %e.message, "request failed");
            McpResponse::failure(request.id.clone(), e)
        }
    }
}

fn handle_initialize(params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let client_info = params.as_ref()
        .and_then(|p| p.get("clientInfo"))
        .and_then(|c| c.get("name"))
        .and_then(|n| n.as_str())
        .unwrap_or("unknown");

    // Echo the client's protocol version for compatibility
    let client_protocol = params.as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(|v| v.as_str())
        .unwrap_or(PROTOCOL_VERSION);

    tracing::info!(client = client_info, protocol = client_protocol, "client connected");

    Ok(json!({
        "protocolVersion": client_protocol,
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION,
            "description": "Canivete unit converter"
        },
        "capabilities": {
            "tools": {
                "listChanged": false
            }
        },
        "instructions": "Convert values between units of the same category (length, weight, volume, area, time, speed, data, temperature). Use 'list_units' to see the units of a category before calling 'convert'."
    }))
}

fn handle_tools_list() -> Result<JsonValue, McpError> {
    let categories: Vec<&str> = units::list_categories().iter().map(|c| c.name()).collect();

    Ok(json!({
        "tools": [
            {
                "name": "convert",
                "description": "Convert a value from one unit to another within a category. Returns the full-precision result plus a rounded display string.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "category": {
                            "type": "string",
                            "description": "Unit category",
                            "enum": categories
                        },
                        "value": {
                            "type": ["number", "string"],
                            "description": "Value to convert"
                        },
                        "from_unit": {
                            "type": "string",
                            "description": "Source unit name or alias (e.g., \"meters\", \"km\")"
                        },
                        "to_unit": {
                            "type": "string",
                            "description": "Target unit name or alias"
                        }
                    },
                    "required": ["category", "value", "from_unit", "to_unit"]
                }
            },
            {
                "name": "list_units",
                "description": "List the units of a category, base unit first, with labels and aliases.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "category": {
                            "type": "string",
                            "description": "Unit category",
                            "enum": categories
                        }
                    },
                    "required": ["category"]
                }
            },
            {
                "name": "list_categories",
                "description": "List all unit categories.",
                "inputSchema": {
                    "type": "object",
                    "properties": {}
                }
            }
        ]
    }))
}

fn handle_tool_call(config: &ServerConfig, params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let params = params.as_ref().ok_or_else(|| McpError::invalid_params("Missing params"))?;

    let name = params.get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError::invalid_params("Missing tool name"))?;

    let args = params.get("arguments").cloned().unwrap_or(json!({}));

    tracing::debug!(tool = name, "tool call");

    match name {
        "convert" => tool_convert(config, &args),
        "list_units" => tool_list_units(&args),
        "list_categories" => tool_list_categories(),
        _ => Err(McpError::invalid_params(format!("Unknown tool: {}", name))),
    }
}

fn tool_convert(config: &ServerConfig, args: &JsonValue) -> Result<JsonValue, McpError> {
    let category = required_str(args, "category")?;
    let from_unit = required_str(args, "from_unit")?;
    let to_unit = required_str(args, "to_unit")?;
    let value = parse_value(args)?;

    // Report canonical names rather than echoing the caller's spelling
    let resolved = category.parse::<UnitCategory>().and_then(|category| {
        let from = category.unit_name(from_unit)?;
        let to = category.unit_name(to_unit)?;
        let result = category.convert(value, from, to)?;
        Ok((category, from, to, result))
    });
    let (category, from_unit, to_unit, result) = match resolved {
        Ok(found) => found,
        Err(e) => return Ok(tool_error(&e)),
    };

    let text = format!(
        "{} {} = {} {}",
        format_value(value, config.display_decimals),
        from_unit,
        format_value(result, config.display_decimals),
        to_unit
    );

    Ok(json!({
        "content": [{ "type": "text", "text": text }],
        "category": category.name(),
        "from_unit": from_unit,
        "to_unit": to_unit,
        "input": value,
        "value": result,
        "isError": false
    }))
}

fn tool_list_units(args: &JsonValue) -> Result<JsonValue, McpError> {
    let category = required_str(args, "category")?;

    let resolved = category.parse::<UnitCategory>().and_then(|category| {
        let info = units::describe_units(category.name())?;
        let base = units::base_unit(category.name())?;
        Ok((category, info, base))
    });
    let (category, info, base) = match resolved {
        Ok(found) => found,
        Err(e) => return Ok(tool_error(&e)),
    };

    let names: Vec<&str> = info.iter().map(|u| u.name).collect();
    let text = format!("{} units (base: {}): {}", category, base, names.join(", "));

    Ok(json!({
        "content": [{ "type": "text", "text": text }],
        "category": category.name(),
        "base_unit": base,
        "units": info,
        "isError": false
    }))
}

fn tool_list_categories() -> Result<JsonValue, McpError> {
    let categories: &[UnitCategory] = units::list_categories();
    let names: Vec<&str> = categories.iter().map(|c| c.name()).collect();

    Ok(json!({
        "content": [{ "type": "text", "text": names.join(", ") }],
        "categories": categories,
        "isError": false
    }))
}

/// Engine errors are tool results, not protocol failures
fn tool_error(e: &UnitsError) -> JsonValue {
    let mut result = json!({
        "content": [{ "type": "text", "text": format!("Error: {}", e) }],
        "error": { "code": e.code(), "message": e.to_string() },
        "isError": true
    });

    let available = match e {
        UnitsError::UnknownCategory(_) => {
            Some(json!(units::list_categories().iter().map(|c| c.name()).collect::<Vec<_>>()))
        }
        UnitsError::UnknownUnit { category, .. } => category.table().ok().map(|t| json!(t.names())),
    };
    if let Some(available) = available {
        result["error"]["available"] = available;
    }

    result
}

fn required_str<'a>(args: &'a JsonValue, key: &str) -> Result<&'a str, McpError> {
    match args.get(key) {
        Some(JsonValue::String(s)) => Ok(s.as_str()),
        Some(other) => Err(McpError::invalid_params(format!("{} must be a string, got {}", key, other))),
        None => Err(McpError::invalid_params(format!("Missing {} argument", key))),
    }
}

/// Accepts a JSON number or a numeric string
fn parse_value(args: &JsonValue) -> Result<f64, McpError> {
    match args.get("value") {
        Some(JsonValue::Number(n)) => n.as_f64()
            .ok_or_else(|| McpError::invalid_params(format!("Value out of range: {}", n))),
        Some(JsonValue::String(s)) => s.trim().parse::<f64>().map_err(|_| {
            McpError::invalid_params(format!("Invalid number: {}", s))
                .with_data(json!({ "value": s }))
        }),
        Some(other) => Err(McpError::invalid_params(format!("Value must be a number, got {}", other))),
        None => Err(McpError::invalid_params("Missing value argument")),
    }
}

/// Round for display and drop trailing zeros
pub fn format_value(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let mut text = format!("{:.*}", decimals, value);
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if text == "-0" {
        text = "0".to_string();
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(method: &str, params: JsonValue) -> McpRequest {
        McpRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(1)),
            method: method.to_string(),
            params: Some(params),
        }
    }

    fn call(tool: &str, arguments: JsonValue) -> JsonValue {
        let response = handle_request(
            &ServerConfig::default(),
            &request("tools/call", json!({ "name": tool, "arguments": arguments })),
        );
        assert!(response.error.is_none(), "unexpected error: {:?}", response.error);
        response.result.unwrap()
    }

    fn call_error(tool: &str, arguments: JsonValue) -> McpError {
        let response = handle_request(
            &ServerConfig::default(),
            &request("tools/call", json!({ "name": tool, "arguments": arguments })),
        );
        response.error.unwrap()
    }

    #[test]
    fn test_initialize_echoes_protocol() {
        let response = handle_request(
            &ServerConfig::default(),
            &request("initialize", json!({ "protocolVersion": "2024-11-05", "clientInfo": { "name": "test" } })),
        );
        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert_eq!(result["serverInfo"]["name"], SERVER_NAME);
    }

    #[test]
    fn test_tools_list() {
        let response = handle_request(&ServerConfig::default(), &request("tools/list", json!({})));
        let tools = response.result.unwrap()["tools"].clone();
        let names: Vec<&str> = tools.as_array().unwrap().iter().map(|t| t["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["convert", "list_units", "list_categories"]);
        assert_eq!(tools[0]["inputSchema"]["properties"]["category"]["enum"][0], "length");
    }

    #[test]
    fn test_unknown_method() {
        let response = handle_request(&ServerConfig::default(), &request("resources/list", json!({})));
        assert_eq!(response.error.unwrap().code, METHOD_NOT_FOUND);
    }

    #[test]
    fn test_convert_tool() {
        let result = call("convert", json!({
            "category": "length", "value": 1, "from_unit": "meters", "to_unit": "centimeters"
        }));
        assert_eq!(result["value"], 100.0);
        assert_eq!(result["isError"], false);
        assert_eq!(result["content"][0]["text"], "1 meters = 100 centimeters");
    }

    #[test]
    fn test_convert_temperature_string_value() {
        let result = call("convert", json!({
            "category": "temperature", "value": "212", "from_unit": "fahrenheit", "to_unit": "celsius"
        }));
        assert_eq!(result["value"], 100.0);
    }

    #[test]
    fn test_convert_display_rounding() {
        let config = ServerConfig { display_decimals: 2 };
        let response = handle_request(&config, &request("tools/call", json!({
            "name": "convert",
            "arguments": { "category": "length", "value": 1, "from_unit": "miles", "to_unit": "km" }
        })));
        let result = response.result.unwrap();
        assert_eq!(result["content"][0]["text"], "1 miles = 1.61 kilometers");
        // Full precision stays in the numeric field
        let value = result["value"].as_f64().unwrap();
        assert!((value - 1.609344).abs() < 1e-9);
    }

    #[test]
    fn test_convert_unknown_unit_is_tool_error() {
        let result = call("convert", json!({
            "category": "weight", "value": 1, "from_unit": "kilograms", "to_unit": "bushels"
        }));
        assert_eq!(result["isError"], true);
        assert_eq!(result["error"]["code"], units::codes::UNKNOWN_UNIT);
        assert_eq!(result["error"]["available"][0], "kilograms");
    }

    #[test]
    fn test_convert_unknown_category_is_tool_error() {
        let result = call("convert", json!({
            "category": "color", "value": 1, "from_unit": "red", "to_unit": "blue"
        }));
        assert_eq!(result["isError"], true);
        assert_eq!(result["error"]["code"], units::codes::UNKNOWN_CATEGORY);
    }

    #[test]
    fn test_convert_rejects_non_numeric_value() {
        let error = call_error("convert", json!({
            "category": "length", "value": "abc", "from_unit": "meters", "to_unit": "feet"
        }));
        assert_eq!(error.code, crate::protocol::INVALID_PARAMS);

        let error = call_error("convert", json!({
            "category": "length", "from_unit": "meters", "to_unit": "feet"
        }));
        assert_eq!(error.message, "Missing value argument");
    }

    #[test]
    fn test_convert_nan_has_null_value() {
        let result = call("convert", json!({
            "category": "length", "value": "NaN", "from_unit": "meters", "to_unit": "feet"
        }));
        assert_eq!(result["value"], JsonValue::Null);
        assert_eq!(result["content"][0]["text"], "NaN meters = NaN feet");
    }

    #[test]
    fn test_convert_reports_canonical_names() {
        let result = call("convert", json!({
            "category": "mass", "value": 2, "from_unit": " KG ", "to_unit": "g"
        }));
        assert_eq!(result["category"], "weight");
        assert_eq!(result["from_unit"], "kilograms");
        assert_eq!(result["to_unit"], "grams");
        assert_eq!(result["value"], 2000.0);
        assert_eq!(result["content"][0]["text"], "2 kilograms = 2000 grams");
    }

    #[test]
    fn test_non_string_argument_message() {
        let error = call_error("convert", json!({
            "category": "length", "value": 1, "from_unit": 5, "to_unit": "feet"
        }));
        assert_eq!(error.code, crate::protocol::INVALID_PARAMS);
        assert_eq!(error.message, "from_unit must be a string, got 5");

        let error = call_error("list_units", json!({}));
        assert_eq!(error.message, "Missing category argument");
    }

    #[test]
    fn test_list_units_tool() {
        let result = call("list_units", json!({ "category": " Temp " }));
        assert_eq!(result["base_unit"], "celsius");
        assert_eq!(result["category"], "temperature");
        assert_eq!(result["units"][1]["name"], "fahrenheit");
        assert_eq!(result["units"][0]["base"], true);
    }

    #[test]
    fn test_list_categories_tool() {
        let result = call("list_categories", json!({}));
        assert_eq!(result["categories"][0], "length");
        assert_eq!(result["categories"][7], "temperature");
    }

    #[test]
    fn test_unknown_tool() {
        let error = call_error("eval", json!({}));
        assert_eq!(error.message, "Unknown tool: eval");
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(100.0, 6), "100");
        assert_eq!(format_value(273.15, 6), "273.15");
        assert_eq!(format_value(1.609344, 2), "1.61");
        assert_eq!(format_value(-0.0000001, 3), "0");
        assert_eq!(format_value(1500.0, 0), "1500");
        assert_eq!(format_value(f64::INFINITY, 2), "inf");
    }
}
