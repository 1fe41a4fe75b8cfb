use serde_json::{json, Value};
use std::sync::LazyLock;

pub static CONFIG_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "llm": {
                "type": "object",
                "properties": {
                    "provider": { "type": "string", "enum": ["llamacpp", "ollama"] },
                    "model": { "type": "string" },
                    "base_url": { "type": "string" }
                }
            },
            "sampling": {
                "type": "object",
                "properties": {
                    "max_tokens": { "type": "integer", "minimum": 1 },
                    "stop": { "type": "array", "items": { "type": "string" } },
                    "temperature": { "type": "number", "minimum": 0 },
                    "repeat_penalty": { "type": "number", "minimum": 0 }
                }
            },
            "classification": {
                "type": "object",
                "properties": {
                    "critical_tests": { "type": "array", "items": { "type": "string" } },
                    "accuracy_threshold": { "type": "number", "minimum": 0, "maximum": 100 }
                }
            },
            "prompt": {
                "type": "object",
                "properties": {
                    "max_failures": { "type": "integer", "minimum": 1, "maximum": 20 },
                    "templates_dir": { "type": "string" },
                    "verdicts": { "type": "array", "items": { "$ref": "#/$defs/verdict" } },
                    "impact_rules": { "type": "array", "items": { "$ref": "#/$defs/impact_rule" } }
                }
            }
        },
        "$defs": {
            "category": { "type": "string", "enum": ["STABLE", "UNSTABLE", "CRITICAL"] },
            "verdict": {
                "type": "object",
                "required": ["category", "verdict_label", "action"],
                "properties": {
                    "category": { "$ref": "#/$defs/category" },
                    "verdict_label": { "type": "string" },
                    "action": { "type": "string" }
                }
            },
            "impact_rule": {
                "type": "object",
                "required": ["substrings", "explanation"],
                "properties": {
                    "substrings": { "type": "array", "items": { "type": "string" }, "minItems": 1 },
                    "explanation": { "type": "string" },
                    "categories": { "type": "array", "items": { "$ref": "#/$defs/category" } }
                }
            }
        }
    })
});
