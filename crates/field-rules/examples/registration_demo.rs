//! Registration Form Demo
//!
//! Validates two sign-up payloads against a declared schema and prints the
//! structured results. Run with `RUST_LOG=field_rules=debug` to see each
//! rule as it runs.

use field_rules::{
    ConditionalValidator, MessageListProcessor, RuleRegistry, Schema, Validator, ValidatorError,
    DEFAULT_NAMESPACE,
};
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let registry = RuleRegistry::with_defaults().with_rule(
        DEFAULT_NAMESPACE,
        "strongPassword",
        ConditionalValidator::new(
            |value| value.as_str().is_some_and(|s| s.len() >= 8),
            |value| value.as_str().is_some_and(|s| s.chars().any(|c| c.is_ascii_digit())),
        )
        .named("strongPassword")
        .message("Passwords of 8+ characters must contain a digit"),
    );

    let schema = Schema::new()
        .field("username", |f| {
            f.rule("required")
                .rule_with("length", json!({ "minLength": 3, "maxLength": 20 }))
                .message("required", "Please choose a username")
        })
        .field_rules("email", &["required", "email"])
        .field("password", |f| {
            f.rule("required")
                .rule_with("length", json!({ "minLength": 8, "maxLength": 64 }))
                .rule("strongPassword")
        })
        .field("age", |f| {
            f.rule("integer")
                .rule_with("range", json!({ "min": 18, "max": 120 }))
        })
        .field("birthday", |f| {
            f.rule_with("dateRange", json!({ "minDate": "1900-01-01", "maxDate": "2008-12-31" }))
        })
        .field("website", |f| f.rule_with("url", json!({ "schemes": ["http", "https"] })));

    let validator = Validator::new(registry);

    println!("Field Rules Registration Demo");
    println!("=============================");

    let valid = json!({
        "username": "ada_l",
        "email": "ada@example.com",
        "password": "analytical1",
        "age": "36",
        "birthday": "1988-12-10",
        "website": "https://example.com",
    });
    let result = validator.validate_value(&valid, &schema)?;
    println!("\n{}", result);
    println!("{}", serde_json::to_string_pretty(&result)?);

    let invalid = json!({
        "username": "",
        "email": "ada-at-example",
        "password": "analytical",
        "age": "17",
        "birthday": "2012-01-01",
        "website": "ftp://example.com",
    });
    let result = validator.validate_value(&invalid, &schema)?;
    println!("\n{}", result);

    let messages = validator
        .clone()
        .with_processor(MessageListProcessor)
        .validate_value(&invalid, &schema)?;
    println!("\nMessages only:");
    for (field, field_messages) in &messages {
        println!("  {}: {}", field, field_messages.join("; "));
    }

    // Broken declarations are errors, not validation failures
    let broken = Schema::new().field("age", |f| f.rule_with("range", json!({ "min": 10, "max": 1 })));
    match validator.validate_value(&json!({ "age": 5 }), &broken) {
        Err(e @ ValidatorError::Config { .. }) => println!("\nSetup error: {}", e),
        other => println!("\nUnexpected outcome: {:?}", other.map(|r| r.is_valid())),
    }

    Ok(())
}
