//! Behaviour of placeholder resolution as seen by mail composition

use parish_notify::template::{
    placeholders, render_body, resolve, resolve_with_report, ContextValue, NotificationContext,
};
use proptest::prelude::*;
use serde_json::json;

fn context_from_json(value: serde_json::Value) -> NotificationContext {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_template_without_tokens_is_returned_verbatim() {
    let context = context_from_json(json!({"entry": {"id": 1}}));
    let template = "<p>Thank you!</p>\n\nThe parish office";
    assert_eq!(resolve(template, &context), template);
}

#[test]
fn test_entry_id_from_json_context() {
    let context = context_from_json(json!({"entry": {"id": 1042}}));
    assert_eq!(resolve("{{entry.id}}", &context), "1042");
}

#[test]
fn test_missing_key_and_unknown_namespace_are_empty() {
    let context = context_from_json(json!({"entry": {}}));
    assert_eq!(resolve("X{{entry.missing}}Y", &context), "XY");
    assert_eq!(resolve("{{bogus.key}}", &NotificationContext::new()), "");
}

#[test]
fn test_sunday_service_greeting() {
    let context = context_from_json(json!({
        "entry": {"first_name": "Jane"},
        "payload": {"eventName": "Sunday Service"}
    }));
    assert_eq!(
        resolve("Hello {{entry.first_name}} - {{payload.eventName}}", &context),
        "Hello Jane - Sunday Service"
    );
}

#[test]
fn test_scalar_coercion_from_json() {
    let context = context_from_json(json!({
        "payload": {
            "attendees": 45,
            "budget": 99.5,
            "needsSound": false,
            "notes": null,
            "times": ["8:00", "10:30"]
        }
    }));

    assert_eq!(
        resolve(
            "{{payload.attendees}}|{{payload.budget}}|{{payload.needsSound}}|{{payload.notes}}|{{payload.times}}",
            &context
        ),
        r#"45|99.5|false||["8:00","10:30"]"#
    );
}

#[test]
fn test_trimmed_tokens_and_literal_malformed_tokens() {
    let context = NotificationContext::new().with_entry("id", 9);
    assert_eq!(resolve("{{ entry.id }}", &context), "9");
    assert_eq!(resolve("{{entry.id", &context), "{{entry.id");
    assert_eq!(resolve("{entry.id}", &context), "{entry.id}");
    assert_eq!(resolve("{{{entry.id}}}", &context), "{9}");
}

#[test]
fn test_report_and_placeholder_listing_agree() {
    let template = "{{entry.id}} {{form.title}} {{payload.none}} {{nope}}";
    let context = NotificationContext::new()
        .with_entry("id", 1)
        .with_form("title", ContextValue::Null);

    let resolution = resolve_with_report(template, &context);
    assert_eq!(resolution.output, "1   ");
    assert_eq!(resolution.unresolved, ["{{payload.none}}", "{{nope}}"]);
    assert_eq!(placeholders(template).len(), 4);
}

#[test]
fn test_plain_and_html_bodies() {
    let context = NotificationContext::new().with_payload("details", "Pipes & drains");

    assert_eq!(
        render_body("Details:\n{{payload.details}}", &context),
        "Details:<br>\nPipes &amp; drains"
    );
    assert_eq!(
        render_body("<ul>\n<li>{{payload.details}}</li>\n</ul>", &context),
        "<ul>\n<li>Pipes &amp; drains</li>\n</ul>"
    );
}

proptest! {
    #[test]
    fn prop_resolving_output_again_changes_nothing(
        name in "[A-Za-z ]{0,20}",
        event in "[A-Za-z0-9 ]{0,20}",
    ) {
        let context = NotificationContext::new()
            .with_entry("first_name", name.as_str())
            .with_payload("eventName", event.as_str());

        let once = resolve("Hello {{entry.first_name}} - {{payload.eventName}}{{bogus.x}}", &context);
        prop_assert_eq!(&once, &format!("Hello {name} - {event}"));
        prop_assert_eq!(resolve(&once, &context), once);
    }

    #[test]
    fn prop_unknown_namespaces_vanish(namespace in "[a-z]{1,10}", key in "[a-z]{1,10}") {
        prop_assume!(!["entry", "form", "payload"].contains(&namespace.as_str()));
        let template = format!("<{{{{{namespace}.{key}}}}}>");
        prop_assert_eq!(resolve(&template, &NotificationContext::new()), "<>");
    }

    #[test]
    fn prop_plain_body_never_contains_raw_angle_brackets(text in "[a-z<>&\n ]{0,40}") {
        let context = NotificationContext::new().with_payload("text", text.as_str());
        let body = render_body("Note: {{payload.text}}", &context);
        prop_assert!(!body.replace("<br>", "").contains('<'));
        prop_assert!(!body.contains('>') || body.contains("<br>"));
    }
}
