use binding_guard::unchecked;
use binding_guard::{
    AnyTrusted, BindingValue, Const, Error, SafeHtml, SafeStyle, SafeType, SafeTypesBridge,
    SafeUrl, SafetyClass, TrustedResourceUrl, TypedString, TypedStringBridge,
};

/// A typed string produced outside this crate that claims to be markup.
struct ForeignHtml(&'static str);

impl TypedString for ForeignHtml {
    fn typed_string_value(&self) -> String {
        self.0.to_string()
    }
}

fn justification() -> Const {
    Const::from_static("test fixture written by hand")
}

#[test]
fn factories_round_trip_their_content() {
    let html = unchecked::safe_html_from_string_known_to_satisfy_type_contract(
        &justification(),
        "<b>bold</b>",
    )
    .unwrap();
    let value = BindingValue::from(html);
    assert_eq!(value.unwrap_trusted(SafetyClass::Html), Ok("<b>bold</b>"));

    let url = SafeUrl::sanitize("https://example.com/a?b#c");
    assert_eq!(url.as_str(), "https://example.com/a?b#c");

    let constant = Const::from_static("literal");
    assert_eq!(
        BindingValue::from(constant).unwrap_trusted(SafetyClass::Constant),
        Ok("literal")
    );
}

#[test]
fn look_alikes_are_not_branded() {
    let foreign = BindingValue::typed_string(ForeignHtml("<b>bold</b>"));
    assert_eq!(
        foreign.unwrap_trusted(SafetyClass::Html),
        Err(Error::UnbrandedAccess {
            expected: SafetyClass::Html,
            found: "typed string",
        })
    );

    let plain = BindingValue::from("<b>bold</b>");
    assert!(plain.unwrap_trusted(SafetyClass::Html).is_err());
}

#[test]
fn classes_do_not_cross() {
    let style: SafeStyle =
        unchecked::safe_style_from_string_known_to_satisfy_type_contract(&justification(), "x")
            .unwrap();
    let value = BindingValue::from(style);
    let error = value.unwrap_trusted(SafetyClass::Url).unwrap_err();
    assert_eq!(
        error.to_string(),
        "Unbranded access: expected SafeUrl, found SafeStyle"
    );
}

#[test]
fn trusted_values_render_with_their_type() {
    let html = SafeHtml::html_escape("<i>");
    assert_eq!(format!("{:?}", html), "SafeHtml{ &lt;i&gt; }");
    assert_eq!(
        BindingValue::from(html).coerce_to_string(),
        "SafeHtml{ &lt;i&gt; }"
    );
}

#[test]
fn resource_urls_are_navigable() {
    let resource: TrustedResourceUrl =
        unchecked::trusted_resource_url_from_string_known_to_satisfy_type_contract(
            &justification(),
            "https://cdn.example.com/app.js",
        )
        .unwrap();
    let url = SafeUrl::from_trusted_resource_url(&resource);
    assert_eq!(url.as_str(), "https://cdn.example.com/app.js");
    assert!(!url.is_innocuous());
}

#[test]
fn typed_string_bridge_unwraps_matching_classes_only() {
    let bridge = TypedStringBridge;
    let style = BindingValue::from(AnyTrusted::from(
        unchecked::safe_style_from_string_known_to_satisfy_type_contract(
            &justification(),
            "color: red",
        )
        .unwrap(),
    ));

    assert_eq!(bridge.bridge(&style, SafeType::Style), Some("color: red".to_string()));
    assert_eq!(bridge.bridge(&style, SafeType::Javascript), None);
    assert_eq!(bridge.bridge(&style, SafeType::String), Some("color: red".to_string()));
}

#[test]
fn typed_string_bridge_applies_class_filters() {
    let bridge = TypedStringBridge;
    let foreign = BindingValue::typed_string(ForeignHtml("<i>"));

    assert_eq!(bridge.bridge(&foreign, SafeType::Html), Some("&lt;i&gt;".to_string()));
    assert_eq!(bridge.bridge(&foreign, SafeType::String), Some("<i>".to_string()));
    assert_eq!(bridge.bridge(&foreign, SafeType::Style), None);

    let unsafe_url = BindingValue::from("javascript:alert(1)");
    assert_eq!(bridge.bridge(&unsafe_url, SafeType::Url), None);
    let safe_url = BindingValue::from("mailto:someone@example.com");
    assert_eq!(
        bridge.bridge(&safe_url, SafeType::Url),
        Some("mailto:someone@example.com".to_string())
    );
}

#[test]
fn blessing_requires_a_justification() {
    let error = unchecked::safe_html_from_string_known_to_satisfy_type_contract(
        &Const::from_static("   "),
        "<b>",
    )
    .unwrap_err();
    assert_eq!(
        error,
        Error::MissingJustification {
            class: SafetyClass::Html
        }
    );
    assert!(error.to_string().contains("justification"));
}

#[test]
fn binding_values_coerce_like_the_host() {
    assert_eq!(BindingValue::Number(3.0).coerce_to_string(), "3");
    assert_eq!(BindingValue::Number(0.5).coerce_to_string(), "0.5");
    assert_eq!(BindingValue::Number(f64::NAN).coerce_to_string(), "NaN");
    assert_eq!(BindingValue::Bool(true).coerce_to_string(), "true");
    assert_eq!(BindingValue::Null.coerce_to_string(), "null");
    assert!(!BindingValue::AllCollection.is_falsy());
    assert!(BindingValue::Number(f64::NAN).is_falsy());
}
