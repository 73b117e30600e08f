//! Custom Handlebars helpers available to every template

use handlebars::{
    Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext, RenderError, RenderErrorReason,
    Renderable, ScopedJson,
};
use serde_json::Value;
use tracing::debug;

/// Block helper selecting its body when the value is neither null nor missing
///
/// `0`, `false` and `""` all count as existing.
pub struct IfExistsHelper;

impl HelperDef for IfExistsHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let param = h
            .param(0)
            .ok_or(RenderErrorReason::ParamNotFoundForIndex("ifExists", 0))?;

        let exists = !param.is_value_missing() && !param.value().is_null();
        let branch = if exists { h.template() } else { h.inverse() };

        match branch {
            Some(template) => template.render(r, ctx, rc, out),
            None => Ok(()),
        }
    }
}

/// `lowercase` / `uppercase`: falsy values render empty, other non-strings are an error
pub struct CaseHelper {
    name: &'static str,
    convert: fn(&str) -> String,
}

impl CaseHelper {
    pub const LOWER: Self = Self {
        name: "lowercase",
        convert: str::to_lowercase,
    };
    pub const UPPER: Self = Self {
        name: "uppercase",
        convert: str::to_uppercase,
    };
}

impl HelperDef for CaseHelper {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'rc>, RenderError> {
        let param = h
            .param(0)
            .ok_or(RenderErrorReason::ParamNotFoundForIndex(self.name, 0))?;

        let converted = match param.value() {
            value if !is_truthy(value) => String::new(),
            Value::String(s) => (self.convert)(s),
            _ => return Err(RenderErrorReason::InvalidParamType("string").into()),
        };
        Ok(ScopedJson::Derived(Value::String(converted)))
    }
}

/// `eq`: type-sensitive equality where a missing value never equals a present one
pub struct EqHelper;

impl HelperDef for EqHelper {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'rc>, RenderError> {
        let a = h.param(0).ok_or(RenderErrorReason::ParamNotFoundForIndex("eq", 0))?;
        let b = h.param(1).ok_or(RenderErrorReason::ParamNotFoundForIndex("eq", 1))?;

        let equal = match (a.is_value_missing(), b.is_value_missing()) {
            (true, true) => true,
            (false, false) => strict_eq(a.value(), b.value()),
            _ => false,
        };
        Ok(ScopedJson::Derived(Value::Bool(equal)))
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Numbers compare by value so `1` equals `1.0`
fn strict_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}

/// Register all custom helpers on a registry
///
/// Re-registering replaces the previous definitions, so calling this twice is harmless.
pub fn register(hbs: &mut Handlebars<'_>) {
    hbs.register_helper("ifExists", Box::new(IfExistsHelper));
    hbs.register_helper("lowercase", Box::new(CaseHelper::LOWER));
    hbs.register_helper("uppercase", Box::new(CaseHelper::UPPER));
    hbs.register_helper("eq", Box::new(EqHelper));
    debug!("register: custom handlebars helpers registered");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(template: &str, data: &Value) -> String {
        let mut hbs = Handlebars::new();
        register(&mut hbs);
        hbs.render_template(template, data).unwrap()
    }

    fn render_err(template: &str, data: &Value) -> String {
        let mut hbs = Handlebars::new();
        register(&mut hbs);
        hbs.render_template(template, data).unwrap_err().to_string()
    }

    #[test]
    fn test_lowercase() {
        assert_eq!(render("{{lowercase name}}", &json!({"name": "TEST"})), "test");
    }

    #[test]
    fn test_uppercase() {
        assert_eq!(render("{{uppercase name}}", &json!({"name": "test"})), "TEST");
    }

    #[test]
    fn test_case_helpers_on_falsy_values() {
        let data = json!({"empty": "", "nothing": null, "zero": 0});
        assert_eq!(render("[{{lowercase empty}}]", &data), "[]");
        assert_eq!(render("[{{uppercase nothing}}]", &data), "[]");
        assert_eq!(render("[{{uppercase missing}}]", &data), "[]");
        assert_eq!(render("[{{lowercase zero}}]", &data), "[]");
    }

    #[test]
    fn test_case_helpers_reject_non_strings() {
        let data = json!({"flag": true, "n": 42, "list": ["A", "B"], "obj": {"k": "V"}});
        assert!(render_err("{{uppercase flag}}", &data).contains("string"));
        assert!(render_err("{{lowercase n}}", &data).contains("string"));
        assert!(render_err("{{lowercase list}}", &data).contains("string"));
        assert!(render_err("{{uppercase obj}}", &data).contains("string"));
    }

    #[test]
    fn test_if_exists_then_branch() {
        let template = "{{#ifExists value}}yes{{else}}no{{/ifExists}}";
        assert_eq!(render(template, &json!({"value": "x"})), "yes");
        assert_eq!(render(template, &json!({"value": 0})), "yes");
        assert_eq!(render(template, &json!({"value": ""})), "yes");
        assert_eq!(render(template, &json!({"value": false})), "yes");
    }

    #[test]
    fn test_if_exists_else_branch() {
        let template = "{{#ifExists value}}yes{{else}}no{{/ifExists}}";
        assert_eq!(render(template, &json!({"value": null})), "no");
        assert_eq!(render(template, &json!({})), "no");
    }

    #[test]
    fn test_if_exists_without_else() {
        let template = "{{#ifExists value}}value = \"{{value}}\"{{/ifExists}}";
        assert_eq!(render(template, &json!({})), "");
        assert_eq!(render(template, &json!({"value": "v"})), "value = \"v\"");
    }

    #[test]
    fn test_eq() {
        let data = json!({"a": "x", "b": "x", "c": "y", "one": 1, "one_f": 1.0, "s": "1"});
        assert_eq!(render("{{eq a b}}", &data), "true");
        assert_eq!(render("{{eq a c}}", &data), "false");
        assert_eq!(render("{{eq one one_f}}", &data), "true");
        assert_eq!(render("{{eq one s}}", &data), "false");
    }

    #[test]
    fn test_eq_distinguishes_null_from_missing() {
        let data = json!({"nothing": null, "also": null});
        assert_eq!(render("{{eq nothing missing}}", &data), "false");
        assert_eq!(render("{{eq missing nothing}}", &data), "false");
        assert_eq!(render("{{eq nothing also}}", &data), "true");
        assert_eq!(render("{{eq missing gone}}", &data), "true");
        assert_eq!(render("{{eq nothing null}}", &data), "true");
    }

    #[test]
    fn test_eq_as_subexpression() {
        let template = "{{#if (eq env \"prod\")}}large{{else}}small{{/if}}";
        assert_eq!(render(template, &json!({"env": "prod"})), "large");
        assert_eq!(render(template, &json!({"env": "dev"})), "small");
    }

    #[test]
    fn test_register_twice() {
        let mut hbs = Handlebars::new();
        register(&mut hbs);
        register(&mut hbs);
        let out = hbs.render_template("{{uppercase x}}", &json!({"x": "a"})).unwrap();
        assert_eq!(out, "A");
    }
}
