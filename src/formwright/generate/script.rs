use crate::error::Result;
use crate::generate::html::{FORM_ID, RECAPTCHA_ERROR_ID, SMS_CONSENT_ID};
use crate::generate::templates;
use crate::generate::Field;
use crate::model::ElementType;
use crate::settings::ConfirmationSettings;
use crate::validation::RuleSet;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScriptField<'a> {
    name: &'a str,
    id: &'a str,
    error_id: String,
    control: &'static str,
    #[serde(flatten)]
    rules: &'a RuleSet,
}

#[derive(Serialize)]
struct ScriptContext {
    fields: String,
    require_sms: bool,
    form_id: &'static str,
    recaptcha_error_id: &'static str,
    sms_id: &'static str,
}

fn control_kind(kind: ElementType) -> &'static str {
    match kind {
        ElementType::Checkbox => "checkbox",
        ElementType::Radio => "radio",
        ElementType::Select => "select",
        ElementType::Textarea => "textarea",
        ElementType::File => "file",
        _ => "input",
    }
}

/// Field table as a JSON literal safe to embed in a `<script>` block.
fn fields_literal(fields: &[&Field<'_>]) -> Result<String> {
    let table: Vec<ScriptField<'_>> = fields
        .iter()
        .map(|f| ScriptField {
            name: &f.name,
            id: &f.id,
            error_id: f.error_id(),
            control: control_kind(f.element.kind),
            rules: &f.rules,
        })
        .collect();
    let json = serde_json::to_string_pretty(&table)?;
    Ok(indent_continuation(&json.replace("</", "<\\/"), "  "))
}

fn indent_continuation(text: &str, prefix: &str) -> String {
    text.lines()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                line.to_string()
            } else {
                format!("{}{}", prefix, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_script(fields: &[&Field<'_>], settings: &ConfirmationSettings) -> Result<String> {
    let context = ScriptContext {
        fields: fields_literal(fields)?,
        require_sms: settings.enable_sms,
        form_id: FORM_ID,
        recaptcha_error_id: RECAPTCHA_ERROR_ID,
        sms_id: SMS_CONSENT_ID,
    };
    templates::render("validator.js", &context)
}
