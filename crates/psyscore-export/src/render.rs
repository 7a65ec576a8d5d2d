use std::collections::HashMap;

use tera::{Context, Tera, Value};

use crate::error::ExportError;
use crate::payload::ResultPayload;

/// Placeholder printed for blank values.
pub const DASH: &str = "-";

/// Render a result template with a payload.
///
/// Every payload key becomes a top-level template variable. Templates may
/// use the `dash` filter to print `-` for blank text.
pub fn render_template(
    template_name: &str,
    template_content: &str,
    payload: &ResultPayload,
) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.register_filter("dash", dash);
    tera.add_raw_template(template_name, template_content)
        .map_err(|e| ExportError::TemplateParse(format!("{template_name}: {e}")))?;

    let context = Context::from_value(serde_json::to_value(payload)?)
        .map_err(|e| ExportError::TemplateRender(e.to_string()))?;

    let rendered = tera.render(template_name, &context)?;
    tracing::debug!(template = template_name, bytes = rendered.len(), "rendered template");
    Ok(rendered)
}

fn dash(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(match value {
        Value::Null => Value::String(DASH.to_string()),
        Value::String(s) if s.trim().is_empty() => Value::String(DASH.to_string()),
        other => other.clone(),
    })
}
