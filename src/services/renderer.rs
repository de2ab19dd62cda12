use crate::domain::errors::EnrichError;
use crate::domain::models::VerdictRecord;
use minijinja::{context, AutoEscape, Environment, UndefinedBehavior, Value};
use std::path::Path;

/// Renders verdict records through one named template.
///
/// The template is compiled once when the renderer is built; a missing or
/// malformed template is the only failure mode. Fields missing from a record are
/// passed as undefined, and lookups through undefined values are allowed, so
/// incomplete records render with empty placeholders. Output is never escaped,
/// whatever the template's file extension.
pub struct ReportRenderer {
    env: Environment<'static>,
    name: String,
}

impl ReportRenderer {
    pub fn from_dir(dir: &Path, name: &str) -> Result<Self, EnrichError> {
        let path = dir.join(name);
        let source = std::fs::read_to_string(&path).map_err(|e| EnrichError::Template {
            name: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_source(name, source)
    }

    pub fn from_source(name: &str, source: String) -> Result<Self, EnrichError> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Chainable);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.add_template_owned(name.to_string(), source)
            .map_err(|e| EnrichError::Template {
                name: name.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            env,
            name: name.to_string(),
        })
    }

    pub fn render(&self, record: &VerdictRecord) -> Result<String, EnrichError> {
        let template = self
            .env
            .get_template(&self.name)
            .map_err(|e| EnrichError::Template {
                name: self.name.clone(),
                reason: e.to_string(),
            })?;
        template
            .render(context! {
                meaningful_name => field(record.meaningful_name()),
                label => field(record.label()),
                reputation => field(record.reputation()),
                sandbox_verdicts => field(record.sandbox_verdicts()),
                total_votes => field(record.total_votes()),
            })
            .map_err(|e| EnrichError::Unexpected(format!("rendering {}: {e}", record.id)))
    }
}

fn field(v: Option<&serde_json::Value>) -> Value {
    v.map(Value::from_serialize).unwrap_or(Value::UNDEFINED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};
    use tempfile::TempDir;

    const REPORT_TEMPLATE: &str = include_str!("../../templates/hash_report_template.md");

    fn renderer() -> ReportRenderer {
        ReportRenderer::from_source("hash_report_template.md", REPORT_TEMPLATE.to_string())
            .expect("bundled template compiles")
    }

    fn record(attributes: serde_json::Value) -> VerdictRecord {
        VerdictRecord {
            id: "44d88612fea8a8f36de82e1278abb02f".into(),
            object_type: "file".into(),
            relationships: Map::new(),
            context_attributes: Map::new(),
            attributes: attributes.as_object().cloned().unwrap_or_default(),
        }
    }

    #[test]
    fn populated_record_shows_every_field() {
        let r = record(json!({
            "meaningful_name": "invoice_2024.exe",
            "popular_threat_classification": {"suggested_threat_label": "trojan.emotet/geodo"},
            "reputation": -87,
            "sandbox_verdicts": {
                "Zenbox": {
                    "category": "malicious",
                    "confidence": 80,
                    "malware_classification": ["MALWARE"],
                    "malware_names": ["Emotet"],
                    "sandbox_name": "Zenbox"
                },
                "C2AE": {"category": "undetected"}
            },
            "total_votes": {"harmless": 3, "malicious": 41}
        }));
        let out = renderer().render(&r).expect("render");
        assert!(out.contains("| Meaningful name | invoice_2024.exe |"));
        assert!(out.contains("| Suggested threat label | trojan.emotet/geodo |"));
        assert!(out.contains("| Reputation | -87 |"));
        assert!(out.contains("| Total votes | harmless: 3, malicious: 41 |"));
        assert!(out.contains("- **C2AE**: category=undetected"));
        let zenbox = out
            .lines()
            .find(|l| l.starts_with("- **Zenbox**"))
            .expect("zenbox line");
        for part in [
            "category=malicious",
            "confidence=80",
            "MALWARE",
            "Emotet",
            "sandbox_name=Zenbox",
        ] {
            assert!(zenbox.contains(part), "{part} missing from {zenbox}");
        }
    }

    #[test]
    fn scalar_votes_and_list_verdicts_render_verbatim() {
        let r = record(json!({
            "meaningful_name": "a.exe",
            "popular_threat_classification": {"suggested_threat_label": "adware"},
            "reputation": 7,
            "sandbox_verdicts": ["clean-verdict"],
            "total_votes": 4242
        }));
        let out = renderer().render(&r).expect("list and scalar values render");
        assert!(out.contains("| Total votes | 4242 |"));
        assert!(out.contains("clean-verdict"));
        assert!(!out.contains("No sandbox verdicts."));
    }

    #[test]
    fn odd_value_shapes_never_fail() {
        for (votes, verdicts) in [
            (json!("many"), json!("Zenbox says clean")),
            (json!([1, 2]), json!(12)),
            (json!(true), json!({"Zenbox": "malicious"})),
            (json!({}), json!({"Zenbox": ["a", "b"]})),
        ] {
            let r = record(json!({"total_votes": votes, "sandbox_verdicts": verdicts}));
            assert!(renderer().render(&r).is_ok(), "failed on {votes} / {verdicts}");
        }
        let out = renderer()
            .render(&record(json!({"sandbox_verdicts": {"Zenbox": "malicious"}})))
            .expect("render");
        assert!(out.contains("- **Zenbox**: malicious"));
    }

    #[test]
    fn empty_record_renders_blank_placeholders() {
        let out = renderer().render(&record(json!({}))).expect("render");
        assert!(out.contains("| Meaningful name |  |"));
        assert!(out.contains("| Suggested threat label |  |"));
        assert!(out.contains("| Reputation |  |"));
        assert!(out.contains("| Total votes |  |"));
        assert!(out.contains("No sandbox verdicts."));
        assert!(!out.contains("none"));
    }

    #[test]
    fn html_templates_are_not_escaped() {
        let renderer =
            ReportRenderer::from_source("report.html", "<p>{{ meaningful_name }}</p>".to_string())
                .expect("template");
        let out = renderer
            .render(&record(json!({"meaningful_name": "<b>a&b.exe</b>"})))
            .expect("render");
        assert_eq!(out, "<p><b>a&b.exe</b></p>");
    }

    #[test]
    fn rendering_is_deterministic() {
        let r = record(json!({"meaningful_name": "a.exe", "reputation": 0}));
        let renderer = renderer();
        assert_eq!(
            renderer.render(&r).expect("first"),
            renderer.render(&r).expect("second")
        );
    }

    #[test]
    fn missing_template_file_is_template_error() {
        let tmp = TempDir::new().expect("temp dir");
        let err = ReportRenderer::from_dir(tmp.path(), "hash_report_template.md")
            .err()
            .expect("missing template");
        assert!(matches!(err, EnrichError::Template { .. }));
    }

    #[test]
    fn malformed_template_is_template_error() {
        let err = ReportRenderer::from_source("broken.md", "{% for x in %}".to_string())
            .err()
            .expect("syntax error");
        assert!(matches!(err, EnrichError::Template { .. }));
    }
}
