use anyhow::Result;
use serde::Serialize;

use crate::rules::RulesRepository;
use crate::validator::{ValidationFinding, ValidationOutcome};

/// What the CLI prints for one checked URL.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub url: &'a str,
    pub channel_label: Option<&'a str>,
    pub outcome: &'a ValidationOutcome,
    pub fixed_url: Option<&'a str>,
    pub clean_url: Option<&'a str>,
}

impl<'a> Report<'a> {
    pub fn new(url: &'a str, outcome: &'a ValidationOutcome, rules: &'a RulesRepository) -> Self {
        Self {
            url,
            channel_label: rules
                .channel_by_id(&outcome.channel_id)
                .map(|c| c.label.as_str()),
            outcome,
            fixed_url: None,
            clean_url: None,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_text(&self, show_warnings: bool) -> String {
        let mut out = String::new();
        let channel = self.channel_label.unwrap_or(&self.outcome.channel_id);

        out.push_str(&format!("URL:     {}\n", self.url));
        out.push_str(&format!("Channel: {}\n", channel));
        out.push_str(&format!(
            "Status:  {}\n",
            if self.outcome.is_valid { "valid" } else { "invalid" }
        ));

        push_section(&mut out, "Errors", &self.outcome.blocking);
        if show_warnings {
            push_section(&mut out, "Warnings", &self.outcome.advisory);
        }

        if let Some(fixed) = self.fixed_url {
            out.push_str(&format!("\nFixed:   {}\n", fixed));
        }
        if let Some(clean) = self.clean_url {
            out.push_str(&format!("\nClean:   {}\n", clean));
        }
        out
    }
}

fn push_section(out: &mut String, title: &str, findings: &[ValidationFinding]) {
    if findings.is_empty() {
        return;
    }
    out.push_str(&format!("\n{} ({}):\n", title, findings.len()));
    for finding in findings {
        out.push_str(&format!("  - {}\n", format_finding(finding)));
    }
}

pub fn format_finding(finding: &ValidationFinding) -> String {
    match &finding.suggestion {
        Some(suggestion) => format!("{} -> {}", finding.message, suggestion),
        None => finding.message.clone(),
    }
}
