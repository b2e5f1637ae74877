//! Module name mapping between technical ids and display names.

/// Known technical module names and their display names.
const MODULE_DISPLAY_NAMES: &[(&str, &str)] = &[
    // Core
    ("user_management", "User Management"),
    ("core_dashboard", "Core Dashboard"),
    ("ai_orchestration", "AI Orchestration"),
    ("document_management", "Document Management"),
    ("custom_field_management", "Custom Field Management"),
    ("people", "People Management"),
    // Business
    ("companies", "Company Database"),
    ("talent_database", "Talent Database"),
    ("smart_talent_analytics", "Smart Talent Analytics"),
    // ATS
    ("ats_core", "ATS Core"),
    ("candidate_management", "Candidate Management"),
    ("job_posting_management", "Job Posting Management"),
    ("interview_scheduling", "Interview Scheduling"),
    // Communication
    ("email_management", "Email Management"),
    ("notification_system", "Notification System"),
    ("collaboration_tools", "Collaboration Tools"),
    // Analytics
    ("reporting_analytics", "Reporting & Analytics"),
    ("business_intelligence", "Business Intelligence"),
    ("performance_metrics", "Performance Metrics"),
    // Integrations
    ("api_integrations", "API Integrations"),
    ("third_party_connectors", "Third Party Connectors"),
    ("data_sync_services", "Data Sync Services"),
    ("linkedin_integration", "LinkedIn Integration"),
    // Workflow and AI
    ("workflow_management", "Workflow Management"),
    ("predictive_insights", "Predictive Insights"),
];

/// Lowercase, replace every non-alphanumeric char with `_`, collapse runs
/// of `_`, and strip leading/trailing `_`.
pub fn normalize_module_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars().flat_map(char::to_lowercase) {
        let c = if c.is_ascii_lowercase() || c.is_ascii_digit() {
            c
        } else {
            '_'
        };
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }
    out.trim_matches('_').to_string()
}

/// Display name for a module, falling back to title-casing the raw name.
pub fn display_name(name: &str) -> String {
    let normalized = normalize_module_name(name);
    MODULE_DISPLAY_NAMES
        .iter()
        .find(|(technical, _)| *technical == normalized)
        .map(|(_, display)| display.to_string())
        .unwrap_or_else(|| format_module_name(name))
}

/// Technical name for a display name, via the known table when possible.
pub fn technical_name(display: &str) -> String {
    MODULE_DISPLAY_NAMES
        .iter()
        .find(|(_, d)| *d == display)
        .map(|(technical, _)| technical.to_string())
        .unwrap_or_else(|| normalize_module_name(display))
}

/// All known `(technical, display)` pairs, in catalog order.
pub fn known_modules() -> impl Iterator<Item = (&'static str, &'static str)> {
    MODULE_DISPLAY_NAMES.iter().copied()
}

fn format_module_name(name: &str) -> String {
    if name.is_empty() {
        return "Unknown Module".to_string();
    }
    name.split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
