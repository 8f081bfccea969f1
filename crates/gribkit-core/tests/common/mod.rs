use gribkit_core::concept::{ConceptResolver, FieldMap, InMemoryRuleTable};
use gribkit_core::diagnostics::{Context, Severity};
use std::sync::{Arc, Mutex};

#[allow(dead_code)]
pub const CONCEPTS_YAML: &str = include_str!("../fixtures/concepts.yaml");

/// Field values of a freshly created GRIB2 sample message
#[allow(dead_code)]
pub fn sample_grib2() -> FieldMap {
    FieldMap::new()
        .with("edition", 2)
        .with("discipline", 0)
        .with("parameterCategory", 0)
        .with("parameterNumber", 0)
        .with("typeOfFirstFixedSurface", 1)
        .with("typeOfSecondFixedSurface", 255)
        .with("gridDefinitionTemplateNumber", 0)
        .with("PLPresent", 0)
        .with("selectStepTemplateInstant", 1)
        .with("selectStepTemplateInterval", 0)
        .with("stepTypeInternal", "instant")
        .with("level", 0)
}

#[allow(dead_code)]
pub fn sample_rule_table() -> InMemoryRuleTable {
    InMemoryRuleTable::from_yaml_str(CONCEPTS_YAML).unwrap()
}

#[allow(dead_code)]
pub fn sample_resolver() -> ConceptResolver {
    ConceptResolver::new(Arc::new(sample_rule_table()))
}

#[allow(dead_code)]
pub type LogRecord = Arc<Mutex<Vec<(Severity, String)>>>;

/// Context whose logging handler records every message
#[allow(dead_code)]
pub fn recording_context() -> (Context, LogRecord) {
    let record: LogRecord = Arc::new(Mutex::new(Vec::new()));
    let sink = record.clone();
    let mut ctx = Context::new();
    ctx.set_logging_proc(Some(Arc::new(move |sev: Severity, msg: &str| {
        sink.lock().unwrap().push((sev, msg.to_string()));
    })));
    (ctx, record)
}
