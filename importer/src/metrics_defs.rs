//! Metrics definitions for bulk import.

use shared::metrics_defs::{MetricDef, MetricType};

pub const IMPORT_VARIABLE_CREATED: MetricDef = MetricDef {
    name: "import.variable.created",
    metric_type: MetricType::Counter,
    description: "Number of variables created by bulk imports",
};

pub const IMPORT_VARIABLE_FAILED: MetricDef = MetricDef {
    name: "import.variable.failed",
    metric_type: MetricType::Counter,
    description: "Number of create calls that failed during bulk imports",
};

pub const IMPORT_DURATION: MetricDef = MetricDef {
    name: "import.duration",
    metric_type: MetricType::Histogram,
    description: "Time for all create calls of a bulk import to settle, in seconds",
};

pub const ALL_METRICS: &[MetricDef] = &[
    IMPORT_VARIABLE_CREATED,
    IMPORT_VARIABLE_FAILED,
    IMPORT_DURATION,
];
