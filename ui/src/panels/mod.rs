pub(crate) mod court;
pub(crate) mod metrics;
pub(crate) mod settings;

#[derive(Clone, Copy, PartialEq)]
pub(crate) enum Tab {
    Court,
    Metrics,
    Settings,
}

/// Format an optional f64 with the given precision, or "-" if None.
pub(crate) fn opt_f(v: Option<f64>, prec: usize) -> String {
    match v {
        Some(v) => format!("{v:.prec$}"),
        None => "-".into(),
    }
}
