//! Bootstrap: enhance every marked element on a page.

use crate::page::{Page, WidgetId};
use common::SelectError;
use dom::NodeId;

/// Outcome of one bootstrap pass.
#[derive(Debug, Default)]
pub struct BootstrapReport {
    pub enhanced: Vec<WidgetId>,
    /// Marked elements that already had a widget.
    pub skipped: Vec<NodeId>,
    pub failed: Vec<(NodeId, SelectError)>,
}

impl BootstrapReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Create one widget per element carrying the marker attribute, in document
/// order. A failing element is logged and recorded without stopping the
/// others.
pub fn enhance_all(page: &mut Page) -> BootstrapReport {
    let selector = format!("[{}]", page.config().marker_attribute);
    let marked = page.document().query_selector_all(&selector);
    tracing::debug!(count = marked.len(), %selector, "bootstrapping custom selects");

    let mut report = BootstrapReport::default();
    for native in marked {
        if page.widget_for(native).is_some() {
            report.skipped.push(native);
            continue;
        }
        match page.enhance(native) {
            Ok(id) => report.enhanced.push(id),
            Err(err) => {
                tracing::warn!(?native, %err, "failed to enhance element");
                report.failed.push((native, err));
            }
        }
    }

    tracing::info!(
        enhanced = report.enhanced.len(),
        skipped = report.skipped.len(),
        failed = report.failed.len(),
        "custom select bootstrap finished"
    );
    report
}
