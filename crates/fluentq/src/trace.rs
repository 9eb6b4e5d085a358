//! `tracing` events for compile/complete. No-ops without the `tracing` feature.

use crate::config::ProcessorConfig;

#[cfg_attr(not(feature = "tracing"), allow(dead_code))]
pub(crate) fn truncate_template_bytes(template: &str, max_bytes: usize) -> &str {
    if template.len() <= max_bytes {
        return template;
    }
    let mut end = max_bytes;
    while end > 0 && !template.is_char_boundary(end) {
        end -= 1;
    }
    &template[..end]
}

#[cfg(feature = "tracing")]
fn display_template(config: &ProcessorConfig, template: &str) -> String {
    match config.max_log_length {
        Some(max) if template.len() > max => {
            format!("{}...", truncate_template_bytes(template, max))
        }
        _ => template.to_string(),
    }
}

#[cfg(feature = "tracing")]
pub(crate) fn template_compiled(
    config: &ProcessorConfig,
    template: &str,
    fragments: usize,
    directives: usize,
) {
    if !config.log_templates {
        return;
    }
    tracing::debug!(
        target: "fluentq.compile",
        fragments,
        directives,
        template = %display_template(config, template),
    );
}

#[cfg(feature = "tracing")]
pub(crate) fn template_completed(config: &ProcessorConfig, directives: usize, supplied: usize) {
    if !config.log_templates {
        return;
    }
    tracing::debug!(
        target: "fluentq.complete",
        directives,
        supplied,
        ignored = supplied.saturating_sub(directives),
    );
}

#[cfg(feature = "tracing")]
pub(crate) fn unknown_directive_preserved(config: &ProcessorConfig, name: &str, position: usize) {
    if !config.log_templates {
        return;
    }
    tracing::warn!(
        target: "fluentq.processor",
        name,
        position,
        "unknown directive kept verbatim",
    );
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn template_compiled(_: &ProcessorConfig, _: &str, _: usize, _: usize) {}

#[cfg(not(feature = "tracing"))]
pub(crate) fn template_completed(_: &ProcessorConfig, _: usize, _: usize) {}

#[cfg(not(feature = "tracing"))]
pub(crate) fn unknown_directive_preserved(_: &ProcessorConfig, _: &str, _: usize) {}
