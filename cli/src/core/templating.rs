//! # Parley Report Templating
//!
//! File: cli/src/core/templating.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Thin wrapper around the Tera engine used to render the text reports Parley
//! prints to the terminal (currently the conversation statistics block).
//! Any `Serialize` value can serve as the template context, and rendering
//! failures are reported as `ParleyError::Template` with the report name
//! attached as context.
//!
//! Autoescaping is off: output goes to a terminal, not a browser, and paths
//! must be printed verbatim.
//!
//! ## Examples
//!
//! ```rust
//! #[derive(Serialize)]
//! struct Greeting { name: String }
//!
//! let text = templating::render_report(
//!     "greeting",
//!     "Hello {{ name }}!",
//!     &Greeting { name: "Alice".into() },
//! )?;
//! assert_eq!(text, "Hello Alice!");
//! ```
//!
use crate::core::error::{ParleyError, Result};
use anyhow::anyhow;
use serde::Serialize;
use tera::Tera;
use tracing::debug;

/// Renders `template` against the serialized fields of `data`.
pub fn render_report<T: Serialize>(report_name: &str, template: &str, data: &T) -> Result<String> {
    debug!("Rendering report '{}'", report_name);
    let context = tera::Context::from_serialize(data).map_err(|e| {
        anyhow!(ParleyError::Template { source: e })
            .context(format!("Failed to build context for report '{}'", report_name))
    })?;
    Tera::one_off(template, &context, false).map_err(|e| {
        anyhow!(ParleyError::Template { source: e })
            .context(format!("Tera rendering failed for report '{}'", report_name))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Sample {
        name: String,
        path: String,
        when: Option<String>,
    }

    fn sample() -> Sample {
        Sample {
            name: "Alice".into(),
            path: "/tmp/log.json".into(),
            when: None,
        }
    }

    #[test]
    fn test_render_substitutes_fields() -> Result<()> {
        let text = render_report("sample", "{{ name }} -> {{ path }}", &sample())?;
        assert_eq!(text, "Alice -> /tmp/log.json"); // no HTML escaping of '/'
        Ok(())
    }

    #[test]
    fn test_render_optional_block() -> Result<()> {
        let template = "{% if when %}at {{ when }}{% else %}never{% endif %}";
        assert_eq!(render_report("sample", template, &sample())?, "never");

        let mut with_time = sample();
        with_time.when = Some("2024-01-01 10:00:00".into());
        assert_eq!(
            render_report("sample", template, &with_time)?,
            "at 2024-01-01 10:00:00"
        );
        Ok(())
    }

    #[test]
    fn test_render_invalid_template_syntax() {
        let result = render_report("broken", "Hello {{ name", &sample());
        assert!(result.is_err());
        let error_string = result.unwrap_err().to_string();
        assert!(error_string.contains("Tera rendering failed"));
        assert!(error_string.contains("broken"));
    }
}
