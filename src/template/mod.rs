// src/template/mod.rs

//! Expansion of command templates against the global scope.
//!
//! Templates use Handlebars syntax: `{{name}}` inserts the global `name`,
//! `{{upper name}}` applies a helper from [`helpers`]. The registry runs in
//! strict mode, so a reference to an undefined global is an error rather
//! than an empty string. Output is never HTML-escaped.
//!
//! Rendering only sees the [`GlobalScope`] passed in; there is no access to
//! process environment, files or the clock.
//!
//! A bare `{{key}}` naming a global always renders that global, even when a
//! helper or built-in has the same name (`{{log}}`, `{{title}}`). Such
//! references are rewritten to a path lookup before rendering.

pub mod helpers;

use std::borrow::Cow;
use std::collections::BTreeMap;

use handlebars::Handlebars;
use thiserror::Error;
use tracing::debug;

use crate::config::{GlobalScope, Rule};
use crate::errors::{Result, WfError};

/// A template could not be parsed or rendered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("template error in {template:?}: {message}")]
pub struct TemplateError {
    pub template: String,
    pub message: String,
}

/// One command of a rule after template expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCommand<'a> {
    /// Zero-based position in the rule.
    pub index: usize,
    pub line: String,
    pub env: &'a BTreeMap<String, String>,
}

/// Handlebars registry configured for command templates.
pub struct TemplateResolver {
    registry: Handlebars<'static>,
}

impl Default for TemplateResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateResolver {
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);
        helpers::register_string_helpers(&mut registry);
        Self { registry }
    }

    /// Expand a single template.
    pub fn resolve(
        &self,
        template: &str,
        scope: &GlobalScope,
    ) -> std::result::Result<String, TemplateError> {
        self.registry
            .render_template(&pin_global_references(template, scope), scope)
            .map_err(|e| TemplateError {
                template: template.to_string(),
                message: e.to_string(),
            })
    }

    /// Expand every command of `rule`, in order.
    ///
    /// Stops at the first template that fails; the error carries its index.
    pub fn resolve_rule<'a>(
        &self,
        rule: &'a Rule,
        scope: &GlobalScope,
    ) -> Result<Vec<ResolvedCommand<'a>>> {
        rule.commands()
            .iter()
            .enumerate()
            .map(|(index, template)| {
                let line = self.resolve(template, scope).map_err(|source| WfError::Template {
                    rule: rule.name().to_string(),
                    index,
                    source,
                })?;
                debug!(rule = %rule.name(), index, line = %line, "resolved command template");
                Ok(ResolvedCommand {
                    index,
                    line,
                    env: rule.env(),
                })
            })
            .collect()
    }
}

/// Rewrite each bare `{{key}}` (also `{{{key}}}`, `{{& key}}`, `{{~key~}}`)
/// whose key is a global into `{{this.[key]}}`.
///
/// Handlebars checks helper names before data for name-only expressions;
/// a path is never looked up as a helper. Helper parameters are paths
/// already and are left alone, as are escaped `\{{...}}` tags.
fn pin_global_references<'t>(template: &'t str, scope: &GlobalScope) -> Cow<'t, str> {
    if scope.is_empty() || !template.contains("{{") {
        return Cow::Borrowed(template);
    }

    let mut out = String::with_capacity(template.len() + 16);
    let mut rest = template;
    while let Some(open) = rest.find("{{") {
        let after_open = &rest[open + 2..];
        let Some(close) = after_open.find("}}") else {
            break;
        };
        let inner = &after_open[..close];
        let backslashes = rest[..open].chars().rev().take_while(|&c| c == '\\').count();

        out.push_str(&rest[..open + 2]);
        if backslashes == 1 {
            out.push_str(inner);
        } else {
            out.push_str(&pin_bare_reference(inner, scope));
        }
        out.push_str("}}");
        rest = &after_open[close + 2..];
    }
    out.push_str(rest);

    Cow::Owned(out)
}

fn pin_bare_reference<'i>(inner: &'i str, scope: &GlobalScope) -> Cow<'i, str> {
    let after_tilde = inner.strip_prefix('~').unwrap_or(inner);
    let after_sigil = after_tilde
        .strip_prefix(['{', '&'])
        .unwrap_or(after_tilde);
    let body = after_sigil.trim_start();
    let lead = inner.len() - body.len();
    let body = body.strip_suffix('~').unwrap_or(body);
    let name = body.trim_end();

    if name.is_empty() || name == "else" || name.contains(']') || scope.get(name).is_none() {
        return Cow::Borrowed(inner);
    }

    let tail = &inner[lead + name.len()..];
    Cow::Owned(format!("{}this.[{name}]{tail}", &inner[..lead]))
}
