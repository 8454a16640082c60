// src/template/helpers.rs

//! Fixed table of string helpers available inside command templates.
//!
//! | helper        | example                          | result            |
//! |---------------|----------------------------------|-------------------|
//! | `upper`       | `{{upper name}}`                 | `NAME`            |
//! | `lower`       | `{{lower name}}`                 | `name`            |
//! | `title`       | `{{title "hello big world"}}`    | `Hello Big World` |
//! | `trim`        | `{{trim name}}`                  | whitespace removed at both ends |
//! | `trim_start`  | `{{trim_start name}}`            | leading whitespace removed |
//! | `trim_end`    | `{{trim_end name}}`              | trailing whitespace removed |
//! | `replace`     | `{{replace name "-" "_"}}`       | every `-` becomes `_` |
//! | `quote`       | `{{quote name}}`                 | `"name"`          |
//! | `squote`      | `{{squote name}}`                | `'name'`          |
//!
//! All helpers are pure functions of their arguments. Handlebars' own
//! built-ins (`if`, `unless`, `each`, `eq`, `len`, ...) remain available.

use handlebars::{Handlebars, handlebars_helper};

handlebars_helper!(upper: |s: str| s.to_uppercase());
handlebars_helper!(lower: |s: str| s.to_lowercase());
handlebars_helper!(title: |s: str| title_case(s));
handlebars_helper!(trim: |s: str| s.trim().to_string());
handlebars_helper!(trim_start: |s: str| s.trim_start().to_string());
handlebars_helper!(trim_end: |s: str| s.trim_end().to_string());
handlebars_helper!(replace: |s: str, from: str, to: str| s.replace(from, to));
handlebars_helper!(quote: |s: str| format!("\"{s}\""));
handlebars_helper!(squote: |s: str| format!("'{s}'"));

pub(crate) fn register_string_helpers(registry: &mut Handlebars<'static>) {
    registry.register_helper("upper", Box::new(upper));
    registry.register_helper("lower", Box::new(lower));
    registry.register_helper("title", Box::new(title));
    registry.register_helper("trim", Box::new(trim));
    registry.register_helper("trim_start", Box::new(trim_start));
    registry.register_helper("trim_end", Box::new(trim_end));
    registry.register_helper("replace", Box::new(replace));
    registry.register_helper("quote", Box::new(quote));
    registry.register_helper("squote", Box::new(squote));
}

fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;

    for c in s.chars() {
        if c.is_whitespace() {
            at_word_start = true;
            out.push(c);
        } else if at_word_start {
            at_word_start = false;
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
    }

    out
}
