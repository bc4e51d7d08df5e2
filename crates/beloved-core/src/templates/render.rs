//! Named placeholder substitution
//!
//! Templates use `{name}` placeholders. `{{` and `}}` produce literal braces,
//! which is how the Lua table literals in the built-in templates are written.

use std::collections::BTreeMap;
use thiserror::Error;

/// Errors raised while rendering a template
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("Template '{template}' needs parameter '{name}', pass it with -p {name}=<value>")]
    MissingParameter { template: String, name: String },

    #[error("Template '{template}' has an unmatched brace at byte {position}")]
    Unbalanced { template: String, position: usize },
}

/// Render `text` by replacing every `{name}` with `params[name]`
///
/// `template` is only used to name the template in errors.
pub fn render(
    template: &str,
    text: &str,
    params: &BTreeMap<String, String>,
) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        match c {
            '{' => {
                if matches!(chars.peek(), Some((_, '{'))) {
                    chars.next();
                    out.push('{');
                    continue;
                }

                let mut name = String::new();
                let mut closed = false;
                for (_, c) in chars.by_ref() {
                    match c {
                        '}' => {
                            closed = true;
                            break;
                        }
                        '{' => break,
                        _ => name.push(c),
                    }
                }

                if !closed {
                    return Err(TemplateError::Unbalanced {
                        template: template.to_string(),
                        position: pos,
                    });
                }

                let name = name.trim();
                match params.get(name) {
                    Some(value) => out.push_str(value),
                    None => {
                        return Err(TemplateError::MissingParameter {
                            template: template.to_string(),
                            name: name.to_string(),
                        })
                    }
                }
            }
            '}' => {
                if matches!(chars.peek(), Some((_, '}'))) {
                    chars.next();
                    out.push('}');
                } else {
                    return Err(TemplateError::Unbalanced {
                        template: template.to_string(),
                        position: pos,
                    });
                }
            }
            _ => out.push(c),
        }
    }

    Ok(out)
}
