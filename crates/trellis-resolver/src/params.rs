//! `$param` substitution.

use std::borrow::Cow;
use std::collections::TryReserveError;

use trellis_core::{Attr, Attrs, Backend, Diagnostic};

use crate::scan::{segments, Segment};
use crate::AttrResolver;

impl<'s, 'c, B: Backend> AttrResolver<'s, 'c, B> {
    /// Replace every `$name` reference in `raw`.
    ///
    /// Values without a `$` and the styles attribute are passed through
    /// borrowed. Substituted values are owned by the returned list.
    pub fn resolve_params<'r>(&mut self, raw: &'r Attrs<'_>) -> Attrs<'r> {
        let mut resolved = Attrs::with_capacity(raw.len());
        for attr in raw.iter() {
            let name = attr.name.as_ref();
            let value = attr.value.as_ref();

            if name == self.styles_attr || !value.contains('$') {
                resolved.push_attr(Attr::new(name, value));
                continue;
            }

            let substituted = match self.substitute(value) {
                Ok(s) => s,
                Err(err) => {
                    log::warn!("Couldn't resolve `{}` of attribute {}: {}", value, name, err);
                    String::new()
                }
            };
            resolved.push_attr(Attr::new(name, Cow::Owned(substituted)));
        }
        resolved
    }

    fn substitute(&mut self, value: &str) -> Result<String, TryReserveError> {
        let mut out = String::new();
        out.try_reserve(value.len())?;

        for seg in segments(value) {
            match seg {
                Segment::Literal(text) => append(&mut out, text)?,
                Segment::Dollar => append(&mut out, "$")?,
                Segment::Param(param) => match self.param_value(param) {
                    Some(v) => append(&mut out, v)?,
                    None => {
                        append(&mut out, "$")?;
                        append(&mut out, param)?;
                    }
                },
            }
        }
        Ok(out)
    }

    /// Value for parameter `name`, `None` to keep the reference as written.
    fn param_value(&mut self, name: &str) -> Option<&'s str> {
        let scope = self.scope;
        let Some(param) = scope.param(name) else {
            self.report(Diagnostic::UndefinedParam {
                scope: scope.name().to_string(),
                param: name.to_string(),
            });
            return None;
        };

        let default = param.default.as_deref();
        match self.caller_attrs.and_then(|attrs| attrs.get(name)) {
            // Not resolved by the caller's caller either.
            Some(v) if v.starts_with('#') || v.starts_with('$') => default,
            Some(v) if param.is_style() => Some(
                self.scopes
                    .style(self.caller_scope, v)
                    .map_or(v, |style| style.long_name.as_str()),
            ),
            Some(v) => Some(v),
            None => default,
        }
    }
}

fn append(out: &mut String, s: &str) -> Result<(), TryReserveError> {
    out.try_reserve(s.len())?;
    out.push_str(s);
    Ok(())
}
