//! Template checks
//!
//! Finds the spots where expansion will not do what the author likely
//! meant: unterminated placeholders (whose text is dropped), names the
//! resolver does not know (left verbatim in the output) and empty names.
//! Conditional patterns are checked whether or not their branch is taken.

use crate::config::Configuration;
use crate::error::Diagnostic;
use crate::interpolate::{segments, Expression, Segment, Span};
use crate::resolver::{ArgsResolver, ConfigResolver, Resolver};
use crate::value::Value;

/// Run all checks on a template.
pub fn check<R: Resolver + ?Sized>(template: &str, resolver: &R) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    check_at(template, 0, resolver, &mut diagnostics);
    diagnostics
}

/// Check a template the way `process_with_config_and_args` expands it.
///
/// Arguments are substituted first and configuration keys are resolved in
/// the result, so a placeholder carried in by an argument value is checked
/// against the configuration. Problems found inside an argument value are
/// reported at the template placeholder that inserts it.
pub fn check_with_config_and_args(
    template: &str,
    config: Option<&Configuration>,
    args: &[Value<'_>],
) -> Vec<Diagnostic> {
    let passes = Passes {
        args: ArgsResolver::new(args),
        config: ConfigResolver::new(config),
    };
    let mut diagnostics = Vec::new();
    passes.check_at(template, 0, &mut diagnostics);
    diagnostics
}

fn shift(span: Span, base: usize) -> Span {
    span.start + base..span.end + base
}

/// Where the pattern of a placeholder starting at `start` begins
fn pattern_at<'a>(expression: &Expression<'a>, start: usize) -> Option<(&'a str, usize)> {
    let pattern = expression.pattern?;
    let offset = expression.pattern_offset()?;
    // skip the `${` delimiter
    Some((pattern, start + 2 + offset))
}

fn unterminated(span: Span) -> Diagnostic {
    Diagnostic::error(
        span,
        "unterminated placeholder; the rest of the template is dropped",
    )
}

fn empty_name(span: Span) -> Diagnostic {
    Diagnostic::warning(span, "placeholder has an empty name")
}

fn unresolved(span: Span, name: &str) -> Diagnostic {
    Diagnostic::warning(span, format!("unresolved placeholder '{}'", name))
}

struct Passes<'a> {
    args: ArgsResolver<'a>,
    config: ConfigResolver<'a>,
}

impl Passes<'_> {
    fn check_at(&self, template: &str, base: usize, diagnostics: &mut Vec<Diagnostic>) {
        for segment in segments(template) {
            let (expression, span) = match segment {
                Segment::Text(_) => continue,
                Segment::Unterminated { span } => {
                    diagnostics.push(unterminated(shift(span, base)));
                    continue;
                }
                Segment::Placeholder { expression, span } => (expression, shift(span, base)),
            };
            let pattern = pattern_at(&expression, span.start);

            if expression.name.is_empty() {
                diagnostics.push(empty_name(span.clone()));
            } else if let Some(value) = self.args.resolve(expression.name) {
                if pattern.is_none() {
                    // the argument text goes through the configuration pass
                    for found in check(&value, &self.config) {
                        diagnostics.push(Diagnostic {
                            span: span.clone(),
                            message: format!("argument {}: {}", expression.name, found.message),
                            ..found
                        });
                    }
                }
            } else if self.config.resolve(expression.name).is_some() {
                // left verbatim by the argument pass, pattern included
                if let Some((pattern, start)) = pattern {
                    check_at(pattern, start, &self.config, diagnostics);
                }
                continue;
            } else {
                diagnostics.push(unresolved(span.clone(), expression.name));
            }

            if let Some((pattern, start)) = pattern {
                self.check_at(pattern, start, diagnostics);
            }
        }
    }
}

fn check_at<R: Resolver + ?Sized>(
    template: &str,
    base: usize,
    resolver: &R,
    diagnostics: &mut Vec<Diagnostic>,
) {
    for segment in segments(template) {
        match segment {
            Segment::Text(_) => {}
            Segment::Unterminated { span } => {
                diagnostics.push(unterminated(shift(span, base)));
            }
            Segment::Placeholder { expression, span } => {
                let span = shift(span, base);

                if expression.name.is_empty() {
                    diagnostics.push(empty_name(span.clone()));
                } else if resolver.resolve(expression.name).is_none() {
                    diagnostics.push(unresolved(span.clone(), expression.name));
                }

                if let Some((pattern, start)) = pattern_at(&expression, span.start) {
                    check_at(pattern, start, resolver, diagnostics);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Severity;

    fn known(name: &str) -> Option<String> {
        matches!(name, "a" | "b").then(|| "1".to_string())
    }

    #[test]
    fn test_clean_template() {
        assert!(check("x ${a} ${b?y} $ {}", &known).is_empty());
    }

    #[test]
    fn test_unresolved_and_empty() {
        let diags = check("${a} ${zzz} ${ }", &known);
        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0].span, 5..11);
        assert_eq!(diags[0].message, "unresolved placeholder 'zzz'");
        assert_eq!(diags[1].span, 12..16);
        assert_eq!(diags[1].severity, Severity::Warning);
    }

    #[test]
    fn test_unterminated() {
        let diags = check("abc ${a", &known);
        assert_eq!(diags.len(), 1);
        assert!(diags[0].is_error());
        assert_eq!(diags[0].span, 4..7);
    }

    #[test]
    fn test_spans_inside_patterns_point_into_template() {
        let template = "${a?[${q}]}";
        let diags = check(template, &known);
        assert_eq!(diags.len(), 1);
        assert_eq!(&template[diags[0].span.clone()], "${q}");
    }

    #[test]
    fn test_unbalanced_pattern_makes_outer_unterminated() {
        let template = "ok ${!b?${x{}}";
        let diags = check(template, &known);
        assert_eq!(diags.len(), 1);
        assert!(diags[0].is_error());
        assert_eq!(&template[diags[0].span.clone()], "${!b?${x{}}");
    }

    fn user_config() -> Configuration {
        let mut config = Configuration::new();
        config.set_value("user", "ada");
        config.set_value("k", "v");
        config
    }

    #[test]
    fn test_passes_check_argument_values_against_config() {
        let config = user_config();
        let args = [Value::from("${k}"), Value::from("${missing}")];
        let template = "${user}: ${0} ${1}";
        let diags = check_with_config_and_args(template, Some(&config), &args);
        assert_eq!(diags.len(), 1);
        assert_eq!(&template[diags[0].span.clone()], "${1}");
        assert_eq!(diags[0].message, "argument 1: unresolved placeholder 'missing'");
        assert_eq!(diags[0].severity, Severity::Warning);
    }

    #[test]
    fn test_passes_report_missing_argument() {
        let config = user_config();
        let diags = check_with_config_and_args("${0} ${user}", Some(&config), &[]);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].span, 0..4);
        assert_eq!(diags[0].message, "unresolved placeholder '0'");
    }

    #[test]
    fn test_passes_config_pattern_sees_no_arguments() {
        let config = user_config();
        let args = [Value::from("x")];
        let template = "${user?[${0}]}${0?[${k}]}";
        let diags = check_with_config_and_args(template, Some(&config), &args);
        assert_eq!(diags.len(), 1);
        assert_eq!(&template[diags[0].span.clone()], "${0}");
    }

    #[test]
    fn test_passes_unterminated_argument_is_an_error() {
        let args = [Value::from("oops ${")];
        let diags = check_with_config_and_args("a ${0} b", None, &args);
        assert_eq!(diags.len(), 1);
        assert!(diags[0].is_error());
        assert_eq!(diags[0].span, 2..6);
    }
}
