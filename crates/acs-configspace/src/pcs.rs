//! PCS text format
//!
//! Line-oriented declarations, `#` starts a comment:
//!
//! ```text
//! mode {greedy, anneal} [greedy]        # categorical
//! temp [0.01, 10] [1]l                  # real, log scale
//! restarts [0, 50] [5]i                 # integer (`il` for log integer)
//! temp | mode in {anneal}               # condition
//! {mode=greedy, restarts=0}             # forbidden combination
//! ```
//!
//! Conditions and forbidden clauses may refer to parameters declared later
//! in the file; they are resolved after all parameters are read.

use crate::condition::{Condition, ForbiddenClause};
use crate::error::{PcsError, PcsResult};
use crate::parameter::Parameter;
use crate::space::ParameterSpace;
use once_cell::sync::Lazy;
use regex::Regex;

static CATEGORICAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<name>[^\s\[\]{}|=]+)\s*\{(?P<choices>[^}]*)\}\s*\[(?P<default>[^\]]*)\]$")
        .expect("categorical pattern is valid")
});

static NUMERIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<name>[^\s\[\]{}|=]+)\s*\[(?P<lower>[^,\]]+),(?P<upper>[^\]]+)\]\s*\[(?P<default>[^\]]+)\]\s*(?P<flags>[il]*)$",
    )
    .expect("numeric pattern is valid")
});

static CONDITION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<child>[^\s|]+)\s*\|\s*(?P<parent>\S+)\s+in\s*\{(?P<values>[^}]*)\}$")
        .expect("condition pattern is valid")
});

static FORBIDDEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\{(?P<body>[^}]*)\}$").expect("forbidden pattern is valid"));

/// Parse PCS text into a parameter space
///
/// The returned space is unseeded.
///
/// # Errors
/// Returns the first syntax, domain or reference error encountered.
pub fn parse(text: &str) -> PcsResult<ParameterSpace> {
    parse_lines(text.lines())
}

/// Parse PCS from pre-split lines
///
/// # Errors
/// See [`parse`].
pub fn parse_lines<'a, I>(lines: I) -> PcsResult<ParameterSpace>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut space = ParameterSpace::new();
    let mut conditions = Vec::new();
    let mut forbidden = Vec::new();

    for (idx, raw) in lines.into_iter().enumerate() {
        let line_no = idx + 1;
        let line = strip_comment(raw);
        if line.is_empty() {
            continue;
        }

        if let Some(caps) = CONDITION.captures(line) {
            let values: Vec<String> = split_list(&caps["values"]).into_iter().map(str::to_string).collect();
            conditions.push((line_no, caps["child"].to_string(), caps["parent"].to_string(), values));
        } else if let Some(caps) = FORBIDDEN.captures(line) {
            forbidden.push((line_no, caps["body"].to_string()));
        } else if let Some(caps) = CATEGORICAL.captures(line) {
            let choices: Vec<String> = split_list(&caps["choices"]).into_iter().map(str::to_string).collect();
            let param = Parameter::categorical(&caps["name"], choices, caps["default"].trim())?;
            space.add_parameter(param)?;
        } else if let Some(caps) = NUMERIC.captures(line) {
            let param = numeric_parameter(line_no, line, &caps)?;
            space.add_parameter(param)?;
        } else {
            return Err(PcsError::syntax(line_no, line));
        }
    }

    for (line_no, child, parent, raw_values) in conditions {
        let parent_param = space
            .parameter(&parent)
            .ok_or_else(|| PcsError::UnknownParameter(parent.clone()))?;
        if raw_values.is_empty() {
            return Err(PcsError::syntax(line_no, format!("{child} | {parent} in {{}}")));
        }
        let values = raw_values
            .iter()
            .map(|v| parent_param.parse_value(v))
            .collect::<PcsResult<Vec<_>>>()?;
        space.add_condition(Condition::new(child, parent, values))?;
    }

    for (line_no, body) in forbidden {
        let mut assignments = Vec::new();
        for item in split_list(&body) {
            let (name, value) = item
                .split_once('=')
                .ok_or_else(|| PcsError::syntax(line_no, format!("{{{body}}}")))?;
            let name = name.trim();
            let param = space
                .parameter(name)
                .ok_or_else(|| PcsError::UnknownParameter(name.to_string()))?;
            assignments.push((name.to_string(), param.parse_value(value)?));
        }
        if assignments.is_empty() {
            return Err(PcsError::syntax(line_no, "{}"));
        }
        space.add_forbidden(ForbiddenClause::new(assignments))?;
    }

    Ok(space)
}

fn numeric_parameter(line_no: usize, line: &str, caps: &regex::Captures<'_>) -> PcsResult<Parameter> {
    let name = &caps["name"];
    let flags = &caps["flags"];
    let integer = flags.contains('i');
    let log = flags.contains('l');
    let (lower, upper, default) = (caps["lower"].trim(), caps["upper"].trim(), caps["default"].trim());

    if integer {
        let parse = |s: &str| s.parse::<i64>().map_err(|_| PcsError::syntax(line_no, line));
        Parameter::integer(name, parse(lower)?, parse(upper)?, parse(default)?, log)
    } else {
        let parse = |s: &str| s.parse::<f64>().map_err(|_| PcsError::syntax(line_no, line));
        Parameter::float(name, parse(lower)?, parse(upper)?, parse(default)?, log)
    }
}

fn strip_comment(line: &str) -> &str {
    line.split_once('#').map_or(line, |(head, _)| head).trim()
}

fn split_list(list: &str) -> Vec<&str> {
    list.split(',').map(str::trim).filter(|s| !s.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameter::{Domain, ParamValue};
    use pretty_assertions::assert_eq;

    const SOLVER_PCS: &str = "
# local search solver
mode {greedy, anneal} [greedy]
temp [0.01, 10] [1]l
restarts [0, 50] [5]i
tabu [1, 1000] [10]il

temp | mode in {anneal}
{mode=greedy, restarts=0}
";

    #[test]
    fn parses_all_declaration_forms() {
        let space = parse(SOLVER_PCS).unwrap();
        assert_eq!(space.len(), 4);
        assert_eq!(space.conditions().len(), 1);
        assert_eq!(space.forbidden_clauses().len(), 1);

        assert_eq!(
            space.parameter("temp").unwrap().domain(),
            &Domain::Float { lower: 0.01, upper: 10.0, default: 1.0, log: true }
        );
        assert_eq!(
            space.parameter("tabu").unwrap().domain(),
            &Domain::Integer { lower: 1, upper: 1000, default: 10, log: true }
        );
    }

    #[test]
    fn declaration_order_is_kept() {
        let space = parse(SOLVER_PCS).unwrap();
        let names: Vec<_> = space.parameters().map(Parameter::name).collect();
        assert_eq!(names, vec!["mode", "temp", "restarts", "tabu"]);
    }

    #[test]
    fn condition_before_parameter_resolves() {
        let space = parse("b | a in {on}\na {on, off} [on]\nb [0, 1] [0]").unwrap();
        assert_eq!(space.conditions()[0].values, vec![ParamValue::from("on")]);
    }

    #[test]
    fn parsed_space_is_unseeded() {
        assert_eq!(parse(SOLVER_PCS).unwrap().current_seed(), None);
    }

    #[test]
    fn garbage_line_is_syntax_error() {
        let err = parse("mode {a, b} [a]\nthis is not pcs").unwrap_err();
        assert_eq!(err, PcsError::syntax(2, "this is not pcs"));
    }

    #[test]
    fn non_integer_bound_is_syntax_error() {
        assert!(matches!(parse("n [1.5, 3] [2]i"), Err(PcsError::Syntax { line: 1, .. })));
    }

    #[test]
    fn unknown_condition_parent() {
        let err = parse("a [0, 1] [0]\na | ghost in {x}").unwrap_err();
        assert_eq!(err, PcsError::UnknownParameter("ghost".into()));
    }

    #[test]
    fn forbidden_value_outside_domain() {
        let err = parse("a {x, y} [x]\n{a=z}").unwrap_err();
        assert!(matches!(err, PcsError::InvalidValue { .. }));
    }

    #[test]
    fn empty_text_gives_empty_space() {
        let space = parse("# nothing here\n\n").unwrap();
        assert!(space.is_empty());
    }
}
