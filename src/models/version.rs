//! Version parsing and version ranges used by release channels.

use semver::Version;
use std::cmp::Ordering;
use std::error::Error;
use std::str::FromStr;

/// Parse leniently: surrounding whitespace, a leading `v` and missing
/// minor or patch components are accepted.
///
/// # Examples
/// ```
/// use cluster_defaults::models::parse_tolerant;
/// assert_eq!(parse_tolerant("v1.5").unwrap(), semver::Version::new(1, 5, 0));
/// ```
pub fn parse_tolerant(input: &str) -> Result<Version, semver::Error> {
    let input = input.trim();
    let input = input.strip_prefix('v').unwrap_or(input);
    let end = input.find(|c: char| c == '-' || c == '+').unwrap_or(input.len());
    let (core, suffix) = input.split_at(end);
    match core.split('.').count() {
        1 => Version::parse(&format!("{core}.0.0{suffix}")),
        2 => Version::parse(&format!("{core}.0{suffix}")),
        _ => Version::parse(input),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

#[derive(Debug, Clone)]
struct Comparator {
    op: Op,
    version: Version,
}

impl Comparator {
    fn parse(token: &str) -> Result<Comparator, Box<dyn Error>> {
        let (op, rest) = [
            (">=", Op::Ge),
            ("<=", Op::Le),
            ("!=", Op::Ne),
            ("==", Op::Eq),
            (">", Op::Gt),
            ("<", Op::Lt),
            ("=", Op::Eq),
        ]
        .iter()
        .find_map(|(prefix, op)| token.strip_prefix(*prefix).map(|rest| (*op, rest)))
        .unwrap_or((Op::Eq, token));

        let version =
            parse_tolerant(rest).map_err(|e| format!("Invalid version {rest:?}: {e}"))?;
        Ok(Comparator { op, version })
    }

    // build metadata never affects a match
    fn matches(&self, v: &Version) -> bool {
        let ord = v.cmp_precedence(&self.version);
        match self.op {
            Op::Eq => ord == Ordering::Equal,
            Op::Ne => ord != Ordering::Equal,
            Op::Gt => ord == Ordering::Greater,
            Op::Ge => ord != Ordering::Less,
            Op::Lt => ord == Ordering::Less,
            Op::Le => ord != Ordering::Greater,
        }
    }
}

/// A version range such as `>=1.5.0 <1.6.0 || >=2.0.0`.
///
/// Whitespace-separated comparators must all match; `||` separates
/// alternatives of which any may match. Pre-releases compare by plain
/// precedence, so `>=1.5.0-alpha.1` matches `1.5.0-beta`.
#[derive(Debug, Clone)]
pub struct VersionRange {
    alternatives: Vec<Vec<Comparator>>,
}

impl VersionRange {
    pub fn parse(input: &str) -> Result<VersionRange, Box<dyn Error>> {
        let mut alternatives = Vec::new();
        for part in input.split("||") {
            let mut comparators = Vec::new();
            let mut pending_op: Option<&str> = None;
            for token in part.split_whitespace() {
                if token.chars().all(|c| "<>=!".contains(c)) {
                    // operator separated from its version by a space
                    pending_op = Some(token);
                    continue;
                }
                let token = match pending_op.take() {
                    Some(op) => format!("{op}{token}"),
                    None => token.to_string(),
                };
                comparators.push(Comparator::parse(&token)?);
            }
            if pending_op.is_some() || comparators.is_empty() {
                return Err(format!("Invalid version range {input:?}").into());
            }
            alternatives.push(comparators);
        }
        Ok(VersionRange { alternatives })
    }

    pub fn matches(&self, version: &Version) -> bool {
        self.alternatives
            .iter()
            .any(|all| all.iter().all(|c| c.matches(version)))
    }
}

impl FromStr for VersionRange {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VersionRange::parse(s)
    }
}
