//! Scalar classifier
//!
//! Resolves the type of a plain (unquoted) YAML scalar. The rules follow the
//! YAML 1.1 resolver closely, with one divergence: any token that looks like
//! prose is a string unless it is one of a handful of short reserved words.
//! Mapping keys are never classified; the loader keeps them as literal text,
//! which is what keeps a workflow's `on:` trigger key intact.
//!
//! Rules are evaluated in the order of [`RULES`]; the first rule that returns
//! a value decides. Classification is total: malformed dates and timestamps
//! degrade to strings instead of failing.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone};
use regex::{Captures, Regex};


/// Tokens shaped like prose (letters or punctuation up front)
static WORD_LIKE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A[^\d.:\-]?[A-Za-z_\s!@#$%^&*(){}<>|/\\~;=]+").unwrap()
});

static TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\A(?P<year>-?\d{4})-(?P<month>\d{1,2})-(?P<day>\d{1,2})(?:[Tt]|\s+)(?P<hour>\d{1,2}):(?P<minute>\d\d):(?P<second>\d\d)(?:\.(?P<frac>\d*))?(?:\s*(?P<tz>Z|[-+]\d{1,2}:?(?:\d\d)?))?\z",
    )
    .unwrap()
});

static DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A(\d{4})-(1[012]|0\d|\d)-([12]\d|3[01]|0\d|\d)\z").unwrap()
});

static SEXAGESIMAL_INT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A[-+]?[0-9][0-9_]*(?::[0-5]?[0-9])+\z").unwrap());

static SEXAGESIMAL_FLOAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A[-+]?[0-9][0-9_]*(?::[0-5]?[0-9])+\.[0-9_]*\z").unwrap());

static FLOAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A[-+]?(?:[0-9][0-9_,]*)?\.[0-9]*(?:[eE][-+][0-9]+)?\z").unwrap()
});

static INTEGER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\A(?:[-+]?0b[01_]+|[-+]?0[0-7_]+|[-+]?(?:0|[1-9][0-9_]*)|[-+]?0x[0-9a-fA-F_]+)\z",
    )
    .unwrap()
});

/// Interned symbolic atom
///
/// Atoms produced by the same [`Classifier`] share one allocation per name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Atom(Arc<str>);

impl Atom {
    pub fn name(&self) -> &str {
        &self.0
    }

    /// True when both atoms point at the same interned name
    pub fn same_interned(&self, other: &Atom) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.0)
    }
}

/// Resolved value of a scalar token
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Timestamp(DateTime<FixedOffset>),
    Date(NaiveDate),
    Atom(Atom),
    Str(String),
}

impl ScalarValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            ScalarValue::Null => "null",
            ScalarValue::Bool(_) => "boolean",
            ScalarValue::Int(_) => "integer",
            ScalarValue::Float(_) => "float",
            ScalarValue::Timestamp(_) => "timestamp",
            ScalarValue::Date(_) => "date",
            ScalarValue::Atom(_) => "atom",
            ScalarValue::Str(_) => "string",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScalarValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ScalarValue::Null)
    }
}

impl From<&str> for ScalarValue {
    fn from(s: &str) -> Self {
        ScalarValue::Str(s.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(s: String) -> Self {
        ScalarValue::Str(s)
    }
}

/// Canonical text form; for everything but strings this re-classifies to
/// the same value.
impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Null => f.write_str("null"),
            ScalarValue::Bool(b) => write!(f, "{}", b),
            ScalarValue::Int(i) => write!(f, "{}", i),
            ScalarValue::Float(x) => f.write_str(&format_float(*x)),
            ScalarValue::Timestamp(ts) => {
                f.write_str(&ts.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            ScalarValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            ScalarValue::Atom(a) => write!(f, "{}", a),
            ScalarValue::Str(s) => f.write_str(s),
        }
    }
}

/// Format a float so that it always carries a decimal point and a signed
/// exponent, which keeps it inside the float grammar on re-load.
pub(crate) fn format_float(value: f64) -> String {
    if value.is_nan() {
        return ".nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { ".inf" } else { "-.inf" }.to_string();
    }

    let text = format!("{:?}", value);
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let mantissa = if mantissa.contains('.') {
                mantissa.to_string()
            } else {
                format!("{}.0", mantissa)
            };
            let exponent = if exponent.starts_with('-') {
                exponent.to_string()
            } else {
                format!("+{}", exponent)
            };
            format!("{}e{}", mantissa, exponent)
        }
        None => text,
    }
}

/// Which rule decided a classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Empty,
    WordLike,
    Timestamp,
    Date,
    SpecialFloat,
    Atom,
    SexagesimalInt,
    SexagesimalFloat,
    Float,
    Integer,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RuleKind::Empty => "empty",
            RuleKind::WordLike => "word-like",
            RuleKind::Timestamp => "timestamp",
            RuleKind::Date => "date",
            RuleKind::SpecialFloat => "special-float",
            RuleKind::Atom => "atom",
            RuleKind::SexagesimalInt => "sexagesimal-int",
            RuleKind::SexagesimalFloat => "sexagesimal-float",
            RuleKind::Float => "float",
            RuleKind::Integer => "integer",
        };
        f.write_str(name)
    }
}

/// A classified token together with the rule that decided it
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub value: ScalarValue,
    pub rule: RuleKind,
}

pub(crate) type RuleFn = fn(&mut Classifier, &str) -> Option<ScalarValue>;

/// Classification precedence. A rule returns `None` to pass the token on.
pub(crate) const RULES: [(RuleKind, RuleFn); 10] = [
    (RuleKind::Empty, Classifier::empty_rule),
    (RuleKind::WordLike, Classifier::word_rule),
    (RuleKind::Timestamp, Classifier::timestamp_rule),
    (RuleKind::Date, Classifier::date_rule),
    (RuleKind::SpecialFloat, Classifier::special_float_rule),
    (RuleKind::Atom, Classifier::atom_rule),
    (RuleKind::SexagesimalInt, Classifier::sexagesimal_int_rule),
    (RuleKind::SexagesimalFloat, Classifier::sexagesimal_float_rule),
    (RuleKind::Float, Classifier::float_rule),
    (RuleKind::Integer, Classifier::integer_rule),
];

/// Scalar classifier with a per-instance memo and atom table
///
/// Build one per transcoding run; nothing is shared between instances.
#[derive(Debug, Default)]
pub struct Classifier {
    memo: HashMap<String, Classification>,
    atoms: HashMap<String, Atom>,
}

impl Classifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify a plain scalar token
    pub fn classify(&mut self, token: &str) -> ScalarValue {
        self.classify_with_rule(token).value
    }

    /// Classify a token and report which rule decided it
    pub fn classify_with_rule(&mut self, token: &str) -> Classification {
        if let Some(hit) = self.memo.get(token) {
            return hit.clone();
        }

        let classification = RULES
            .iter()
            .find_map(|(rule, apply)| {
                apply(self, token).map(|value| Classification { value, rule: *rule })
            })
            .unwrap_or_else(|| Classification {
                value: ScalarValue::Str(token.to_string()),
                rule: RuleKind::Integer,
            });

        if !token.is_empty() {
            self.memo.insert(token.to_string(), classification.clone());
        }
        classification
    }

    /// True when `text` written without quotes would load back as the same string
    pub fn is_plain_string(&mut self, text: &str) -> bool {
        matches!(self.classify(text), ScalarValue::Str(ref s) if s == text)
    }

    /// Number of memoized tokens
    pub fn cached_tokens(&self) -> usize {
        self.memo.len()
    }

    fn intern(&mut self, name: &str) -> Atom {
        self.atoms
            .entry(name.to_string())
            .or_insert_with(|| Atom(Arc::from(name)))
            .clone()
    }

    fn empty_rule(&mut self, token: &str) -> Option<ScalarValue> {
        token.is_empty().then_some(ScalarValue::Null)
    }

    fn word_rule(&mut self, token: &str) -> Option<ScalarValue> {
        if !(WORD_LIKE.is_match(token) || token.contains('\n')) {
            return None;
        }

        let string = || Some(ScalarValue::Str(token.to_string()));
        if token.chars().count() > 5 {
            return string();
        }

        let lower = token.to_ascii_lowercase();
        match lower.chars().next() {
            Some('y' | 't' | 'o' | 'n' | 'f' | '~') => {}
            _ => return string(),
        }

        match lower.as_str() {
            "~" | "null" => Some(ScalarValue::Null),
            "yes" | "true" | "on" => Some(ScalarValue::Bool(true)),
            "no" | "false" | "off" => Some(ScalarValue::Bool(false)),
            _ => string(),
        }
    }

    fn timestamp_rule(&mut self, token: &str) -> Option<ScalarValue> {
        let caps = TIMESTAMP.captures(token)?;
        Some(
            parse_timestamp(&caps)
                .map(ScalarValue::Timestamp)
                .unwrap_or_else(|| ScalarValue::Str(token.to_string())),
        )
    }

    fn date_rule(&mut self, token: &str) -> Option<ScalarValue> {
        let caps = DATE.captures(token)?;
        let date = (|| {
            let year = caps[1].parse().ok()?;
            let month = caps[2].parse().ok()?;
            let day = caps[3].parse().ok()?;
            NaiveDate::from_ymd_opt(year, month, day)
        })();
        Some(
            date.map(ScalarValue::Date)
                .unwrap_or_else(|| ScalarValue::Str(token.to_string())),
        )
    }

    fn special_float_rule(&mut self, token: &str) -> Option<ScalarValue> {
        match token.to_ascii_lowercase().as_str() {
            ".inf" => Some(ScalarValue::Float(f64::INFINITY)),
            "-.inf" => Some(ScalarValue::Float(f64::NEG_INFINITY)),
            ".nan" => Some(ScalarValue::Float(f64::NAN)),
            _ => None,
        }
    }

    fn atom_rule(&mut self, token: &str) -> Option<ScalarValue> {
        let rest = token.strip_prefix(':')?;
        if rest.is_empty() {
            return None;
        }

        let name = quoted_atom_name(rest).unwrap_or(rest);
        Some(ScalarValue::Atom(self.intern(name)))
    }

    fn sexagesimal_int_rule(&mut self, token: &str) -> Option<ScalarValue> {
        if !SEXAGESIMAL_INT.is_match(token) {
            return None;
        }
        Some(
            sexagesimal_int(token)
                .map(ScalarValue::Int)
                .unwrap_or_else(|| ScalarValue::Str(token.to_string())),
        )
    }

    fn sexagesimal_float_rule(&mut self, token: &str) -> Option<ScalarValue> {
        if !SEXAGESIMAL_FLOAT.is_match(token) {
            return None;
        }
        Some(
            sexagesimal_float(token)
                .map(ScalarValue::Float)
                .unwrap_or_else(|| ScalarValue::Str(token.to_string())),
        )
    }

    fn float_rule(&mut self, token: &str) -> Option<ScalarValue> {
        if !FLOAT.is_match(token) {
            return None;
        }
        if matches!(token, "." | "+." | "-.") {
            return Some(ScalarValue::Str(token.to_string()));
        }

        let mut cleaned: String = token.chars().filter(|c| !matches!(c, ',' | '_')).collect();
        if cleaned.ends_with('.') {
            cleaned.pop();
        }
        Some(
            cleaned
                .parse::<f64>()
                .map(ScalarValue::Float)
                .unwrap_or_else(|_| ScalarValue::Str(token.to_string())),
        )
    }

    fn integer_rule(&mut self, token: &str) -> Option<ScalarValue> {
        let cleaned: String = token.chars().filter(|c| !matches!(c, ',' | '_')).collect();
        Some(
            parse_int(&cleaned)
                .map(ScalarValue::Int)
                .unwrap_or_else(|| ScalarValue::Str(token.to_string())),
        )
    }
}

/// `"name"` or `'name'` after the leading colon; the closing quote is the
/// last matching quote character.
fn quoted_atom_name(rest: &str) -> Option<&str> {
    let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let inner = &rest[1..];
    let end = inner.rfind(quote)?;
    let name = &inner[..end];
    Some(name.strip_prefix(':').unwrap_or(name))
}

fn split_sign(token: &str) -> (bool, &str) {
    match token.as_bytes().first() {
        Some(b'-') => (true, &token[1..]),
        Some(b'+') => (false, &token[1..]),
        _ => (false, token),
    }
}

fn sexagesimal_int(token: &str) -> Option<i64> {
    let (negative, digits) = split_sign(token);
    let mut total: i64 = 0;
    for group in digits.split(':') {
        let part: i64 = group.replace('_', "").parse().ok()?;
        total = total.checked_mul(60)?.checked_add(part)?;
    }
    Some(if negative { -total } else { total })
}

fn sexagesimal_float(token: &str) -> Option<f64> {
    let (negative, digits) = split_sign(token);
    let mut total = 0.0_f64;
    for group in digits.split(':') {
        let part: f64 = group.replace('_', "").parse().ok()?;
        total = total * 60.0 + part;
    }
    Some(if negative { -total } else { total })
}

fn parse_int(cleaned: &str) -> Option<i64> {
    if !INTEGER.is_match(cleaned) {
        return None;
    }

    let (negative, body) = split_sign(cleaned);
    let (radix, digits) = if let Some(d) = body.strip_prefix("0b") {
        (2, d)
    } else if let Some(d) = body.strip_prefix("0x") {
        (16, d)
    } else if body.len() > 1 && body.starts_with('0') {
        (8, &body[1..])
    } else {
        (10, body)
    };

    let magnitude = i128::from_str_radix(digits, radix).ok()?;
    i64::try_from(if negative { -magnitude } else { magnitude }).ok()
}

fn parse_timestamp(caps: &Captures<'_>) -> Option<DateTime<FixedOffset>> {
    let date = NaiveDate::from_ymd_opt(
        caps["year"].parse().ok()?,
        caps["month"].parse().ok()?,
        caps["day"].parse().ok()?,
    )?;
    let nanos = caps
        .name("frac")
        .map(|m| fraction_nanos(m.as_str()))
        .unwrap_or(0);
    let time = NaiveTime::from_hms_nano_opt(
        caps["hour"].parse().ok()?,
        caps["minute"].parse().ok()?,
        caps["second"].parse().ok()?,
        nanos,
    )?;
    let offset = match caps.name("tz") {
        Some(tz) => parse_offset(tz.as_str())?,
        None => FixedOffset::east_opt(0)?,
    };
    offset
        .from_local_datetime(&NaiveDateTime::new(date, time))
        .single()
}

fn fraction_nanos(digits: &str) -> u32 {
    let mut padded: String = digits.chars().take(9).collect();
    while padded.len() < 9 {
        padded.push('0');
    }
    padded.parse().unwrap_or(0)
}

fn parse_offset(tz: &str) -> Option<FixedOffset> {
    if tz == "Z" {
        return FixedOffset::east_opt(0);
    }

    let (negative, rest) = split_sign(tz);
    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None if rest.len() > 2 => rest.split_at(rest.len() - 2),
        None => (rest, "0"),
    };
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = if minutes.is_empty() { 0 } else { minutes.parse().ok()? };
    let seconds = hours * 3600 + minutes * 60;
    FixedOffset::east_opt(if negative { -seconds } else { seconds })
}
