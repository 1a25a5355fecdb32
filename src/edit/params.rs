//! Declared parameters per operation and canonical text regeneration.
//!
//! Only parameters that differ from their declared default are written back,
//! so repeated trips through the editor never pile up `key=default` pairs.

use crate::catalog::normalize;
use crate::diagnostics;
use crate::op::args::{Arg, join_args, unquote};
use crate::op::OperationNode;
use once_cell::sync::Lazy;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Real,
    Int,
    Bool,
    Text,
    List,
}

#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub default: &'static str,
}

const fn p(name: &'static str, kind: ParamKind, default: &'static str) -> ParamSpec {
    ParamSpec {
        name,
        kind,
        default,
    }
}

use ParamKind::{Bool, Int, List, Real, Text};

const APODIZE: &[ParamSpec] = &[
    p("lb", Real, "0.0"),
    p("gb", Real, "0.0"),
    p("sb", Bool, "false"),
    p("offset", Real, "0.5"),
    p("fPoint", Real, "0.5"),
];
const BLACKMAN: &[ParamSpec] = &[p("end", Real, "1.0"), p("c", Real, "0.5"), p("apodSize", Int, "0")];
const EXPD: &[ParamSpec] = &[p("lb", Real, "1.0"), p("c", Real, "0.5"), p("apodSize", Int, "0")];
const GM: &[ParamSpec] = &[
    p("g1", Real, "1.0"),
    p("g2", Real, "1.0"),
    p("g3", Real, "0.0"),
    p("c", Real, "0.5"),
    p("apodSize", Int, "0"),
];
const GMB: &[ParamSpec] = &[
    p("gb", Real, "0.0"),
    p("lb", Real, "0.0"),
    p("c", Real, "0.5"),
    p("apodSize", Int, "0"),
];
const KAISER: &[ParamSpec] = &[
    p("offset", Real, "0.5"),
    p("beta", Real, "10.0"),
    p("end", Real, "1.0"),
    p("c", Real, "0.5"),
    p("apodSize", Int, "0"),
];
const SINEBELL: &[ParamSpec] = &[
    p("offset", Real, "0.5"),
    p("end", Real, "1.0"),
    p("power", Int, "1"),
    p("c", Real, "0.5"),
    p("apodSize", Int, "0"),
];
const TM: &[ParamSpec] = &[p("pt1", Int, "0"), p("pt2", Int, "0"), p("c", Real, "0.5")];
const TRI: &[ParamSpec] = &[
    p("pt1", Int, "0"),
    p("lHeight", Real, "1.0"),
    p("rHeight", Real, "0.0"),
    p("c", Real, "0.5"),
];
const ZF: &[ParamSpec] = &[p("factor", Int, "1"), p("size", Int, "-1"), p("pad", Int, "0")];
const FT: &[ParamSpec] = &[
    p("negateImaginary", Bool, "false"),
    p("negatePairs", Bool, "false"),
    p("auto", Bool, "false"),
];
const RFT: &[ParamSpec] = &[p("inverse", Bool, "false")];
const PHASE: &[ParamSpec] = &[p("ph0", Real, "0.0"), p("ph1", Real, "0.0"), p("dimag", Bool, "false")];
const PHASEND: &[ParamSpec] = &[p("ph0", Real, "0.0"), p("ph1", Real, "0.0")];
const AUTOPHASE: &[ParamSpec] = &[
    p("firstOrder", Bool, "false"),
    p("maxMode", Bool, "false"),
    p("winSize", Int, "2"),
    p("ratio", Real, "25.0"),
];
const BCWHIT: &[ParamSpec] = &[p("lamb", Real, "5000.0"), p("order", Int, "1")];
const BCPOLY: &[ParamSpec] = &[p("order", Int, "2"), p("winSize", Int, "16")];
const BCSINE: &[ParamSpec] = &[p("order", Int, "1"), p("winSize", Int, "16")];
const BCMED: &[ParamSpec] = &[p("frac", Real, "0.1"), p("wrap", Bool, "false")];
const NESTA: &[ParamSpec] = &[
    p("iterations", Int, "30"),
    p("tolFinal", Real, "2.5"),
    p("muFinal", Real, "6.0"),
    p("logToFile", Bool, "false"),
    p("zeroAtStart", Bool, "true"),
];
const IST: &[ParamSpec] = &[
    p("threshold", Real, "0.98"),
    p("iterations", Int, "500"),
    p("alg", Text, "std"),
];
const GRINS: &[ParamSpec] = &[
    p("noise", Real, "0.0"),
    p("scale", Real, "1.0"),
    p("zf", Int, "0"),
    p("preserve", Bool, "false"),
    p("synthetic", Bool, "false"),
];
const LP: &[ParamSpec] = &[
    p("fitStart", Int, "0"),
    p("fitEnd", Int, "0"),
    p("predictStart", Int, "0"),
    p("predictEnd", Int, "0"),
    p("ncoef", Int, "0"),
];
const EXTRACT: &[ParamSpec] = &[p("start", Int, "0"), p("end", Int, "0"), p("mode", Text, "region")];
const REGIONS: &[ParamSpec] = &[p("regions", List, "[]"), p("type", Text, "frac")];
const SCALE: &[ParamSpec] = &[p("value", Real, "1.0"), p("first", Int, "0"), p("last", Int, "-1")];
const DCFID: &[ParamSpec] = &[p("fraction", Real, "0.06")];
const TDSS: &[ParamSpec] = &[p("winSize", Int, "31"), p("nPasses", Int, "3"), p("shift", Real, "0.0")];
const COADD: &[ParamSpec] = &[p("coef", List, "[]")];

static SCHEMAS: Lazy<HashMap<&'static str, &'static [ParamSpec]>> = Lazy::new(|| {
    HashMap::from([
        ("APODIZE", APODIZE),
        ("BLACKMAN", BLACKMAN),
        ("EXPD", EXPD),
        ("GM", GM),
        ("GMB", GMB),
        ("KAISER", KAISER),
        ("SB", SINEBELL),
        ("SINEBELL", SINEBELL),
        ("TM", TM),
        ("TRI", TRI),
        ("ZF", ZF),
        ("FT", FT),
        ("RFT", RFT),
        ("PHASE", PHASE),
        ("PHASEND", PHASEND),
        ("AUTOPHASE", AUTOPHASE),
        ("BCWHIT", BCWHIT),
        ("BCPOLY", BCPOLY),
        ("BCSINE", BCSINE),
        ("BCMED", BCMED),
        ("NESTA", NESTA),
        ("IST", IST),
        ("GRINS", GRINS),
        ("LP", LP),
        ("LPR", LP),
        ("EXTRACT", EXTRACT),
        ("REGIONS", REGIONS),
        ("SCALE", SCALE),
        ("DCFID", DCFID),
        ("TDSS", TDSS),
        ("COADD", COADD),
    ])
});

/// Declared parameters of an operation, empty when none are declared.
pub fn schema_for(name: &str) -> &'static [ParamSpec] {
    SCHEMAS.get(normalize(name).as_str()).copied().unwrap_or(&[])
}

pub fn param_spec(op: &str, param: &str) -> Option<ParamSpec> {
    schema_for(op).iter().find(|s| s.name == param).copied()
}

/// Operations carrying coupled zero- and first-order phase parameters.
pub fn is_phase_family(name: &str) -> bool {
    let schema = schema_for(name);
    schema.iter().any(|s| s.name == "ph0") && schema.iter().any(|s| s.name == "ph1")
}

/// Parse a real-valued argument, logging and returning None on failure.
pub fn parse_real(param: &str, value: &str) -> Option<f64> {
    match unquote(value).parse::<f64>() {
        Ok(v) => Some(v),
        Err(e) => {
            diagnostics::warn(format!("ignoring non-numeric {}={:?}: {}", param, value, e));
            None
        }
    }
}

/// Render a real for script text: at most six decimals, always with a point.
pub fn format_real(v: f64) -> String {
    let scaled = v * 1e6;
    if !scaled.is_finite() {
        return format!("{:?}", v);
    }
    let r = scaled.round() / 1e6;
    let r = if r == 0.0 { 0.0 } else { r };
    format!("{:?}", r)
}

impl ParamSpec {
    /// True when `value` equals this parameter's default. Unparseable numbers
    /// count as unset, i.e. default.
    pub fn is_default(&self, value: &str) -> bool {
        match self.kind {
            ParamKind::Real => match (parse_real(self.name, value), self.default.parse::<f64>()) {
                (Some(v), Ok(d)) => (v - d).abs() < 1e-12,
                _ => true,
            },
            ParamKind::Int => match unquote(value).parse::<i64>() {
                Ok(v) => self.default.parse::<i64>().is_ok_and(|d| d == v),
                Err(e) => {
                    diagnostics::warn(format!(
                        "ignoring non-integer {}={:?}: {}",
                        self.name, value, e
                    ));
                    true
                }
            },
            ParamKind::Bool => unquote(value).eq_ignore_ascii_case(self.default),
            ParamKind::Text => unquote(value) == self.default,
            ParamKind::List => {
                let strip = |s: &str| s.chars().filter(|c| !c.is_whitespace()).collect::<String>();
                strip(value) == strip(self.default)
            }
        }
    }
}

/// Rebuild `NAME(k=v,...)` for `op` with `edited` values applied.
///
/// Positional arguments stay first, in their original order, so the call
/// remains valid. Declared parameters follow in declared order and are dropped
/// when at their default. Undeclared keyed arguments already on the node come
/// next in their existing order; undeclared edited keys the node lacks come last.
pub fn regenerate_text(op: &OperationNode, edited: &BTreeMap<String, String>) -> String {
    let schema = schema_for(&op.name);
    let declared = |key: &str| schema.iter().any(|s| s.name == key);
    let mut args: Vec<Arg> = op.args.iter().filter(|a| a.key.is_none()).cloned().collect();

    for spec in schema {
        let value = edited
            .get(spec.name)
            .map(String::as_str)
            .or_else(|| op.arg(spec.name));
        if let Some(v) = value {
            if !spec.is_default(v) {
                args.push(Arg::keyed(spec.name, v));
            }
        }
    }

    for arg in &op.args {
        match &arg.key {
            Some(k) if declared(k.as_str()) => {}
            Some(k) => {
                let value = edited.get(k).cloned().unwrap_or_else(|| arg.value.clone());
                args.push(Arg::keyed(k.clone(), value));
            }
            None => {}
        }
    }

    for (k, v) in edited {
        if !declared(k.as_str()) && op.arg(k).is_none() {
            args.push(Arg::keyed(k.clone(), v.clone()));
        }
    }

    format!("{}({})", op.name, join_args(&args))
}
