//! Line repair rules.
//!
//! Simulator sample logs are not assumed well-formed. Three repairs run
//! line-by-line, in fixed order, before tokenization:
//!
//! 1. raw non-ASCII byte runs -> `NON_ASCII` placeholder token
//! 2. known multi-word field values -> underscore-joined single tokens
//! 3. corrupted float literals (MSVC printf family) -> `ERR_FLOAT` marker
//!
//! Anything beyond these enumerated substitutions is NOT repaired; it
//! surfaces as a parse error with line context.

/// Placeholder for non-ASCII byte runs
pub const NON_ASCII_TOKEN: &str = "NON_ASCII";

/// Marker for corrupted float literals
pub const ERR_FLOAT_TOKEN: &str = "ERR_FLOAT";

/// Closed substitution list of known multi-word field values.
///
/// The sample log is whitespace-delimited, but some simulator device names
/// contain spaces; collapsing them keeps the column count stable.
pub const PHRASE_REWRITES: &[(&str, &str)] = &[
    ("Rear View Mirror", "Rear_View_Mirror"),
    ("Left Wing Mirror", "Left_Wing_Mirror"),
    ("Right Wing Mirror", "Right_Wing_Mirror"),
    ("Steering Wheel", "Steering_Wheel"),
    ("Head Unit", "Head_Unit"),
];

/// Corrupted float literals a Windows simulator logger emits.
// Negative variants first: each is a superstring of its positive twin.
pub const FLOAT_SENTINELS: &[&str] = &[
    "-1.#IND00",
    "1.#IND00",
    "-1.#INF00",
    "1.#INF00",
    "-1.#QNAN0",
    "1.#QNAN0",
];

/// Repair one raw log line.
///
/// Returns valid tokenizable text; never fails. Carriage returns are
/// stripped along the way.
pub fn repair_line(raw: &[u8]) -> String {
    let ascii = replace_non_ascii(raw);
    let rewritten = rewrite_phrases(&ascii);
    rewrite_float_sentinels(&rewritten)
}

/// Replace maximal runs of non-ASCII bytes with the placeholder token.
fn replace_non_ascii(raw: &[u8]) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_run = false;

    for &byte in raw {
        if byte.is_ascii() {
            if byte != b'\r' {
                out.push(byte as char);
            }
            in_run = false;
        } else if !in_run {
            out.push_str(NON_ASCII_TOKEN);
            in_run = true;
        }
    }

    out
}

/// Apply the closed phrase-rewrite table.
fn rewrite_phrases(line: &str) -> String {
    let mut out = line.to_string();
    for (phrase, token) in PHRASE_REWRITES {
        if out.contains(phrase) {
            out = out.replace(phrase, token);
        }
    }
    out
}

/// Replace corrupted float literals with the error marker.
fn rewrite_float_sentinels(line: &str) -> String {
    let mut out = line.to_string();
    for sentinel in FLOAT_SENTINELS {
        if out.contains(sentinel) {
            out = out.replace(sentinel, ERR_FLOAT_TOKEN);
        }
    }
    out
}
