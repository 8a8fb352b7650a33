//! Textual rendering of call arguments for history records.
//!
//! Arguments are rendered as a positional tuple literal, e.g. `('a',)` for a
//! single text argument or `(1, b'\x00')` for two. Replay prints them as
//! `name(*args) -> output`.

/// Literal-style rendering of a single argument.
pub trait Repr {
    fn repr(&self) -> String;
}

/// Rendering of a complete positional argument list.
pub trait CallArgs {
    fn args_repr(&self) -> String;
}

impl Repr for str {
    fn repr(&self) -> String {
        quote_text(self)
    }
}

impl Repr for String {
    fn repr(&self) -> String {
        quote_text(self)
    }
}

impl Repr for [u8] {
    fn repr(&self) -> String {
        quote_bytes(self)
    }
}

impl Repr for Vec<u8> {
    fn repr(&self) -> String {
        quote_bytes(self)
    }
}

impl Repr for i64 {
    fn repr(&self) -> String {
        self.to_string()
    }
}

impl Repr for f64 {
    fn repr(&self) -> String {
        format_float(*self)
    }
}

impl<T: Repr + ?Sized> Repr for &T {
    fn repr(&self) -> String {
        (**self).repr()
    }
}

impl CallArgs for () {
    fn args_repr(&self) -> String {
        "()".to_string()
    }
}

impl<A: Repr> CallArgs for (A,) {
    fn args_repr(&self) -> String {
        format!("({},)", self.0.repr())
    }
}

impl<A: Repr, B: Repr> CallArgs for (A, B) {
    fn args_repr(&self) -> String {
        format!("({}, {})", self.0.repr(), self.1.repr())
    }
}

impl<A: Repr, B: Repr, C: Repr> CallArgs for (A, B, C) {
    fn args_repr(&self) -> String {
        format!("({}, {}, {})", self.0.repr(), self.1.repr(), self.2.repr())
    }
}

/// Pick the quote character: single quotes unless the text contains a
/// single quote and no double quote.
fn pick_quote(has_single: bool, has_double: bool) -> char {
    if has_single && !has_double {
        '"'
    } else {
        '\''
    }
}

fn quote_text(text: &str) -> String {
    let quote = pick_quote(text.contains('\''), text.contains('"'));
    let mut out = String::with_capacity(text.len() + 2);
    out.push(quote);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 || c as u32 == 0x7f => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

fn quote_bytes(bytes: &[u8]) -> String {
    let quote = pick_quote(bytes.contains(&b'\''), bytes.contains(&b'"'));
    let mut out = String::with_capacity(bytes.len() + 3);
    out.push('b');
    out.push(quote);
    for &b in bytes {
        match b {
            b'\\' => out.push_str("\\\\"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            b if b as char == quote => {
                out.push('\\');
                out.push(b as char);
            }
            0x20..=0x7e => out.push(b as char),
            b => out.push_str(&format!("\\x{:02x}", b)),
        }
    }
    out.push(quote);
    out
}

/// Shortest round-trip rendering, always showing a fractional part or
/// exponent so floats never read back as integers.
///
/// Exponents carry an explicit sign and at least two digits: `1e-07`,
/// `1.5e+16`.
pub(crate) fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let text = format!("{:?}", value);
    match text.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exp),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => text,
    }
}
