// mallow-parser - Printer for Mallow
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Renders values back to text.
//!
//! With `readable = true` the output re-reads to an equal value for every
//! value the reader can produce. With `readable = false` strings are written
//! raw, which is what `str` and `println` want.

use std::fmt::Write;

use crate::stack::ensure_sufficient_stack;
use crate::value::{MallowAtom, MallowVal};

/// Render a value to a string.
pub fn pr_str(val: &MallowVal, readable: bool) -> String {
    let mut printer = Printer::new(readable);
    printer.write_val(val);
    printer.out
}

/// Render each value and join the results with `sep`.
pub fn pr_seq<'a>(
    vals: impl IntoIterator<Item = &'a MallowVal>,
    readable: bool,
    sep: &str,
) -> String {
    let mut printer = Printer::new(readable);
    for (i, val) in vals.into_iter().enumerate() {
        if i > 0 {
            printer.out.push_str(sep);
        }
        printer.write_val(val);
    }
    printer.out
}

/// Output buffer plus the atoms currently being written.
///
/// An atom can hold itself (directly or through a collection), so an atom
/// met again while its contents are still being written prints as
/// `(atom ...)`.
struct Printer {
    out: String,
    readable: bool,
    open_atoms: Vec<usize>,
}

impl Printer {
    fn new(readable: bool) -> Self {
        Printer {
            out: String::new(),
            readable,
            open_atoms: Vec::new(),
        }
    }

    fn write_val(&mut self, val: &MallowVal) {
        ensure_sufficient_stack(|| self.write_val_inner(val));
    }

    fn write_val_inner(&mut self, val: &MallowVal) {
        match val {
            MallowVal::Nil => self.out.push_str("nil"),
            MallowVal::Bool(b) => {
                let _ = write!(self.out, "{}", b);
            }
            MallowVal::Int(n) => {
                let _ = write!(self.out, "{}", n);
            }
            MallowVal::Float(n) => write_float(&mut self.out, *n),
            MallowVal::String(s) => {
                if self.readable {
                    self.out.push('"');
                    escape_into(&mut self.out, s);
                    self.out.push('"');
                } else {
                    self.out.push_str(s);
                }
            }
            MallowVal::Symbol(sym) => self.out.push_str(sym.name()),
            MallowVal::Keyword(kw) => {
                self.out.push(':');
                self.out.push_str(kw.name());
            }
            MallowVal::List(items) => self.write_items("(", items.iter(), ")"),
            MallowVal::Vector(items) => self.write_items("[", items.iter(), "]"),
            MallowVal::Map(map) => {
                self.out.push('{');
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        self.out.push(' ');
                    }
                    self.write_val(k);
                    self.out.push(' ');
                    self.write_val(v);
                }
                self.out.push('}');
            }
            MallowVal::NativeFn(nf) => {
                let _ = write!(self.out, "#<native-fn {}>", nf.name());
            }
            MallowVal::Fn(f) => match &f.name {
                Some(name) => {
                    let _ = write!(self.out, "#<fn {}>", name);
                }
                None => self.out.push_str("#<fn>"),
            },
            MallowVal::Atom(a) => self.write_atom(a),
        }
    }

    fn write_atom(&mut self, atom: &MallowAtom) {
        let addr = atom.addr();
        if self.open_atoms.contains(&addr) {
            self.out.push_str("(atom ...)");
            return;
        }

        self.open_atoms.push(addr);
        self.out.push_str("(atom ");
        self.write_val(&atom.deref());
        self.out.push(')');
        self.open_atoms.pop();
    }

    fn write_items<'a>(
        &mut self,
        open: &str,
        items: impl Iterator<Item = &'a MallowVal>,
        close: &str,
    ) {
        self.out.push_str(open);
        for (i, item) in items.enumerate() {
            if i > 0 {
                self.out.push(' ');
            }
            self.write_val(item);
        }
        self.out.push_str(close);
    }
}

fn write_float(out: &mut String, n: f64) {
    if n.is_nan() {
        out.push_str("##NaN");
    } else if n.is_infinite() {
        out.push_str(if n > 0.0 { "##Inf" } else { "##-Inf" });
    } else if n.fract() == 0.0 {
        // Keep integral floats distinguishable from integers
        let _ = write!(out, "{}.0", n);
    } else {
        let _ = write!(out, "{}", n);
    }
}

fn escape_into(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
}
