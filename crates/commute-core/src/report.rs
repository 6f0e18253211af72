//! Condition classification and reporting.

use z3::ast::{Ast, Bool};
use z3::SatResult;

use commute_sym::{sat_of, simplify_deep, symnot};

pub struct ReportOptions {
    pub check_conds: bool,
    pub print_conds: bool,
    pub simplify_more: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Classification {
    /// The condition itself is unsat; nothing to report.
    Trivial,
    Always,
    Sometimes,
    /// No satisfiability checking was requested.
    Maybe,
    /// Printed condition text.
    Condition(String),
}

pub fn classify(cond: &Bool, opts: &ReportOptions) -> Classification {
    if opts.check_conds {
        if matches!(sat_of(cond), SatResult::Unsat) {
            return Classification::Trivial;
        }
        if matches!(sat_of(&symnot(cond)), SatResult::Unsat) {
            return Classification::Always;
        }
    }
    if opts.print_conds {
        let simplified = if opts.simplify_more {
            simplify_deep(cond)
        } else {
            cond.simplify()
        };
        return Classification::Condition(simplified.to_string());
    }
    if opts.check_conds {
        Classification::Sometimes
    } else {
        Classification::Maybe
    }
}

pub fn print_cond(msg: &str, cond: &Bool, opts: &ReportOptions) {
    match classify(cond, opts) {
        Classification::Trivial => {}
        Classification::Always => println!("  {msg}: always"),
        Classification::Sometimes => println!("  {msg}: sometimes"),
        Classification::Maybe => println!("  {msg}: maybe"),
        Classification::Condition(text) => {
            println!("  {msg}:");
            for line in text.lines() {
                println!("    {line}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(check: bool, print: bool) -> ReportOptions {
        ReportOptions { check_conds: check, print_conds: print, simplify_more: false }
    }

    #[test]
    fn tautologies_are_always() {
        let cond = Bool::from_bool(true);
        assert_eq!(classify(&cond, &opts(true, false)), Classification::Always);
    }

    #[test]
    fn unsat_conditions_are_suppressed() {
        let cond = Bool::from_bool(false);
        assert_eq!(classify(&cond, &opts(true, false)), Classification::Trivial);
    }

    #[test]
    fn without_checking_everything_is_maybe() {
        let cond = Bool::from_bool(false);
        assert_eq!(classify(&cond, &opts(false, false)), Classification::Maybe);
    }

    #[test]
    fn contingent_conditions_are_sometimes() {
        use commute_sym::Env;
        use z3::ast::Int;
        let mut env = Env::new();
        let x = env.int_const("x", "value").unwrap();
        let cond = x.eq(&Int::from_i64(0));
        assert_eq!(classify(&cond, &opts(true, false)), Classification::Sometimes);
    }
}
