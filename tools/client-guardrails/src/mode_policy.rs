//! Mode-policy checks for API modules.
//!
//! API operations describe a request and a fallback, then hand both to the
//! dispatcher. Deciding between live and demo data belongs to the dispatcher
//! alone, so an operation must neither branch on the data mode nor drive the
//! transport itself.

use syn::visit::{self, Visit};

use crate::finding::Rule;
use crate::references::{is_test_only, item_attrs};

/// Methods that reveal the configured mode.
const MODE_METHODS: [&str; 4] = ["mode", "is_fake", "is_real", "is_hybrid"];

/// Types whose values encode the configured mode.
const MODE_TYPES: [&str; 2] = ["DataMode", "Dispatcher"];

/// Transport methods that bypass the dispatcher.
const TRANSPORT_METHODS: [&str; 2] = ["request", "request_json"];

/// Mode-policy breaches in `file`, as rule and detail pairs.
#[must_use]
pub fn check(file: &syn::File) -> Vec<(Rule, String)> {
    let mut checker = ModePolicy::default();
    checker.visit_file(file);
    checker.breaches
}

#[derive(Default)]
struct ModePolicy {
    breaches: Vec<(Rule, String)>,
    function: Option<String>,
}

impl ModePolicy {
    fn location(&self) -> String {
        self.function
            .as_deref()
            .map_or_else(|| "module scope".to_owned(), |name| format!("`{name}`"))
    }

    fn record(&mut self, rule: Rule, what: &str) {
        let detail = format!("{what} in {}", self.location());
        self.breaches.push((rule, detail));
    }

    fn within<F: FnOnce(&mut Self)>(&mut self, name: String, body: F) {
        let outer = self.function.replace(name);
        body(self);
        self.function = outer;
    }
}

impl<'ast> Visit<'ast> for ModePolicy {
    fn visit_item(&mut self, node: &'ast syn::Item) {
        if !is_test_only(item_attrs(node)) {
            visit::visit_item(self, node);
        }
    }

    fn visit_item_fn(&mut self, node: &'ast syn::ItemFn) {
        self.within(node.sig.ident.to_string(), |this| {
            visit::visit_item_fn(this, node);
        });
    }

    fn visit_impl_item_fn(&mut self, node: &'ast syn::ImplItemFn) {
        self.within(node.sig.ident.to_string(), |this| {
            visit::visit_impl_item_fn(this, node);
        });
    }

    fn visit_expr_if(&mut self, node: &'ast syn::ExprIf) {
        if mentions_mode(&node.cond) {
            self.record(Rule::ModeBranch, "`if` on the data mode");
        }
        visit::visit_expr_if(self, node);
    }

    fn visit_expr_match(&mut self, node: &'ast syn::ExprMatch) {
        let on_mode = mentions_mode(&node.expr)
            || node.arms.iter().any(|arm| {
                let mut finder = ModeMention::default();
                finder.visit_pat(&arm.pat);
                finder.found
            });
        if on_mode {
            self.record(Rule::ModeBranch, "`match` on the data mode");
        }
        visit::visit_expr_match(self, node);
    }

    fn visit_expr_method_call(&mut self, node: &'ast syn::ExprMethodCall) {
        let method = node.method.to_string();
        if TRANSPORT_METHODS.contains(&method.as_str()) {
            self.record(
                Rule::DirectTransport,
                &format!("`.{method}(..)` bypasses the dispatcher"),
            );
        }
        visit::visit_expr_method_call(self, node);
    }
}

fn mentions_mode(expr: &syn::Expr) -> bool {
    let mut finder = ModeMention::default();
    finder.visit_expr(expr);
    finder.found
}

#[derive(Default)]
struct ModeMention {
    found: bool,
}

impl<'ast> Visit<'ast> for ModeMention {
    fn visit_expr_method_call(&mut self, node: &'ast syn::ExprMethodCall) {
        if MODE_METHODS.iter().any(|name| node.method == name) {
            self.found = true;
        }
        visit::visit_expr_method_call(self, node);
    }

    fn visit_path(&mut self, node: &'ast syn::Path) {
        if node
            .segments
            .iter()
            .any(|segment| MODE_TYPES.iter().any(|name| segment.ident == name))
        {
            self.found = true;
        }
        visit::visit_path(self, node);
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn breaches(source: &str) -> Vec<(Rule, String)> {
        let file = syn::parse_file(source).unwrap_or_else(|err| panic!("fixture parses: {err}"));
        check(&file)
    }

    #[rstest]
    #[case::if_on_mode_query(
        "impl A { fn bills(&self) { if self.core.dispatcher.is_fake() { return; } } }",
        "`if` on the data mode in `bills`"
    )]
    #[case::if_on_mode_value(
        "fn stats(mode: M) { if mode == DataMode::Real {} }",
        "`if` on the data mode in `stats`"
    )]
    #[case::match_on_mode(
        "fn stats(c: &C) { match c.mode() { _ => {} } }",
        "`match` on the data mode in `stats`"
    )]
    #[case::match_arm_patterns(
        "fn stats(d: &D) { match d { Dispatcher::Fake => {} _ => {} } }",
        "`match` on the data mode in `stats`"
    )]
    fn mode_branches_are_reported(#[case] source: &str, #[case] detail: &str) {
        assert_eq!(
            breaches(source),
            vec![(Rule::ModeBranch, detail.to_owned())]
        );
    }

    #[test]
    fn transport_calls_are_reported() {
        let found = breaches(
            "impl A { async fn bills(&self) { self.core.transport.request_json(req).await; } }",
        );
        assert_eq!(
            found,
            vec![(
                Rule::DirectTransport,
                "`.request_json(..)` bypasses the dispatcher in `bills`".to_owned()
            )]
        );
    }

    #[rstest]
    #[case::dispatch_call("fn f(c: &C) { c.dispatch(req, || demo.bills()); }")]
    #[case::dispatcher_construction("fn f() { let d = Dispatcher::for_mode(m, t, x); }")]
    #[case::unrelated_match("fn f(r: Role) { match r { Role::Admin => {} _ => {} } }")]
    #[case::provenance_if("fn f(r: &R) { if r.is_real_data { log(); } }")]
    #[case::test_module("#[cfg(test)] mod tests { fn f(m: M) { if m.is_real() {} } }")]
    fn compliant_code_passes(#[case] source: &str) {
        assert!(breaches(source).is_empty());
    }
}
