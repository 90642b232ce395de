//! Source extraction for JS/TS action and view files.
//!
//! One pre-order pass over the OXC AST collects two things:
//! - action identifiers passed to the trigger functions (`executeAction`
//!   always; `useExecuteAction` and `useExecuteActionLazy` in view mode),
//!   with one-hop resolution of string literals bound to local variables;
//! - raw module specifiers from static imports, `require(...)` calls, and
//!   dynamic `import(...)` expressions.

use std::collections::HashMap;
use std::path::Path;

use oxc_allocator::Allocator;
use oxc_ast::ast::*;
use oxc_ast_visit::Visit;
use oxc_parser::Parser;
use oxc_span::SourceType;

use crate::types::TargetType;

/// Everything extracted from a single file in one pass.
#[derive(Clone, Debug, Default)]
pub struct SourceAnalysis {
    /// Action identifiers in call order, deduplicated.
    pub actions: Vec<String>,
    /// Raw import specifiers in source order, deduplicated. Not yet resolved
    /// to paths; external packages are filtered out by the resolver.
    pub imports: Vec<String>,
}

/// Parse `content` and extract action calls and import specifiers.
///
/// Parser errors are tolerated: OXC yields a partial AST, and the extraction
/// runs over whatever was recovered. Only a parser panic degrades to an empty
/// analysis.
pub fn analyze_source(content: &str, path: &Path, mode: TargetType) -> SourceAnalysis {
    let allocator = Allocator::default();

    // Only enable JSX for .tsx/.jsx files to avoid conflicts with TypeScript
    // generics (`const fn = <T>(...) =>` parses as a JSX tag with JSX on).
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let is_jsx_file = ext == "tsx" || ext == "jsx";
    let source_type = SourceType::from_path(path)
        .unwrap_or_default()
        .with_typescript(true)
        .with_jsx(is_jsx_file);

    let ret = Parser::new(&allocator, content, source_type).parse();
    if ret.panicked {
        eprintln!(
            "[actiongraph][warn] parser gave up on {}; treating file as empty",
            path.display()
        );
        return SourceAnalysis::default();
    }
    if !ret.errors.is_empty() && std::env::var("ACTIONGRAPH_VERBOSE").is_ok() {
        eprintln!(
            "[actiongraph][debug] {} parser errors in {} (partial AST used)",
            ret.errors.len(),
            path.display()
        );
    }

    let mut visitor = SourceVisitor {
        mode,
        actions: Vec::new(),
        imports: Vec::new(),
        aliases: HashMap::new(),
    };
    visitor.visit_program(&ret.program);

    SourceAnalysis {
        actions: visitor.actions,
        imports: visitor.imports,
    }
}

struct SourceVisitor {
    mode: TargetType,
    actions: Vec<String>,
    imports: Vec<String>,
    /// Declaration-time bindings of string literals to local variable names.
    /// Re-assignments after declaration are not tracked.
    aliases: HashMap<String, String>,
}

impl SourceVisitor {
    fn is_trigger(&self, name: &str) -> bool {
        match name {
            "executeAction" => true,
            "useExecuteAction" | "useExecuteActionLazy" => self.mode == TargetType::View,
            _ => false,
        }
    }

    fn push_action(&mut self, identifier: &str) {
        if !self.actions.iter().any(|a| a == identifier) {
            self.actions.push(identifier.to_string());
        }
    }

    fn push_import(&mut self, specifier: &str) {
        if !self.imports.iter().any(|i| i == specifier) {
            self.imports.push(specifier.to_string());
        }
    }

    fn handle_call<'a>(&mut self, call: &CallExpression<'a>) {
        let Expression::Identifier(ident) = &call.callee else {
            return;
        };
        let name = ident.name.as_str();

        if name == "require" {
            if let Some(Argument::StringLiteral(s)) = call.arguments.first() {
                self.push_import(&s.value);
            }
            return;
        }

        if !self.is_trigger(name) {
            return;
        }
        match call.arguments.first() {
            Some(Argument::StringLiteral(s)) => {
                let value = s.value.to_string();
                self.push_action(&value);
            }
            Some(Argument::Identifier(id)) => {
                // One-hop alias: only literal initializers are tracked.
                if let Some(value) = self.aliases.get(id.name.as_str()).cloned() {
                    self.push_action(&value);
                }
            }
            // Template strings, member access, and computed expressions are
            // dynamic; nothing can be extracted statically for that call site.
            _ => {}
        }
    }
}

impl<'a> Visit<'a> for SourceVisitor {
    fn visit_import_declaration(&mut self, decl: &ImportDeclaration<'a>) {
        self.push_import(decl.source.value.as_str());
    }

    fn visit_import_expression(&mut self, expr: &ImportExpression<'a>) {
        if let Expression::StringLiteral(s) = &expr.source {
            self.push_import(&s.value);
        }
        self.visit_expression(&expr.source);
        if let Some(opts) = &expr.options {
            self.visit_expression(opts);
        }
    }

    fn visit_variable_declarator(&mut self, decl: &VariableDeclarator<'a>) {
        if let BindingPattern::BindingIdentifier(id) = &decl.id
            && let Some(Expression::StringLiteral(s)) = &decl.init
        {
            self.aliases.insert(id.name.to_string(), s.value.to_string());
        }

        // Continue into children: the init expression may contain trigger
        // calls or dynamic imports.
        self.visit_binding_pattern(&decl.id);
        if let Some(init) = &decl.init {
            self.visit_expression(init);
        }
    }

    fn visit_call_expression(&mut self, call: &CallExpression<'a>) {
        // Callee and arguments may contain nested invocations.
        self.visit_arguments(&call.arguments);
        self.visit_expression(&call.callee);

        self.handle_call(call);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn extract(content: &str, mode: TargetType) -> SourceAnalysis {
        analyze_source(content, Path::new("src/test.ts"), mode)
    }

    #[test]
    fn test_no_call_sites_yields_empty_set() {
        let analysis = extract("export const answer = 42;", TargetType::Action);
        assert!(analysis.actions.is_empty());
        assert!(analysis.imports.is_empty());
    }

    #[test]
    fn test_literal_calls_in_order_deduplicated() {
        let content = r#"
            export default async () => {
                await executeAction("list-users");
                await executeAction("get-user", { id: 1 });
                await executeAction("list-users");
            };
        "#;
        let analysis = extract(content, TargetType::Action);
        assert_eq!(analysis.actions, vec!["list-users", "get-user"]);
    }

    #[test]
    fn test_alias_propagation_matches_literal() {
        let aliased = extract(
            r#"
            const target = "sync-inventory";
            executeAction(target);
            "#,
            TargetType::Action,
        );
        let literal = extract(r#"executeAction("sync-inventory");"#, TargetType::Action);
        assert_eq!(aliased.actions, literal.actions);
    }

    #[test]
    fn test_unbound_identifier_contributes_nothing() {
        let analysis = extract("executeAction(whoKnows);", TargetType::Action);
        assert!(analysis.actions.is_empty());
    }

    #[test]
    fn test_dynamic_shapes_contribute_nothing() {
        let content = r#"
            const suffix = "users";
            executeAction(`list-${suffix}`);
            executeAction(config.action);
            executeAction("real-action");
        "#;
        let analysis = extract(content, TargetType::Action);
        assert_eq!(analysis.actions, vec!["real-action"]);
    }

    #[test]
    fn test_view_hooks_only_recognized_in_view_mode() {
        let content = r#"
            const { data } = useExecuteAction("get-products");
            const [run] = useExecuteActionLazy("get-users");
            executeAction("update-category");
        "#;
        let view = analyze_source(content, Path::new("src/Form.tsx"), TargetType::View);
        assert_eq!(
            view.actions,
            vec!["get-products", "get-users", "update-category"]
        );

        let action = analyze_source(content, Path::new("src/Form.tsx"), TargetType::Action);
        assert_eq!(action.actions, vec!["update-category"]);
    }

    #[test]
    fn test_import_specifiers_collected() {
        let content = r#"
            import { Button } from "./Button";
            import helpers from "../utils/helpers";
            import { VStack } from "@chakra-ui/react";
            const legacy = require("./legacy");
            const lazy = import("./pages/Home");
        "#;
        let analysis = extract(content, TargetType::View);
        assert_eq!(
            analysis.imports,
            vec![
                "./Button",
                "../utils/helpers",
                "@chakra-ui/react",
                "./legacy",
                "./pages/Home"
            ]
        );
    }

    #[test]
    fn test_calls_inside_jsx_and_callbacks() {
        let content = r#"
            const Page = () => {
                const onSave = async () => {
                    await executeAction("update-settings", { theme: "dark" });
                };
                return <button onClick={onSave}>Save</button>;
            };
            export default Page;
        "#;
        let analysis = analyze_source(content, Path::new("src/Settings.tsx"), TargetType::View);
        assert_eq!(analysis.actions, vec!["update-settings"]);
    }
}
