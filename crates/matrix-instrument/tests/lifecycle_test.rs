//! Lifecycle pass: hook insertion, append, idempotency, and the component gate.

mod common;

use common::*;
use matrix_core::config::{InstrumentConfig, LifecycleConfig, LifecycleScope};
use matrix_instrument::ast::*;
use matrix_instrument::codegen::print_program;
use matrix_instrument::{Build, SourceUnit};

const DID_MOUNT: &str = "componentDidMount";
const WILL_UNMOUNT: &str = "componentWillUnmount";

/// `class <name> extends <base> { <hooks with one raw stmt each>; render() {...} }`
fn component_unit(name: &str, base: Expr, hooks: &[&str]) -> SourceUnit {
    let mut tree = TreeBuilder::new();
    let mut members: Vec<ClassMember> = hooks
        .iter()
        .map(|hook| tree.method(hook, vec![raw("this.track();")]))
        .collect();
    let view = tree.element("View", vec![], vec![]);
    members.push(render_method(&mut tree, view));
    let class = tree.class(Some(name), Some(base), members);
    SourceUnit::new(
        "src/screens/Home.js",
        Program {
            body: vec![Stmt::Class(class)],
        },
    )
}

fn assert_hooks_logged_once(unit: &SourceUnit) {
    let class = class_at(&unit.program, 0);
    for hook in [DID_MOUNT, WILL_UNMOUNT] {
        let methods = methods_named(class, hook);
        assert_eq!(methods.len(), 1, "{hook} must exist exactly once");
        assert_eq!(log_count(&methods[0].body, hook), 1, "{hook} must log once");
    }
}

#[test]
fn test_missing_hooks_are_inserted_first() {
    let mut unit = component_unit("Home", Expr::ident("Component"), &[]);
    let report = Build::default().instrument_file(&mut unit);

    assert_eq!(report.hooks_inserted, 2);
    assert_eq!(report.hooks_appended, 0);
    let class = class_at(&unit.program, 0);
    let names: Vec<&str> = class
        .body
        .iter()
        .filter_map(|m| match m {
            ClassMember::Method(m) => Some(m.name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(names, vec![WILL_UNMOUNT, DID_MOUNT, "render"]);

    let did_mount = methods_named(class, DID_MOUNT)[0];
    assert_eq!(did_mount.body.len(), 1);
    assert_eq!(
        record_of(&did_mount.body[0]),
        vec![
            ("fullFileName".to_string(), "src/screens/Home.js".to_string()),
            ("elementType".to_string(), "function".to_string()),
            ("nodeName".to_string(), DID_MOUNT.to_string()),
        ]
    );
}

#[test]
fn test_existing_hook_gets_log_appended_last() {
    let mut unit = component_unit("Home", Expr::ident("Component"), &[DID_MOUNT]);
    let report = Build::default().instrument_file(&mut unit);

    assert_eq!(report.hooks_appended, 1);
    assert_eq!(report.hooks_inserted, 1);
    let did_mount = methods_named(class_at(&unit.program, 0), DID_MOUNT)[0];
    assert_eq!(did_mount.body.len(), 2);
    assert_eq!(did_mount.body[0], raw("this.track();"));
    assert_eq!(log_count(&did_mount.body[1..], DID_MOUNT), 1);
}

#[test]
fn test_instrumenting_twice_is_idempotent() {
    for hooks in [&[][..], &[DID_MOUNT][..], &[DID_MOUNT, WILL_UNMOUNT][..]] {
        let mut unit = component_unit("Home", Expr::ident("Component"), hooks);
        Build::default().instrument_file(&mut unit);
        let once = print_program(&unit.program);

        let second = Build::default().instrument_file(&mut unit);
        assert_eq!(second.hooks_appended + second.hooks_inserted, 0, "hooks: {hooks:?}");
        assert_eq!(print_program(&unit.program), once);
        assert_hooks_logged_once(&unit);
    }
}

#[test]
fn test_same_build_rerun_does_not_duplicate() {
    let build = Build::default();
    let mut unit = component_unit("Home", Expr::ident("PureComponent"), &[WILL_UNMOUNT]);
    build.instrument_file(&mut unit);
    build.instrument_file(&mut unit);
    assert_hooks_logged_once(&unit);
}

#[test]
fn test_member_base_class_is_recognized() {
    let base = Expr::member(Expr::ident("React"), "Component");
    let mut unit = component_unit("Home", base, &[]);
    let report = Build::default().instrument_file(&mut unit);
    assert_eq!(report.hooks_inserted, 2);
    assert_hooks_logged_once(&unit);
}

#[test]
fn test_non_component_classes_are_untouched() {
    let mut plain = component_unit("Store", Expr::ident("EventEmitter"), &[DID_MOUNT]);
    let before = print_program(&plain.program);
    let report = Build::default().instrument_file(&mut plain);
    assert!(report.is_unchanged());
    assert_eq!(print_program(&plain.program), before);

    let mut tree = TreeBuilder::new();
    let class = tree.class(Some("Util"), None, vec![]);
    let mut unit = SourceUnit::new("src/util.js", Program { body: vec![Stmt::Class(class)] });
    assert!(Build::default().instrument_file(&mut unit).is_unchanged());
}

#[test]
fn test_class_expression_is_instrumented() {
    let mut tree = TreeBuilder::new();
    let class = tree.class(None, Some(Expr::ident("Component")), vec![]);
    let mut unit = SourceUnit::new(
        "src/Card.js",
        Program {
            body: vec![Stmt::VarDecl {
                kind: VarKind::Const,
                name: "Card".into(),
                init: Some(Expr::Class(Box::new(class))),
            }],
        },
    );
    let report = Build::default().instrument_file(&mut unit);
    assert_eq!(report.hooks_inserted, 2);

    let Stmt::VarDecl {
        init: Some(Expr::Class(class)),
        ..
    } = &unit.program.body[0]
    else {
        panic!("declaration changed shape");
    };
    assert_eq!(methods_named(class, DID_MOUNT).len(), 1);
    assert_eq!(methods_named(class, WILL_UNMOUNT).len(), 1);
}

#[test]
fn test_static_hook_does_not_count_as_lifecycle_method() {
    let mut unit = component_unit("Home", Expr::ident("Component"), &[]);
    if let Stmt::Class(class) = &mut unit.program.body[0] {
        class.body.push(ClassMember::Method(ClassMethod {
            id: NodeId::default(),
            kind: MethodKind::Method,
            name: DID_MOUNT.into(),
            params: vec![],
            body: vec![],
            is_static: true,
            is_async: false,
        }));
    }
    let report = Build::default().instrument_file(&mut unit);
    assert_eq!(report.hooks_inserted, 2);
    let statics: Vec<_> = methods_named(class_at(&unit.program, 0), DID_MOUNT)
        .into_iter()
        .filter(|m| m.is_static)
        .collect();
    assert_eq!(statics.len(), 1);
    assert!(statics[0].body.is_empty());
}

#[test]
fn test_allow_list_gate() {
    let config = InstrumentConfig {
        lifecycle: LifecycleConfig {
            scope: Some(LifecycleScope::AllowList),
            tracked_components: vec!["Home".into()],
        },
        ..Default::default()
    };
    let build = Build::new(config);

    let mut home = component_unit("Home", Expr::ident("Component"), &[]);
    let mut other = component_unit("Settings", Expr::ident("Component"), &[]);
    assert_eq!(build.instrument_file(&mut home).hooks_inserted, 2);
    assert!(build.instrument_file(&mut other).is_unchanged());

    let mut tree = TreeBuilder::new();
    let anonymous = tree.class(None, Some(Expr::ident("Component")), vec![]);
    let mut unit = SourceUnit::new(
        "src/Anon.js",
        Program {
            body: vec![Stmt::Export {
                default: true,
                declaration: Box::new(Stmt::Class(anonymous)),
            }],
        },
    );
    assert!(build.instrument_file(&mut unit).is_unchanged());
}

#[test]
fn test_nested_component_inside_method_is_instrumented() {
    let mut tree = TreeBuilder::new();
    let inner = tree.class(Some("Inner"), Some(Expr::ident("Component")), vec![]);
    let factory = tree.method("build", vec![Stmt::Return { argument: Some(Expr::Class(Box::new(inner))) }]);
    let outer = tree.class(Some("Outer"), Some(Expr::ident("Component")), vec![factory]);
    let mut unit = SourceUnit::new("src/Outer.js", Program { body: vec![Stmt::Class(outer)] });

    let report = Build::default().instrument_file(&mut unit);
    assert_eq!(report.hooks_inserted, 4);
}
