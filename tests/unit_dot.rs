// tests/unit_dot.rs
//! DOT output for themed, consolidated graphs.

use cruisegraph_core::dot::{self, EmitOptions};
use cruisegraph_core::pipeline::{self, Collapse, ViewOptions};
use cruisegraph_core::report::{Dependency, Module, Rule, Severity};
use cruisegraph_core::theme::{CriteriaTheme, Theme};
use serde_json::json;

fn edge_lines(dot: &str) -> Vec<&str> {
    dot.lines().filter(|l| l.contains(" -> ")).map(str::trim).collect()
}

#[test]
fn scenario_dynamic_theme_only_styles_dynamic_edges() {
    let theme = Theme {
        dependencies: vec![CriteriaTheme::new(&[("dynamic", json!(true))], &[("style", "dashed")])
            .unwrap()],
        ..Theme::default()
    };
    let modules = vec![
        Module::new("src/a.ts")
            .with_dependency(Dependency::new("src/lazy.ts").dynamic(true))
            .with_dependency(Dependency::new("src/b.ts")),
        Module::new("src/b.ts"),
        Module::new("src/lazy.ts"),
    ];
    let dot = dot::emit(&modules, &theme, &EmitOptions::default()).unwrap();

    assert_eq!(
        edge_lines(&dot),
        [
            r#""src/a.ts" -> "src/lazy.ts" [style="dashed"]"#,
            r#""src/a.ts" -> "src/b.ts""#,
        ]
    );
}

#[test]
fn builtin_theme_does_not_dash_static_edges() {
    let modules = vec![Module::new("a.ts")
        .with_dependency(Dependency::new("b.ts").dynamic(true))
        .with_dependency(Dependency::new("c.ts"))];
    let dot = dot::emit(&modules, &Theme::builtin().unwrap(), &EmitOptions::default()).unwrap();
    let edges = edge_lines(&dot);
    assert!(edges[0].contains("style=\"dashed\""));
    assert!(!edges[1].contains("style="));
}

#[test]
fn consolidated_view_renders_box3d_cluster_free_nodes() {
    let modules = vec![
        Module::new("src/ui/a.ts").depends_on("src/core/b.ts"),
        Module::new("src/core/b.ts"),
        Module::new("main.ts").depends_on("src/ui/a.ts"),
    ];
    let collapsed =
        pipeline::optimize(&modules, &ViewOptions::new("", Collapse::Depth(2))).unwrap();
    let dot = dot::emit(&collapsed, &Theme::default(), &EmitOptions::default()).unwrap();

    assert!(dot.contains("subgraph \"cluster_src\" {"));
    assert!(dot.contains("\"src/core\" [label=\"core\" shape=\"box3d\" tooltip=\"core\"]"));
    assert!(dot.contains("\"src/ui\" [label=\"ui\" shape=\"box3d\" tooltip=\"ui\"]"));
    assert!(dot.contains("\"main.ts\" [label=\"main.ts\" tooltip=\"main.ts\"]"));
    assert_eq!(
        edge_lines(&dot),
        [r#""main.ts" -> "src/ui""#, r#""src/ui" -> "src/core""#]
    );
}

#[test]
fn every_leaf_id_is_a_module_source_and_every_cluster_a_prefix() {
    let modules = vec![
        Module::new("a/b/c.ts"),
        Module::new("a/b/d.ts"),
        Module::new("a/e.ts"),
        Module::new("f.ts"),
    ];
    let dot = dot::emit(&modules, &Theme::default(), &EmitOptions::default()).unwrap();

    for cluster in ["cluster_a", "cluster_a/b"] {
        assert_eq!(dot.matches(&format!("subgraph \"{cluster}\"")).count(), 1, "{cluster}");
    }
    for module in &modules {
        assert!(dot.contains(&format!("\"{}\" [", module.source)));
    }
    assert!(!dot.contains("cluster_f.ts"));
}

#[test]
fn links_and_rule_labels() {
    let modules = vec![Module::new("ui/a.ts").with_dependency(
        Dependency::new("ui/b.ts").with_rule(Rule::new("no-circular", Severity::Warn)),
    )];
    let options = EmitOptions {
        base_url: Some("https://github.com/org/repo/blob/main".into()),
        start_dir: "src".into(),
    };
    let dot = dot::emit(&modules, &Theme::builtin().unwrap(), &options).unwrap();

    assert!(dot.contains("URL=\"https://github.com/org/repo/blob/main/src/ui/a.ts\""));
    let edge = edge_lines(&dot)[0];
    assert!(edge.contains("xlabel=\"no-circular\""));
    assert!(edge.contains("color=\"orange\""));
}

#[test]
fn emission_is_deterministic() {
    let modules = vec![
        Module::new("x/a.ts").depends_on("x/b.ts").depends_on("y/c.ts"),
        Module::new("x/b.ts"),
        Module::new("y/c.ts").orphan(true),
    ];
    let theme = Theme::builtin().unwrap();
    let first = dot::emit(&modules, &theme, &EmitOptions::default()).unwrap();
    let second = dot::emit(&modules, &theme, &EmitOptions::default()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn collapsed_directory_with_dependencies_is_not_painted_orphan() {
    let modules = vec![
        Module::new("src/a.ts").orphan(true),
        Module::new("src/b.ts").depends_on("lib/x.ts"),
        Module::new("lib/x.ts"),
    ];
    let collapsed =
        pipeline::optimize(&modules, &ViewOptions::new("", Collapse::Depth(1))).unwrap();
    let dot = dot::emit(&collapsed, &Theme::builtin().unwrap(), &EmitOptions::default()).unwrap();

    let src = dot.lines().find(|l| l.trim_start().starts_with("\"src\" [")).unwrap();
    assert!(!src.contains("#ccffcc"), "{src}");
}
